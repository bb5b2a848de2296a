//! Save and restore.
//!
//! A saved game is a handful of flat integer lists, one per pile, each entry
//! a card index (`suit * 13 + rank - 1`). Tableau entries carry the face
//! flag as an extra bit (`FACE_UP_BIT`); every other pile's face follows from
//! its area. Cards held in the hand are saved in the pile they were picked
//! up from.
//!
//! ```
//! use klondike_engine::core::GameConfig;
//! use klondike_engine::games::klondike::Klondike;
//!
//! let mut game = Klondike::new(GameConfig::default().with_seed(3));
//! game.new_game();
//!
//! let data = game.to_save_data();
//! let mut restored = Klondike::new(GameConfig::default());
//! restored.load(&data).unwrap();
//! assert_eq!(restored.pile_counts(), game.pile_counts());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::game::{Klondike, DEALT_CARDS, STOCK_CARDS};
use super::score::ScoreKeeper;
use crate::core::card::{Rank, Suit, SuitRank, CARD_COUNT};
use crate::core::spot::{FOUNDATION_COUNT, TABLEAU_COUNT};
use crate::core::state::Playfield;
use crate::zones::Pile;

/// Set on a tableau entry whose card is face-up.
pub const FACE_UP_BIT: i32 = 64;

pub type Result<T> = std::result::Result<T, LoadError>;

/// Why saved data was refused.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("save bytes could not be decoded: {0}")]
    Decode(#[from] bincode::Error),
    #[error("expected {expected} {what}, found {found}")]
    WrongCount {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("{what} holds {found} cards, at most {max} allowed")]
    Overfull {
        what: &'static str,
        max: usize,
        found: usize,
    },
    #[error("{code} is not a card")]
    BadCode { code: i32 },
    #[error("card {card} appears more than once")]
    Duplicate { card: SuitRank },
    #[error("foundation {index} is not an ascending run of its suit from the Ace")]
    BadFoundation { index: usize },
}

/// Flat-list encoding of a settled game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    /// Tableau cards in deal order.
    pub dealt_order: Vec<i32>,
    pub stock: Vec<i32>,
    pub waste: Vec<i32>,
    pub foundations: Vec<Vec<i32>>,
    /// With `FACE_UP_BIT` set on face-up cards.
    pub tableaus: Vec<Vec<i32>>,
}

fn encode(card: SuitRank) -> i32 {
    card.index() as i32
}

fn decode(code: i32) -> Result<SuitRank> {
    usize::try_from(code)
        .ok()
        .and_then(SuitRank::from_index)
        .ok_or(LoadError::BadCode { code })
}

/// Split a tableau entry into card and face.
fn decode_tableau(code: i32) -> Result<(SuitRank, bool)> {
    let face_up = code >= 0 && code & FACE_UP_BIT != 0;
    let card = decode(if face_up { code & !FACE_UP_BIT } else { code })?;
    Ok((card, face_up))
}

fn check_count(what: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(LoadError::WrongCount {
            what,
            expected,
            found,
        })
    }
}

fn check_max(what: &'static str, max: usize, found: usize) -> Result<()> {
    if found <= max {
        Ok(())
    } else {
        Err(LoadError::Overfull { what, max, found })
    }
}

impl SaveData {
    pub fn to_bytes(&self) -> bincode::Result<Vec<u8>> {
        bincode::serialize(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Check the layout without touching any game.
    pub fn validate(&self) -> Result<()> {
        self.decode_playfield().map(|_| ())
    }

    /// Decode into piles plus the tableau faces, validating as we go.
    fn decode_playfield(&self) -> Result<(Playfield, Vec<SuitRank>, Vec<SuitRank>)> {
        check_count("foundations", FOUNDATION_COUNT, self.foundations.len())?;
        check_count("tableau columns", TABLEAU_COUNT, self.tableaus.len())?;
        check_count("dealt cards", DEALT_CARDS, self.dealt_order.len())?;
        check_max("stock", STOCK_CARDS, self.stock.len())?;
        check_max("waste", STOCK_CARDS, self.waste.len())?;

        let mut dealt = Vec::with_capacity(DEALT_CARDS);
        let mut dealt_seen = [false; CARD_COUNT];
        for &code in &self.dealt_order {
            let card = decode(code)?;
            if std::mem::replace(&mut dealt_seen[card.index()], true) {
                return Err(LoadError::Duplicate { card });
            }
            dealt.push(card);
        }

        let mut seen = [false; CARD_COUNT];
        let mut mark = |card: SuitRank| {
            if std::mem::replace(&mut seen[card.index()], true) {
                Err(LoadError::Duplicate { card })
            } else {
                Ok(card)
            }
        };

        let mut field = Playfield::new();
        for &code in &self.stock {
            field.stock.add(mark(decode(code)?)?);
        }
        for &code in &self.waste {
            field.waste.add(mark(decode(code)?)?);
        }
        for (index, codes) in self.foundations.iter().enumerate() {
            let pile = &mut field.foundations[index];
            for (pos, &code) in codes.iter().enumerate() {
                let card = mark(decode(code)?)?;
                let expected = SuitRank::new(
                    Suit::from_index(index).ok_or(LoadError::BadFoundation { index })?,
                    Rank::ALL.get(pos).copied().ok_or(LoadError::BadFoundation { index })?,
                );
                if card != expected {
                    return Err(LoadError::BadFoundation { index });
                }
                pile.add(card);
            }
        }

        let mut face_up = Vec::new();
        for (index, codes) in self.tableaus.iter().enumerate() {
            for &code in codes {
                let (card, up) = decode_tableau(code)?;
                field.tableaus[index].add(mark(card)?);
                if up {
                    face_up.push(card);
                }
            }
        }

        check_count("cards", CARD_COUNT, field.total_cards())?;
        Ok((field, dealt, face_up))
    }
}

impl<S: ScoreKeeper> Klondike<S> {
    /// Encode the table. Held cards go back to the pile they came from.
    #[must_use]
    pub fn to_save_data(&self) -> SaveData {
        let mut field = self.playfield().clone();
        if let Some(first) = field.hand.first() {
            let origin = self.card(first).previous_spot;
            let held: Vec<SuitRank> = field.hand.iter().collect();
            field.hand.clear();
            if let Some(pile) = field.pile_mut(origin) {
                for card in held {
                    pile.add(card);
                }
            }
        }

        let codes = |pile: &Pile| pile.iter().map(encode).collect::<Vec<_>>();
        SaveData {
            dealt_order: self.dealt_order().iter().copied().map(encode).collect(),
            stock: codes(&field.stock),
            waste: codes(&field.waste),
            foundations: field.foundations.iter().map(codes).collect(),
            tableaus: field
                .tableaus
                .iter()
                .map(|pile| {
                    pile.iter()
                        .map(|card| {
                            let face = if self.card(card).face_up { FACE_UP_BIT } else { 0 };
                            encode(card) | face
                        })
                        .collect()
                })
                .collect(),
        }
    }

    /// Restore a saved table. On error the game is left as it was.
    pub fn load(&mut self, data: &SaveData) -> Result<()> {
        let (field, dealt, face_up) = data.decode_playfield()?;
        self.restore(field, dealt, |card| face_up.contains(&card));
        log::debug!(
            "loaded game: {} in stock, {} in waste",
            self.playfield().stock.len(),
            self.playfield().waste.len()
        );
        Ok(())
    }

    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let data = SaveData::from_bytes(bytes)?;
        self.load(&data)
    }

    /// Load `data`, or deal a fresh game if it is unusable.
    ///
    /// Returns whether the saved game was restored. A deck still in its
    /// canonical order is shuffled before the fallback deal.
    pub fn load_or_deal(&mut self, data: &SaveData) -> bool {
        match self.load(data) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("discarding saved game: {}", err);
                self.collect_cards_to_deck();
                if self.deck().is_in_default_order() {
                    self.shuffle();
                }
                self.deal();
                false
            }
        }
    }
}
