//! Pile layout and immutable game-state snapshots.
//!
//! ## Playfield
//!
//! The `Playfield` is every pile on the table: the Deck staging pile, Stock,
//! Waste, Hand, four Foundations (by suit index) and seven Tableau columns.
//! Across all of them each of the 52 cards appears exactly once.
//!
//! ## GameStateSnapshot
//!
//! A value copy of the playfield plus the transient process flags
//! (dealing, shuffling, collecting, recycling) and the set of cards lying
//! face-down. Snapshots are built on demand
//! right before validating a move and thrown away afterwards. Piles are
//! persistent vectors, so taking a snapshot is O(1) and the live game can
//! never mutate one.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::{SuitRank, CARD_COUNT};
use super::spot::{PlayfieldArea, PlayfieldSpot, FOUNDATION_COUNT, TABLEAU_COUNT};
use crate::zones::{Pile, PileGroup};

/// Cards moved by a single transfer. A tableau run is at most 13 cards.
pub type MovedCards = SmallVec<[SuitRank; 13]>;

/// Transient process flags of the live game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProcessFlags {
    pub is_dealing: bool,
    pub is_shuffling: bool,
    pub is_collecting_cards_to_deck: bool,
    pub is_recycling_waste_to_stock: bool,
}

/// All piles on the table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Playfield {
    pub deck: Pile,
    pub stock: Pile,
    pub waste: Pile,
    pub hand: Pile,
    pub foundations: PileGroup<FOUNDATION_COUNT>,
    pub tableaus: PileGroup<TABLEAU_COUNT>,
}

impl Playfield {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The pile a spot refers to, `None` for invalid spots.
    #[must_use]
    pub fn pile(&self, spot: PlayfieldSpot) -> Option<&Pile> {
        if !spot.is_valid() {
            return None;
        }
        match spot.area {
            PlayfieldArea::Deck => Some(&self.deck),
            PlayfieldArea::Stock => Some(&self.stock),
            PlayfieldArea::Waste => Some(&self.waste),
            PlayfieldArea::Hand => Some(&self.hand),
            PlayfieldArea::Foundation => self.foundations.get(spot.index),
            PlayfieldArea::Tableau => self.tableaus.get(spot.index),
            PlayfieldArea::Invalid => None,
        }
    }

    pub fn pile_mut(&mut self, spot: PlayfieldSpot) -> Option<&mut Pile> {
        if !spot.is_valid() {
            return None;
        }
        match spot.area {
            PlayfieldArea::Deck => Some(&mut self.deck),
            PlayfieldArea::Stock => Some(&mut self.stock),
            PlayfieldArea::Waste => Some(&mut self.waste),
            PlayfieldArea::Hand => Some(&mut self.hand),
            PlayfieldArea::Foundation => Some(&mut self.foundations[spot.index]),
            PlayfieldArea::Tableau => Some(&mut self.tableaus[spot.index]),
            PlayfieldArea::Invalid => None,
        }
    }

    /// Next free spot on top of the pile `spot` names.
    #[must_use]
    pub fn top_spot(&self, spot: PlayfieldSpot) -> PlayfieldSpot {
        match self.pile(spot) {
            Some(pile) => PlayfieldSpot::new(spot.area, spot.index, pile.len()),
            None => PlayfieldSpot::INVALID,
        }
    }

    /// Every pile with its spot (sub-index 0).
    pub fn piles(&self) -> impl Iterator<Item = (PlayfieldSpot, &Pile)> {
        let singles = [
            (PlayfieldArea::Deck, &self.deck),
            (PlayfieldArea::Stock, &self.stock),
            (PlayfieldArea::Waste, &self.waste),
            (PlayfieldArea::Hand, &self.hand),
        ]
        .into_iter()
        .map(|(area, pile)| (PlayfieldSpot::top_of(area, 0), pile));

        let foundations = self
            .foundations
            .iter()
            .enumerate()
            .map(|(i, pile)| (PlayfieldSpot::foundation(i, 0), pile));

        let tableaus = self
            .tableaus
            .iter()
            .enumerate()
            .map(|(i, pile)| (PlayfieldSpot::tableau(i, 0), pile));

        singles.chain(foundations).chain(tableaus)
    }

    /// Where a card lies, with its position as the sub-index.
    #[must_use]
    pub fn locate(&self, card: SuitRank) -> Option<PlayfieldSpot> {
        self.piles().find_map(|(spot, pile)| {
            pile.index_of(card)
                .map(|pos| PlayfieldSpot::new(spot.area, spot.index, pos))
        })
    }

    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.piles().map(|(_, pile)| pile.len()).sum()
    }

    /// Exactly the 52 cards, each once.
    #[must_use]
    pub fn is_conserved(&self) -> bool {
        let mut seen = [false; CARD_COUNT];
        let mut count = 0;
        for (_, pile) in self.piles() {
            for card in pile.iter() {
                if std::mem::replace(&mut seen[card.index()], true) {
                    return false;
                }
                count += 1;
            }
        }
        count == CARD_COUNT
    }

    /// Move `card` (and, for Tableau or Hand sources, every card above it)
    /// from the pile at `from` to the top of the pile at `to`.
    ///
    /// Pure pile bookkeeping: no legality checks, no face or location
    /// updates. Panics if either spot is invalid or the card is not where
    /// `from` and `start` say it is.
    pub fn transfer(
        &mut self,
        card: SuitRank,
        from: PlayfieldSpot,
        to: PlayfieldSpot,
        start: Option<usize>,
    ) -> MovedCards {
        assert!(to.is_valid(), "Transfer of {} to invalid spot {}", card, to);

        let source = match self.pile_mut(from) {
            Some(pile) => pile,
            None => panic!("Transfer of {} from invalid spot {}", card, from),
        };
        let position = match start.or_else(|| source.index_of(card)) {
            Some(pos) => pos,
            None => panic!("Card {} not found in {}", card, from),
        };
        assert_eq!(
            source.get(position),
            Some(card),
            "Card {} not at position {} of {}",
            card,
            position,
            from
        );

        let moved: MovedCards = match from.area {
            PlayfieldArea::Tableau | PlayfieldArea::Hand => source.split_off(position).iter().collect(),
            _ => std::iter::once(source.remove_at(position)).collect(),
        };

        if let Some(dest) = self.pile_mut(to) {
            for &moved_card in &moved {
                dest.add(moved_card);
            }
        }
        moved
    }
}

/// Immutable view of the table used for move validation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameStateSnapshot {
    playfield: Playfield,
    flags: ProcessFlags,

    /// Bit `SuitRank::index()` set for every face-down card.
    face_down: u64,
}

impl GameStateSnapshot {
    /// Snapshot with every card face-up; see `with_face_down`.
    #[must_use]
    pub fn new(playfield: Playfield, flags: ProcessFlags) -> Self {
        Self {
            playfield,
            flags,
            face_down: 0,
        }
    }

    /// Mark `cards` as lying face-down.
    #[must_use]
    pub fn with_face_down(mut self, cards: impl IntoIterator<Item = SuitRank>) -> Self {
        for card in cards {
            self.face_down |= 1u64 << card.index();
        }
        self
    }

    #[must_use]
    pub fn is_face_down(&self, card: SuitRank) -> bool {
        self.face_down & (1u64 << card.index()) != 0
    }

    /// Snapshot of an empty table with no process running.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    #[must_use]
    pub fn flags(&self) -> ProcessFlags {
        self.flags
    }

    #[must_use]
    pub fn pile(&self, spot: PlayfieldSpot) -> Option<&Pile> {
        self.playfield.pile(spot)
    }

    #[must_use]
    pub fn deck(&self) -> &Pile {
        &self.playfield.deck
    }

    #[must_use]
    pub fn stock(&self) -> &Pile {
        &self.playfield.stock
    }

    #[must_use]
    pub fn waste(&self) -> &Pile {
        &self.playfield.waste
    }

    #[must_use]
    pub fn hand(&self) -> &Pile {
        &self.playfield.hand
    }

    #[must_use]
    pub fn foundation(&self, index: usize) -> &Pile {
        &self.playfield.foundations[index]
    }

    #[must_use]
    pub fn tableau(&self, index: usize) -> &Pile {
        &self.playfield.tableaus[index]
    }

    /// The table as it would be after `card` moved from `from` to `to`.
    ///
    /// Moved cards take the face of their arrival area: down on Stock and
    /// Deck, up on Waste, Hand and Foundation, unchanged on the Tableau.
    #[must_use]
    pub fn after_transfer(
        &self,
        card: SuitRank,
        from: PlayfieldSpot,
        to: PlayfieldSpot,
        start: Option<usize>,
    ) -> Self {
        let mut next = self.clone();
        let moved = next.playfield.transfer(card, from, to, start);
        for id in moved {
            let bit = 1u64 << id.index();
            match to.area {
                PlayfieldArea::Stock | PlayfieldArea::Deck => next.face_down |= bit,
                PlayfieldArea::Waste | PlayfieldArea::Hand | PlayfieldArea::Foundation => {
                    next.face_down &= !bit;
                }
                PlayfieldArea::Tableau | PlayfieldArea::Invalid => {}
            }
        }
        next
    }

    // === Synthetic States ===
    //
    // Builders for hand-made positions. The live game never calls these.

    #[must_use]
    pub fn with_flags(mut self, flags: ProcessFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn with_pile(mut self, spot: PlayfieldSpot, cards: &[SuitRank]) -> Self {
        if let Some(pile) = self.playfield.pile_mut(spot) {
            *pile = Pile::from_cards(cards.iter().copied());
        }
        self
    }

    #[must_use]
    pub fn with_foundation(self, index: usize, cards: &[SuitRank]) -> Self {
        self.with_pile(PlayfieldSpot::foundation(index, 0), cards)
    }

    #[must_use]
    pub fn with_tableau(self, index: usize, cards: &[SuitRank]) -> Self {
        self.with_pile(PlayfieldSpot::tableau(index, 0), cards)
    }

    #[must_use]
    pub fn with_area(self, area: PlayfieldArea, cards: &[SuitRank]) -> Self {
        self.with_pile(PlayfieldSpot::top_of(area, 0), cards)
    }
}
