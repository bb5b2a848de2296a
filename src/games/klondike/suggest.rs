//! Greedy move suggestion.
//!
//! ## Priority
//!
//! 0. Held cards: place them (foundation, then any other tableau column),
//!    or put them back.
//! 1. Turn over an exposed face-down tableau top.
//! 2. Waste or tableau top to its foundation.
//! 3. Waste top to a tableau column; a tableau run (starting at its
//!    lowest face-up card) picked up for a column that takes it.
//! 4. Draw from the stock.
//! 5. Recycle the waste.
//!
//! Every proposed move passes `RulesEngine::is_strictly_valid` against the
//! snapshot it was computed from. Tableau runs travel through the Hand, so
//! a run move is proposed as its pickup; the next suggestion places it.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, DeckRepository};
use crate::core::action::Move;
use crate::core::card::SuitRank;
use crate::core::spot::{PlayfieldArea, PlayfieldSpot, TABLEAU_COUNT};
use crate::core::state::GameStateSnapshot;
use crate::rules::{KlondikeRules, RulesEngine};

/// What to do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Suggestion {
    /// Turn the top of this tableau column face-up.
    Flip(usize),
    /// Apply this move.
    Play(Move),
    /// Draw one card from the stock.
    Draw,
    /// Turn the waste back into the stock.
    Recycle,
}

/// Greedy next-move search.
#[derive(Clone, Debug, Default)]
pub struct MoveSuggestor<R: RulesEngine = KlondikeRules> {
    rules: R,
}

impl<R: RulesEngine> MoveSuggestor<R> {
    #[must_use]
    pub fn new(rules: R) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Best next step for the table, `None` when nothing is left to try.
    ///
    /// `cards` supplies faces and previous spots, which the snapshot does
    /// not carry.
    #[must_use]
    pub fn suggest(&self, snapshot: &GameStateSnapshot, cards: &DeckRepository) -> Option<Suggestion> {
        if let Some(held) = snapshot.hand().first() {
            return self.place_held(snapshot, cards, *cards.card(held)).map(Suggestion::Play);
        }

        let exposed = (0..TABLEAU_COUNT).find(|&column| {
            snapshot
                .tableau(column)
                .last()
                .is_some_and(|top| !cards.card(top).face_up)
        });
        if let Some(column) = exposed {
            return Some(Suggestion::Flip(column));
        }

        if let Some(mv) = self.to_foundation(snapshot, cards) {
            return Some(Suggestion::Play(mv));
        }
        if let Some(mv) = self.to_tableau(snapshot, cards) {
            return Some(Suggestion::Play(mv));
        }
        if !snapshot.stock().is_empty() {
            return Some(Suggestion::Draw);
        }
        if !snapshot.waste().is_empty() {
            return Some(Suggestion::Recycle);
        }
        None
    }

    // === Candidates ===

    fn to_foundation(&self, snapshot: &GameStateSnapshot, cards: &DeckRepository) -> Option<Move> {
        let waste = snapshot.waste().last();
        let tableau_tops = (0..TABLEAU_COUNT).filter_map(|column| snapshot.tableau(column).last());

        waste
            .into_iter()
            .chain(tableau_tops)
            .map(|id| *cards.card(id))
            .filter(|card| card.face_up)
            .find_map(|card| {
                let to = PlayfieldSpot::foundation(card.id.suit.index(), 0);
                let mv = top_move(snapshot, card, to);
                self.rules.is_strictly_valid(snapshot, &mv).then_some(mv)
            })
    }

    fn to_tableau(&self, snapshot: &GameStateSnapshot, cards: &DeckRepository) -> Option<Move> {
        if let Some(top) = snapshot.waste().last() {
            let card = *cards.card(top);
            let direct = open_columns(snapshot, cards, None)
                .map(|column| top_move(snapshot, card, PlayfieldSpot::tableau(column, 0)))
                .find(|mv| self.rules.is_strictly_valid(snapshot, mv));
            if direct.is_some() {
                return direct;
            }
        }

        (0..TABLEAU_COUNT).find_map(|column| {
            let pile = snapshot.tableau(column);
            let start = pile.iter().position(|id| cards.card(id).face_up)?;
            let card = *cards.card(pile.get(start)?);
            if start == 0 && card.id.is_king() {
                return None;
            }

            let pickup = top_move(snapshot, card, PlayfieldSpot::top_of(PlayfieldArea::Hand, 0));
            if !self.rules.is_valid(snapshot, &pickup) {
                return None;
            }
            let held = snapshot.after_transfer(card.id, pickup.from, pickup.to, pickup.substack_start);
            let in_hand = lifted(card);

            let origin = Some(column);
            let fits = open_columns(&held, cards, origin).any(|target| {
                let placement = top_move(&held, in_hand, PlayfieldSpot::tableau(target, 0));
                self.rules.is_strictly_valid(&held, &placement)
            });
            fits.then_some(pickup)
        })
    }

    fn place_held(&self, snapshot: &GameStateSnapshot, cards: &DeckRepository, card: Card) -> Option<Move> {
        if snapshot.hand().len() == 1 {
            let home = top_move(snapshot, card, PlayfieldSpot::foundation(card.id.suit.index(), 0));
            if self.rules.is_strictly_valid(snapshot, &home) {
                return Some(home);
            }
        }

        let origin = (card.previous_spot.area == PlayfieldArea::Tableau).then_some(card.previous_spot.index);
        let placed = open_columns(snapshot, cards, origin)
            .map(|column| top_move(snapshot, card, PlayfieldSpot::tableau(column, 0)))
            .find(|mv| self.rules.is_strictly_valid(snapshot, mv));
        if placed.is_some() {
            return placed;
        }

        let back = top_move(snapshot, card, card.previous_spot);
        self.rules.is_valid(snapshot, &back).then_some(back)
    }
}

/// Move `card` from where it lies onto the top of the pile `to` names.
fn top_move(snapshot: &GameStateSnapshot, card: Card, to: PlayfieldSpot) -> Move {
    let dest = snapshot.playfield().top_spot(to);
    match snapshot.playfield().locate(card.id) {
        Some(from) => Move::between(card, from, dest).with_substack(from.sub_index),
        None => Move::between(card, card.spot, dest),
    }
}

/// The card as it will look once picked up.
fn lifted(mut card: Card) -> Card {
    card.relocate(PlayfieldSpot::top_of(PlayfieldArea::Hand, 0));
    card.face_up = true;
    card
}

/// Columns whose top is face-up or which are empty, except `skip`.
fn open_columns<'a>(
    snapshot: &'a GameStateSnapshot,
    cards: &'a DeckRepository,
    skip: Option<usize>,
) -> impl Iterator<Item = usize> + 'a {
    (0..TABLEAU_COUNT).filter(move |&column| {
        Some(column) != skip
            && snapshot
                .tableau(column)
                .last()
                .map_or(true, |top: SuitRank| cards.card(top).face_up)
    })
}
