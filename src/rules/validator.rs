//! Move validation.
//!
//! `is_valid(snapshot, move)` is a total, pure function: it reads nothing but
//! its arguments and never panics on an illegal or malformed move. Any
//! pairing the table below does not approve is rejected.
//!
//! ## Algorithm
//!
//! 1. The subject must be where the move says it is. Stock, Waste and
//!    Foundation sources only give up their top card; a Hand source always
//!    moves the whole hand.
//! 2. Moves into the Hand are valid iff the hand is empty, the move does not
//!    come from the Stock, and the subject is face-up.
//! 3. Everything else is decided by an exhaustive match over the
//!    (from, to) area pair, combining `GameStateFlags` and `MoveStatusFlags`.
//!
//! Validation and application are separate steps. `validate` hands out a
//! `ValidatedMove` token, which is the only thing the safe apply path of the
//! live game accepts.

use super::engine::{KlondikeRules, RulesEngine};
use super::flags::{GameStateFlags, MoveStatusFlags};
use crate::core::action::{Move, MoveArea, MoveType};
use crate::core::card::{Rank, Suit};
use crate::core::spot::PlayfieldArea;
use crate::core::state::GameStateSnapshot;

/// A move that passed validation against some snapshot.
///
/// Only the rules module can create one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidatedMove(Move);

impl ValidatedMove {
    pub(crate) fn new(mv: Move) -> Self {
        Self(mv)
    }

    #[must_use]
    pub fn as_move(&self) -> &Move {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> Move {
        self.0
    }
}

/// Classify a move into its (from, to) tag.
#[must_use]
pub fn classify(mv: &Move) -> MoveType {
    mv.move_type()
}

/// Read the process and emptiness flags off a snapshot.
#[must_use]
pub fn game_state_flags(snapshot: &GameStateSnapshot) -> GameStateFlags {
    let process = snapshot.flags();
    let mut flags = GameStateFlags::empty();

    flags.set(GameStateFlags::HAND_IS_EMPTY, snapshot.hand().is_empty());
    flags.set(GameStateFlags::STOCK_IS_EMPTY, snapshot.stock().is_empty());
    flags.set(GameStateFlags::WASTE_IS_EMPTY, snapshot.waste().is_empty());
    flags.set(GameStateFlags::IS_DEALING, process.is_dealing);
    flags.set(GameStateFlags::IS_SHUFFLING, process.is_shuffling);
    flags.set(
        GameStateFlags::IS_COLLECTING_CARDS_TO_DECK,
        process.is_collecting_cards_to_deck,
    );
    flags.set(
        GameStateFlags::IS_RECYCLING_WASTE_TO_STOCK,
        process.is_recycling_waste_to_stock,
    );
    flags
}

/// Number of cards the move would carry, `None` if the subject is not where
/// the move says.
fn moved_run_len(snapshot: &GameStateSnapshot, mv: &Move) -> Option<usize> {
    let source = snapshot.pile(mv.from)?;
    let position = mv.substack_start.or_else(|| source.index_of(mv.card.id))?;
    if source.get(position) != Some(mv.card.id) {
        return None;
    }

    let top = source.len() - 1;
    match mv.from.area {
        PlayfieldArea::Stock | PlayfieldArea::Waste | PlayfieldArea::Foundation if position != top => None,
        PlayfieldArea::Hand if position != 0 => None,
        PlayfieldArea::Tableau | PlayfieldArea::Hand => Some(source.len() - position),
        _ => Some(1),
    }
}

/// Compute the destination/subject predicates for a move.
#[must_use]
pub fn move_status_flags(snapshot: &GameStateSnapshot, mv: &Move) -> MoveStatusFlags {
    let mut flags = MoveStatusFlags::empty();
    let Some(run_len) = moved_run_len(snapshot, mv) else {
        return flags;
    };
    let card = mv.card.id;
    let dest = snapshot.pile(mv.to);

    if let (PlayfieldArea::Foundation, Some(pile)) = (mv.to.area, dest) {
        let suit = Suit::from_index(mv.to.index);
        let accepts = match pile.last() {
            None => card.rank == Rank::Ace && Some(card.suit) == suit,
            Some(top) => card.builds_up_on(top),
        };
        flags.set(
            MoveStatusFlags::FOUNDATION_CAN_RECEIVE_CARD,
            accepts && run_len == 1 && mv.card.face_up,
        );
    }

    if let (PlayfieldArea::Tableau, Some(pile)) = (mv.to.area, dest) {
        let accepts = match pile.last() {
            None => card.is_king(),
            Some(top) => !snapshot.is_face_down(top) && card.builds_down_on(top),
        };
        flags.set(
            MoveStatusFlags::TABLEAU_CAN_RECEIVE_CARD,
            accepts && mv.card.face_up,
        );
    }

    flags.set(
        MoveStatusFlags::HAND_CAN_RECEIVE_CARD,
        snapshot.hand().is_empty() && mv.from.area != PlayfieldArea::Stock && mv.card.face_up,
    );
    flags.set(
        MoveStatusFlags::CARD_IS_RETURNING_FROM_HAND,
        mv.is_return_from_hand(),
    );
    flags
}

/// Is `mv` legal in `snapshot`?
#[must_use]
pub fn is_valid(snapshot: &GameStateSnapshot, mv: &Move) -> bool {
    if !mv.to.is_valid() || moved_run_len(snapshot, mv).is_none() {
        return false;
    }

    let status = move_status_flags(snapshot, mv);
    if mv.to.area == PlayfieldArea::Hand {
        return status.contains(MoveStatusFlags::HAND_CAN_RECEIVE_CARD);
    }

    let MoveType::Between(from, to) = classify(mv) else {
        return false;
    };
    let state = game_state_flags(snapshot);

    let hand_empty = state.contains(GameStateFlags::HAND_IS_EMPTY);
    let dealing = state.contains(GameStateFlags::IS_DEALING);
    let shuffling = state.contains(GameStateFlags::IS_SHUFFLING);
    let collecting = state.contains(GameStateFlags::IS_COLLECTING_CARDS_TO_DECK);
    let recycling = state.contains(GameStateFlags::IS_RECYCLING_WASTE_TO_STOCK);
    let foundation_ok = status.contains(MoveStatusFlags::FOUNDATION_CAN_RECEIVE_CARD);
    let tableau_ok = status.contains(MoveStatusFlags::TABLEAU_CAN_RECEIVE_CARD);
    let returning = status.contains(MoveStatusFlags::CARD_IS_RETURNING_FROM_HAND);

    use MoveArea::*;
    match (from, to) {
        (Deck, Deck) => shuffling,
        (Deck, Stock) => dealing,
        (Deck, Waste) => false,
        (Deck, Foundation) => false,
        (Deck, Tableau) => dealing,
        (Deck, Hand) => false,

        (Stock, Deck) => collecting,
        (Stock, Stock) => false,
        (Stock, Waste) => hand_empty,
        (Stock, Foundation) => false,
        (Stock, Tableau) => false,
        (Stock, Hand) => false,

        (Waste, Deck) => collecting,
        (Waste, Stock) => recycling,
        (Waste, Waste) => false,
        (Waste, Foundation) => foundation_ok,
        (Waste, Tableau) => tableau_ok,
        (Waste, Hand) => hand_empty,

        (Foundation, Deck) => collecting,
        (Foundation, Stock) => false,
        (Foundation, Waste) => false,
        (Foundation, Foundation) => foundation_ok,
        (Foundation, Tableau) => tableau_ok,
        (Foundation, Hand) => hand_empty,

        (Tableau, Deck) => collecting,
        (Tableau, Stock) => false,
        (Tableau, Waste) => false,
        (Tableau, Foundation) => foundation_ok,
        (Tableau, Tableau) => false,
        (Tableau, Hand) => hand_empty,

        (Hand, Deck) => collecting,
        (Hand, Stock) => false,
        (Hand, Waste) => returning,
        (Hand, Foundation) => foundation_ok || returning,
        (Hand, Tableau) => tableau_ok || returning,
        (Hand, Hand) => false,
    }
}

/// Validate and wrap a move for the safe apply path, under the standard
/// rules.
#[must_use]
pub fn validate(snapshot: &GameStateSnapshot, mv: &Move) -> Option<ValidatedMove> {
    KlondikeRules.validate(snapshot, mv)
}
