//! Rules engine trait.
//!
//! The live game, the move suggestor and the autoplay driver all ask a
//! `RulesEngine` whether a move is legal and whether the game is over. The
//! standard Klondike rules are `KlondikeRules`, a thin wrapper over the pure
//! validator functions.
//!
//! ## Implementation Notes
//!
//! - `is_valid` must be a pure function of its arguments
//! - `is_complete` must agree with the foundations alone

use super::validator::{self, ValidatedMove};
use crate::core::action::Move;
use crate::core::card::Rank;
use crate::core::spot::PlayfieldSpot;
use crate::core::state::GameStateSnapshot;

/// Rules engine trait.
pub trait RulesEngine {
    /// Is the move legal in this snapshot?
    fn is_valid(&self, snapshot: &GameStateSnapshot, mv: &Move) -> bool;

    /// Has the game reached its terminal, won state?
    fn is_complete(&self, snapshot: &GameStateSnapshot) -> bool;

    // === Convenience Methods ===

    /// Validate and wrap a move for the safe apply path.
    fn validate(&self, snapshot: &GameStateSnapshot, mv: &Move) -> Option<ValidatedMove> {
        if self.is_valid(snapshot, mv) {
            Some(ValidatedMove::new(*mv))
        } else {
            log::trace!("rejected move {}", mv);
            None
        }
    }

    /// Like `is_valid`, but a move out of the Hand only counts as a return
    /// when it goes back to the exact pile the card came from.
    ///
    /// Engine-generated moves use this so the area-only return override
    /// never lets them build an illegal stack.
    fn is_strictly_valid(&self, snapshot: &GameStateSnapshot, mv: &Move) -> bool {
        if mv.is_return_from_hand() && !mv.card.previous_spot.same_pile(mv.to) {
            let mut strict = *mv;
            strict.card.previous_spot = PlayfieldSpot::INVALID;
            return self.is_valid(snapshot, &strict);
        }
        self.is_valid(snapshot, mv)
    }
}

/// Standard Klondike rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KlondikeRules;

impl RulesEngine for KlondikeRules {
    fn is_valid(&self, snapshot: &GameStateSnapshot, mv: &Move) -> bool {
        validator::is_valid(snapshot, mv)
    }

    /// All four foundations hold 13 cards (Ace to King).
    fn is_complete(&self, snapshot: &GameStateSnapshot) -> bool {
        snapshot
            .playfield()
            .foundations
            .iter()
            .all(|pile| pile.len() == 13 && pile.last().map(|c| c.rank) == Some(Rank::King))
    }
}
