//! Live card records.
//!
//! A `Card` is the mutable record behind a `SuitRank`: face state plus where
//! the card is now and where it was immediately before its last relocation.
//! The previous spot lets a card picked up into the Hand be recognised when it
//! is put back where it came from.

use serde::{Deserialize, Serialize};

use crate::core::card::SuitRank;
use crate::core::spot::{PlayfieldArea, PlayfieldSpot};

/// Runtime state for one card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Identity (never changes).
    pub id: SuitRank,

    /// Is the face showing?
    pub face_up: bool,

    /// Current location.
    pub spot: PlayfieldSpot,

    /// Location held before the last relocation.
    pub previous_spot: PlayfieldSpot,
}

impl Card {
    /// A face-down card that is nowhere yet.
    #[must_use]
    pub fn new(id: SuitRank) -> Self {
        Self {
            id,
            face_up: false,
            spot: PlayfieldSpot::INVALID,
            previous_spot: PlayfieldSpot::INVALID,
        }
    }

    /// Record a relocation, remembering the spot it left.
    pub fn relocate(&mut self, to: PlayfieldSpot) {
        self.previous_spot = self.spot;
        self.spot = to;
    }

    /// Place and forget the previous spot (loading, resetting).
    pub fn place(&mut self, spot: PlayfieldSpot) {
        self.spot = spot;
        self.previous_spot = spot;
    }

    #[must_use]
    pub fn area(&self) -> PlayfieldArea {
        self.spot.area
    }

    #[must_use]
    pub fn is_in_hand(&self) -> bool {
        self.spot.area == PlayfieldArea::Hand
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.face_up {
            write!(f, "{}", self.id)
        } else {
            write!(f, "[{}]", self.id)
        }
    }
}
