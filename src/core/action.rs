//! Moves and their classification.
//!
//! A `Move` is a proposed transfer of a card (plus every card stacked above
//! it, for Tableau and Hand sources) from one spot to another. Moves are
//! transient: built per user action or autoplay step, never persisted.
//!
//! The `MoveType` of a move is derived from its spots on demand and never
//! stored, so classification has exactly one source of truth.

use serde::{Deserialize, Serialize};

use super::spot::{PlayfieldArea, PlayfieldSpot};
use crate::cards::Card;

/// The six areas a move can connect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveArea {
    Deck,
    Stock,
    Waste,
    Foundation,
    Tableau,
    Hand,
}

impl MoveArea {
    pub const ALL: [MoveArea; 6] = [
        MoveArea::Deck,
        MoveArea::Stock,
        MoveArea::Waste,
        MoveArea::Foundation,
        MoveArea::Tableau,
        MoveArea::Hand,
    ];

    /// `None` for the Invalid area.
    #[must_use]
    pub const fn from_area(area: PlayfieldArea) -> Option<MoveArea> {
        match area {
            PlayfieldArea::Deck => Some(MoveArea::Deck),
            PlayfieldArea::Stock => Some(MoveArea::Stock),
            PlayfieldArea::Waste => Some(MoveArea::Waste),
            PlayfieldArea::Foundation => Some(MoveArea::Foundation),
            PlayfieldArea::Tableau => Some(MoveArea::Tableau),
            PlayfieldArea::Hand => Some(MoveArea::Hand),
            PlayfieldArea::Invalid => None,
        }
    }

    #[must_use]
    pub const fn area(self) -> PlayfieldArea {
        match self {
            MoveArea::Deck => PlayfieldArea::Deck,
            MoveArea::Stock => PlayfieldArea::Stock,
            MoveArea::Waste => PlayfieldArea::Waste,
            MoveArea::Foundation => PlayfieldArea::Foundation,
            MoveArea::Tableau => PlayfieldArea::Tableau,
            MoveArea::Hand => PlayfieldArea::Hand,
        }
    }
}

/// Classification of a move by its (from, to) area pair.
///
/// 36 `Between` tags plus `None` for malformed pairs (either end Invalid).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveType {
    Between(MoveArea, MoveArea),
    None,
}

impl MoveType {
    /// Classify an area pair.
    #[must_use]
    pub fn classify(from: PlayfieldArea, to: PlayfieldArea) -> MoveType {
        match (MoveArea::from_area(from), MoveArea::from_area(to)) {
            (Some(from), Some(to)) => MoveType::Between(from, to),
            _ => MoveType::None,
        }
    }

    #[must_use]
    pub fn is_none(self) -> bool {
        self == MoveType::None
    }
}

impl std::fmt::Display for MoveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveType::Between(from, to) => {
                write!(f, "{}_TO_{}", from.area().name(), to.area().name())
            }
            MoveType::None => f.write_str("NONE"),
        }
    }
}

/// A proposed card transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// The subject card, as it was when the move was built.
    pub card: Card,

    pub from: PlayfieldSpot,

    pub to: PlayfieldSpot,

    /// Position of the subject in the source pile when a sub-stack moves
    /// with it. `None` means "wherever the subject is".
    pub substack_start: Option<usize>,
}

impl Move {
    /// Move `card` from its current spot to `to`.
    #[must_use]
    pub fn new(card: Card, to: PlayfieldSpot) -> Self {
        Self::between(card, card.spot, to)
    }

    /// Move with an explicit source spot.
    #[must_use]
    pub fn between(card: Card, from: PlayfieldSpot, to: PlayfieldSpot) -> Self {
        Self {
            card,
            from,
            to,
            substack_start: None,
        }
    }

    /// Mark the sub-stack start index in the source pile.
    #[must_use]
    pub fn with_substack(mut self, start: usize) -> Self {
        self.substack_start = Some(start);
        self
    }

    /// Derived classification.
    #[must_use]
    pub fn move_type(&self) -> MoveType {
        MoveType::classify(self.from.area, self.to.area)
    }

    /// A move out of the Hand back into the area the subject last left.
    ///
    /// Only the area is compared, not the pile: a card taken from tableau 2
    /// "returns" when dropped on tableau 5 too.
    #[must_use]
    pub fn is_return_from_hand(&self) -> bool {
        self.from.area == PlayfieldArea::Hand
            && self.card.previous_spot.area != PlayfieldArea::Invalid
            && self.card.previous_spot.area == self.to.area
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} -> {} ({})", self.card.id, self.from, self.to, self.move_type())
    }
}
