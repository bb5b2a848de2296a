//! Playfield addressing.
//!
//! A `PlayfieldSpot` names a location on the table: an area, the pile within
//! that area, and the position within that pile. It describes both where a
//! card currently lies and where a move wants to put it.
//!
//! ## Index Layout
//!
//! - Foundation: `index` is the suit index (0..4)
//! - Tableau: `index` is the column (0..7)
//! - Stock, Waste, Hand, Deck: single-pile areas, `index` is always 0
//!
//! `sub_index` is the position inside the pile (0 = bottom).

use serde::{Deserialize, Serialize};

/// Number of foundation piles.
pub const FOUNDATION_COUNT: usize = 4;

/// Number of tableau columns.
pub const TABLEAU_COUNT: usize = 7;

/// A region of the playfield.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayfieldArea {
    Foundation,
    Tableau,
    Stock,
    Waste,
    Hand,
    Deck,
    /// Sentinel for "nowhere".
    Invalid,
}

impl PlayfieldArea {
    /// Number of piles in this area.
    #[must_use]
    pub const fn pile_count(self) -> usize {
        match self {
            PlayfieldArea::Foundation => FOUNDATION_COUNT,
            PlayfieldArea::Tableau => TABLEAU_COUNT,
            PlayfieldArea::Stock
            | PlayfieldArea::Waste
            | PlayfieldArea::Hand
            | PlayfieldArea::Deck => 1,
            PlayfieldArea::Invalid => 0,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PlayfieldArea::Foundation => "FOUNDATION",
            PlayfieldArea::Tableau => "TABLEAU",
            PlayfieldArea::Stock => "STOCK",
            PlayfieldArea::Waste => "WASTE",
            PlayfieldArea::Hand => "HAND",
            PlayfieldArea::Deck => "DECK",
            PlayfieldArea::Invalid => "INVALID",
        }
    }
}

/// A location descriptor: (area, pile index, position in pile).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayfieldSpot {
    pub area: PlayfieldArea,
    pub index: usize,
    pub sub_index: usize,
}

impl PlayfieldSpot {
    /// The "nowhere" spot.
    pub const INVALID: PlayfieldSpot = PlayfieldSpot {
        area: PlayfieldArea::Invalid,
        index: 0,
        sub_index: 0,
    };

    #[must_use]
    pub const fn new(area: PlayfieldArea, index: usize, sub_index: usize) -> Self {
        Self {
            area,
            index,
            sub_index,
        }
    }

    /// Spot on foundation `index`.
    #[must_use]
    pub const fn foundation(index: usize, sub_index: usize) -> Self {
        Self::new(PlayfieldArea::Foundation, index, sub_index)
    }

    /// Spot in tableau column `index`.
    #[must_use]
    pub const fn tableau(index: usize, sub_index: usize) -> Self {
        Self::new(PlayfieldArea::Tableau, index, sub_index)
    }

    /// Next free spot on top of a single-pile area holding `count` cards.
    ///
    /// Saves callers from knowing the pile depth layout:
    ///
    /// ```
    /// use klondike_engine::core::{PlayfieldArea, PlayfieldSpot};
    ///
    /// let spot = PlayfieldSpot::top_of(PlayfieldArea::Waste, 3);
    /// assert_eq!(spot.area, PlayfieldArea::Waste);
    /// assert_eq!(spot.sub_index, 3);
    /// ```
    #[must_use]
    pub const fn top_of(area: PlayfieldArea, count: usize) -> Self {
        Self::new(area, 0, count)
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.area != PlayfieldArea::Invalid && self.index < self.area.pile_count()
    }

    /// Same area and pile, ignoring the position.
    #[must_use]
    pub fn same_pile(self, other: PlayfieldSpot) -> bool {
        self.area == other.area && self.index == other.index
    }
}

impl Default for PlayfieldSpot {
    fn default() -> Self {
        Self::INVALID
    }
}

impl std::fmt::Display for PlayfieldSpot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.area {
            PlayfieldArea::Foundation | PlayfieldArea::Tableau => {
                write!(f, "{}[{}]:{}", self.area.name(), self.index, self.sub_index)
            }
            PlayfieldArea::Invalid => f.write_str("INVALID"),
            _ => write!(f, "{}:{}", self.area.name(), self.sub_index),
        }
    }
}
