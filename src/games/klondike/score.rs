//! Scoring surface.
//!
//! The engine reports what happened as `ScoreEvent`s; a `ScoreKeeper` owns
//! all point and time bookkeeping. `StandardScoring` implements the usual
//! Windows-style point table, `NullScoreKeeper` ignores everything.

use serde::{Deserialize, Serialize};

use crate::core::action::{MoveArea, MoveType};

/// Move categories reported to the score keeper.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreEvent {
    /// One card drawn from stock to waste.
    StockToWaste,
    /// Whole waste turned back into the stock.
    WasteRecycled,
    /// A face-down tableau top turned face-up.
    TableauFlip,
    /// Any other applied move.
    Moved(MoveType),
}

/// Receiver of score events.
pub trait ScoreKeeper {
    fn record(&mut self, event: ScoreEvent);

    /// Called when a new game is dealt.
    fn reset(&mut self) {}
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullScoreKeeper;

impl ScoreKeeper for NullScoreKeeper {
    fn record(&mut self, _event: ScoreEvent) {}
}

/// Windows-style scoring.
///
/// | Event | Points |
/// |---|---|
/// | Waste to Tableau | +5 |
/// | Waste/Hand/Tableau to Foundation | +10 |
/// | Tableau flip | +5 |
/// | Foundation to Tableau | -15 |
/// | Waste recycled | -100 |
///
/// The score never drops below zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardScoring {
    pub score: i32,
    pub moves: u32,
    pub recycles: u32,
}

impl StandardScoring {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn points(event: ScoreEvent) -> i32 {
        use MoveArea::*;
        match event {
            ScoreEvent::StockToWaste => 0,
            ScoreEvent::WasteRecycled => -100,
            ScoreEvent::TableauFlip => 5,
            ScoreEvent::Moved(MoveType::Between(Waste, Tableau)) => 5,
            ScoreEvent::Moved(MoveType::Between(Waste | Hand | Tableau, Foundation)) => 10,
            ScoreEvent::Moved(MoveType::Between(Foundation, Tableau)) => -15,
            ScoreEvent::Moved(_) => 0,
        }
    }
}

impl ScoreKeeper for StandardScoring {
    fn record(&mut self, event: ScoreEvent) {
        self.score = (self.score + Self::points(event)).max(0);
        match event {
            ScoreEvent::WasteRecycled => self.recycles += 1,
            ScoreEvent::TableauFlip => {}
            ScoreEvent::StockToWaste | ScoreEvent::Moved(_) => self.moves += 1,
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}
