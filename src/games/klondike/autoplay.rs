//! Autoplay driver.
//!
//! One `tick` performs one step the suggestor proposes, re-validated by the
//! live game. The driver halts when the game is complete, when nothing is
//! left to suggest, when the stock would be recycled a second time without
//! any card having moved in between, or after `autoplay_max_ticks` ticks.

use serde::{Deserialize, Serialize};

use super::game::Klondike;
use super::score::ScoreKeeper;
use super::suggest::{MoveSuggestor, Suggestion};
use crate::core::action::Move;
use crate::rules::{KlondikeRules, RulesEngine};

/// Why autoplay stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Halt {
    Complete,
    NoMoves,
    /// A full pass through the stock changed nothing.
    Stalled,
    TickLimit,
}

/// Result of a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    Flipped(usize),
    Moved(Move),
    Drew,
    Recycled,
    Halted(Halt),
}

/// Drives a game one suggested step at a time.
#[derive(Clone, Debug, Default)]
pub struct Autoplay<R: RulesEngine = KlondikeRules> {
    suggestor: MoveSuggestor<R>,
    ticks: u32,
    recycled: bool,
    progress_since_recycle: bool,
}

impl<R: RulesEngine> Autoplay<R> {
    #[must_use]
    pub fn new(rules: R) -> Self {
        Self {
            suggestor: MoveSuggestor::new(rules),
            ticks: 0,
            recycled: false,
            progress_since_recycle: false,
        }
    }

    #[must_use]
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Forget tick count and stall tracking.
    pub fn reset(&mut self) {
        self.ticks = 0;
        self.recycled = false;
        self.progress_since_recycle = false;
    }

    pub fn tick<S: ScoreKeeper>(&mut self, game: &mut Klondike<S>) -> Tick {
        if self.suggestor.rules().is_complete(&game.snapshot()) {
            return self.halt(Halt::Complete);
        }
        if self.ticks >= game.config().autoplay_max_ticks {
            return self.halt(Halt::TickLimit);
        }
        let Some(suggestion) = self.suggestor.suggest(&game.snapshot(), game.deck()) else {
            return self.halt(Halt::NoMoves);
        };
        self.ticks += 1;

        match suggestion {
            Suggestion::Flip(column) if game.flip_tableau_top(column) => {
                self.progress_since_recycle = true;
                Tick::Flipped(column)
            }
            Suggestion::Play(mv) if game.try_move(mv) => {
                self.progress_since_recycle = true;
                Tick::Moved(mv)
            }
            Suggestion::Draw if game.draw_from_stock() => Tick::Drew,
            Suggestion::Recycle => {
                if self.recycled && !self.progress_since_recycle {
                    return self.halt(Halt::Stalled);
                }
                if !game.recycle_waste() {
                    return self.halt(Halt::NoMoves);
                }
                self.recycled = true;
                self.progress_since_recycle = false;
                Tick::Recycled
            }
            _ => self.halt(Halt::NoMoves),
        }
    }

    /// Tick until something halts the run.
    pub fn run_to_end<S: ScoreKeeper>(&mut self, game: &mut Klondike<S>) -> Halt {
        loop {
            if let Tick::Halted(halt) = self.tick(game) {
                return halt;
            }
        }
    }

    fn halt(&self, halt: Halt) -> Tick {
        log::debug!("autoplay halted after {} ticks: {:?}", self.ticks, halt);
        Tick::Halted(halt)
    }
}
