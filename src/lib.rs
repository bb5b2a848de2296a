//! # klondike-engine
//!
//! Rules engine for Klondike solitaire: card identity, pile layout, move
//! legality, dealing and shuffling, a difficulty assistant, and greedy
//! autoplay.
//!
//! ## Design Principles
//!
//! 1. **Validation Is Pure**: `is_valid(snapshot, move)` reads nothing but
//!    its arguments. The live game hands out snapshots and only applies
//!    moves that came back as a `ValidatedMove`.
//!
//! 2. **Processes Are Moves**: collecting, shuffling, dealing and recycling
//!    are sequences of ordinary moves validated under a process flag.
//!
//! 3. **Presentation Stays Outside**: no rendering, animation, timers or
//!    disk I/O. Hosts drive the engine through input calls, queries,
//!    autoplay ticks and `SaveData`.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: piles are `im` vectors, so a snapshot
//!   of the whole table is an O(1) clone.
//!
//! - **Deterministic Randomness**: every shuffle and stacked deck draws from
//!   a ChaCha stream derived from `GameConfig::seed`.
//!
//! ## Modules
//!
//! - `core`: card identity, playfield addressing, moves, RNG, configuration, snapshots
//! - `zones`: piles and pile groups
//! - `cards`: card records and the deck repository
//! - `rules`: predicate flags, the validator and the `RulesEngine` trait
//! - `games`: the Klondike game, its assistant, suggestor, autoplay, persistence and scoring

pub mod core;
pub mod zones;
pub mod cards;
pub mod rules;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    Color, Rank, Suit, SuitRank, CARD_COUNT,
    PlayfieldArea, PlayfieldSpot, FOUNDATION_COUNT, TABLEAU_COUNT,
    Move, MoveArea, MoveType,
    GameRng, GameConfig, MAX_DIFFICULTY,
    GameStateSnapshot, MovedCards, Playfield, ProcessFlags,
};

pub use crate::zones::{Pile, PileGroup};

pub use crate::cards::{Card, DeckRepository, ShuffleStep};

pub use crate::rules::{
    GameStateFlags, MoveStatusFlags,
    KlondikeRules, RulesEngine, ValidatedMove,
};

pub use crate::games::klondike::{
    Klondike, PileCounts, PileRef,
    DifficultyAssistant,
    MoveSuggestor, Suggestion, Autoplay, Halt, Tick,
    SaveData, LoadError,
    ScoreEvent, ScoreKeeper, NullScoreKeeper, StandardScoring,
};
