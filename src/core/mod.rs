//! Core engine types: card identity, addressing, moves, RNG, configuration, state.
//!
//! This module holds the value types every other module speaks in. Nothing
//! here mutates a live game.

pub mod card;
pub mod spot;
pub mod action;
pub mod rng;
pub mod config;
pub mod state;

pub use card::{Color, Rank, Suit, SuitRank, CARD_COUNT};
pub use spot::{PlayfieldArea, PlayfieldSpot, FOUNDATION_COUNT, TABLEAU_COUNT};
pub use action::{Move, MoveArea, MoveType};
pub use rng::GameRng;
pub use config::{GameConfig, MAX_DIFFICULTY};
pub use state::{GameStateSnapshot, MovedCards, Playfield, ProcessFlags};
