//! Card records and the deck repository.
//!
//! ## Key Types
//!
//! - `Card`: face state and location of one card
//! - `DeckRepository`: owns all 52 records plus the physical deck order
//! - `ShuffleStep`: one logged half-swap, for animating a shuffle

pub mod deck;
pub mod instance;

pub use deck::{DeckRepository, ShuffleStep};
pub use instance::Card;
