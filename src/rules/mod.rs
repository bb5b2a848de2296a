//! Move legality.
//!
//! - `flags`: `GameStateFlags` and `MoveStatusFlags`
//! - `validator`: the pure `is_valid(snapshot, move)` state machine
//! - `engine`: the `RulesEngine` trait and the standard `KlondikeRules`
//!
//! Rule violations are reported as `false`/`None`, never as panics.

pub mod engine;
pub mod flags;
pub mod validator;

pub use engine::{KlondikeRules, RulesEngine};
pub use flags::{GameStateFlags, MoveStatusFlags};
pub use validator::{classify, game_state_flags, is_valid, move_status_flags, validate, ValidatedMove};
