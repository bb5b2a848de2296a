//! Piles of card identities.
//!
//! ## Key Types
//!
//! - `Pile`: ordered, value-semantics stack of `SuitRank` (last = top)
//! - `PileGroup<N>`: fixed set of piles sharing a role (foundations, tableaus)

pub mod pile;

pub use pile::{Pile, PileGroup};
