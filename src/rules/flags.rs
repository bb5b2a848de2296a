//! Predicate sets computed per move.
//!
//! - `GameStateFlags`: plain read-outs of the snapshot
//! - `MoveStatusFlags`: predicates over the destination pile and the subject card

use bitflags::bitflags;

bitflags! {
    /// Read-outs of snapshot state.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct GameStateFlags: u8 {
        const HAND_IS_EMPTY = 1 << 0;
        const STOCK_IS_EMPTY = 1 << 1;
        const WASTE_IS_EMPTY = 1 << 2;
        const IS_DEALING = 1 << 3;
        const IS_SHUFFLING = 1 << 4;
        const IS_COLLECTING_CARDS_TO_DECK = 1 << 5;
        const IS_RECYCLING_WASTE_TO_STOCK = 1 << 6;
    }
}

bitflags! {
    /// Destination and subject predicates for one move.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct MoveStatusFlags: u8 {
        const FOUNDATION_CAN_RECEIVE_CARD = 1 << 0;
        const TABLEAU_CAN_RECEIVE_CARD = 1 << 1;
        const HAND_CAN_RECEIVE_CARD = 1 << 2;
        const CARD_IS_RETURNING_FROM_HAND = 1 << 3;
    }
}
