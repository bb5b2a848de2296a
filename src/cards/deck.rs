//! The deck repository: owner of all 52 card records.
//!
//! The `DeckRepository` keeps two orderings:
//! - **Card records** indexed by identity (`SuitRank::index()`), for O(1)
//!   lookup of a card's face state and location.
//! - **Physical order**: positions 0..52 used for dealing and shuffling, with
//!   an identity -> position index kept in sync on every swap.
//!
//! Card records are created once and never destroyed; a new game only
//! relabels them.
//!
//! ## Shuffling
//!
//! ```
//! use klondike_engine::cards::DeckRepository;
//! use klondike_engine::core::GameRng;
//!
//! let mut deck = DeckRepository::new();
//! assert!(deck.is_in_default_order());
//!
//! let mut rng = GameRng::new(42);
//! deck.shuffle_times(3, &mut rng);
//!
//! assert!(!deck.is_in_default_order());
//! assert!(DeckRepository::is_full_deck(deck.order()));
//! ```

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use super::instance::Card;
use crate::core::card::{SuitRank, CARD_COUNT};
use crate::core::rng::GameRng;

/// One half of a logged swap: `card` moved from position `from` to `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShuffleStep {
    pub card: SuitRank,
    pub from: usize,
    pub to: usize,
}

/// Owner of the 52 card records and the physical deck order.
#[derive(Clone, Debug)]
pub struct DeckRepository {
    /// Card records, indexed by `SuitRank::index()`.
    cards: Vec<Card>,

    /// Physical order: position -> identity.
    order: Vec<SuitRank>,

    /// Identity -> position in `order`.
    positions: FxHashMap<SuitRank, usize>,

    /// Swaps performed by the last shuffle, for animation.
    shuffle_log: Vec<ShuffleStep>,
}

impl DeckRepository {
    /// Create all 52 cards in canonical order, face-down and nowhere.
    #[must_use]
    pub fn new() -> Self {
        let order: Vec<SuitRank> = SuitRank::all().collect();
        let cards = order.iter().map(|&id| Card::new(id)).collect();
        let positions = order.iter().enumerate().map(|(i, &id)| (id, i)).collect();

        Self {
            cards,
            order,
            positions,
            shuffle_log: Vec::new(),
        }
    }

    /// Check that `order` holds each of the 52 cards exactly once.
    #[must_use]
    pub fn is_full_deck(order: &[SuitRank]) -> bool {
        if order.len() != CARD_COUNT {
            return false;
        }
        let distinct: FxHashSet<SuitRank> = order.iter().copied().collect();
        distinct.len() == CARD_COUNT
    }

    // === Card Records ===

    #[must_use]
    pub fn card(&self, id: SuitRank) -> &Card {
        &self.cards[id.index()]
    }

    pub fn card_mut(&mut self, id: SuitRank) -> &mut Card {
        &mut self.cards[id.index()]
    }

    /// All card records in canonical order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    // === Physical Order ===

    /// Physical order, position 0 first.
    #[must_use]
    pub fn order(&self) -> &[SuitRank] {
        &self.order
    }

    /// Position of a card in the physical order.
    ///
    /// Panics if the index has lost track of the card.
    #[must_use]
    pub fn position_of(&self, id: SuitRank) -> usize {
        match self.positions.get(&id) {
            Some(&pos) => pos,
            None => panic!("Card {} missing from deck position index", id),
        }
    }

    #[must_use]
    pub fn card_at(&self, position: usize) -> Option<SuitRank> {
        self.order.get(position).copied()
    }

    /// Compare the physical order against the canonical generation order.
    #[must_use]
    pub fn is_in_default_order(&self) -> bool {
        self.order.iter().enumerate().all(|(i, id)| id.index() == i)
    }

    /// Replace the physical order (stacked decks, restored games).
    ///
    /// Panics unless `order` is a permutation of the 52 cards.
    pub fn set_order(&mut self, order: Vec<SuitRank>) {
        assert!(
            Self::is_full_deck(&order),
            "Deck order must hold each of the 52 cards exactly once"
        );
        self.positions = order.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        self.order = order;
        self.shuffle_log.clear();
    }

    /// Restore the canonical generation order.
    pub fn reset_order(&mut self) {
        self.set_order(SuitRank::all().collect());
    }

    // === Shuffling ===

    /// One Fisher-Yates pass over the physical order.
    ///
    /// Each swap is appended to the shuffle log as two steps, and the
    /// position index is updated as the swap happens.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        for i in (1..self.order.len()).rev() {
            let j = rng.gen_range_usize(0..i + 1);
            if i != j {
                self.swap_positions(i, j);
            }
        }
    }

    /// `passes` Fisher-Yates passes, clearing the log first.
    pub fn shuffle_times(&mut self, passes: u32, rng: &mut GameRng) {
        self.shuffle_log.clear();
        for _ in 0..passes {
            self.shuffle(rng);
        }
        log::debug!(
            "shuffled deck: {} passes, {} logged steps",
            passes,
            self.shuffle_log.len()
        );
    }

    fn swap_positions(&mut self, a: usize, b: usize) {
        let card_a = self.order[a];
        let card_b = self.order[b];

        self.order.swap(a, b);
        self.positions.insert(card_a, b);
        self.positions.insert(card_b, a);

        self.shuffle_log.push(ShuffleStep {
            card: card_a,
            from: a,
            to: b,
        });
        self.shuffle_log.push(ShuffleStep {
            card: card_b,
            from: b,
            to: a,
        });
    }

    #[must_use]
    pub fn shuffle_log(&self) -> &[ShuffleStep] {
        &self.shuffle_log
    }
}

impl Default for DeckRepository {
    fn default() -> Self {
        Self::new()
    }
}
