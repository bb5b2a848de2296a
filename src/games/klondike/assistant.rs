//! Difficulty assistant: stacked decks and rubber-band stock draws.
//!
//! ## Stacked Decks
//!
//! `get_stacked_deck(difficulty)` starts from an *ideal* physical order and
//! perturbs it. The ideal order puts low cards (Aces first, colors
//! alternating) in the most accessible deal slots:
//!
//! 1. the seven face-up tableau slots,
//! 2. the stock, in draw order,
//! 3. the face-down tableau slots, shallowest first.
//!
//! Kings therefore end up at the bottom of the long columns. Walking the
//! positions from the back, each position is swapped with a random earlier
//! one with probability `difficulty / 10`, i.e. it keeps its ideal card with
//! probability `(10 - difficulty) / 10`. At difficulty 10 every position is
//! swapped, which is a plain Fisher-Yates shuffle.
//!
//! ## Unseen Pool
//!
//! Cards the player has not seen yet (face-down tableau, stock). A card
//! leaves the pool the first time it is revealed and never comes back, even
//! when the waste is recycled.
//!
//! When assistance is enabled and the natural stock top is of no use, the
//! assistant names the most helpful unseen card to swap in before the draw.
//! The player cannot tell, since both cards were hidden.

use rustc_hash::FxHashSet;
use std::cmp::Reverse;

use super::game::{DEALT_CARDS, STOCK_CARDS};
use crate::core::card::{Rank, Suit, SuitRank, CARD_COUNT};
use crate::core::config::MAX_DIFFICULTY;
use crate::core::rng::GameRng;
use crate::core::spot::TABLEAU_COUNT;
use crate::core::state::GameStateSnapshot;

/// Where a physical deck position lands after the deal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DealSlot {
    Tableau { column: usize, row: usize },
    /// `draw` = 0 for the first card drawn from the stock.
    Stock { draw: usize },
}

impl DealSlot {
    #[must_use]
    pub fn is_face_up(self) -> bool {
        matches!(self, DealSlot::Tableau { column, row } if column == row)
    }
}

/// Deal slot of every physical position, mirroring the deal order.
#[must_use]
pub fn deal_slots() -> Vec<DealSlot> {
    let mut slots = Vec::with_capacity(CARD_COUNT);
    for row in 0..TABLEAU_COUNT {
        for column in row..TABLEAU_COUNT {
            slots.push(DealSlot::Tableau { column, row });
        }
    }
    for position in DEALT_CARDS..CARD_COUNT {
        slots.push(DealSlot::Stock {
            draw: CARD_COUNT - 1 - position,
        });
    }
    debug_assert_eq!(slots.len() - DEALT_CARDS, STOCK_CARDS);
    slots
}

/// How useful a card is right now: 2 = foundation-playable,
/// 1 = tableau-playable, 0 = neither.
fn helpfulness(
    snapshot: &GameStateSnapshot,
    card: SuitRank,
    is_face_up: &impl Fn(SuitRank) -> bool,
) -> u8 {
    let foundation = snapshot.foundation(card.suit.index());
    let to_foundation = match foundation.last() {
        None => card.is_ace(),
        Some(top) => card.builds_up_on(top),
    };
    if to_foundation {
        return 2;
    }

    let to_tableau = snapshot.playfield().tableaus.iter().any(|pile| match pile.last() {
        None => card.is_king(),
        Some(top) => is_face_up(top) && card.builds_down_on(top),
    });
    u8::from(to_tableau)
}

/// Deck stacking and draw assistance.
#[derive(Clone, Debug)]
pub struct DifficultyAssistant {
    difficulty: u8,
    enabled: bool,
    unseen: FxHashSet<SuitRank>,
    substitutions: u32,
}

impl DifficultyAssistant {
    #[must_use]
    pub fn new(difficulty: u8, enabled: bool) -> Self {
        Self {
            difficulty: difficulty.min(MAX_DIFFICULTY),
            enabled,
            unseen: FxHashSet::default(),
            substitutions: 0,
        }
    }

    #[must_use]
    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: u8) {
        self.difficulty = difficulty.min(MAX_DIFFICULTY);
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Number of stock draws the assistant has rigged this game.
    #[must_use]
    pub fn substitutions(&self) -> u32 {
        self.substitutions
    }

    // === Stacked Deck ===

    /// The easiest physical order this assistant knows.
    #[must_use]
    pub fn ideal_order() -> Vec<SuitRank> {
        // Low ranks first, colors alternating within a rank.
        let suits = [Suit::Clubs, Suit::Diamonds, Suit::Spades, Suit::Hearts];
        let by_help: Vec<SuitRank> = Rank::ALL
            .iter()
            .flat_map(|&rank| suits.iter().map(move |&suit| SuitRank::new(suit, rank)))
            .collect();

        let slots = deal_slots();
        let mut positions: Vec<usize> = (0..CARD_COUNT).collect();
        positions.sort_by_key(|&pos| match slots[pos] {
            DealSlot::Tableau { column, row } if column == row => (0, column),
            DealSlot::Stock { draw } => (1, draw),
            DealSlot::Tableau { column, row } => (2, (column - row) * TABLEAU_COUNT + column),
        });

        let mut order = vec![by_help[0]; CARD_COUNT];
        for (card, &pos) in by_help.iter().zip(&positions) {
            order[pos] = *card;
        }
        order
    }

    /// A full 52-card physical order biased by difficulty.
    #[must_use]
    pub fn get_stacked_deck(&self, rng: &mut GameRng) -> Vec<SuitRank> {
        let mut order = Self::ideal_order();
        let swap_chance = f64::from(self.difficulty) / f64::from(MAX_DIFFICULTY);

        for i in (0..order.len()).rev() {
            if rng.gen_bool(swap_chance) {
                let j = rng.gen_range_usize(0..i + 1);
                order.swap(i, j);
            }
        }
        log::debug!("stacked deck at difficulty {}", self.difficulty);
        order
    }

    // === Unseen Pool ===

    /// Start a new pool.
    pub fn reset_unseen(&mut self, cards: impl IntoIterator<Item = SuitRank>) {
        self.unseen = cards.into_iter().collect();
        self.substitutions = 0;
    }

    /// The player has now seen `card`.
    pub fn reveal(&mut self, card: SuitRank) {
        self.unseen.remove(&card);
    }

    #[must_use]
    pub fn is_unseen(&self, card: SuitRank) -> bool {
        self.unseen.contains(&card)
    }

    #[must_use]
    pub fn unseen_count(&self) -> usize {
        self.unseen.len()
    }

    /// Choose an unseen card to draw instead of the natural stock top.
    ///
    /// `None` when assistance is off, the stock is empty, or the natural top
    /// is already playable. Among `candidates`, foundation-playable beats
    /// tableau-playable and lower ranks win ties.
    #[must_use]
    pub fn pick_substitute(
        &self,
        snapshot: &GameStateSnapshot,
        candidates: impl IntoIterator<Item = SuitRank>,
        is_face_up: impl Fn(SuitRank) -> bool,
    ) -> Option<SuitRank> {
        if !self.enabled {
            return None;
        }
        let top = snapshot.stock().last()?;
        if helpfulness(snapshot, top, &is_face_up) > 0 {
            return None;
        }

        candidates
            .into_iter()
            .filter(|&card| card != top && self.is_unseen(card))
            .map(|card| (helpfulness(snapshot, card, &is_face_up), card))
            .filter(|&(help, _)| help > 0)
            .max_by_key(|&(help, card)| (help, Reverse(card.rank), Reverse(card.index())))
            .map(|(_, card)| card)
    }

    /// Count a substitution the game carried out.
    pub fn record_substitution(&mut self) {
        self.substitutions += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::DeckRepository;
    use crate::core::spot::PlayfieldArea;

    #[test]
    fn test_deal_slots_shape() {
        let slots = deal_slots();
        assert_eq!(slots.len(), CARD_COUNT);
        assert_eq!(slots.iter().filter(|s| s.is_face_up()).count(), TABLEAU_COUNT);
        assert_eq!(slots[0], DealSlot::Tableau { column: 0, row: 0 });
        assert_eq!(slots[7], DealSlot::Tableau { column: 1, row: 1 });
        assert_eq!(slots[51], DealSlot::Stock { draw: 0 });
    }

    #[test]
    fn test_ideal_order_puts_aces_face_up() {
        let order = DifficultyAssistant::ideal_order();
        assert!(DeckRepository::is_full_deck(&order));

        let slots = deal_slots();
        for (pos, card) in order.iter().enumerate() {
            if card.is_ace() {
                assert!(slots[pos].is_face_up(), "{} should be face-up", card);
            }
        }
    }

    #[test]
    fn test_stacked_deck_difficulty_zero_is_ideal() {
        let assistant = DifficultyAssistant::new(0, false);
        let mut rng = GameRng::new(5);
        assert_eq!(assistant.get_stacked_deck(&mut rng), DifficultyAssistant::ideal_order());
    }

    #[test]
    fn test_stacked_deck_is_permutation() {
        for difficulty in 0..=MAX_DIFFICULTY {
            let assistant = DifficultyAssistant::new(difficulty, false);
            let mut rng = GameRng::new(u64::from(difficulty));
            assert!(DeckRepository::is_full_deck(&assistant.get_stacked_deck(&mut rng)));
        }
    }

    #[test]
    fn test_higher_difficulty_drifts_further() {
        let ideal = DifficultyAssistant::ideal_order();
        let displaced = |difficulty: u8| -> usize {
            let assistant = DifficultyAssistant::new(difficulty, false);
            (0..20)
                .map(|seed| {
                    let order = assistant.get_stacked_deck(&mut GameRng::new(seed));
                    order.iter().zip(&ideal).filter(|(a, b)| a != b).count()
                })
                .sum()
        };

        assert!(displaced(2) < displaced(10));
    }

    #[test]
    fn test_difficulty_clamped() {
        let assistant = DifficultyAssistant::new(42, false);
        assert_eq!(assistant.difficulty(), MAX_DIFFICULTY);
    }

    #[test]
    fn test_unseen_pool() {
        let mut assistant = DifficultyAssistant::new(5, true);
        let ace = SuitRank::new(Suit::Clubs, Rank::Ace);

        assistant.reset_unseen(SuitRank::all());
        assert_eq!(assistant.unseen_count(), CARD_COUNT);
        assert!(assistant.is_unseen(ace));

        assistant.reveal(ace);
        assert!(!assistant.is_unseen(ace));
        assert_eq!(assistant.unseen_count(), CARD_COUNT - 1);
    }

    #[test]
    fn test_pick_substitute_prefers_foundation_card() {
        let useless = SuitRank::new(Suit::Hearts, Rank::Nine);
        let ace = SuitRank::new(Suit::Spades, Rank::Ace);
        let king = SuitRank::new(Suit::Clubs, Rank::King);
        let snapshot = GameStateSnapshot::empty().with_area(PlayfieldArea::Stock, &[ace, king, useless]);

        let mut assistant = DifficultyAssistant::new(5, true);
        assistant.reset_unseen([useless, ace, king]);

        let pick = assistant.pick_substitute(&snapshot, [ace, king, useless], |_| true);
        assert_eq!(pick, Some(ace));
    }

    #[test]
    fn test_pick_substitute_skips_when_top_helps() {
        let ace = SuitRank::new(Suit::Spades, Rank::Ace);
        let ace_hearts = SuitRank::new(Suit::Hearts, Rank::Ace);
        let snapshot = GameStateSnapshot::empty().with_area(PlayfieldArea::Stock, &[ace, ace_hearts]);

        let mut assistant = DifficultyAssistant::new(5, true);
        assistant.reset_unseen([ace, ace_hearts]);

        assert_eq!(assistant.pick_substitute(&snapshot, [ace], |_| true), None);
    }

    #[test]
    fn test_pick_substitute_disabled() {
        let ace = SuitRank::new(Suit::Spades, Rank::Ace);
        let useless = SuitRank::new(Suit::Hearts, Rank::Nine);
        let snapshot = GameStateSnapshot::empty()
            .with_area(PlayfieldArea::Stock, &[ace, useless])
            .with_tableau(0, &[SuitRank::new(Suit::Clubs, Rank::Two)]);

        let mut assistant = DifficultyAssistant::new(5, false);
        assistant.reset_unseen([ace, useless]);

        assert_eq!(assistant.pick_substitute(&snapshot, [ace], |_| true), None);
    }

    #[test]
    fn test_pick_substitute_ignores_seen_cards() {
        let ace = SuitRank::new(Suit::Spades, Rank::Ace);
        let useless = SuitRank::new(Suit::Hearts, Rank::Nine);
        let snapshot = GameStateSnapshot::empty().with_area(PlayfieldArea::Stock, &[ace, useless]);

        let mut assistant = DifficultyAssistant::new(5, true);
        assistant.reset_unseen([useless]);

        assert_eq!(assistant.pick_substitute(&snapshot, [ace], |_| true), None);
    }
}
