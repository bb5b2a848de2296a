//! Piles of card identities.
//!
//! A `Pile` is an ordered sequence of `SuitRank`: index 0 is the bottom, the
//! last element is the top. Piles hold identities only; card records live in
//! the `DeckRepository`.
//!
//! Backed by `im::Vector`, so `clone()` is O(1) and yields an independent
//! value. Handing a pile to a snapshot never aliases the live pile.
//!
//! ```
//! use klondike_engine::core::{Rank, Suit, SuitRank};
//! use klondike_engine::zones::Pile;
//!
//! let mut pile = Pile::new();
//! pile.add(SuitRank::new(Suit::Clubs, Rank::Ace));
//! let snapshot = pile.clone();
//!
//! pile.add(SuitRank::new(Suit::Clubs, Rank::Two));
//! assert_eq!(snapshot.len(), 1);
//! assert_eq!(pile.len(), 2);
//! ```

use im::Vector;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::core::card::SuitRank;

/// Ordered stack of card identities.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pile {
    cards: Vector<SuitRank>,
}

impl Pile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pile bottom-to-top from an iterator.
    pub fn from_cards(cards: impl IntoIterator<Item = SuitRank>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// Put a card on top.
    pub fn add(&mut self, card: SuitRank) {
        self.cards.push_back(card);
    }

    /// Remove and return the card at `index`.
    ///
    /// Panics if `index` is out of bounds: removing a card that is not there
    /// means the card bookkeeping is already broken.
    pub fn remove_at(&mut self, index: usize) -> SuitRank {
        assert!(
            index < self.cards.len(),
            "Pile underflow: remove_at({}) on pile of {}",
            index,
            self.cards.len()
        );
        self.cards.remove(index)
    }

    /// Remove and return every card from `index` to the top.
    ///
    /// Panics if `index` is past the top.
    pub fn split_off(&mut self, index: usize) -> Pile {
        assert!(
            index <= self.cards.len(),
            "Pile underflow: split_off({}) on pile of {}",
            index,
            self.cards.len()
        );
        Pile {
            cards: self.cards.split_off(index),
        }
    }

    /// Replace the card at `index`, returning the old one.
    pub fn replace(&mut self, index: usize, card: SuitRank) -> SuitRank {
        assert!(index < self.cards.len(), "Pile replace out of bounds: {}", index);
        self.cards.set(index, card)
    }

    /// Top card, `None` if empty.
    #[must_use]
    pub fn last(&self) -> Option<SuitRank> {
        self.cards.back().copied()
    }

    /// Bottom card, `None` if empty.
    #[must_use]
    pub fn first(&self) -> Option<SuitRank> {
        self.cards.front().copied()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<SuitRank> {
        self.cards.get(index).copied()
    }

    #[must_use]
    pub fn index_of(&self, card: SuitRank) -> Option<usize> {
        self.cards.index_of(&card)
    }

    #[must_use]
    pub fn contains(&self, card: SuitRank) -> bool {
        self.index_of(card).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Cards bottom-to-top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = SuitRank> + '_ {
        self.cards.iter().copied()
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<SuitRank> {
        self.iter().collect()
    }
}

impl std::fmt::Display for Pile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[")?;
        for (i, card) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", card)?;
        }
        f.write_str("]")
    }
}

/// Fixed-size group of piles sharing a role (foundations, tableau columns).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PileGroup<const N: usize> {
    piles: [Pile; N],
}

impl<const N: usize> PileGroup<N> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            piles: std::array::from_fn(|_| Pile::new()),
        }
    }

    #[must_use]
    pub const fn pile_count(&self) -> usize {
        N
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Pile> {
        self.piles.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pile> {
        self.piles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Pile> {
        self.piles.iter_mut()
    }

    /// Total cards across the group.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.piles.iter().map(Pile::len).sum()
    }

    /// Locate a card as (pile index, position).
    #[must_use]
    pub fn find(&self, card: SuitRank) -> Option<(usize, usize)> {
        self.piles
            .iter()
            .enumerate()
            .find_map(|(i, pile)| pile.index_of(card).map(|pos| (i, pos)))
    }

    pub fn clear(&mut self) {
        for pile in &mut self.piles {
            pile.clear();
        }
    }
}

impl<const N: usize> Default for PileGroup<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Index<usize> for PileGroup<N> {
    type Output = Pile;

    fn index(&self, index: usize) -> &Pile {
        &self.piles[index]
    }
}

impl<const N: usize> IndexMut<usize> for PileGroup<N> {
    fn index_mut(&mut self, index: usize) -> &mut Pile {
        &mut self.piles[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{Rank, Suit};

    fn card(rank: Rank) -> SuitRank {
        SuitRank::new(Suit::Hearts, rank)
    }

    #[test]
    fn test_add_and_peek() {
        let mut pile = Pile::new();
        assert_eq!(pile.last(), None);
        assert_eq!(pile.first(), None);

        pile.add(card(Rank::Ace));
        pile.add(card(Rank::Two));

        assert_eq!(pile.first(), Some(card(Rank::Ace)));
        assert_eq!(pile.last(), Some(card(Rank::Two)));
        assert_eq!(pile.len(), 2);
    }

    #[test]
    fn test_remove_at() {
        let mut pile = Pile::from_cards([card(Rank::Ace), card(Rank::Two), card(Rank::Three)]);

        assert_eq!(pile.remove_at(1), card(Rank::Two));
        assert_eq!(pile.to_vec(), vec![card(Rank::Ace), card(Rank::Three)]);
    }

    #[test]
    #[should_panic(expected = "Pile underflow")]
    fn test_remove_from_empty_panics() {
        let mut pile = Pile::new();
        pile.remove_at(0);
    }

    #[test]
    fn test_split_off() {
        let mut pile = Pile::from_cards([card(Rank::Ace), card(Rank::Two), card(Rank::Three)]);
        let top = pile.split_off(1);

        assert_eq!(pile.to_vec(), vec![card(Rank::Ace)]);
        assert_eq!(top.to_vec(), vec![card(Rank::Two), card(Rank::Three)]);

        let none = pile.split_off(1);
        assert!(none.is_empty());
    }

    #[test]
    fn test_index_of() {
        let pile = Pile::from_cards([card(Rank::Ace), card(Rank::Two)]);
        assert_eq!(pile.index_of(card(Rank::Two)), Some(1));
        assert_eq!(pile.index_of(card(Rank::King)), None);
        assert!(pile.contains(card(Rank::Ace)));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut pile = Pile::from_cards([card(Rank::Ace)]);
        let copy = pile.clone();

        pile.remove_at(0);

        assert!(pile.is_empty());
        assert_eq!(copy.to_vec(), vec![card(Rank::Ace)]);
    }

    #[test]
    fn test_group_find_and_total() {
        let mut group: PileGroup<3> = PileGroup::new();
        group[0].add(card(Rank::Ace));
        group[2].add(card(Rank::Two));
        group[2].add(card(Rank::Three));

        assert_eq!(group.total_len(), 3);
        assert_eq!(group.find(card(Rank::Three)), Some((2, 1)));
        assert_eq!(group.find(card(Rank::King)), None);

        group.clear();
        assert_eq!(group.total_len(), 0);
    }

    #[test]
    fn test_display() {
        let pile = Pile::from_cards([card(Rank::Ace), card(Rank::Ten)]);
        assert_eq!(pile.to_string(), "[A♥ 10♥]");
    }
}
