//! Card identity: suits, ranks, and the `SuitRank` key.
//!
//! There are exactly 52 `SuitRank` values. Piles store `SuitRank`, never card
//! records, so a `SuitRank` is the only handle anything outside the
//! `DeckRepository` holds on a card.
//!
//! ## Canonical Order
//!
//! The canonical generation order is suit-major, rank-minor:
//! A♣ 2♣ .. K♣, A♠ .. K♠, A♦ .. K♦, A♥ .. K♥. `SuitRank::index()` is the
//! position in that order.
//!
//! ```
//! use klondike_engine::core::{Rank, Suit, SuitRank};
//!
//! let card = SuitRank::new(Suit::Spades, Rank::Ace);
//! assert_eq!(card.index(), 13);
//! assert_eq!(SuitRank::from_index(13), Some(card));
//! ```

use serde::{Deserialize, Serialize};

/// Number of distinct cards.
pub const CARD_COUNT: usize = 52;

/// Card suit. The discriminant doubles as the foundation index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Clubs = 0,
    Spades = 1,
    Diamonds = 2,
    Hearts = 3,
}

impl Suit {
    /// All suits in canonical order.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Spades, Suit::Diamonds, Suit::Hearts];

    /// Suit for a foundation index (0..4).
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Suit> {
        match index {
            0 => Some(Suit::Clubs),
            1 => Some(Suit::Spades),
            2 => Some(Suit::Diamonds),
            3 => Some(Suit::Hearts),
            _ => None,
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Suit::Clubs | Suit::Spades => Color::Black,
            Suit::Diamonds | Suit::Hearts => Color::Red,
        }
    }

    const fn symbol(self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
        }
    }
}

/// Card color, derived from the suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    Red,
}

/// Card rank. Ace is low (1), King is high (13).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Ace = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
}

impl Rank {
    /// All ranks, Ace to King.
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Rank from its numeric value (1..=13).
    #[must_use]
    pub fn from_value(value: u8) -> Option<Rank> {
        Self::ALL.get(usize::from(value).checked_sub(1)?).copied()
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// The rank directly above this one, `None` for King.
    #[must_use]
    pub fn next(self) -> Option<Rank> {
        Rank::from_value(self.value() + 1)
    }

    const fn symbol(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

/// Identity of one of the 52 cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SuitRank {
    pub suit: Suit,
    pub rank: Rank,
}

impl SuitRank {
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Position in the canonical generation order (0..52).
    #[must_use]
    pub const fn index(self) -> usize {
        self.suit.index() * 13 + (self.rank as usize - 1)
    }

    /// Inverse of [`SuitRank::index`].
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= CARD_COUNT {
            return None;
        }
        let suit = Suit::from_index(index / 13)?;
        let rank = Rank::ALL[index % 13];
        Some(Self { suit, rank })
    }

    /// All 52 cards in canonical order.
    pub fn all() -> impl Iterator<Item = SuitRank> {
        Suit::ALL
            .into_iter()
            .flat_map(|suit| Rank::ALL.into_iter().map(move |rank| SuitRank::new(suit, rank)))
    }

    #[must_use]
    pub const fn color(self) -> Color {
        self.suit.color()
    }

    #[must_use]
    pub fn is_ace(self) -> bool {
        self.rank == Rank::Ace
    }

    #[must_use]
    pub fn is_king(self) -> bool {
        self.rank == Rank::King
    }

    /// Can `self` go on a foundation whose top card is `top`?
    #[must_use]
    pub fn builds_up_on(self, top: SuitRank) -> bool {
        self.suit == top.suit && top.rank.next() == Some(self.rank)
    }

    /// Can `self` go on a tableau whose top card is `top`?
    #[must_use]
    pub fn builds_down_on(self, top: SuitRank) -> bool {
        self.color() != top.color() && self.rank.next() == Some(top.rank)
    }
}

impl std::fmt::Display for SuitRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank.symbol(), self.suit.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colors() {
        assert_eq!(Suit::Clubs.color(), Color::Black);
        assert_eq!(Suit::Spades.color(), Color::Black);
        assert_eq!(Suit::Diamonds.color(), Color::Red);
        assert_eq!(Suit::Hearts.color(), Color::Red);
    }

    #[test]
    fn test_all_is_canonical_and_distinct() {
        let all: Vec<_> = SuitRank::all().collect();
        assert_eq!(all.len(), CARD_COUNT);

        for (i, card) in all.iter().enumerate() {
            assert_eq!(card.index(), i);
            assert_eq!(SuitRank::from_index(i), Some(*card));
        }

        assert_eq!(all[0], SuitRank::new(Suit::Clubs, Rank::Ace));
        assert_eq!(all[51], SuitRank::new(Suit::Hearts, Rank::King));
        assert_eq!(SuitRank::from_index(52), None);
    }

    #[test]
    fn test_rank_order() {
        assert!(Rank::Ace < Rank::Two);
        assert!(Rank::Queen < Rank::King);
        assert_eq!(Rank::Ace.next(), Some(Rank::Two));
        assert_eq!(Rank::King.next(), None);
        assert_eq!(Rank::from_value(0), None);
        assert_eq!(Rank::from_value(13), Some(Rank::King));
        assert_eq!(Rank::from_value(14), None);
    }

    #[test]
    fn test_builds_up_on() {
        let ace = SuitRank::new(Suit::Spades, Rank::Ace);
        let two = SuitRank::new(Suit::Spades, Rank::Two);
        let two_hearts = SuitRank::new(Suit::Hearts, Rank::Two);

        assert!(two.builds_up_on(ace));
        assert!(!two_hearts.builds_up_on(ace));
        assert!(!ace.builds_up_on(two));
    }

    #[test]
    fn test_builds_down_on() {
        let red_six = SuitRank::new(Suit::Hearts, Rank::Six);
        let black_five = SuitRank::new(Suit::Clubs, Rank::Five);
        let red_seven = SuitRank::new(Suit::Diamonds, Rank::Seven);

        assert!(black_five.builds_down_on(red_six));
        assert!(!red_six.builds_down_on(red_seven));
        assert!(!red_six.builds_down_on(black_five));
    }

    #[test]
    fn test_display() {
        assert_eq!(SuitRank::new(Suit::Hearts, Rank::Ten).to_string(), "10♥");
        assert_eq!(SuitRank::new(Suit::Clubs, Rank::Ace).to_string(), "A♣");
    }

    #[test]
    fn test_serialization() {
        let card = SuitRank::new(Suit::Diamonds, Rank::Queen);
        let json = serde_json::to_string(&card).unwrap();
        let deserialized: SuitRank = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
    }
}
