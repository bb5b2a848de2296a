//! Pointer input.
//!
//! A host forwards clicks and long presses on cards and piles; the game
//! decides whether that means drawing, flipping, picking up or placing.
//!
//! - Click on a card with an empty hand: draw if it sits on the stock, flip
//!   it if it is a face-down tableau top, otherwise pick it up (with the
//!   cards above it on the tableau).
//! - Click anywhere while holding cards: place them on the clicked pile, or
//!   put them back if the click was on a held card. Placements must be
//!   legal on their own; only a return to the exact origin pile skips the
//!   rules.
//! - Click on the empty stock: recycle the waste.
//! - Long press: send the card to its foundation, else to the first tableau
//!   column that takes it.

use super::game::{Klondike, PileRef};
use super::score::ScoreKeeper;
use crate::core::card::SuitRank;
use crate::core::spot::{PlayfieldArea, PlayfieldSpot, TABLEAU_COUNT};
use crate::rules::RulesEngine;

impl<S: ScoreKeeper> Klondike<S> {
    /// Returns whether anything happened.
    pub fn on_single_click_card(&mut self, id: SuitRank) -> bool {
        let card = *self.card(id);
        if !self.playfield().hand.is_empty() {
            return if card.is_in_hand() {
                self.return_hand()
            } else {
                self.place_hand(card.spot)
            };
        }

        let Some(pile) = self.playfield().pile(card.spot) else {
            return false;
        };
        let is_top = pile.last() == Some(id);
        match card.area() {
            PlayfieldArea::Stock => self.draw_from_stock(),
            PlayfieldArea::Tableau if !card.face_up => is_top && self.flip_tableau_top(card.spot.index),
            PlayfieldArea::Tableau => self.pick_up(id),
            PlayfieldArea::Waste | PlayfieldArea::Foundation if is_top => self.pick_up(id),
            _ => false,
        }
    }

    /// Returns whether anything happened.
    pub fn on_single_click_pile(&mut self, pile: PileRef) -> bool {
        let spot = pile.spot();
        if !spot.is_valid() {
            return false;
        }
        if !self.playfield().hand.is_empty() {
            return self.place_hand(spot);
        }
        match pile {
            PileRef::Stock if self.playfield().stock.is_empty() => self.recycle_waste(),
            PileRef::Stock => self.draw_from_stock(),
            _ => false,
        }
    }

    /// Send a face-up card to the best pile that takes it.
    pub fn on_long_press_card(&mut self, id: SuitRank) -> bool {
        let card = *self.card(id);
        if !card.face_up || !self.playfield().hand.is_empty() {
            return false;
        }

        let foundation = PlayfieldSpot::foundation(id.suit.index(), 0);
        if self.transfer(id, foundation) {
            return true;
        }
        (0..TABLEAU_COUNT)
            .map(|column| PlayfieldSpot::tableau(column, 0))
            .filter(|spot| !spot.same_pile(card.spot))
            .any(|spot| self.transfer(id, spot))
    }

    /// Put the held cards back where they came from.
    pub fn return_hand(&mut self) -> bool {
        let Some(held) = self.playfield().hand.first() else {
            return false;
        };
        let origin = self.card(held).previous_spot;
        self.try_move(self.move_to(held, origin))
    }

    fn pick_up(&mut self, id: SuitRank) -> bool {
        self.try_move(self.move_to(id, PlayfieldSpot::top_of(PlayfieldArea::Hand, 0)))
    }

    fn place_hand(&mut self, target: PlayfieldSpot) -> bool {
        let Some(held) = self.playfield().hand.first() else {
            return false;
        };
        let mv = self.move_to(held, target);
        self.rules().is_strictly_valid(&self.snapshot(), &mv) && self.try_move(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{Rank, Suit};
    use crate::core::config::GameConfig;

    fn dealt(seed: u64) -> Klondike {
        let mut game = Klondike::new(GameConfig::default().with_seed(seed));
        game.new_game();
        game
    }

    #[test]
    fn test_click_stock_draws_then_recycles() {
        let mut game = dealt(2);
        let top = game.top_card(PileRef::Stock).unwrap();

        assert!(game.on_single_click_card(top));
        assert_eq!(game.top_card(PileRef::Waste), Some(top));

        while game.on_single_click_pile(PileRef::Stock) && !game.playfield().stock.is_empty() {}
        assert!(game.playfield().stock.is_empty());
        assert!(game.on_single_click_pile(PileRef::Stock));
        assert_eq!(game.pile_counts().stock, 24);
    }

    #[test]
    fn test_click_picks_up_and_returns() {
        let mut game = dealt(2);
        let top = game.top_card(PileRef::Tableau(4)).unwrap();

        assert!(game.on_single_click_card(top));
        assert!(game.card(top).is_in_hand());

        assert!(game.on_single_click_card(top));
        assert_eq!(game.top_card(PileRef::Tableau(4)), Some(top));
        assert!(game.playfield().hand.is_empty());
    }

    #[test]
    fn test_click_face_down_only_flips_top() {
        let mut game = dealt(2);
        let buried = game.playfield().tableaus[6].first().unwrap();
        assert!(!game.on_single_click_card(buried));
        assert!(!game.card(buried).face_up);
    }

    #[test]
    fn test_click_waste_below_top_does_nothing() {
        let mut game = dealt(2);
        assert!(game.draw_from_stock());
        assert!(game.draw_from_stock());
        let under = game.playfield().waste.first().unwrap();

        assert!(!game.on_single_click_card(under));
        assert!(game.playfield().hand.is_empty());
    }

    #[test]
    fn test_click_pile_without_hand() {
        let mut game = dealt(2);
        assert!(!game.on_single_click_pile(PileRef::Tableau(0)));
        assert!(!game.on_single_click_pile(PileRef::Tableau(9)));
        assert!(!game.on_single_click_pile(PileRef::Waste));
    }

    #[test]
    fn test_click_cannot_drop_on_other_foundation() {
        let mut game = Klondike::new(GameConfig::default());
        game.deal();
        let ace = SuitRank::new(Suit::Clubs, Rank::Ace);
        assert!(game.on_long_press_card(ace));

        assert!(game.on_single_click_card(ace));
        assert!(game.card(ace).is_in_hand());
        assert!(!game.on_single_click_pile(PileRef::Foundation(3)));
        assert!(game.card(ace).is_in_hand());

        assert!(game.on_single_click_pile(PileRef::Foundation(0)));
        assert_eq!(game.top_card(PileRef::Foundation(0)), Some(ace));
    }

    #[test]
    fn test_long_press_sends_ace_home() {
        let mut game = Klondike::new(GameConfig::default());
        game.deal();
        let ace = SuitRank::new(Suit::Clubs, Rank::Ace);
        assert_eq!(game.top_card(PileRef::Tableau(0)), Some(ace));

        assert!(game.on_long_press_card(ace));
        assert_eq!(game.top_card(PileRef::Foundation(0)), Some(ace));
        assert!(game.playfield().tableaus[0].is_empty());
    }

    #[test]
    fn test_long_press_face_down_ignored() {
        let mut game = dealt(2);
        let top = game.top_card(PileRef::Stock).unwrap();
        assert!(!game.on_long_press_card(top));
    }
}
