//! The live Klondike game.
//!
//! `Klondike` owns the card records, the playfield, the process flags and
//! the random streams. Every card motion goes through one of two paths:
//!
//! - `apply(ValidatedMove)`, the safe path: the token proves the move passed
//!   `RulesEngine::is_valid` against a snapshot of this game
//! - `apply_unchecked(Move)`, the raw path for callers that validated
//!   against a snapshot of their own
//!
//! Dealing, shuffling, collecting and recycling are all expressed as
//! sequences of ordinary validated moves while the matching process flag is
//! raised.
//!
//! ## Face Rules
//!
//! | Arrival area | Face |
//! |---|---|
//! | Stock, Deck | down |
//! | Waste, Hand, Foundation | up |
//! | Tableau | unchanged |
//!
//! The deal turns the last card of each column face-up explicitly.

use serde::{Deserialize, Serialize};

use super::assistant::DifficultyAssistant;
use super::score::{NullScoreKeeper, ScoreEvent, ScoreKeeper};
use crate::cards::{Card, DeckRepository, ShuffleStep};
use crate::core::action::{Move, MoveArea, MoveType};
use crate::core::card::{SuitRank, CARD_COUNT};
use crate::core::config::GameConfig;
use crate::core::rng::GameRng;
use crate::core::spot::{PlayfieldArea, PlayfieldSpot, FOUNDATION_COUNT, TABLEAU_COUNT};
use crate::core::state::{GameStateSnapshot, MovedCards, Playfield, ProcessFlags};
use crate::rules::{KlondikeRules, RulesEngine, ValidatedMove};
use crate::zones::Pile;

/// Cards dealt onto the tableau (1 + 2 + ... + 7).
pub const DEALT_CARDS: usize = 28;

/// Cards left in the stock after the deal.
pub const STOCK_CARDS: usize = CARD_COUNT - DEALT_CARDS;

/// A pile named from the outside (input handlers, renderers).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PileRef {
    Deck,
    Stock,
    Waste,
    Hand,
    Foundation(usize),
    Tableau(usize),
}

impl PileRef {
    /// Spot of the bottom of the pile. Out-of-range indices map to an
    /// invalid spot.
    #[must_use]
    pub fn spot(self) -> PlayfieldSpot {
        let spot = match self {
            PileRef::Deck => PlayfieldSpot::top_of(PlayfieldArea::Deck, 0),
            PileRef::Stock => PlayfieldSpot::top_of(PlayfieldArea::Stock, 0),
            PileRef::Waste => PlayfieldSpot::top_of(PlayfieldArea::Waste, 0),
            PileRef::Hand => PlayfieldSpot::top_of(PlayfieldArea::Hand, 0),
            PileRef::Foundation(i) => PlayfieldSpot::foundation(i, 0),
            PileRef::Tableau(i) => PlayfieldSpot::tableau(i, 0),
        };
        if spot.is_valid() {
            spot
        } else {
            PlayfieldSpot::INVALID
        }
    }
}

/// Card count of every pile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PileCounts {
    pub deck: usize,
    pub stock: usize,
    pub waste: usize,
    pub hand: usize,
    pub foundations: [usize; FOUNDATION_COUNT],
    pub tableaus: [usize; TABLEAU_COUNT],
}

impl PileCounts {
    #[must_use]
    pub fn total(&self) -> usize {
        self.deck
            + self.stock
            + self.waste
            + self.hand
            + self.foundations.iter().sum::<usize>()
            + self.tableaus.iter().sum::<usize>()
    }
}

/// A game of Klondike.
///
/// Generic over the score keeper so hosts can plug in their own bookkeeping;
/// the default discards all events.
#[derive(Clone, Debug)]
pub struct Klondike<S: ScoreKeeper = NullScoreKeeper> {
    config: GameConfig,
    rules: KlondikeRules,
    deck: DeckRepository,
    field: Playfield,
    flags: ProcessFlags,
    assistant: DifficultyAssistant,

    /// Stream for plain shuffles.
    shuffle_rng: GameRng,

    /// Stream for stacked decks.
    stack_rng: GameRng,

    /// Identities in the order they were dealt to the tableau.
    dealt_order: Vec<SuitRank>,

    scorer: S,
}

impl Klondike {
    /// A game with all 52 cards in the deck pile, in canonical order.
    ///
    /// Nothing is dealt yet; call `new_game` or `deal`.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_score_keeper(config, NullScoreKeeper)
    }
}

impl<S: ScoreKeeper> Klondike<S> {
    #[must_use]
    pub fn with_score_keeper(config: GameConfig, scorer: S) -> Self {
        let rng = GameRng::new(config.seed);
        let mut game = Self {
            assistant: DifficultyAssistant::new(config.difficulty, config.assist),
            shuffle_rng: rng.for_context("shuffle"),
            stack_rng: rng.for_context("stack"),
            config,
            rules: KlondikeRules,
            deck: DeckRepository::new(),
            field: Playfield::new(),
            flags: ProcessFlags::default(),
            dealt_order: Vec::with_capacity(DEALT_CARDS),
            scorer,
        };

        for (pos, id) in SuitRank::all().enumerate() {
            game.field.deck.add(id);
            game.deck
                .card_mut(id)
                .place(PlayfieldSpot::top_of(PlayfieldArea::Deck, pos));
        }
        game
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn rules(&self) -> &KlondikeRules {
        &self.rules
    }

    #[must_use]
    pub fn playfield(&self) -> &Playfield {
        &self.field
    }

    #[must_use]
    pub fn flags(&self) -> ProcessFlags {
        self.flags
    }

    #[must_use]
    pub fn deck(&self) -> &DeckRepository {
        &self.deck
    }

    #[must_use]
    pub fn card(&self, id: SuitRank) -> &Card {
        self.deck.card(id)
    }

    #[must_use]
    pub fn assistant(&self) -> &DifficultyAssistant {
        &self.assistant
    }

    pub fn assistant_mut(&mut self) -> &mut DifficultyAssistant {
        &mut self.assistant
    }

    #[must_use]
    pub fn score_keeper(&self) -> &S {
        &self.scorer
    }

    pub fn score_keeper_mut(&mut self) -> &mut S {
        &mut self.scorer
    }

    /// Tableau cards in the order they left the deck.
    #[must_use]
    pub fn dealt_order(&self) -> &[SuitRank] {
        &self.dealt_order
    }

    #[must_use]
    pub fn shuffle_log(&self) -> &[ShuffleStep] {
        self.deck.shuffle_log()
    }

    /// Value copy of the table for validation.
    #[must_use]
    pub fn snapshot(&self) -> GameStateSnapshot {
        let face_down = self.deck.cards().filter(|card| !card.face_up).map(|card| card.id);
        GameStateSnapshot::new(self.field.clone(), self.flags).with_face_down(face_down)
    }

    // === Queries ===

    #[must_use]
    pub fn top_card(&self, pile: PileRef) -> Option<SuitRank> {
        self.field.pile(pile.spot()).and_then(Pile::last)
    }

    #[must_use]
    pub fn pile_counts(&self) -> PileCounts {
        let mut counts = PileCounts {
            deck: self.field.deck.len(),
            stock: self.field.stock.len(),
            waste: self.field.waste.len(),
            hand: self.field.hand.len(),
            ..PileCounts::default()
        };
        for (count, pile) in counts.foundations.iter_mut().zip(self.field.foundations.iter()) {
            *count = pile.len();
        }
        for (count, pile) in counts.tableaus.iter_mut().zip(self.field.tableaus.iter()) {
            *count = pile.len();
        }
        counts
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.rules.is_complete(&self.snapshot())
    }

    /// One line per pile, face-down cards in brackets.
    #[must_use]
    pub fn debug_text(&self) -> String {
        let mut out = String::new();
        for (spot, pile) in self.field.piles() {
            let label = match spot.area {
                PlayfieldArea::Foundation | PlayfieldArea::Tableau => {
                    format!("{}[{}]", spot.area.name(), spot.index)
                }
                area => area.name().to_string(),
            };
            let cards: Vec<String> = pile.iter().map(|id| self.deck.card(id).to_string()).collect();
            out.push_str(&label);
            out.push_str(": ");
            out.push_str(&cards.join(" "));
            out.push('\n');
        }
        out
    }

    /// Build a move of `id` from where it lies to the top of the pile `to`
    /// names. Tableau and Hand sources carry everything above the card.
    #[must_use]
    pub fn move_to(&self, id: SuitRank, to: PlayfieldSpot) -> Move {
        let card = *self.deck.card(id);
        let dest = self.field.top_spot(to);
        match self.field.locate(id) {
            Some(from) => Move::between(card, from, dest).with_substack(from.sub_index),
            None => Move::between(card, card.spot, dest),
        }
    }

    // === Applying Moves ===

    /// Apply a move that passed validation.
    pub fn apply(&mut self, token: ValidatedMove) -> MovedCards {
        self.apply_unchecked(token.into_inner())
    }

    /// Apply a move without consulting the rules.
    ///
    /// Panics if the subject is not where the move says or either spot is
    /// invalid.
    pub fn apply_unchecked(&mut self, mv: Move) -> MovedCards {
        let moved = self.field.transfer(mv.card.id, mv.from, mv.to, mv.substack_start);
        let dest_len = self.field.pile(mv.to).map_or(0, Pile::len);
        let base = dest_len - moved.len();

        for (offset, &id) in moved.iter().enumerate() {
            let card = self.deck.card_mut(id);
            let was_face_up = card.face_up;
            card.relocate(PlayfieldSpot::new(mv.to.area, mv.to.index, base + offset));
            match mv.to.area {
                PlayfieldArea::Stock | PlayfieldArea::Deck => card.face_up = false,
                PlayfieldArea::Waste | PlayfieldArea::Hand | PlayfieldArea::Foundation => {
                    card.face_up = true;
                }
                PlayfieldArea::Tableau | PlayfieldArea::Invalid => {}
            }
            let revealed = card.face_up && !was_face_up;
            if revealed {
                self.assistant.reveal(id);
            }
        }
        self.renumber(mv.from);

        log::trace!("applied {}", mv);
        debug_assert!(self.field.total_cards() == CARD_COUNT);
        moved
    }

    /// Validate `mv` against the current table and apply it.
    ///
    /// A move out of the Hand back into the area the card came from is
    /// always accepted. Returns whether the move happened.
    pub fn try_move(&mut self, mv: Move) -> bool {
        let mv = Move {
            card: *self.deck.card(mv.card.id),
            ..mv
        };
        let snapshot = self.snapshot();
        let returning = mv.is_return_from_hand()
            && mv.to.is_valid()
            && mv.substack_start.map_or(true, |start| start == 0)
            && snapshot.hand().first() == Some(mv.card.id);

        let token = if returning {
            Some(ValidatedMove::new(mv))
        } else {
            self.rules.validate(&snapshot, &mv)
        };
        let Some(token) = token else {
            return false;
        };

        self.apply(token);
        self.record_move(&mv);
        true
    }

    /// Move `id` (and any cards above it) onto the pile `to` names.
    ///
    /// Uses the direct move when the rules allow it, otherwise goes through
    /// the Hand: pick up, then place. The pickup only happens when the
    /// placement is known to be legal, so a failed transfer leaves the
    /// table untouched.
    pub fn transfer(&mut self, id: SuitRank, to: PlayfieldSpot) -> bool {
        let Some(from) = self.field.locate(id) else {
            return false;
        };
        if !self.field.hand.is_empty() || from.same_pile(to) {
            return false;
        }
        let snapshot = self.snapshot();
        let direct = self.move_to(id, to);
        if self.rules.is_strictly_valid(&snapshot, &direct) {
            return self.try_move(direct);
        }

        let pickup = self.move_to(id, PlayfieldSpot::top_of(PlayfieldArea::Hand, 0));
        if !self.rules.is_valid(&snapshot, &pickup) {
            return false;
        }

        let held = snapshot.after_transfer(id, pickup.from, pickup.to, pickup.substack_start);
        let mut card = pickup.card;
        card.relocate(pickup.to);
        card.face_up = true;
        let placement = Move::new(card, held.playfield().top_spot(to)).with_substack(0);
        if !self.rules.is_strictly_valid(&held, &placement) {
            return false;
        }

        self.try_move(pickup) && self.try_move(self.move_to(id, to))
    }

    // === Player Actions ===

    /// Turn the stock top onto the waste.
    ///
    /// With assistance enabled, an unhelpful stock top may first be swapped
    /// with a more useful unseen card.
    pub fn draw_from_stock(&mut self) -> bool {
        let Some(top) = self.field.stock.last() else {
            return false;
        };
        let waste_top = PlayfieldSpot::top_of(PlayfieldArea::Waste, self.field.waste.len());
        if !self.rules.is_valid(&self.snapshot(), &self.move_to(top, waste_top)) {
            return false;
        }

        let top = match self.pick_substitute() {
            Some(substitute) => {
                self.swap_hidden(top, substitute);
                self.assistant.record_substitution();
                log::debug!("assistant swapped {} in for {}", substitute, top);
                substitute
            }
            None => top,
        };

        let mv = self.move_to(top, waste_top);
        match self.rules.validate(&self.snapshot(), &mv) {
            Some(token) => {
                self.apply(token);
                self.scorer.record(ScoreEvent::StockToWaste);
                true
            }
            None => false,
        }
    }

    /// Turn the whole waste back into the stock.
    ///
    /// Only allowed when the stock is empty and nothing is held. The first
    /// card drawn afterwards is the first card drawn last time round.
    pub fn recycle_waste(&mut self) -> bool {
        if !self.field.stock.is_empty() || self.field.waste.is_empty() || !self.field.hand.is_empty() {
            return false;
        }

        self.flags.is_recycling_waste_to_stock = true;
        while let Some(top) = self.field.waste.last() {
            let to = PlayfieldSpot::top_of(PlayfieldArea::Stock, self.field.stock.len());
            self.run_process_move(self.move_to(top, to));
        }
        self.flags.is_recycling_waste_to_stock = false;

        self.scorer.record(ScoreEvent::WasteRecycled);
        log::debug!("recycled waste: {} cards back in stock", self.field.stock.len());
        true
    }

    /// Turn a face-down tableau top face-up.
    pub fn flip_tableau_top(&mut self, column: usize) -> bool {
        let Some(top) = self.field.tableaus.get(column).and_then(Pile::last) else {
            return false;
        };
        let card = self.deck.card_mut(top);
        if card.face_up {
            return false;
        }
        card.face_up = true;
        self.assistant.reveal(top);
        self.scorer.record(ScoreEvent::TableauFlip);
        true
    }

    // === Dealing ===

    /// Collect, shuffle and deal a fresh game.
    pub fn new_game(&mut self) {
        self.collect_cards_to_deck();
        self.shuffle();
        self.deal();
    }

    /// Bring every card back to the deck pile.
    pub fn collect_cards_to_deck(&mut self) {
        self.flags.is_collecting_cards_to_deck = true;

        if let Some(held) = self.field.hand.first() {
            self.run_process_move(self.move_to(held, PlayfieldSpot::top_of(PlayfieldArea::Deck, 0)));
        }
        let sources: Vec<PlayfieldSpot> = self
            .field
            .piles()
            .map(|(spot, _)| spot)
            .filter(|spot| spot.area != PlayfieldArea::Deck)
            .collect();
        for spot in sources {
            while let Some(top) = self.field.pile(spot).and_then(Pile::last) {
                let to = PlayfieldSpot::top_of(PlayfieldArea::Deck, 0);
                self.run_process_move(self.move_to(top, to));
            }
        }

        self.flags.is_collecting_cards_to_deck = false;
        self.dealt_order.clear();
    }

    /// Reorder the physical deck, plainly or stacked by difficulty, and lay
    /// the deck pile out to match.
    pub fn shuffle(&mut self) {
        if self.config.stacked_deck {
            let order = self.assistant.get_stacked_deck(&mut self.stack_rng);
            self.deck.set_order(order);
        } else {
            self.deck
                .shuffle_times(self.config.shuffle_passes, &mut self.shuffle_rng);
        }
        self.arrange_deck();
    }

    /// Deal from the deck pile: rows of the tableau left to right, the
    /// last card of each column face-up, then the rest into the stock.
    ///
    /// Cards still on the table are collected first.
    pub fn deal(&mut self) {
        if self.field.deck.len() != CARD_COUNT {
            self.collect_cards_to_deck();
        }
        if self.field.deck.to_vec() != self.deck.order() {
            self.arrange_deck();
        }

        self.flags.is_dealing = true;
        self.dealt_order.clear();
        for row in 0..TABLEAU_COUNT {
            for column in row..TABLEAU_COUNT {
                let Some(front) = self.field.deck.first() else {
                    break;
                };
                self.run_process_move(self.move_to(front, PlayfieldSpot::tableau(column, 0)));
                self.deck.card_mut(front).face_up = column == row;
                self.dealt_order.push(front);
            }
        }
        while let Some(front) = self.field.deck.first() {
            let to = PlayfieldSpot::top_of(PlayfieldArea::Stock, 0);
            self.run_process_move(self.move_to(front, to));
        }
        self.flags.is_dealing = false;

        self.reset_unseen();
        self.scorer.reset();
        log::debug!(
            "dealt {} tableau cards, {} to stock",
            self.dealt_order.len(),
            self.field.stock.len()
        );
    }

    /// Replace the table with restored piles.
    ///
    /// `face_up` decides tableau faces; every other area gets its arrival
    /// face. The unseen pool is rebuilt, the score keeper is left alone.
    pub(super) fn restore(
        &mut self,
        field: Playfield,
        dealt_order: Vec<SuitRank>,
        face_up: impl Fn(SuitRank) -> bool,
    ) {
        self.field = field;
        self.flags = ProcessFlags::default();
        self.dealt_order = dealt_order;

        for (spot, pile) in self.field.piles() {
            for (pos, id) in pile.iter().enumerate() {
                let card = self.deck.card_mut(id);
                card.place(PlayfieldSpot::new(spot.area, spot.index, pos));
                card.face_up = match spot.area {
                    PlayfieldArea::Tableau => face_up(id),
                    PlayfieldArea::Waste | PlayfieldArea::Hand | PlayfieldArea::Foundation => true,
                    _ => false,
                };
            }
        }

        self.reset_unseen();
    }

    // === Internals ===

    /// Lay the deck pile out in physical order, one Deck to Deck move per
    /// card.
    fn arrange_deck(&mut self) {
        self.flags.is_shuffling = true;
        let order = self.deck.order().to_vec();
        for id in order {
            self.run_process_move(self.move_to(id, PlayfieldSpot::top_of(PlayfieldArea::Deck, 0)));
        }
        self.flags.is_shuffling = false;
    }

    /// Validate and apply a step of a running process.
    ///
    /// Panics when the rules reject it: process steps are legal by
    /// construction.
    fn run_process_move(&mut self, mv: Move) -> MovedCards {
        match self.rules.validate(&self.snapshot(), &mv) {
            Some(token) => self.apply(token),
            None => panic!("Process step rejected: {}", mv),
        }
    }

    fn reset_unseen(&mut self) {
        let hidden: Vec<SuitRank> = self
            .deck
            .cards()
            .filter(|card| !card.face_up)
            .map(|card| card.id)
            .collect();
        self.assistant.reset_unseen(hidden);
    }

    /// Bring every card's sub-index in line with its pile position.
    fn renumber(&mut self, spot: PlayfieldSpot) {
        if let Some(pile) = self.field.pile(spot) {
            for (pos, id) in pile.iter().enumerate() {
                self.deck.card_mut(id).spot.sub_index = pos;
            }
        }
    }

    fn record_move(&mut self, mv: &Move) {
        if mv.to.area == PlayfieldArea::Hand {
            return;
        }
        if mv.from.area == PlayfieldArea::Hand && mv.card.previous_spot.same_pile(mv.to) {
            return;
        }

        let from = if mv.from.area == PlayfieldArea::Hand {
            mv.card.previous_spot.area
        } else {
            mv.from.area
        };
        let event = match MoveType::classify(from, mv.to.area) {
            MoveType::Between(MoveArea::Stock, MoveArea::Waste) => ScoreEvent::StockToWaste,
            other => ScoreEvent::Moved(other),
        };
        self.scorer.record(event);
    }

    fn pick_substitute(&self) -> Option<SuitRank> {
        if !self.assistant.is_enabled() {
            return None;
        }
        let snapshot = self.snapshot();
        self.assistant.pick_substitute(
            &snapshot,
            self.field.stock.iter(),
            |id| self.deck.card(id).face_up,
        )
    }

    /// Exchange two stock cards in place.
    fn swap_hidden(&mut self, a: SuitRank, b: SuitRank) {
        let (Some(pos_a), Some(pos_b)) = (self.field.stock.index_of(a), self.field.stock.index_of(b)) else {
            return;
        };
        self.field.stock.replace(pos_a, b);
        self.field.stock.replace(pos_b, a);
        self.deck
            .card_mut(a)
            .place(PlayfieldSpot::top_of(PlayfieldArea::Stock, pos_b));
        self.deck
            .card_mut(b)
            .place(PlayfieldSpot::top_of(PlayfieldArea::Stock, pos_a));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{Rank, Suit};
    use crate::games::klondike::score::StandardScoring;

    fn dealt(seed: u64) -> Klondike {
        let mut game = Klondike::new(GameConfig::default().with_seed(seed));
        game.new_game();
        game
    }

    fn assert_records_match(game: &Klondike<impl ScoreKeeper>) {
        for (spot, pile) in game.playfield().piles() {
            for (pos, id) in pile.iter().enumerate() {
                let card = game.card(id);
                assert!(card.spot.same_pile(spot), "{} recorded at {}", id, card.spot);
                assert_eq!(card.spot.sub_index, pos);
            }
        }
    }

    #[test]
    fn test_new_puts_cards_in_deck() {
        let game = Klondike::new(GameConfig::default());
        assert_eq!(game.pile_counts().deck, 52);
        assert_eq!(game.playfield().deck.to_vec(), SuitRank::all().collect::<Vec<_>>());
        assert_records_match(&game);
    }

    #[test]
    fn test_deal_shape() {
        let game = dealt(7);
        let counts = game.pile_counts();

        assert_eq!(counts.tableaus, [1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(counts.stock, STOCK_CARDS);
        assert_eq!(counts.deck, 0);
        assert_eq!(counts.total(), CARD_COUNT);
        assert_eq!(game.dealt_order().len(), DEALT_CARDS);

        for (column, pile) in game.playfield().tableaus.iter().enumerate() {
            for (row, id) in pile.iter().enumerate() {
                assert_eq!(game.card(id).face_up, row == column);
            }
        }
        assert!(game.playfield().stock.iter().all(|id| !game.card(id).face_up));
        assert_records_match(&game);
    }

    #[test]
    fn test_deal_follows_physical_order() {
        let game = dealt(11);
        let order = game.deck().order();

        assert_eq!(game.dealt_order(), &order[..DEALT_CARDS]);
        assert_eq!(game.playfield().tableaus[0].first(), Some(order[0]));
        assert_eq!(game.playfield().tableaus[1].first(), Some(order[1]));
        assert_eq!(game.playfield().tableaus[1].get(1), Some(order[7]));
        assert_eq!(game.playfield().stock.to_vec(), order[DEALT_CARDS..].to_vec());
    }

    #[test]
    fn test_same_seed_same_deal() {
        assert_eq!(dealt(3).dealt_order(), dealt(3).dealt_order());
        assert_ne!(dealt(3).dealt_order(), dealt(4).dealt_order());
    }

    #[test]
    fn test_unshuffled_deal() {
        let mut game = Klondike::new(GameConfig::default());
        game.deal();

        assert_eq!(game.dealt_order()[0], SuitRank::new(Suit::Clubs, Rank::Ace));
        assert_eq!(game.top_card(PileRef::Tableau(0)), Some(SuitRank::new(Suit::Clubs, Rank::Ace)));
        assert!(game.deck().is_in_default_order());
    }

    #[test]
    fn test_draw_and_recycle() {
        let mut game = dealt(5);
        let first = game.top_card(PileRef::Stock);

        assert!(!game.recycle_waste());
        while game.draw_from_stock() {}

        assert_eq!(game.pile_counts().waste, STOCK_CARDS);
        assert!(game.playfield().waste.iter().all(|id| game.card(id).face_up));

        assert!(game.recycle_waste());
        assert_eq!(game.pile_counts().stock, STOCK_CARDS);
        assert_eq!(game.top_card(PileRef::Stock), first);
        assert!(game.playfield().stock.iter().all(|id| !game.card(id).face_up));
        assert!(!game.flags().is_recycling_waste_to_stock);
        assert_records_match(&game);
    }

    #[test]
    fn test_flip_tableau_top() {
        let mut game = dealt(9);
        assert!(!game.flip_tableau_top(3));

        let top = game.top_card(PileRef::Tableau(3)).unwrap();
        game.deck.card_mut(top).face_up = false;
        assert!(game.flip_tableau_top(3));
        assert!(game.card(top).face_up);
        assert!(!game.flip_tableau_top(TABLEAU_COUNT));
    }

    #[test]
    fn test_pickup_and_return() {
        let mut game = dealt(13);
        let top = game.top_card(PileRef::Tableau(2)).unwrap();

        let pickup = game.move_to(top, PileRef::Hand.spot());
        assert!(game.try_move(pickup));
        assert!(game.card(top).is_in_hand());
        assert_eq!(game.card(top).previous_spot.area, PlayfieldArea::Tableau);

        let back = game.move_to(top, PileRef::Tableau(2).spot());
        assert!(game.try_move(back));
        assert_eq!(game.top_card(PileRef::Tableau(2)), Some(top));
        assert!(game.playfield().hand.is_empty());
    }

    #[test]
    fn test_move_blocked_while_holding() {
        let mut game = dealt(13);
        let top = game.top_card(PileRef::Tableau(2)).unwrap();
        assert!(game.try_move(game.move_to(top, PileRef::Hand.spot())));

        assert!(!game.draw_from_stock());
        let other = game.top_card(PileRef::Tableau(5)).unwrap();
        assert!(!game.try_move(game.move_to(other, PileRef::Hand.spot())));
    }

    #[test]
    fn test_transfer_via_hand() {
        let mut game = Klondike::new(GameConfig::default());
        game.deal();

        let king = SuitRank::new(Suit::Spades, Rank::King);
        let queen = SuitRank::new(Suit::Hearts, Rank::Queen);
        // King alone on column 0, queen alone on column 6, everything else in stock.
        game.field.tableaus[0] = Pile::from_cards([king]);
        game.field.tableaus[6] = Pile::from_cards([queen]);
        game.field.stock = Pile::from_cards(SuitRank::all().filter(|&id| id != king && id != queen));
        for col in 1..6 {
            game.field.tableaus[col].clear();
        }
        for (spot, pile) in game.field.piles().map(|(s, p)| (s, p.clone())).collect::<Vec<_>>() {
            for (pos, id) in pile.iter().enumerate() {
                let card = game.deck.card_mut(id);
                card.place(PlayfieldSpot::new(spot.area, spot.index, pos));
                card.face_up = spot.area == PlayfieldArea::Tableau;
            }
        }

        assert!(game.transfer(queen, PileRef::Tableau(0).spot()));
        assert_eq!(game.playfield().tableaus[0].to_vec(), vec![king, queen]);
        assert!(game.playfield().tableaus[6].is_empty());
        assert!(game.playfield().hand.is_empty());

        // Illegal target leaves the table untouched.
        let before = game.snapshot();
        assert!(!game.transfer(queen, PileRef::Tableau(6).spot()));
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn test_nothing_builds_on_face_down_top() {
        let mut game = Klondike::new(GameConfig::default());
        game.deal();

        let six = SuitRank::new(Suit::Diamonds, Rank::Six);
        let five = SuitRank::new(Suit::Spades, Rank::Five);
        game.field.tableaus[0] = Pile::from_cards([six]);
        game.field.tableaus[1] = Pile::from_cards([five]);
        game.field.stock = Pile::from_cards(SuitRank::all().filter(|&id| id != six && id != five));
        for col in 2..TABLEAU_COUNT {
            game.field.tableaus[col].clear();
        }
        for (spot, pile) in game.field.piles().map(|(s, p)| (s, p.clone())).collect::<Vec<_>>() {
            for (pos, id) in pile.iter().enumerate() {
                let card = game.deck.card_mut(id);
                card.place(PlayfieldSpot::new(spot.area, spot.index, pos));
                card.face_up = id == five;
            }
        }

        assert!(!game.on_long_press_card(five));
        assert!(!game.transfer(five, PileRef::Tableau(0).spot()));
        assert_eq!(game.playfield().tableaus[0].to_vec(), vec![six]);
        assert!(!game.card(six).face_up);

        assert!(game.flip_tableau_top(0));
        assert!(game.transfer(five, PileRef::Tableau(0).spot()));
        assert_eq!(game.playfield().tableaus[0].to_vec(), vec![six, five]);
    }

    #[test]
    fn test_scoring_events() {
        let mut game = Klondike::with_score_keeper(GameConfig::default().with_seed(5), StandardScoring::new());
        game.new_game();

        assert!(game.draw_from_stock());
        assert_eq!(game.score_keeper().moves, 1);

        while game.draw_from_stock() {}
        game.score_keeper_mut().score = 150;
        assert!(game.recycle_waste());
        assert_eq!(game.score_keeper().score, 50);
        assert_eq!(game.score_keeper().recycles, 1);

        game.new_game();
        assert_eq!(game.score_keeper(), &StandardScoring::default());
    }

    #[test]
    fn test_new_game_collects_everything() {
        let mut game = dealt(21);
        while game.draw_from_stock() {}
        game.new_game();

        assert_eq!(game.pile_counts().tableaus, [1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(game.pile_counts().waste, 0);
        assert!(game.playfield().is_conserved());
        assert_records_match(&game);
    }

    #[test]
    fn test_stacked_deck_deal() {
        let config = GameConfig::default().with_stacked_deck(true).with_difficulty(0);
        let mut game = Klondike::new(config);
        game.new_game();

        for column in 0..TABLEAU_COUNT {
            let top = game.top_card(PileRef::Tableau(column)).unwrap();
            assert!(top.is_ace() || top.rank == Rank::Two, "column {} shows {}", column, top);
        }
    }

    #[test]
    fn test_assisted_draw_keeps_conservation() {
        let config = GameConfig::default().with_seed(17).with_assist(true);
        let mut game = Klondike::new(config);
        game.new_game();

        while game.draw_from_stock() {}
        assert!(game.playfield().is_conserved());
        assert_eq!(game.pile_counts().waste, STOCK_CARDS);
        assert_records_match(&game);
        assert_eq!(game.assistant().unseen_count(), DEALT_CARDS - TABLEAU_COUNT);
    }

    #[test]
    fn test_debug_text_lists_piles() {
        let game = dealt(1);
        let text = game.debug_text();
        assert!(text.contains("STOCK: "));
        assert!(text.contains("TABLEAU[6]: "));
        assert_eq!(text.lines().count(), 4 + FOUNDATION_COUNT + TABLEAU_COUNT);
    }
}
