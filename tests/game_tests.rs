//! Live game integration tests: dealing, the stock cycle, autoplay and
//! save data.

use klondike_engine::core::{GameConfig, CARD_COUNT, TABLEAU_COUNT};
use klondike_engine::games::klondike::{
    Autoplay, Halt, Klondike, PileRef, SaveData, StandardScoring, Tick, DEALT_CARDS, STOCK_CARDS,
};
use klondike_engine::rules::KlondikeRules;

fn dealt(seed: u64) -> Klondike {
    let mut game = Klondike::new(GameConfig::default().with_seed(seed));
    game.new_game();
    game
}

// =============================================================================
// Dealing
// =============================================================================

#[test]
fn test_deal_shape() {
    for seed in [1, 2, 3, 99] {
        let game = dealt(seed);
        let counts = game.pile_counts();

        for column in 0..TABLEAU_COUNT {
            assert_eq!(counts.tableaus[column], column + 1);
            let pile = &game.playfield().tableaus[column];
            for (row, id) in pile.iter().enumerate() {
                assert_eq!(game.card(id).face_up, row == column, "seed {} column {}", seed, column);
            }
        }
        assert_eq!(counts.stock, STOCK_CARDS);
        assert_eq!(counts.waste, 0);
        assert_eq!(counts.hand, 0);
        assert_eq!(counts.foundations, [0; 4]);
        assert_eq!(game.dealt_order().len(), DEALT_CARDS);
        assert!(game.playfield().is_conserved());
    }
}

#[test]
fn test_shuffle_log_describes_swaps() {
    let game = dealt(4);
    let log = game.shuffle_log();

    assert!(!log.is_empty());
    assert_eq!(log.len() % 2, 0);
    for pair in log.chunks(2) {
        assert_eq!(pair[0].from, pair[1].to);
        assert_eq!(pair[0].to, pair[1].from);
    }
}

#[test]
fn test_stacked_deck_is_easier_at_low_difficulty() {
    let aces_showing = |difficulty: u8| -> usize {
        (0..10)
            .map(|seed| {
                let config = GameConfig::default()
                    .with_seed(seed)
                    .with_stacked_deck(true)
                    .with_difficulty(difficulty);
                let mut game = Klondike::new(config);
                game.new_game();
                (0..TABLEAU_COUNT)
                    .filter_map(|column| game.top_card(PileRef::Tableau(column)))
                    .filter(|card| card.is_ace())
                    .count()
            })
            .sum()
    };

    assert_eq!(aces_showing(0), 40);
    assert!(aces_showing(10) < 40);
}

// =============================================================================
// Stock and Waste
// =============================================================================

#[test]
fn test_stock_waste_cycle() {
    let mut game = dealt(6);

    for drawn in 1..=STOCK_CARDS {
        assert!(game.draw_from_stock());
        assert_eq!(game.pile_counts().waste, drawn);
        assert_eq!(game.pile_counts().total(), CARD_COUNT);
    }
    assert!(!game.draw_from_stock());
    assert_eq!(game.pile_counts().stock, 0);

    assert!(game.recycle_waste());
    assert_eq!(game.pile_counts().waste, 0);
    assert_eq!(game.pile_counts().stock, STOCK_CARDS);
    assert!(game.playfield().is_conserved());
}

#[test]
fn test_scoring_through_a_game() {
    let config = GameConfig::default().with_seed(6);
    let mut game = Klondike::with_score_keeper(config, StandardScoring::new());
    game.new_game();

    let mut autoplay = Autoplay::new(KlondikeRules);
    autoplay.run_to_end(&mut game);

    let scoring = game.score_keeper();
    assert!(scoring.score >= 0);
    assert!(scoring.moves > 0);
}

// =============================================================================
// Autoplay
// =============================================================================

#[test]
fn test_autoplay_halts_exactly_at_completion() {
    let mut completed = 0;
    for seed in 0..30 {
        let config = GameConfig::default()
            .with_seed(seed)
            .with_stacked_deck(true)
            .with_difficulty(0)
            .with_autoplay_max_ticks(20_000);
        let mut game = Klondike::new(config);
        game.new_game();

        let halt = Autoplay::new(KlondikeRules).run_to_end(&mut game);
        assert_eq!(halt == Halt::Complete, game.is_complete(), "seed {}", seed);
        if game.is_complete() {
            completed += 1;
            assert_eq!(game.pile_counts().foundations, [13; 4]);
        }
    }
    assert!(completed > 0, "no easy deal was finished");
}

// =============================================================================
// Save Data
// =============================================================================

#[test]
fn test_save_roundtrip_mid_game() {
    let mut game = dealt(15);
    let mut autoplay = Autoplay::new(KlondikeRules);
    for _ in 0..40 {
        if let Tick::Halted(_) = autoplay.tick(&mut game) {
            break;
        }
    }
    if !game.playfield().hand.is_empty() {
        assert!(game.return_hand());
    }

    let bytes = game.to_save_data().to_bytes().unwrap();
    let mut restored = Klondike::new(GameConfig::default());
    restored.load_bytes(&bytes).unwrap();

    assert_eq!(restored.snapshot(), game.snapshot());
    for card in game.deck().cards() {
        assert_eq!(restored.card(card.id).face_up, card.face_up, "{}", card.id);
        assert_eq!(restored.card(card.id).spot, card.spot, "{}", card.id);
    }
}

#[test]
fn test_corrupt_save_deals_fresh() {
    let mut game = Klondike::new(GameConfig::default().with_seed(8));
    let mut data = dealt(8).to_save_data();
    data.stock.truncate(10);

    assert!(!game.load_or_deal(&data));
    assert_eq!(game.pile_counts().tableaus, [1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(game.pile_counts().stock, STOCK_CARDS);
    assert!(!game.deck().is_in_default_order());

    assert!(game.load_bytes(b"not a save").is_err());
    assert!(SaveData::from_bytes(&[]).is_err());
}
