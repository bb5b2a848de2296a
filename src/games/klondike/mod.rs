//! Klondike solitaire.
//!
//! The live game, its dealer and player actions (`game`), the pointer input
//! surface (`input`), greedy move suggestion and autoplay (`suggest`,
//! `autoplay`), the difficulty assistant (`assistant`), save data
//! (`persist`) and scoring (`score`).
//!
//! ```
//! use klondike_engine::core::GameConfig;
//! use klondike_engine::games::klondike::{Autoplay, Halt, Klondike, PileRef};
//! use klondike_engine::rules::KlondikeRules;
//!
//! let mut game = Klondike::new(GameConfig::default().with_seed(7));
//! game.new_game();
//! assert_eq!(game.pile_counts().tableaus, [1, 2, 3, 4, 5, 6, 7]);
//!
//! game.on_single_click_pile(PileRef::Stock);
//! assert_eq!(game.pile_counts().waste, 1);
//!
//! let halt = Autoplay::new(KlondikeRules).run_to_end(&mut game);
//! assert_eq!(halt == Halt::Complete, game.is_complete());
//! ```

pub mod assistant;
pub mod autoplay;
mod game;
mod input;
pub mod persist;
pub mod score;
pub mod suggest;

pub use assistant::{deal_slots, DealSlot, DifficultyAssistant};
pub use autoplay::{Autoplay, Halt, Tick};
pub use game::{Klondike, PileCounts, PileRef, DEALT_CARDS, STOCK_CARDS};
pub use persist::{LoadError, SaveData, FACE_UP_BIT};
pub use score::{NullScoreKeeper, ScoreEvent, ScoreKeeper, StandardScoring};
pub use suggest::{MoveSuggestor, Suggestion};
