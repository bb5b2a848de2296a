//! Game configuration.
//!
//! Hosts configure a game at construction time via `GameConfig`. Every field
//! has a sensible default, and the `with_*` builders chain:
//!
//! ```
//! use klondike_engine::core::GameConfig;
//!
//! let config = GameConfig::default()
//!     .with_seed(7)
//!     .with_difficulty(3)
//!     .with_stacked_deck(true);
//!
//! assert_eq!(config.difficulty, 3);
//! ```

use serde::{Deserialize, Serialize};

/// Highest difficulty setting. At this level a stacked deck is a uniform shuffle.
pub const MAX_DIFFICULTY: u8 = 10;

/// Game configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seed for every random stream in the game.
    pub seed: u64,

    /// Difficulty, 0 (easiest) to 10 (uniform random deal).
    pub difficulty: u8,

    /// Number of full Fisher-Yates passes per plain shuffle.
    pub shuffle_passes: u32,

    /// Order new decks with the difficulty assistant instead of plain shuffles.
    pub stacked_deck: bool,

    /// Let the assistant substitute helpful unseen cards on stock draws.
    pub assist: bool,

    /// Hard cap on autoplay ticks per run.
    pub autoplay_max_ticks: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            difficulty: MAX_DIFFICULTY,
            shuffle_passes: 1,
            stacked_deck: false,
            assist: false,
            autoplay_max_ticks: 2_000,
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Values above [`MAX_DIFFICULTY`] are clamped.
    pub fn with_difficulty(mut self, difficulty: u8) -> Self {
        self.difficulty = difficulty.min(MAX_DIFFICULTY);
        self
    }

    pub fn with_shuffle_passes(mut self, passes: u32) -> Self {
        self.shuffle_passes = passes;
        self
    }

    pub fn with_stacked_deck(mut self, stacked: bool) -> Self {
        self.stacked_deck = stacked;
        self
    }

    pub fn with_assist(mut self, assist: bool) -> Self {
        self.assist = assist;
        self
    }

    pub fn with_autoplay_max_ticks(mut self, ticks: u32) -> Self {
        self.autoplay_max_ticks = ticks;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.difficulty, MAX_DIFFICULTY);
        assert_eq!(config.shuffle_passes, 1);
        assert!(!config.stacked_deck);
        assert!(!config.assist);
    }

    #[test]
    fn test_builder_pattern() {
        let config = GameConfig::default()
            .with_seed(123)
            .with_difficulty(4)
            .with_shuffle_passes(3)
            .with_assist(true);

        assert_eq!(config.seed, 123);
        assert_eq!(config.difficulty, 4);
        assert_eq!(config.shuffle_passes, 3);
        assert!(config.assist);
    }

    #[test]
    fn test_difficulty_clamped() {
        let config = GameConfig::default().with_difficulty(99);
        assert_eq!(config.difficulty, MAX_DIFFICULTY);
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::default().with_seed(9);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
