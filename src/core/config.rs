//! Engine configuration.
//!
//! A session is configured once, at construction, with a plain settings
//! record: board dimensions, the win run length, player-count bounds,
//! and the turn mode. Games build a `GameConfig` and hand it to the
//! engine; nothing in the core hardcodes a particular game's shape.

use serde::{Deserialize, Serialize};

/// Complete session configuration.
///
/// Dimensions are fixed for the session's lifetime once the board is
/// built from them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board width in cells.
    pub board_width: u16,

    /// Board height in cells.
    pub board_height: u16,

    /// Number of equal owners in a row required to win.
    pub win_length: u16,

    /// Minimum roster size to start a game.
    pub min_players: usize,

    /// Maximum roster size; player creation is rejected beyond this.
    pub max_players: usize,

    /// Turn-based play rotates a current player; simultaneous play
    /// lets every whose-turn check pass.
    pub turn_based: bool,
}

impl GameConfig {
    /// Create a new configuration.
    ///
    /// Defaults to 2-4 players, turn based.
    #[must_use]
    pub fn new(board_width: u16, board_height: u16, win_length: u16) -> Self {
        assert!(board_width >= 1, "Board must be at least 1 cell wide");
        assert!(board_height >= 1, "Board must be at least 1 cell tall");
        assert!(win_length >= 1, "Win length must be at least 1");

        Self {
            board_width,
            board_height,
            win_length,
            min_players: 2,
            max_players: 4,
            turn_based: true,
        }
    }

    /// The classic 3x3, three-in-a-row, two-player setup.
    #[must_use]
    pub fn tictactoe() -> Self {
        Self::new(3, 3, 3).with_player_bounds(2, 2)
    }

    /// Set the roster size bounds (builder pattern).
    #[must_use]
    pub fn with_player_bounds(mut self, min: usize, max: usize) -> Self {
        assert!(min >= 1, "Must allow at least 1 player");
        assert!(min <= max, "min_players must not exceed max_players");
        assert!(max <= 255, "At most 255 players supported");

        self.min_players = min;
        self.max_players = max;
        self
    }

    /// Switch to simultaneous play (builder pattern).
    #[must_use]
    pub fn simultaneous(mut self) -> Self {
        self.turn_based = false;
        self
    }

    /// Total number of cells on the board.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.board_width as usize * self.board_height as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let config = GameConfig::new(5, 4, 4);
        assert_eq!(config.board_width, 5);
        assert_eq!(config.board_height, 4);
        assert_eq!(config.win_length, 4);
        assert_eq!(config.min_players, 2);
        assert_eq!(config.max_players, 4);
        assert!(config.turn_based);
        assert_eq!(config.cell_count(), 20);
    }

    #[test]
    fn test_tictactoe_preset() {
        let config = GameConfig::tictactoe();
        assert_eq!(config.board_width, 3);
        assert_eq!(config.board_height, 3);
        assert_eq!(config.win_length, 3);
        assert_eq!(config.min_players, 2);
        assert_eq!(config.max_players, 2);
        assert!(config.turn_based);
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::new(8, 8, 5)
            .with_player_bounds(2, 6)
            .simultaneous();

        assert_eq!(config.min_players, 2);
        assert_eq!(config.max_players, 6);
        assert!(!config.turn_based);
    }

    #[test]
    #[should_panic(expected = "Board must be at least 1 cell wide")]
    fn test_zero_width_panics() {
        GameConfig::new(0, 3, 3);
    }

    #[test]
    #[should_panic(expected = "min_players must not exceed max_players")]
    fn test_inverted_bounds_panic() {
        GameConfig::new(3, 3, 3).with_player_bounds(4, 2);
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::tictactoe();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
