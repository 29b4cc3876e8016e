//! Player identity and per-player data.
//!
//! ## PlayerId
//!
//! Stable player identifier. IDs are handed out by the roster in
//! strictly increasing order and are never reused while the roster
//! lives; removing a player leaves a permanent gap.
//!
//! ## Player
//!
//! The data record for one player: display name, color, board symbol,
//! and an active flag. Defaults are drawn from id-indexed lookup
//! tables, falling back to generic values past the table end.

use serde::{Deserialize, Serialize};

/// Stable player identifier.
///
/// Ordered so that ascending-id iteration doubles as turn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index into the default lookup tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player({})", self.0)
    }
}

/// Display color assigned to a player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerColor {
    Red,
    Blue,
    Green,
    Yellow,
    /// Fallback for ids beyond the default table.
    #[default]
    White,
}

/// Default colors by player id.
const DEFAULT_COLORS: [PlayerColor; 4] = [
    PlayerColor::Red,
    PlayerColor::Blue,
    PlayerColor::Green,
    PlayerColor::Yellow,
];

/// Default board symbols by player id.
const DEFAULT_SYMBOLS: [char; 4] = ['X', 'O', '#', '@'];

/// Default display names by player id.
const DEFAULT_NAMES: [&str; 4] = ["Player 1", "Player 2", "Player 3", "Player 4"];

/// The data record for one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Stable identifier, assigned by the roster.
    pub id: PlayerId,

    /// Display name.
    pub name: String,

    /// Display color.
    pub color: PlayerColor,

    /// Symbol drawn on claimed cells.
    pub symbol: char,

    /// Inactive players stay in the roster but are skipped by hosts
    /// that honor the flag.
    pub active: bool,
}

impl Player {
    /// Create a player with id-indexed default name, color, and symbol.
    #[must_use]
    pub fn with_defaults(id: PlayerId) -> Self {
        Self {
            id,
            name: Self::default_name(id),
            color: Self::default_color(id),
            symbol: Self::default_symbol(id),
            active: true,
        }
    }

    /// Default name for an id, falling back to `"Player {id + 1}"`.
    #[must_use]
    pub fn default_name(id: PlayerId) -> String {
        DEFAULT_NAMES
            .get(id.index())
            .map_or_else(|| format!("Player {}", id.raw() + 1), |&n| n.to_string())
    }

    /// Default color for an id, falling back to white.
    #[must_use]
    pub fn default_color(id: PlayerId) -> PlayerColor {
        DEFAULT_COLORS.get(id.index()).copied().unwrap_or_default()
    }

    /// Default symbol for an id, falling back to `'?'`.
    #[must_use]
    pub fn default_symbol(id: PlayerId) -> char {
        DEFAULT_SYMBOLS.get(id.index()).copied().unwrap_or('?')
    }

    /// Set the display name (builder pattern).
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the display color (builder pattern).
    #[must_use]
    pub fn with_color(mut self, color: PlayerColor) -> Self {
        self.color = color;
        self
    }

    /// Set the board symbol (builder pattern).
    #[must_use]
    pub fn with_symbol(mut self, symbol: char) -> Self {
        self.symbol = symbol;
        self
    }

    /// Enable or disable the player without removing it.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
