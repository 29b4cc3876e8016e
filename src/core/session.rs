//! Session lifecycle state.
//!
//! A session moves `Ready -> Playing -> Stopped` and returns to
//! `Ready` only through a reset. The engine owns the session record
//! and is the only writer.

use serde::{Deserialize, Serialize};

/// Lifecycle state of one game session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    /// Board built, waiting for enough players.
    #[default]
    Ready,
    /// A game is in progress.
    Playing,
    /// The game has ended; a reset is required before the next one.
    Stopped,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Ready => write!(f, "ready"),
            SessionState::Playing => write!(f, "playing"),
            SessionState::Stopped => write!(f, "stopped"),
        }
    }
}

/// Mutable session bookkeeping, owned by the engine.
///
/// `game_over` latches when the session publishes its end-of-game
/// notification and clears only on reset, so one session can never
/// announce two results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    /// Current lifecycle state.
    pub state: SessionState,

    /// Set once the end-of-game notification has been published.
    pub game_over: bool,
}

impl GameSession {
    /// Create a fresh session in the `Ready` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return to `Ready` and clear the end-of-game latch.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check whether a game is in progress.
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        matches!(self.state, SessionState::Playing)
    }
}
