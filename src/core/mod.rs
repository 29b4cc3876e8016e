//! Core engine types: players, session state, configuration.
//!
//! This module contains the fundamental building blocks that are
//! game-agnostic. Games configure these via `GameConfig` rather than
//! modifying the core.

pub mod config;
pub mod player;
pub mod session;

pub use config::GameConfig;
pub use player::{Player, PlayerColor, PlayerId};
pub use session::{GameSession, SessionState};
