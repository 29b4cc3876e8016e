//! Player roster management.
//!
//! The registry owns the player records, hands out stable ids, tracks
//! the current player, and publishes `PlayerJoined` / `PlayerLeft` /
//! `TurnChanged` as the roster and turn change.

pub mod roster;

pub use roster::PlayerRegistry;
