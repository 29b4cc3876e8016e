//! The turn engine and its strategy traits.
//!
//! ## Key Components
//!
//! - [`GridGameEngine`]: the `Ready -> Playing -> Stopped` state
//!   machine coordinating moves, turn rotation, and game end
//! - [`WinRule`] / [`LineWinRule`]: pluggable win/draw evaluation
//! - [`TurnPolicy`] / [`RoundRobin`] / [`FreeForAll`]: pluggable
//!   whose-turn checks and rotation
//!
//! ## Design Philosophy
//!
//! The engine is a flat composition, not a class hierarchy: board,
//! roster, and strategies are injected parts, and game variants differ
//! only in configuration and strategy choice. The win rule runs
//! exactly once per successful ownership mutation, inside the same
//! call that performed it.

pub mod game;
pub mod rules;

pub use game::GridGameEngine;
pub use rules::{FreeForAll, GameOutcome, LineWinRule, RoundRobin, TurnPolicy, WinRule};
