//! # gridgame
//!
//! A service-registry driven engine for turn-based grid games.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: No hardcoded board size, win length, or
//!    player count. Games configure these at startup via `GameConfig`.
//!
//! 2. **Explicit Wiring**: The service registry is an ordinary object
//!    handed to whoever needs lookup. No global mutable state.
//!
//! 3. **Typed Events**: Every notification is a plain payload struct
//!    delivered over a per-owner `EventChannel`. Handler registration
//!    is checked at compile time; there is no stringly-typed dispatch.
//!
//! 4. **Composition Over Inheritance**: The turn engine is a flat
//!    composition of a board, a roster, and two injected strategies
//!    (`WinRule`, `TurnPolicy`). Game variants swap configuration and
//!    strategies, never subclass.
//!
//! ## Concurrency Model
//!
//! Single-threaded and cooperative. Event delivery is synchronous, in
//! subscription order, on the calling thread; a move's ownership
//! write, its notification, the single win check, and the follow-up
//! transition complete before the triggering call returns. Nothing
//! here needs a lock.
//!
//! ## Modules
//!
//! - `core`: player identity and data, session state, configuration
//! - `events`: multicast channels and the typed payloads
//! - `registry`: service registry and controllers
//! - `board`: rectangular grid of linked, ownable cells
//! - `players`: dynamic roster with stable ids and turn rotation
//! - `engine`: the state machine plus win/turn strategies
//! - `games`: concrete games built on the engine

pub mod board;
pub mod core;
pub mod engine;
pub mod error;
pub mod events;
pub mod games;
pub mod players;
pub mod registry;

// Re-export commonly used types
pub use crate::core::{GameConfig, GameSession, Player, PlayerColor, PlayerId, SessionState};

pub use crate::error::GameError;

pub use crate::events::{
    AllServicesReady, BoardReset, ControllerAction, EventChannel, GameEnded, GameStarted,
    OwnerChanged, PlayerJoined, PlayerLeft, ServiceRegistered, ServiceUnregistered, SubscriberId,
    TurnChanged, TurnStarted,
};

pub use crate::registry::{Controller, ControllerId, Service, ServiceRegistry};

pub use crate::board::{Board, Cell, CellId, Coord, Direction};

pub use crate::players::PlayerRegistry;

pub use crate::engine::{
    FreeForAll, GameOutcome, GridGameEngine, LineWinRule, RoundRobin, TurnPolicy, WinRule,
};

pub use crate::games::tictactoe::TicTacToe;
