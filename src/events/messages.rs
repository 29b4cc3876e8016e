//! Typed event payloads published by the core.
//!
//! Collaborators outside the core (UI, audio, scene control) subscribe
//! to these through the owning component's channels. Payloads are plain
//! data carrying ids and coordinates, never references into engine
//! state, so subscribers can hold on to them freely.

use serde::{Deserialize, Serialize};

use crate::board::Coord;
use crate::core::{Player, PlayerId};
use crate::registry::ControllerId;

/// A service instance went live in the registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRegistered {
    pub name: String,
    pub priority: i32,
}

/// A service instance was explicitly removed from the registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceUnregistered {
    pub name: String,
}

/// Every live service has finished initializing.
///
/// Published at most once per all-ready transition; a later
/// registration re-arms it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllServicesReady;

/// A player entered the roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerJoined {
    pub player: Player,
}

/// A player left the roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerLeft {
    pub player: Player,
}

/// The current player changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnChanged {
    pub previous: Option<PlayerId>,
    pub current: PlayerId,
}

/// A game began.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStarted {
    pub players: Vec<PlayerId>,
}

/// A game ended, with a winner or as a draw.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEnded {
    pub players: Vec<PlayerId>,
    pub winner: Option<PlayerId>,
    pub is_draw: bool,
}

/// A new turn began after a completed move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnStarted {
    pub players: Vec<PlayerId>,
    pub new_player: PlayerId,
    pub prev_player: Option<PlayerId>,
}

/// A cell gained an owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerChanged {
    pub cell: Coord,
    pub previous: Option<PlayerId>,
    pub new_owner: PlayerId,
}

/// The board was discarded and rebuilt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardReset;

/// A controller performed its generic action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerAction {
    pub controller: ControllerId,
}
