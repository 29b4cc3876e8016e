//! Error taxonomy for the engine.
//!
//! Every variant here is recoverable. Operations absorb these
//! conditions locally: the caller gets a `Result` (or `None` for plain
//! lookups) plus a warning-level log line, and play continues. Nothing
//! in the core raises an unrecoverable fault during normal play.

use thiserror::Error;

use crate::board::Coord;
use crate::core::{PlayerId, SessionState};
use crate::registry::ControllerId;

/// Recoverable engine errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The cell already has an owner; ownership is locked until the
    /// board resets.
    #[error("cell {cell} is already owned by {owner}")]
    AlreadyOwned { cell: Coord, owner: PlayerId },

    /// No cell at the requested coordinates (out of range or the board
    /// is unbuilt).
    #[error("no cell at ({x}, {y})")]
    CellNotFound { x: i32, y: i32 },

    /// The player is not in the roster.
    #[error("{0} is not in the roster")]
    PlayerNotFound(PlayerId),

    /// No live service instance under the requested type tag.
    #[error("service {0} is not registered")]
    ServiceNotFound(&'static str),

    /// The controller id does not resolve to a live controller.
    #[error("{0} is not registered")]
    ControllerNotFound(ControllerId),

    /// Player creation was rejected because the roster is full.
    #[error("player roster is full ({max} players)")]
    CapacityExceeded { max: usize },

    /// The requested operation is not legal in the current session
    /// state.
    #[error("cannot {action} while session is {state}")]
    InvalidTransition {
        action: &'static str,
        state: SessionState,
    },

    /// A turn-based action arrived from a player who is not current.
    #[error("it is not {0}'s turn")]
    NotPlayersTurn(PlayerId),

    /// An event subscriber reported a failure; delivery to the
    /// remaining subscribers continued.
    #[error("event handler fault: {0}")]
    HandlerFault(String),
}
