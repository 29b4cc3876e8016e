//! Event infrastructure: multicast channels and typed payloads.
//!
//! The core communicates outward exclusively through these channels.
//! Each publishing component owns one `EventChannel` per payload type;
//! handler registration is checked at compile time against the payload
//! struct, so there is no stringly-typed dispatch anywhere.
//!
//! ## Delivery contract
//!
//! - Synchronous, on the calling thread, in subscription order.
//! - A handler fault is logged and counted; later handlers still run.
//! - No queueing: by the time `emit` returns, every handler has run.

pub mod channel;
pub mod messages;

pub use channel::{EventChannel, SubscriberId};
pub use messages::{
    AllServicesReady, BoardReset, ControllerAction, GameEnded, GameStarted, OwnerChanged,
    PlayerJoined, PlayerLeft, ServiceRegistered, ServiceUnregistered, TurnChanged, TurnStarted,
};
