//! Service registry and controllers.
//!
//! A `Service` is a singleton-per-type long-lived component; the
//! `ServiceRegistry` maps each type tag to its single live instance,
//! orders initialization by priority, and announces the moment every
//! live service has finished initializing. `Controller`s are small
//! registrable units that publish a generic action event and belong to
//! exactly one service at a time.
//!
//! The registry is an explicit object handed to whoever needs lookup;
//! there is no global state. Components are expected to tolerate
//! absence: `get` before registration is `None`, not an error.

pub mod controller;
pub mod service;

pub use controller::{Controller, ControllerId};
pub use service::{Service, ServiceRegistry};
