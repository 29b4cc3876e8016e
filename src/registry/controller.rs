//! Controllers: registrable units that publish a generic action event.
//!
//! A controller belongs to at most one service at a time; attaching it
//! elsewhere detaches it from its previous owner. The service registry
//! owns the controller records and assigns their ids.

use crate::events::{ControllerAction, EventChannel};

/// Stable controller identifier, assigned by the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ControllerId(pub u32);

impl ControllerId {
    /// Create a new controller ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ControllerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Controller({})", self.0)
    }
}

/// A registrable unit that publishes `ControllerAction`.
#[derive(Debug)]
pub struct Controller {
    id: ControllerId,
    name: String,
    actions: EventChannel<ControllerAction>,
}

impl Controller {
    pub(crate) fn new(id: ControllerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            actions: EventChannel::new(),
        }
    }

    /// Registry-assigned id.
    #[must_use]
    pub fn id(&self) -> ControllerId {
        self.id
    }

    /// Diagnostic name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Publish the generic action event to all subscribers.
    pub fn emit_action(&mut self) {
        let action = ControllerAction { controller: self.id };
        self.actions.emit(&action);
    }

    /// Channel publishing `ControllerAction`.
    pub fn on_action(&mut self) -> &mut EventChannel<ControllerAction> {
        &mut self.actions
    }
}
