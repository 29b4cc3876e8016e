//! Service registry: one live instance per type tag.
//!
//! Services are long-lived singletons looked up by their concrete Rust
//! type. The registry tracks initialization, keeps the live list
//! sorted by ascending priority, and owns the controllers attached to
//! each service.
//!
//! Lookup before registration is not an error: `get` yields `None` and
//! callers are expected to tolerate absence. Registering a duplicate
//! tag replaces the prior instance (with a warning) rather than
//! failing.

use std::any::{Any, TypeId};

use log::{debug, warn};
use rustc_hash::FxHashMap;

use crate::error::GameError;
use crate::events::{
    AllServicesReady, EventChannel, ServiceRegistered, ServiceUnregistered,
};

use super::controller::{Controller, ControllerId};

/// A long-lived singleton component with lookup and lifecycle.
///
/// Implementors are stored by their concrete type; the registry keeps
/// exactly one live instance per type.
pub trait Service: Any {
    /// Diagnostic name.
    fn name(&self) -> &str;

    /// Initialization order; lower priorities initialize first.
    fn priority(&self) -> i32 {
        0
    }

    /// Upcast for typed lookup.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for typed lookup.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

struct ServiceEntry {
    tag: TypeId,
    service: Box<dyn Service>,
    initialized: bool,
    controllers: Vec<ControllerId>,
}

/// Registry mapping a service's type tag to its single live instance.
pub struct ServiceRegistry {
    /// Live services, kept sorted by ascending priority.
    entries: Vec<ServiceEntry>,
    controllers: FxHashMap<ControllerId, Controller>,
    controller_owner: FxHashMap<ControllerId, TypeId>,
    next_controller_id: u32,
    /// Cleared whenever a fresh, uninitialized service registers, so
    /// the all-ready notification can fire again.
    ready_announced: bool,
    on_service_registered: EventChannel<ServiceRegistered>,
    on_service_unregistered: EventChannel<ServiceUnregistered>,
    on_all_ready: EventChannel<AllServicesReady>,
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            controllers: FxHashMap::default(),
            controller_owner: FxHashMap::default(),
            next_controller_id: 0,
            ready_announced: false,
            on_service_registered: EventChannel::new(),
            on_service_unregistered: EventChannel::new(),
            on_all_ready: EventChannel::new(),
        }
    }

    fn position(&self, tag: TypeId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.tag == tag)
    }

    /// Store a service under its type tag and publish
    /// `ServiceRegistered`.
    ///
    /// A prior instance under the same tag is evicted first (warning;
    /// its controllers are detached; eviction does not publish
    /// `ServiceUnregistered`). The live list is re-sorted by ascending
    /// priority, and the all-ready notification is re-armed.
    pub fn register<S: Service>(&mut self, service: S) {
        let tag = TypeId::of::<S>();

        if let Some(pos) = self.position(tag) {
            let old = self.entries.remove(pos);
            warn!(
                "service {} already registered; replacing with new instance",
                old.service.name()
            );
            for id in &old.controllers {
                self.controller_owner.remove(id);
            }
        }

        let name = service.name().to_string();
        let priority = service.priority();

        self.entries.push(ServiceEntry {
            tag,
            service: Box::new(service),
            initialized: false,
            controllers: Vec::new(),
        });
        self.entries.sort_by_key(|entry| entry.service.priority());
        self.ready_announced = false;

        debug!("service registered: {} (priority {})", name, priority);
        self.on_service_registered
            .emit(&ServiceRegistered { name, priority });
    }

    /// Remove the service stored under `S`, publish
    /// `ServiceUnregistered`, and detach its controllers. `None` when
    /// no such service is live.
    pub fn unregister<S: Service>(&mut self) -> Option<Box<dyn Service>> {
        let pos = self.position(TypeId::of::<S>())?;
        let entry = self.entries.remove(pos);

        for id in &entry.controllers {
            self.controller_owner.remove(id);
        }

        let name = entry.service.name().to_string();
        debug!("service unregistered: {}", name);
        self.on_service_unregistered
            .emit(&ServiceUnregistered { name });
        Some(entry.service)
    }

    /// Look up the live instance of `S`. Absence yields `None`, never
    /// a panic; callers must tolerate it.
    #[must_use]
    pub fn get<S: Service>(&self) -> Option<&S> {
        let pos = self.position(TypeId::of::<S>())?;
        self.entries[pos].service.as_any().downcast_ref::<S>()
    }

    /// Mutable lookup of the live instance of `S`.
    pub fn get_mut<S: Service>(&mut self) -> Option<&mut S> {
        let pos = self.position(TypeId::of::<S>())?;
        self.entries[pos].service.as_any_mut().downcast_mut::<S>()
    }

    /// Check whether a live instance of `S` exists.
    #[must_use]
    pub fn is_registered<S: Service>(&self) -> bool {
        self.position(TypeId::of::<S>()).is_some()
    }

    /// Mark the live instance of `S` as initialized. When every live
    /// service is initialized, `AllServicesReady` is published exactly
    /// once per all-ready transition.
    ///
    /// Returns whether the service was found.
    pub fn mark_initialized<S: Service>(&mut self) -> bool {
        let Some(pos) = self.position(TypeId::of::<S>()) else {
            warn!("cannot mark unknown service initialized");
            return false;
        };

        self.entries[pos].initialized = true;
        debug!("service initialized: {}", self.entries[pos].service.name());
        self.check_all_ready();
        true
    }

    fn check_all_ready(&mut self) {
        if self.ready_announced || self.entries.is_empty() {
            return;
        }
        if self.entries.iter().all(|entry| entry.initialized) {
            self.ready_announced = true;
            debug!("all {} services initialized", self.entries.len());
            self.on_all_ready.emit(&AllServicesReady);
        }
    }

    /// Check the initialized flag of `S`.
    #[must_use]
    pub fn is_initialized<S: Service>(&self) -> bool {
        self.position(TypeId::of::<S>())
            .is_some_and(|pos| self.entries[pos].initialized)
    }

    /// Service names in ascending priority order.
    #[must_use]
    pub fn services_by_priority(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|entry| entry.service.name())
            .collect()
    }

    /// Number of live services.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check for an empty registry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // === Controllers ===

    /// Create a registry-owned controller. It starts unattached.
    pub fn create_controller(&mut self, name: impl Into<String>) -> ControllerId {
        let id = ControllerId::new(self.next_controller_id);
        self.next_controller_id += 1;
        self.controllers.insert(id, Controller::new(id, name));
        id
    }

    /// Attach a controller to the live instance of `S`, detaching it
    /// from any previous owner first (one owner at a time).
    pub fn attach_controller<S: Service>(&mut self, id: ControllerId) -> Result<(), GameError> {
        if !self.controllers.contains_key(&id) {
            warn!("cannot attach {}: no such controller", id);
            return Err(GameError::ControllerNotFound(id));
        }
        let tag = TypeId::of::<S>();
        let Some(pos) = self.position(tag) else {
            warn!("cannot attach {}: service not registered", id);
            return Err(GameError::ServiceNotFound(std::any::type_name::<S>()));
        };

        if let Some(previous) = self.controller_owner.insert(id, tag) {
            if previous == tag {
                debug!("{} already attached to {}", id, self.entries[pos].service.name());
                return Ok(());
            }
            if let Some(prev_pos) = self.position(previous) {
                self.entries[prev_pos].controllers.retain(|&c| c != id);
            }
        }

        self.entries[pos].controllers.push(id);
        debug!("{} attached to {}", id, self.entries[pos].service.name());
        Ok(())
    }

    /// Detach a controller from its owner, if it has one. Returns
    /// whether anything changed.
    pub fn detach_controller(&mut self, id: ControllerId) -> bool {
        let Some(tag) = self.controller_owner.remove(&id) else {
            return false;
        };
        if let Some(pos) = self.position(tag) {
            self.entries[pos].controllers.retain(|&c| c != id);
        }
        true
    }

    /// Drop a controller entirely, detaching it first.
    pub fn remove_controller(&mut self, id: ControllerId) -> Option<Controller> {
        self.detach_controller(id);
        self.controllers.remove(&id)
    }

    /// Look up a controller.
    #[must_use]
    pub fn controller(&self, id: ControllerId) -> Option<&Controller> {
        self.controllers.get(&id)
    }

    /// Mutable controller lookup (for subscribing to or publishing its
    /// action event).
    pub fn controller_mut(&mut self, id: ControllerId) -> Option<&mut Controller> {
        self.controllers.get_mut(&id)
    }

    /// Ids of the controllers attached to the live instance of `S`.
    #[must_use]
    pub fn controllers_of<S: Service>(&self) -> Vec<ControllerId> {
        self.position(TypeId::of::<S>())
            .map(|pos| self.entries[pos].controllers.clone())
            .unwrap_or_default()
    }

    /// Channel publishing `ServiceRegistered`.
    pub fn on_service_registered(&mut self) -> &mut EventChannel<ServiceRegistered> {
        &mut self.on_service_registered
    }

    /// Channel publishing `ServiceUnregistered`.
    pub fn on_service_unregistered(&mut self) -> &mut EventChannel<ServiceUnregistered> {
        &mut self.on_service_unregistered
    }

    /// Channel publishing `AllServicesReady`.
    pub fn on_all_ready(&mut self) -> &mut EventChannel<AllServicesReady> {
        &mut self.on_all_ready
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("services", &self.services_by_priority())
            .field("controllers", &self.controllers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Audio {
        label: &'static str,
    }

    impl Service for Audio {
        fn name(&self) -> &str {
            "audio"
        }

        fn priority(&self) -> i32 {
            10
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    struct Input;

    impl Service for Input {
        fn name(&self) -> &str {
            "input"
        }

        fn priority(&self) -> i32 {
            -5
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn test_get_before_registration_is_none() {
        let registry = ServiceRegistry::new();
        assert!(registry.get::<Audio>().is_none());
        assert!(!registry.is_registered::<Audio>());
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = ServiceRegistry::new();
        registry.register(Audio { label: "first" });

        let audio = registry.get::<Audio>().unwrap();
        assert_eq!(audio.label, "first");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_get_mut() {
        let mut registry = ServiceRegistry::new();
        registry.register(Audio { label: "first" });

        registry.get_mut::<Audio>().unwrap().label = "changed";
        assert_eq!(registry.get::<Audio>().unwrap().label, "changed");
    }

    #[test]
    fn test_duplicate_registration_replaces() {
        let mut registry = ServiceRegistry::new();
        registry.register(Audio { label: "old" });
        registry.register(Audio { label: "new" });

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get::<Audio>().unwrap().label, "new");
    }

    #[test]
    fn test_replacement_detaches_old_controllers() {
        let mut registry = ServiceRegistry::new();
        registry.register(Audio { label: "old" });
        let controller = registry.create_controller("knob");
        registry.attach_controller::<Audio>(controller).unwrap();

        registry.register(Audio { label: "new" });
        assert!(registry.controllers_of::<Audio>().is_empty());
        // The controller itself survives, unattached.
        assert!(registry.controller(controller).is_some());
    }

    #[test]
    fn test_priority_ordering() {
        let mut registry = ServiceRegistry::new();
        registry.register(Audio { label: "a" });
        registry.register(Input);

        assert_eq!(registry.services_by_priority(), vec!["input", "audio"]);
    }

    #[test]
    fn test_unregister() {
        let mut registry = ServiceRegistry::new();
        registry.register(Audio { label: "a" });

        assert!(registry.unregister::<Audio>().is_some());
        assert!(registry.get::<Audio>().is_none());
        assert!(registry.unregister::<Audio>().is_none());
    }

    #[test]
    fn test_all_ready_fires_once() {
        let mut registry = ServiceRegistry::new();
        let fired = Rc::new(Cell::new(0));

        let fired_clone = Rc::clone(&fired);
        registry
            .on_all_ready()
            .observe(move |_| fired_clone.set(fired_clone.get() + 1));

        registry.register(Audio { label: "a" });
        registry.register(Input);

        registry.mark_initialized::<Audio>();
        assert_eq!(fired.get(), 0);

        registry.mark_initialized::<Input>();
        assert_eq!(fired.get(), 1);

        // Marking again must not re-fire.
        registry.mark_initialized::<Input>();
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_all_ready_rearmed_by_late_registration() {
        let mut registry = ServiceRegistry::new();
        let fired = Rc::new(Cell::new(0));

        let fired_clone = Rc::clone(&fired);
        registry
            .on_all_ready()
            .observe(move |_| fired_clone.set(fired_clone.get() + 1));

        registry.register(Audio { label: "a" });
        registry.mark_initialized::<Audio>();
        assert_eq!(fired.get(), 1);

        // A late registration resets readiness until it initializes.
        registry.register(Input);
        registry.mark_initialized::<Input>();
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn test_registration_events() {
        let mut registry = ServiceRegistry::new();
        let log = Rc::new(std::cell::RefCell::new(Vec::new()));

        let log_clone = Rc::clone(&log);
        registry.on_service_registered().observe(move |event| {
            log_clone.borrow_mut().push(format!("+{}", event.name));
        });
        let log_clone = Rc::clone(&log);
        registry.on_service_unregistered().observe(move |event| {
            log_clone.borrow_mut().push(format!("-{}", event.name));
        });

        registry.register(Audio { label: "a" });
        // Replacement publishes only the new registration.
        registry.register(Audio { label: "b" });
        registry.unregister::<Audio>();

        assert_eq!(*log.borrow(), vec!["+audio", "+audio", "-audio"]);
    }

    #[test]
    fn test_controller_single_owner() {
        let mut registry = ServiceRegistry::new();
        registry.register(Audio { label: "a" });
        registry.register(Input);

        let controller = registry.create_controller("pad");
        registry.attach_controller::<Audio>(controller).unwrap();
        assert_eq!(registry.controllers_of::<Audio>(), vec![controller]);

        // Re-attachment elsewhere moves ownership.
        registry.attach_controller::<Input>(controller).unwrap();
        assert!(registry.controllers_of::<Audio>().is_empty());
        assert_eq!(registry.controllers_of::<Input>(), vec![controller]);
    }

    #[test]
    fn test_attach_to_missing_service() {
        let mut registry = ServiceRegistry::new();
        let controller = registry.create_controller("pad");

        let err = registry.attach_controller::<Audio>(controller).unwrap_err();
        assert!(matches!(err, GameError::ServiceNotFound(_)));
    }

    #[test]
    fn test_attach_unknown_controller() {
        let mut registry = ServiceRegistry::new();
        registry.register(Audio { label: "a" });

        let err = registry
            .attach_controller::<Audio>(ControllerId::new(42))
            .unwrap_err();
        assert_eq!(err, GameError::ControllerNotFound(ControllerId::new(42)));
    }

    #[test]
    fn test_unregister_detaches_controllers() {
        let mut registry = ServiceRegistry::new();
        registry.register(Audio { label: "a" });
        let controller = registry.create_controller("pad");
        registry.attach_controller::<Audio>(controller).unwrap();

        registry.unregister::<Audio>();

        // Controller survives unattached and can be re-attached later.
        registry.register(Audio { label: "b" });
        assert!(registry.controllers_of::<Audio>().is_empty());
        registry.attach_controller::<Audio>(controller).unwrap();
        assert_eq!(registry.controllers_of::<Audio>(), vec![controller]);
    }

    #[test]
    fn test_controller_actions_via_registry() {
        let mut registry = ServiceRegistry::new();
        registry.register(Audio { label: "a" });
        let id = registry.create_controller("pad");
        registry.attach_controller::<Audio>(id).unwrap();

        let seen = Rc::new(Cell::new(None));
        let seen_clone = Rc::clone(&seen);
        registry
            .controller_mut(id)
            .unwrap()
            .on_action()
            .observe(move |event| seen_clone.set(Some(event.controller)));

        registry.controller_mut(id).unwrap().emit_action();
        assert_eq!(seen.get(), Some(id));
    }
}
