//! Service registry integration tests.
//!
//! These tests exercise the registry contracts end to end: singleton
//! replacement, priority ordering, the one-shot all-ready
//! notification, and controller ownership across services.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gridgame::{GameConfig, GridGameEngine, Service, ServiceRegistry};

struct SoundService {
    volume: u8,
}

impl Service for SoundService {
    fn name(&self) -> &str {
        "sound"
    }

    fn priority(&self) -> i32 {
        20
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

struct InputService;

impl Service for InputService {
    fn name(&self) -> &str {
        "input"
    }

    fn priority(&self) -> i32 {
        -10
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[test]
fn absent_services_are_tolerated() {
    let registry = ServiceRegistry::new();
    assert!(registry.get::<SoundService>().is_none());
    assert!(registry.get::<InputService>().is_none());
}

#[test]
fn replacement_swaps_instance_and_detaches_controllers() {
    let mut registry = ServiceRegistry::new();
    registry.register(SoundService { volume: 3 });

    let knob = registry.create_controller("volume knob");
    registry.attach_controller::<SoundService>(knob).unwrap();

    registry.register(SoundService { volume: 9 });

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get::<SoundService>().unwrap().volume, 9);
    assert!(registry.controllers_of::<SoundService>().is_empty());

    // The surviving controller can serve the replacement instance.
    registry.attach_controller::<SoundService>(knob).unwrap();
    assert_eq!(registry.controllers_of::<SoundService>(), vec![knob]);
}

#[test]
fn initialization_order_follows_priority() {
    let mut registry = ServiceRegistry::new();
    registry.register(SoundService { volume: 5 });
    registry.register(InputService);

    assert_eq!(registry.services_by_priority(), vec!["input", "sound"]);
}

#[test]
fn all_ready_fires_once_per_transition() {
    let mut registry = ServiceRegistry::new();
    let announcements = Rc::new(Cell::new(0));

    let counter = Rc::clone(&announcements);
    registry
        .on_all_ready()
        .observe(move |_| counter.set(counter.get() + 1));

    registry.register(SoundService { volume: 1 });
    registry.register(InputService);

    registry.mark_initialized::<InputService>();
    registry.mark_initialized::<SoundService>();
    registry.mark_initialized::<SoundService>();
    assert_eq!(announcements.get(), 1);

    // A later registration resets readiness; the announcement fires
    // again once the newcomer initializes.
    registry.register(SoundService { volume: 2 });
    assert_eq!(announcements.get(), 1);
    registry.mark_initialized::<SoundService>();
    assert_eq!(announcements.get(), 2);
}

#[test]
fn controller_actions_reach_service_side_subscribers() {
    let mut registry = ServiceRegistry::new();
    registry.register(InputService);

    let pointer = registry.create_controller("pointer");
    registry.attach_controller::<InputService>(pointer).unwrap();

    let actions = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&actions);
    registry
        .controller_mut(pointer)
        .unwrap()
        .on_action()
        .observe(move |event| sink.borrow_mut().push(event.controller));

    registry.controller_mut(pointer).unwrap().emit_action();
    registry.controller_mut(pointer).unwrap().emit_action();

    assert_eq!(*actions.borrow(), vec![pointer, pointer]);
}

#[test]
fn engine_lives_in_the_registry_as_a_service() {
    let mut registry = ServiceRegistry::new();
    registry.register(GridGameEngine::with_defaults(GameConfig::tictactoe()));
    registry.register(InputService);

    // Collaborators resolve the engine by type and drive it in place.
    {
        let engine = registry.get_mut::<GridGameEngine>().unwrap();
        let a = engine.add_player().unwrap();
        engine.add_player().unwrap();
        engine.start_game().unwrap();
        engine.select_cell(a, 1, 1).unwrap();
    }

    registry.mark_initialized::<GridGameEngine>();
    registry.mark_initialized::<InputService>();

    let engine = registry.get::<GridGameEngine>().unwrap();
    assert_eq!(engine.board().owner_at(1, 1), engine.players().ids().next());
}
