//! Synchronous multicast event channels.
//!
//! Every component that publishes notifications owns one channel per
//! event type. Delivery is synchronous, in subscription order, on the
//! calling thread; there is no queueing and no cross-thread delivery.
//! A handler that reports a failure is logged and counted, and the
//! remaining handlers still run.

use log::error;
use smallvec::SmallVec;

use crate::error::GameError;

/// Identifies one subscription on one channel.
///
/// Returned by `subscribe` and redeemed by `unsubscribe`; ids are
/// channel-local and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub u32);

impl SubscriberId {
    /// Create a new subscriber ID.
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

impl std::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Subscriber({})", self.0)
    }
}

type Handler<E> = Box<dyn FnMut(&E) -> Result<(), GameError>>;

struct Subscriber<E> {
    id: SubscriberId,
    handler: Handler<E>,
}

/// A per-owner multicast list for one event type.
///
/// Most channels have one or two subscribers, so the list stores a
/// couple inline before spilling to the heap.
pub struct EventChannel<E> {
    subscribers: SmallVec<[Subscriber<E>; 2]>,
    next_id: u32,
    emitted: u64,
    faults: u64,
}

impl<E> Default for EventChannel<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventChannel<E> {
    /// Create a new channel with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: SmallVec::new(),
            next_id: 0,
            emitted: 0,
            faults: 0,
        }
    }

    /// Append a fallible handler, returning its subscription id.
    pub fn subscribe(
        &mut self,
        handler: impl FnMut(&E) -> Result<(), GameError> + 'static,
    ) -> SubscriberId {
        let id = SubscriberId::new(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            handler: Box::new(handler),
        });
        id
    }

    /// Append a handler that cannot fail.
    pub fn observe(&mut self, mut handler: impl FnMut(&E) + 'static) -> SubscriberId {
        self.subscribe(move |event| {
            handler(event);
            Ok(())
        })
    }

    /// Remove a subscription by id. Returns whether it was present.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    /// Deliver an event to all current subscribers in subscription
    /// order. Returns how many handlers reported a fault; the faults
    /// are logged and do not stop delivery to later subscribers.
    pub fn emit(&mut self, event: &E) -> usize {
        self.emitted += 1;
        let mut failed = 0;
        for subscriber in &mut self.subscribers {
            if let Err(err) = (subscriber.handler)(event) {
                error!("event handler {} failed: {}", subscriber.id, err);
                failed += 1;
            }
        }
        self.faults += failed as u64;
        failed
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Check whether anyone is listening.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Total events emitted over the channel's lifetime.
    #[must_use]
    pub fn emitted_count(&self) -> u64 {
        self.emitted
    }

    /// Total handler faults over the channel's lifetime.
    #[must_use]
    pub fn fault_count(&self) -> u64 {
        self.faults
    }
}

impl<E> std::fmt::Debug for EventChannel<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventChannel")
            .field("subscribers", &self.subscribers.len())
            .field("emitted", &self.emitted)
            .field("faults", &self.faults)
            .finish()
    }
}
