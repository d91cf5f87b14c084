//! Event System
//!
//! Provides a pub/sub event bus so editors and code generators can follow
//! changes to the resource repository.

use std::path::PathBuf;
use parking_lot::RwLock;
use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::debug;

/// Events emitted while the resource repository changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceEvent {
    /// A resource name was seen for the first time
    ItemCreated { resource_type: String, name: String },
    /// A source file was indexed
    FileAdded { path: PathBuf, resources: usize },
    /// A source file was dropped from the index
    FileRemoved { path: PathBuf },
    /// All items were reset ahead of a bulk rescan
    RescanStarted,
    /// A bulk rescan completed
    RescanFinished { items: usize, empty: usize },
}

/// Subscriber handle for receiving events
#[derive(Clone)]
pub struct EventSubscription {
    receiver: Receiver<ResourceEvent>,
}

impl EventSubscription {
    /// Receive the next event (blocking)
    pub fn recv(&self) -> Result<ResourceEvent, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive an event (non-blocking)
    pub fn try_recv(&self) -> Result<ResourceEvent, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Drain every event queued so far
    pub fn drain(&self) -> Vec<ResourceEvent> {
        self.receiver.try_iter().collect()
    }
}

/// Event bus for publish/subscribe pattern
pub struct EventBus {
    subscribers: RwLock<Vec<Sender<ResourceEvent>>>,
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> EventSubscription {
        let (sender, receiver) = unbounded();
        self.subscribers.write().push(sender);
        EventSubscription { receiver }
    }

    /// Emit an event to all subscribers
    ///
    /// Subscribers whose receiving side has been dropped are removed.
    pub fn emit(&self, event: ResourceEvent) -> usize {
        let mut subscribers = self.subscribers.write();
        subscribers.retain(|sender| sender.send(event.clone()).is_ok());
        let delivered = subscribers.len();

        debug!("Event {:?} delivered to {} subscribers", event, delivered);
        delivered
    }

    /// Get the number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_bus() {
        let bus = EventBus::new();
        let sub1 = bus.subscribe();
        let sub2 = bus.subscribe();

        assert_eq!(bus.subscriber_count(), 2);

        let delivered = bus.emit(ResourceEvent::RescanStarted);
        assert_eq!(delivered, 2);

        assert_eq!(sub1.try_recv().unwrap(), ResourceEvent::RescanStarted);
        assert!(sub2.try_recv().is_ok());
    }

    #[test]
    fn test_dropped_subscriber_not_counted() {
        let bus = EventBus::new();
        let kept = bus.subscribe();
        drop(bus.subscribe());

        let delivered = bus.emit(ResourceEvent::RescanFinished { items: 3, empty: 1 });
        assert_eq!(delivered, 1);
        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(kept.drain().len(), 1);
    }
}
