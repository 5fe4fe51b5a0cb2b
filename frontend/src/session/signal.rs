use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Why the current session must be treated as dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidationReason {
    TokenExpired,
    Manual,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidationEvent {
    pub reason: InvalidationReason,
}

impl InvalidationEvent {
    pub fn token_expired() -> Self {
        Self {
            reason: InvalidationReason::TokenExpired,
        }
    }
}

type Handler = Rc<dyn Fn(&InvalidationEvent)>;

#[derive(Default)]
struct BusInner {
    next_id: u64,
    handlers: Vec<(u64, Handler)>,
}

/// Process-wide broadcast channel announcing session invalidation. Anything
/// noticing a rejected credential (typically the HTTP layer seeing a 401)
/// publishes here without holding a reference to session state.
///
/// Events are delivered synchronously, in subscription order, and are not
/// replayed to late subscribers.
#[derive(Clone, Default)]
pub struct InvalidationBus {
    inner: Rc<RefCell<BusInner>>,
}

impl InvalidationBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, event: InvalidationEvent) {
        // Snapshot the handler list so a handler may subscribe or
        // unsubscribe during dispatch without poisoning the borrow.
        let handlers: Vec<Handler> = self
            .inner
            .borrow()
            .handlers
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        for handler in handlers {
            handler(&event);
        }
    }

    pub fn subscribe(&self, handler: impl Fn(&InvalidationEvent) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.handlers.push((id, Rc::new(handler)));
        Subscription {
            id,
            bus: Rc::downgrade(&self.inner),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().handlers.len()
    }
}

/// Capability returned by [`InvalidationBus::subscribe`]. Dropping it
/// deregisters the handler.
pub struct Subscription {
    id: u64,
    bus: Weak<RefCell<BusInner>>,
}

impl Subscription {
    pub fn cancel(self) {}

    /// Keeps the handler registered for the life of the process.
    pub fn leak(self) {
        std::mem::forget(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.bus.upgrade() {
            inner.borrow_mut().handlers.retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn publish_without_subscribers_is_a_no_op() {
        let bus = InvalidationBus::new();
        bus.publish(InvalidationEvent::token_expired());
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn delivers_in_subscription_order() {
        let bus = InvalidationBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = {
            let seen = Rc::clone(&seen);
            bus.subscribe(move |_| seen.borrow_mut().push("first"))
        };
        let second = {
            let seen = Rc::clone(&seen);
            bus.subscribe(move |_| seen.borrow_mut().push("second"))
        };

        bus.publish(InvalidationEvent::token_expired());
        assert_eq!(*seen.borrow(), vec!["first", "second"]);

        first.cancel();
        second.cancel();
    }

    #[test]
    fn dropped_subscription_stops_delivery() {
        let bus = InvalidationBus::new();
        let count = Rc::new(RefCell::new(0));

        let subscription = {
            let count = Rc::clone(&count);
            bus.subscribe(move |_| *count.borrow_mut() += 1)
        };
        bus.publish(InvalidationEvent::token_expired());
        drop(subscription);
        bus.publish(InvalidationEvent::token_expired());

        assert_eq!(*count.borrow(), 1);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn late_subscribers_do_not_see_past_events() {
        let bus = InvalidationBus::new();
        bus.publish(InvalidationEvent::token_expired());

        let count = Rc::new(RefCell::new(0));
        let subscription = {
            let count = Rc::clone(&count);
            bus.subscribe(move |_| *count.borrow_mut() += 1)
        };
        assert_eq!(*count.borrow(), 0);
        subscription.cancel();
    }

    #[test]
    fn handler_may_subscribe_during_dispatch() {
        let bus = InvalidationBus::new();
        let inner_bus = bus.clone();
        let subscription = bus.subscribe(move |_| {
            inner_bus.subscribe(|_| {}).leak();
        });

        bus.publish(InvalidationEvent {
            reason: InvalidationReason::Manual,
        });
        assert_eq!(bus.subscriber_count(), 2);
        subscription.cancel();
    }

    #[test]
    fn event_carries_its_reason() {
        let bus = InvalidationBus::new();
        let seen = Rc::new(RefCell::new(None));
        let subscription = {
            let seen = Rc::clone(&seen);
            bus.subscribe(move |event: &InvalidationEvent| {
                *seen.borrow_mut() = Some(event.reason);
            })
        };

        bus.publish(InvalidationEvent {
            reason: InvalidationReason::Unknown,
        });
        assert_eq!(*seen.borrow(), Some(InvalidationReason::Unknown));
        subscription.cancel();
    }
}
