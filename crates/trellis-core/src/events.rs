//! Multicast notification lists.
//!
//! Controls expose state-change notifications as [`Multicast`] fields.
//! Subscribing returns a [`Subscription`] token for later removal, and
//! dispatch iterates a snapshot of the handler list taken at fire time, so
//! a handler may subscribe or unsubscribe during dispatch without
//! invalidating the iteration.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicU64, Ordering},
};

/// A token identifying one subscribed handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// A shared, callable handler slot.
type Handler<E> = Arc<Mutex<dyn FnMut(&E) + Send>>;

/// An ordered list of notification handlers for events of type `E`.
pub struct Multicast<E> {
    /// Next subscription token to hand out.
    next: AtomicU64,
    /// Subscribed handlers in subscription order.
    handlers: Mutex<Vec<(u64, Handler<E>)>>,
}

impl<E> Multicast<E> {
    /// Create an empty handler list.
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
            handlers: Mutex::new(Vec::new()),
        }
    }

    /// Add a handler, returning its removal token.
    pub fn subscribe(&self, handler: impl FnMut(&E) + Send + 'static) -> Subscription {
        let token = self.next.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut handlers) = self.handlers.lock() {
            handlers.push((token, Arc::new(Mutex::new(handler))));
        }
        Subscription(token)
    }

    /// Remove a previously subscribed handler. Returns false when the token
    /// does not name a live subscription.
    pub fn unsubscribe(&self, sub: Subscription) -> bool {
        let Ok(mut handlers) = self.handlers.lock() else {
            return false;
        };
        let before = handlers.len();
        handlers.retain(|(token, _)| *token != sub.0);
        handlers.len() != before
    }

    /// Notify all handlers subscribed at the moment of the call.
    ///
    /// The handler list is snapshotted before the first call, then released,
    /// so handlers may mutate the subscription list freely.
    pub fn emit(&self, event: &E) {
        let snapshot: Vec<Handler<E>> = match self.handlers.lock() {
            Ok(handlers) => handlers
                .iter()
                .map(|(_, handler)| Arc::clone(handler))
                .collect(),
            Err(_) => return,
        };
        for handler in snapshot {
            if let Ok(mut f) = handler.lock() {
                f(event);
            }
        }
    }

    /// The number of live subscriptions.
    pub fn len(&self) -> usize {
        self.handlers.lock().map(|h| h.len()).unwrap_or(0)
    }

    /// True when no handlers are subscribed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E> Default for Multicast<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_emit_unsubscribe() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mc: Multicast<u32> = Multicast::new();

        let sink = Arc::clone(&seen);
        let sub = mc.subscribe(move |v| sink.lock().unwrap().push(*v));
        mc.emit(&1);
        mc.emit(&2);

        assert!(mc.unsubscribe(sub));
        assert!(!mc.unsubscribe(sub));
        mc.emit(&3);

        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn dispatch_order_is_subscription_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mc: Multicast<()> = Multicast::new();
        for tag in 0..3 {
            let sink = Arc::clone(&seen);
            let _sub = mc.subscribe(move |()| sink.lock().unwrap().push(tag));
        }
        mc.emit(&());
        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn snapshot_tolerates_mutation_during_dispatch() {
        let mc = Arc::new(Multicast::<u32>::new());
        let count = Arc::new(Mutex::new(0u32));

        let inner_mc = Arc::clone(&mc);
        let inner_count = Arc::clone(&count);
        let _sub = mc.subscribe(move |_| {
            *inner_count.lock().unwrap() += 1;
            // A handler added mid-dispatch must not run during this emit.
            let late_count = Arc::clone(&inner_count);
            let _late = inner_mc.subscribe(move |_| {
                *late_count.lock().unwrap() += 100;
            });
        });

        mc.emit(&0);
        assert_eq!(*count.lock().unwrap(), 1);
    }
}
