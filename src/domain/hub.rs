//! Fan-out of change events to live subscribers.
//!
//! [`Hub`] keeps one bounded [`tokio::sync::mpsc`] channel per subscriber.
//! Publishing never waits: each delivery is a `try_send`, and a subscriber
//! whose queue is still full from earlier events is evicted on the spot.
//! Dropping its sender closes the channel, so the subscriber sees the end
//! of its stream once it drains what was already queued.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use super::event::Event;

/// Queue depth used when none is configured.
pub const DEFAULT_SUBSCRIBER_BUFFER: usize = 1;

/// Identifier of a registered subscriber. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

#[derive(Debug)]
struct HubInner {
    subscribers: Mutex<HashMap<SubscriberId, mpsc::Sender<Event>>>,
    next_id: AtomicU64,
    buffer: usize,
}

/// Registry of live subscriber channels.
///
/// Cheap to clone; all clones share the same subscriber set. The set has
/// its own lock, independent of the [`super::Store`] lock, and publishing
/// is expected to happen after the store lock has been released.
#[derive(Debug, Clone)]
pub struct Hub {
    inner: Arc<HubInner>,
}

impl Hub {
    /// Creates a hub whose subscribers each buffer up to `buffer` events.
    ///
    /// A `buffer` of zero is treated as one.
    #[must_use]
    pub fn new(buffer: usize) -> Self {
        Self {
            inner: Arc::new(HubInner {
                subscribers: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(1),
                buffer: buffer.max(1),
            }),
        }
    }

    /// Registers a new subscriber and returns its receiving handle.
    ///
    /// The subscriber only sees events published after this call returns.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        let id = SubscriberId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let (sender, receiver) = mpsc::channel(self.inner.buffer);
        let count = {
            let mut subscribers = self.inner.subscribers.lock();
            subscribers.insert(id, sender);
            subscribers.len()
        };
        tracing::debug!(subscriber = %id, subscribers = count, "subscriber registered");
        Subscription {
            id,
            receiver,
            hub: self.clone(),
        }
    }

    /// Removes a subscriber, closing its channel.
    ///
    /// Unknown or already-removed ids are ignored.
    pub fn unsubscribe(&self, id: SubscriberId) {
        let removed = self.inner.subscribers.lock().remove(&id);
        if removed.is_some() {
            tracing::debug!(subscriber = %id, "subscriber unregistered");
        }
    }

    /// Offers `event` to every registered subscriber without blocking.
    ///
    /// Subscribers whose queue is full, or whose receiver is gone, are
    /// removed. Returns the number of subscribers the event was queued for.
    pub fn publish(&self, event: &Event) -> usize {
        let mut delivered = 0;
        let mut subscribers = self.inner.subscribers.lock();
        subscribers.retain(|id, sender| match sender.try_send(event.clone()) {
            Ok(()) => {
                delivered += 1;
                true
            }
            Err(TrySendError::Full(_)) => {
                tracing::warn!(
                    subscriber = %id,
                    action = event.action().as_str(),
                    "subscriber unresponsive, evicting"
                );
                false
            }
            Err(TrySendError::Closed(_)) => {
                tracing::debug!(subscriber = %id, "subscriber gone, removing");
                false
            }
        });
        delivered
    }

    /// Returns the current number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.lock().len()
    }

    /// Returns `true` if `id` is still registered.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn is_subscribed(&self, id: SubscriberId) -> bool {
        self.inner.subscribers.lock().contains_key(&id)
    }
}

impl Default for Hub {
    fn default() -> Self {
        Self::new(DEFAULT_SUBSCRIBER_BUFFER)
    }
}

/// Receiving end of one subscriber registration.
///
/// Dropping the handle unregisters the subscriber.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriberId,
    receiver: mpsc::Receiver<Event>,
    hub: Hub,
}

impl Subscription {
    /// Returns this subscriber's id.
    #[must_use]
    pub const fn id(&self) -> SubscriberId {
        self.id
    }

    /// Waits for the next event.
    ///
    /// Returns `None` once the hub has dropped this subscriber and every
    /// event queued before that has been received.
    pub async fn recv(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }

    /// Returns the next queued event, if any, without waiting.
    #[cfg(test)]
    pub(crate) fn try_recv(&mut self) -> Option<Event> {
        self.receiver.try_recv().ok()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.hub.unsubscribe(self.id);
    }
}
