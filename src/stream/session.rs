//! Transport-independent streaming session.
//!
//! A [`Session`] registers with the [`Hub`], captures an `init` snapshot
//! from the [`Store`], and then relays every event published afterwards.
//! Transports supply a sink for outgoing events and a future that resolves
//! when the client goes away; the session never touches a socket itself.

use std::future::Future;
use std::pin::pin;

use futures_util::stream::{self, Stream};
use futures_util::{Sink, SinkExt, StreamExt, future};

use crate::domain::{Event, Hub, ItemEvent, Store, SubscriberId, Subscription};
use crate::error::InventoryError;

/// Why a session stopped relaying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The client disconnected or cancelled.
    Disconnected,
    /// The hub evicted this subscriber for falling behind.
    Evicted,
    /// Writing to the client failed.
    SinkClosed,
}

/// One open event stream.
#[derive(Debug)]
pub struct Session {
    init: Event,
    subscription: Subscription,
}

impl Session {
    /// Subscribes to `hub` and snapshots `store` into an `init` event.
    ///
    /// Registration happens before the snapshot, so no mutation can fall
    /// between the two unseen.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Internal`] if the snapshot cannot be
    /// encoded. The subscription is released in that case.
    pub fn open(store: &Store, hub: &Hub) -> Result<Self, InventoryError> {
        let subscription = hub.subscribe();
        let init = Event::encode(&ItemEvent::Init {
            items: store.list(),
        })?;
        tracing::debug!(subscriber = %subscription.id(), "session opened");
        Ok(Self { init, subscription })
    }

    /// Returns the subscriber id backing this session.
    #[must_use]
    pub fn subscriber_id(&self) -> SubscriberId {
        self.subscription.id()
    }

    /// Returns the `init` snapshot event.
    #[must_use]
    pub fn init(&self) -> &Event {
        &self.init
    }

    /// Sends the snapshot, then forwards events into `sink` until
    /// `disconnect` resolves, the sink fails, or the hub evicts this
    /// subscriber. The subscription is released on return.
    pub async fn run<S, D>(self, sink: S, disconnect: D) -> SessionEnd
    where
        S: Sink<Event>,
        D: Future<Output = ()>,
    {
        let Self {
            init,
            mut subscription,
        } = self;
        let mut sink = pin!(sink);
        let mut disconnect = pin!(disconnect);

        let end = if sink.send(init).await.is_err() {
            SessionEnd::SinkClosed
        } else {
            loop {
                tokio::select! {
                    () = &mut disconnect => break SessionEnd::Disconnected,
                    event = subscription.recv() => match event {
                        Some(event) => {
                            if sink.send(event).await.is_err() {
                                break SessionEnd::SinkClosed;
                            }
                        }
                        None => break SessionEnd::Evicted,
                    },
                }
            }
        };

        tracing::debug!(subscriber = %subscription.id(), ?end, "session closed");
        end
    }

    /// Turns the session into a stream yielding the snapshot followed by
    /// every relayed event.
    ///
    /// The stream ends if the hub evicts the subscriber. Dropping the
    /// stream releases the subscription, which is how pull-based
    /// transports signal disconnect.
    pub fn into_stream(self) -> impl Stream<Item = Event> + Send + 'static {
        let Self { init, subscription } = self;
        let updates = stream::unfold(subscription, |mut subscription| async move {
            let event = subscription.recv().await?;
            Some((event, subscription))
        });
        stream::once(future::ready(init)).chain(updates)
    }
}
