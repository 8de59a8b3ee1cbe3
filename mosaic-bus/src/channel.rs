//! The event channel: synchronous in-process publish/subscribe.

use mosaic_types::{FragmentId, Message};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

type Handler = Box<dyn Fn(&Message) + Send + Sync>;

/// A predicate over messages. All set fields must match (boolean AND).
///
/// A message with no `target` matches every target predicate — broadcast
/// messages are visible to everyone, including subscribers filtering for a
/// specific recipient.
#[derive(Default, Clone)]
pub struct MessageFilter {
    kind: Option<String>,
    source: Option<FragmentId>,
    target: Option<FragmentId>,
}

impl MessageFilter {
    /// Matches every message.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Restricts to a message kind.
    #[must_use]
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Restricts to messages published by a fragment.
    #[must_use]
    pub fn from(mut self, source: impl Into<FragmentId>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Restricts to messages addressed to a fragment (or broadcast).
    #[must_use]
    pub fn for_target(mut self, target: impl Into<FragmentId>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Whether a message satisfies this filter.
    #[must_use]
    pub fn matches(&self, message: &Message) -> bool {
        if let Some(kind) = &self.kind {
            if &message.kind != kind {
                return false;
            }
        }
        if let Some(source) = &self.source {
            if &message.source != source {
                return false;
            }
        }
        if let Some(target) = &self.target {
            // No target on the message means broadcast.
            if let Some(addressed) = &message.target {
                if addressed != target {
                    return false;
                }
            }
        }
        true
    }
}

struct SubscriberEntry {
    id: u64,
    filter: MessageFilter,
    handler: Handler,
    active: AtomicBool,
}

struct ChannelInner {
    subscribers: Mutex<Vec<Arc<SubscriberEntry>>>,
    next_id: AtomicU64,
}

/// A synchronous in-process publish/subscribe channel.
///
/// `publish` invokes matching handlers before it returns, in subscription
/// (insertion) order. There is no persistence: a subscriber added after a
/// message was published never sees it. Cloning shares the channel.
#[derive(Clone)]
pub struct EventChannel {
    inner: Arc<ChannelInner>,
}

impl Default for EventChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl EventChannel {
    /// Creates an empty channel.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ChannelInner {
                subscribers: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Publishes a message, synchronously delivering it to every active
    /// subscriber whose filter matches.
    ///
    /// The subscriber list is snapshotted before delivery, so a handler may
    /// publish or subscribe reentrantly; subscriptions made during delivery
    /// only see later messages.
    pub fn publish(&self, message: Message) {
        let snapshot: Vec<Arc<SubscriberEntry>> = {
            let subscribers = self.inner.subscribers.lock().unwrap();
            subscribers.clone()
        };

        for entry in snapshot {
            if entry.active.load(Ordering::Acquire) && entry.filter.matches(&message) {
                (entry.handler)(&message);
            }
        }
    }

    /// Convenience: builds a broadcast message and publishes it.
    pub fn emit(&self, kind: impl Into<String>, payload: Value, source: impl Into<FragmentId>) {
        self.publish(Message::new(kind, payload, source.into()));
    }

    /// Registers a handler for every future message matching `filter`.
    ///
    /// The handler runs synchronously inside `publish`, in the same task
    /// turn, with no reordering. Delivery continues until
    /// [`Subscription::unsubscribe`] is called; dropping the handle alone
    /// does not stop delivery.
    pub fn subscribe<F>(&self, filter: MessageFilter, handler: F) -> Subscription
    where
        F: Fn(&Message) + Send + Sync + 'static,
    {
        let entry = Arc::new(SubscriberEntry {
            id: self.inner.next_id.fetch_add(1, Ordering::Relaxed),
            filter,
            handler: Box::new(handler),
            active: AtomicBool::new(true),
        });

        self.inner.subscribers.lock().unwrap().push(Arc::clone(&entry));

        Subscription {
            entry,
            channel: Arc::downgrade(&self.inner),
        }
    }

    /// Number of active subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.lock().unwrap().len()
    }
}

/// Handle to an active subscription.
pub struct Subscription {
    entry: Arc<SubscriberEntry>,
    channel: std::sync::Weak<ChannelInner>,
}

impl Subscription {
    /// Stops delivery. Guaranteed before this call returns: the handler is
    /// deactivated first, then removed from the channel, so no late
    /// deliveries occur.
    pub fn unsubscribe(&self) {
        self.entry.active.store(false, Ordering::Release);
        if let Some(inner) = self.channel.upgrade() {
            inner
                .subscribers
                .lock()
                .unwrap()
                .retain(|e| e.id != self.entry.id);
        }
    }

    /// Whether the subscription still delivers.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.entry.active.load(Ordering::Acquire)
    }
}
