//! Bus message type and well-known message kinds.
//!
//! Messages are the only way fragments talk to each other: a fragment
//! publishes a message on the event channel, and interested fragments
//! subscribe by kind, source and/or target. Messages are immutable once
//! published and are never persisted — a subscriber added after a message
//! was published never sees it.

use crate::FragmentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A message published on the event channel.
///
/// An absent `target` means "broadcast": the message matches every target
/// predicate regardless of its value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// The message kind (see [`kinds`] for well-known values).
    pub kind: String,

    /// Opaque payload; its shape is a contract between sender and receiver.
    pub payload: Value,

    /// The fragment that published this message.
    pub source: FragmentId,

    /// Optional recipient; absent means broadcast.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<FragmentId>,

    /// When the message was published.
    pub timestamp: DateTime<Utc>,

    /// Set on messages injected by a bridge relay. Local-only: relayed
    /// messages are delivered to subscribers but never mirrored back out,
    /// which is what breaks relay loops.
    #[serde(skip)]
    pub relayed: bool,
}

impl Message {
    /// Creates a broadcast message with the current timestamp.
    pub fn new(kind: impl Into<String>, payload: Value, source: FragmentId) -> Self {
        Self {
            kind: kind.into(),
            payload,
            source,
            target: None,
            timestamp: Utc::now(),
            relayed: false,
        }
    }

    /// Addresses the message to a specific fragment.
    #[must_use]
    pub fn with_target(mut self, target: FragmentId) -> Self {
        self.target = Some(target);
        self
    }

    /// Marks the message as injected by a bridge relay.
    #[must_use]
    pub fn via_relay(mut self) -> Self {
        self.relayed = true;
        self
    }
}

/// Well-known message kinds exchanged between the shell and fragments.
pub mod kinds {
    /// A fragment requests navigation to a route.
    pub const NAVIGATION: &str = "navigation";
    /// The shell announces that the active route changed.
    pub const ROUTE_CHANGED: &str = "route_changed";
    /// A fragment created/updated/deleted one of its entities.
    pub const DATA_CHANGE: &str = "data_change";
    /// A user-initiated action worth reacting to in other fragments.
    pub const USER_ACTION: &str = "user_action";
    /// A fragment reports an error for the shell to surface.
    pub const ERROR: &str = "error";
    /// A shared-state entry changed (mirrored by the bridge).
    pub const STATE_CHANGED: &str = "state_changed";
}

/// Well-known shared state store keys.
pub mod state_keys {
    /// The currently active navigation path, written by the shell router.
    pub const CURRENT_PATH: &str = "navigation.current_path";
}
