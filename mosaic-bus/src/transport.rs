//! Cross-context message transport abstraction.
//!
//! Conceptually the wire protocol of the bridge: a tagged envelope that any
//! isolated execution context (separately bundled fragment, other window)
//! can send or receive. Defining it as a trait keeps the bridge's
//! loop-prevention and filtering logic unit-testable without a real
//! browser context.
//!
//! There is no schema versioning or signing: any peer with access to the
//! transport can forge envelopes. That is an accepted trust boundary, not
//! a bug.

use crate::error::{BusError, BusResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mosaic_types::{FragmentId, Message};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Relay marker identifying which bridge put an envelope on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BridgeId(Uuid);

impl BridgeId {
    /// Creates a fresh bridge ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BridgeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BridgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The on-the-wire shape of a relayed message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireEnvelope {
    /// Message kind.
    pub kind: String,
    /// Arbitrary serializable payload.
    pub payload: Value,
    /// Originating fragment.
    pub source: FragmentId,
    /// Optional recipient; absent means broadcast.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<FragmentId>,
    /// ISO-8601 publish time.
    pub timestamp: DateTime<Utc>,
    /// The bridge that relayed this envelope out. Used to drop echoes.
    pub origin: BridgeId,
}

impl WireEnvelope {
    /// Wraps a local message for relay by `origin`.
    pub fn from_message(message: &Message, origin: BridgeId) -> Self {
        Self {
            kind: message.kind.clone(),
            payload: message.payload.clone(),
            source: message.source.clone(),
            target: message.target.clone(),
            timestamp: message.timestamp,
            origin,
        }
    }

    /// Converts an inbound envelope into a relay-tagged local message.
    pub fn into_message(self) -> Message {
        Message {
            kind: self.kind,
            payload: self.payload,
            source: self.source,
            target: self.target,
            timestamp: self.timestamp,
            relayed: true,
        }
    }
}

/// A bidirectional envelope transport between execution contexts.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Sends an envelope to the other side.
    async fn send(&self, envelope: WireEnvelope) -> BusResult<()>;

    /// Receives the next inbound envelope.
    /// Returns `None` when the transport has shut down.
    async fn recv(&self) -> Option<WireEnvelope>;
}

/// An in-memory transport for testing and single-process wiring.
pub mod mock {
    use super::*;
    use tokio::sync::mpsc;
    use tokio::sync::Mutex;

    /// In-memory [`MessageTransport`] backed by unbounded channels.
    pub struct MockTransport {
        outgoing: mpsc::UnboundedSender<WireEnvelope>,
        incoming: Mutex<mpsc::UnboundedReceiver<WireEnvelope>>,
    }

    /// The far end of a [`MockTransport`]: observe what the bridge sent and
    /// inject envelopes for it to receive.
    pub struct MockRemote {
        sent: Mutex<mpsc::UnboundedReceiver<WireEnvelope>>,
        inject: mpsc::UnboundedSender<WireEnvelope>,
    }

    impl MockTransport {
        /// Creates a transport plus its remote control end.
        pub fn channel() -> (Self, MockRemote) {
            let (out_tx, out_rx) = mpsc::unbounded_channel();
            let (in_tx, in_rx) = mpsc::unbounded_channel();
            (
                Self {
                    outgoing: out_tx,
                    incoming: Mutex::new(in_rx),
                },
                MockRemote {
                    sent: Mutex::new(out_rx),
                    inject: in_tx,
                },
            )
        }

        /// Creates a cross-wired pair: envelopes sent on one side arrive on
        /// the other, like two bridges sharing one window transport.
        pub fn pair() -> (Self, Self) {
            let (a_tx, a_rx) = mpsc::unbounded_channel();
            let (b_tx, b_rx) = mpsc::unbounded_channel();
            (
                Self {
                    outgoing: a_tx,
                    incoming: Mutex::new(b_rx),
                },
                Self {
                    outgoing: b_tx,
                    incoming: Mutex::new(a_rx),
                },
            )
        }
    }

    #[async_trait]
    impl MessageTransport for MockTransport {
        async fn send(&self, envelope: WireEnvelope) -> BusResult<()> {
            self.outgoing
                .send(envelope)
                .map_err(|_| BusError::TransportClosed)
        }

        async fn recv(&self) -> Option<WireEnvelope> {
            self.incoming.lock().await.recv().await
        }
    }

    impl MockRemote {
        /// Next envelope the bridge sent out, if any has arrived.
        pub async fn next_sent(&self) -> Option<WireEnvelope> {
            self.sent.lock().await.recv().await
        }

        /// Injects an envelope for the bridge to receive.
        pub fn inject(&self, envelope: WireEnvelope) {
            let _ = self.inject.send(envelope);
        }
    }
}
