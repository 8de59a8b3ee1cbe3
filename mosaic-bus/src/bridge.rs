//! The event bridge: mirrors channel traffic across a transport.
//!
//! Every locally published message is relayed out; every inbound envelope
//! is re-published locally, tagged as relayed. Two rules break relay loops:
//!
//! 1. Relayed messages (`Message::relayed`) are never mirrored back out.
//! 2. Inbound envelopes carrying this bridge's own origin marker are
//!    dropped — a transport that echoes our sends cannot make us publish
//!    the same message twice.
//!
//! Dropped echoes are counted and traced, never raised: the channel never
//! fails by contract.

use crate::channel::{EventChannel, MessageFilter, Subscription};
use crate::transport::{MessageTransport, WireEnvelope};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub use crate::transport::BridgeId;

/// Relays messages between an [`EventChannel`] and a [`MessageTransport`].
pub struct EventBridge {
    id: BridgeId,
    subscription: Subscription,
    outbound: JoinHandle<()>,
    inbound: JoinHandle<()>,
    dropped_echoes: Arc<AtomicU64>,
}

impl EventBridge {
    /// Starts relaying between `channel` and `transport`.
    ///
    /// Spawns two tasks: one draining locally published messages onto the
    /// transport, one publishing inbound envelopes back onto the channel.
    /// Must be called within a tokio runtime.
    pub fn spawn(channel: EventChannel, transport: Arc<dyn MessageTransport>) -> Self {
        let id = BridgeId::new();

        // Local publishes are synchronous; queue them for the async send.
        let (out_tx, mut out_rx) = mpsc::unbounded_channel::<WireEnvelope>();
        let subscription = channel.subscribe(MessageFilter::any(), move |message| {
            if message.relayed {
                return;
            }
            let _ = out_tx.send(WireEnvelope::from_message(message, id));
        });

        let send_transport = Arc::clone(&transport);
        let outbound = tokio::spawn(async move {
            while let Some(envelope) = out_rx.recv().await {
                if let Err(error) = send_transport.send(envelope).await {
                    warn!(bridge_id = %id, %error, "Failed to relay envelope out");
                }
            }
        });

        let dropped_echoes = Arc::new(AtomicU64::new(0));
        let dropped = Arc::clone(&dropped_echoes);
        let inbound = tokio::spawn(async move {
            while let Some(envelope) = transport.recv().await {
                if envelope.origin == id {
                    dropped.fetch_add(1, Ordering::Relaxed);
                    debug!(bridge_id = %id, kind = %envelope.kind, "Dropped echoed envelope");
                    continue;
                }
                channel.publish(envelope.into_message());
            }
            debug!(bridge_id = %id, "Transport closed, inbound relay stopped");
        });

        Self {
            id,
            subscription,
            outbound,
            inbound,
            dropped_echoes,
        }
    }

    /// This bridge's origin marker.
    #[must_use]
    pub fn id(&self) -> BridgeId {
        self.id
    }

    /// Number of echoed envelopes dropped by loop prevention.
    #[must_use]
    pub fn dropped_echoes(&self) -> u64 {
        self.dropped_echoes.load(Ordering::Relaxed)
    }

    /// Stops relaying in both directions.
    pub fn shutdown(self) {
        self.subscription.unsubscribe();
        self.outbound.abort();
        self.inbound.abort();
    }
}
