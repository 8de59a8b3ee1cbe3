//! Error types for the bus layer.
//!
//! The event channel and state store themselves never fail: malformed
//! filters or missing keys degrade to "no delivery" / `None`. Errors here
//! belong to the transport seam only.

use thiserror::Error;

/// Result type for bus operations.
pub type BusResult<T> = Result<T, BusError>;

/// Errors that can occur at the transport seam.
#[derive(Debug, Error)]
pub enum BusError {
    /// The underlying transport failed to carry an envelope.
    #[error("transport error: {0}")]
    Transport(String),

    /// The transport was shut down.
    #[error("transport closed")]
    TransportClosed,

    /// Envelope could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
