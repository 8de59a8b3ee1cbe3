//! In-process messaging for Mosaic.
//!
//! Fragments never hold references to each other's internals; everything
//! crosses three seams defined here:
//!
//! - **Channel**: a synchronous publish/subscribe bus. Delivery order
//!   equals publish order; for a single message, subscribers are invoked
//!   in subscription order.
//! - **State**: a process-wide observable key/value store for
//!   cross-fragment state (e.g. the current navigation path).
//! - **Bridge**: mirrors channel traffic onto a [`MessageTransport`] so
//!   separately loaded fragments without a shared import graph can still
//!   exchange messages. Loop prevention is origin-marker based.
//!
//! The channel and store are constructed once at startup and passed
//! explicitly to every component that needs them; both are cheap to clone
//! (shared interior).

mod bridge;
mod channel;
mod error;
mod state;
pub mod transport;

pub use bridge::{BridgeId, EventBridge};
pub use channel::{EventChannel, MessageFilter, Subscription};
pub use error::{BusError, BusResult};
pub use state::{StateStore, WatchHandle};
pub use transport::{MessageTransport, WireEnvelope};
