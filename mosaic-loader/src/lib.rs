//! Remote fragment loading for Mosaic.
//!
//! Three pieces:
//!
//! - [`FragmentRegistry`]: the static map of fragment id to
//!   [`RemoteDescriptor`](mosaic_types::RemoteDescriptor), populated at
//!   startup from code or TOML config and read-only afterwards.
//! - [`ModuleLoader`]: resolves a `(fragment, exposed module)` pair to a
//!   validated [`FragmentModule`] over the network, with singleflight
//!   de-duplication of concurrent loads and a process-lifetime cache of
//!   resolved modules.
//! - [`AvailabilityGuard`]: a routing precondition that probes a remote
//!   entry's reachability (bounded timeout) before navigation, with a
//!   per-navigation token so stale probe results are ignored.
//!
//! Failure modes stay distinguishable end to end: `UnknownFragment`,
//! `NetworkFailure` and `ExportMissing` are separate variants, never
//! collapsed into a generic error.

mod error;
mod guard;
mod loader;
mod module;
mod registry;

pub use error::{LoadError, LoadResult};
pub use guard::{AvailabilityGuard, DenialReason, GuardDecision, NavToken};
pub use loader::ModuleLoader;
pub use module::{FragmentModule, RemoteEntry, RouteEntry};
pub use registry::FragmentRegistry;
