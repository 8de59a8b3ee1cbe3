//! The shell's route surface.
//!
//! The shell exposes navigable paths for its own local views plus one
//! path-prefix per remote fragment. An unknown path falls back to the home
//! view; a remote-fragment path whose availability guard denies access
//! falls back to home with the failure reason in the query string.
//!
//! Once a fragment is mounted, shell and fragment communicate exclusively
//! through the event channel, bridge and shared state store — never
//! through direct references to each other's internals.

mod router;
mod routes;

pub use router::{NavigationOutcome, Router};
pub use routes::{RouteTable, RouteTarget};
