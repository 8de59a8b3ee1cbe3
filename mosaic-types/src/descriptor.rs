//! Remote descriptor: how a fragment's code is fetched and resolved.

use crate::FragmentId;
use serde::{Deserialize, Serialize};

/// Static configuration describing a remotely loadable fragment.
///
/// Descriptors are populated at startup (from code or config) and never
/// mutated afterwards. The loader uses `entry_url` to fetch the fragment's
/// remote entry and `exposed_module` as the export to resolve from it; the
/// availability guard probes the same `entry_url` before navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteDescriptor {
    /// The fragment this descriptor belongs to.
    pub fragment_id: FragmentId,

    /// URL of the fragment's remote entry.
    pub entry_url: String,

    /// The exposed module key to resolve from the entry (e.g. "./routes").
    pub exposed_module: String,
}

impl RemoteDescriptor {
    /// Creates a descriptor.
    pub fn new(
        fragment_id: impl Into<FragmentId>,
        entry_url: impl Into<String>,
        exposed_module: impl Into<String>,
    ) -> Self {
        Self {
            fragment_id: fragment_id.into(),
            entry_url: entry_url.into(),
            exposed_module: exposed_module.into(),
        }
    }
}
