//! The route table: local views plus per-fragment path prefixes.

use mosaic_loader::FragmentRegistry;
use mosaic_types::FragmentId;

/// Where a navigation path leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    /// A view owned by the shell itself.
    Local(String),
    /// A remote fragment, addressed by its path prefix.
    Fragment(FragmentId),
}

/// Maps paths to targets.
///
/// Resolution: the first path segment naming a registered fragment wins;
/// otherwise an exact match against the shell's local paths; otherwise the
/// home view (unknown paths never fail, they fall back).
#[derive(Debug, Clone)]
pub struct RouteTable {
    home: String,
    local: Vec<String>,
    fragments: Vec<FragmentId>,
}

impl RouteTable {
    /// Creates a table with `home` as the fallback view.
    pub fn new(home: impl Into<String>) -> Self {
        let home = home.into();
        Self {
            local: vec![home.clone()],
            fragments: Vec::new(),
            home,
        }
    }

    /// Adds a shell-owned local path.
    #[must_use]
    pub fn with_local(mut self, path: impl Into<String>) -> Self {
        self.local.push(path.into());
        self
    }

    /// Adds a path prefix for a remote fragment.
    #[must_use]
    pub fn with_fragment(mut self, fragment_id: impl Into<FragmentId>) -> Self {
        self.fragments.push(fragment_id.into());
        self
    }

    /// Adds one prefix per fragment registered in `registry`.
    #[must_use]
    pub fn with_registry(mut self, registry: &FragmentRegistry) -> Self {
        for fragment_id in registry.fragment_ids() {
            self.fragments.push(fragment_id.clone());
        }
        self
    }

    /// The home (fallback) path.
    #[must_use]
    pub fn home(&self) -> &str {
        &self.home
    }

    /// Resolves a path to its target.
    #[must_use]
    pub fn resolve(&self, path: &str) -> RouteTarget {
        let normalized = path.trim_start_matches('/');
        let prefix = normalized.split('/').next().unwrap_or("");

        if let Some(fragment) = self.fragments.iter().find(|f| f.as_str() == prefix) {
            return RouteTarget::Fragment(fragment.clone());
        }
        if self.local.iter().any(|p| p == path) {
            return RouteTarget::Local(path.to_string());
        }
        RouteTarget::Local(self.home.clone())
    }
}
