//! The shell router: guard, load, mount, or fall back.

use crate::routes::{RouteTable, RouteTarget};
use mosaic_bus::{EventChannel, StateStore};
use mosaic_loader::{
    AvailabilityGuard, DenialReason, FragmentModule, GuardDecision, LoadError, ModuleLoader,
};
use mosaic_types::{kinds, state_keys, FragmentId, Message};
use serde_json::json;
use tracing::{info, warn};

/// Result of one navigation attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationOutcome {
    /// A shell-owned view was activated.
    Local { path: String },
    /// A remote fragment was loaded and mounted at `path`.
    Mounted {
        fragment_id: FragmentId,
        path: String,
        module: FragmentModule,
    },
    /// Navigation fell back to home; `path` carries the reason query
    /// parameter (`/?error=campaign_unavailable`).
    Redirected { path: String },
    /// A newer navigation superseded this one; nothing happened.
    Superseded,
}

/// Owns routing decisions for the shell.
///
/// Consults the [`AvailabilityGuard`] before activating a route that maps
/// to a remote fragment, then asks the [`ModuleLoader`] for the fragment's
/// exposed entry. Every activation is fanned out to the shared state store
/// (current path) and the event channel (route-changed), so fragments can
/// follow navigation without referencing the router.
pub struct Router {
    table: RouteTable,
    guard: AvailabilityGuard,
    loader: ModuleLoader,
    channel: EventChannel,
    store: StateStore,
}

impl Router {
    /// Creates a router. Guard and loader are expected to share the same
    /// fragment registry.
    pub fn new(
        table: RouteTable,
        guard: AvailabilityGuard,
        loader: ModuleLoader,
        channel: EventChannel,
        store: StateStore,
    ) -> Self {
        Self {
            table,
            guard,
            loader,
            channel,
            store,
        }
    }

    /// Navigates to `path`.
    pub async fn navigate(&self, path: &str) -> NavigationOutcome {
        let token = self.guard.begin_navigation();

        match self.table.resolve(path) {
            RouteTarget::Local(local_path) => {
                self.activate(&local_path);
                NavigationOutcome::Local { path: local_path }
            }
            RouteTarget::Fragment(fragment_id) => {
                match self.guard.check(&fragment_id, token).await {
                    GuardDecision::Allowed => self.mount(&fragment_id, path).await,
                    GuardDecision::Denied(reason) => {
                        self.fall_back(&fragment_id, &reason.reason_code(&fragment_id))
                    }
                    GuardDecision::Superseded => NavigationOutcome::Superseded,
                }
            }
        }
    }

    /// The route table in use.
    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    async fn mount(&self, fragment_id: &FragmentId, path: &str) -> NavigationOutcome {
        // Guard and loader share the registry, so the descriptor exists here.
        let Some(descriptor) = self.loader.registry().get(fragment_id).cloned() else {
            return self.fall_back(
                fragment_id,
                &DenialReason::UnknownFragment.reason_code(fragment_id),
            );
        };

        match self.loader.load(fragment_id, &descriptor.exposed_module).await {
            Ok(module) => {
                info!(fragment_id = %fragment_id, path, "Fragment mounted");
                self.activate(path);
                NavigationOutcome::Mounted {
                    fragment_id: fragment_id.clone(),
                    path: path.to_string(),
                    module,
                }
            }
            // The probe passed but the load still failed; same fallback path.
            Err(error) => {
                let reason = match &error {
                    LoadError::UnknownFragment(_) => DenialReason::UnknownFragment,
                    other => DenialReason::Unreachable {
                        detail: other.to_string(),
                    },
                };
                self.fall_back(fragment_id, &reason.reason_code(fragment_id))
            }
        }
    }

    fn fall_back(&self, fragment_id: &FragmentId, reason_code: &str) -> NavigationOutcome {
        warn!(fragment_id = %fragment_id, reason_code, "Navigation denied, redirecting home");
        let path = format!(
            "{}?error={}",
            self.table.home(),
            urlencoding::encode(reason_code)
        );
        self.activate(&path);
        NavigationOutcome::Redirected { path }
    }

    fn activate(&self, path: &str) {
        self.store.set(state_keys::CURRENT_PATH, json!(path));
        self.channel.publish(Message::new(
            kinds::ROUTE_CHANGED,
            json!({ "path": path }),
            FragmentId::shell(),
        ));
    }
}
