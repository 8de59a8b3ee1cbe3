//! The availability guard: a routing precondition for remote fragments.

use crate::registry::FragmentRegistry;
use mosaic_types::FragmentId;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Token identifying one navigation attempt.
///
/// Each [`AvailabilityGuard::begin_navigation`] supersedes all earlier
/// tokens; a probe that resolves under a superseded token yields
/// [`GuardDecision::Superseded`] and its result is ignored. Navigation away
/// does not cancel the in-flight request, it only invalidates the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavToken(u64);

/// Outcome of a guard check for one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// The fragment's entry is reachable; navigation may proceed.
    Allowed,
    /// Navigation must redirect to the fallback route, carrying the reason.
    Denied(DenialReason),
    /// A newer navigation started while this probe was in flight; the
    /// result is stale and must not trigger a redirect.
    Superseded,
}

/// Why a navigation was denied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenialReason {
    /// The route requires a remote fragment with no registered descriptor.
    UnknownFragment,
    /// The entry probe failed: non-2xx status, timeout or network error.
    Unreachable { detail: String },
}

impl DenialReason {
    /// Stable reason code attached as a query parameter on the fallback
    /// route, e.g. `campaign_unavailable`.
    #[must_use]
    pub fn reason_code(&self, fragment_id: &FragmentId) -> String {
        match self {
            DenialReason::UnknownFragment => format!("{fragment_id}_unknown"),
            DenialReason::Unreachable { .. } => format!("{fragment_id}_unavailable"),
        }
    }
}

/// Default bound on the reachability probe.
const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Probes whether a remote fragment's entry is reachable before allowing
/// navigation into it.
///
/// Performs a HEAD request against the descriptor's entry URL with an
/// explicit bounded timeout so navigation can never hang. No retry happens
/// inside the guard; each navigation attempt re-probes independently.
pub struct AvailabilityGuard {
    registry: Arc<FragmentRegistry>,
    http: reqwest::Client,
    probe_timeout: Duration,
    current_nav: AtomicU64,
}

impl AvailabilityGuard {
    /// Creates a guard over a registry with the default probe timeout.
    #[must_use]
    pub fn new(registry: Arc<FragmentRegistry>) -> Self {
        Self::with_client(registry, reqwest::Client::new(), DEFAULT_PROBE_TIMEOUT)
    }

    /// Creates a guard with a preconfigured client and probe timeout.
    #[must_use]
    pub fn with_client(
        registry: Arc<FragmentRegistry>,
        http: reqwest::Client,
        probe_timeout: Duration,
    ) -> Self {
        Self {
            registry,
            http,
            probe_timeout,
            current_nav: AtomicU64::new(0),
        }
    }

    /// Starts a new navigation attempt, superseding all earlier tokens.
    pub fn begin_navigation(&self) -> NavToken {
        NavToken(self.current_nav.fetch_add(1, Ordering::AcqRel) + 1)
    }

    fn is_current(&self, token: NavToken) -> bool {
        self.current_nav.load(Ordering::Acquire) == token.0
    }

    /// Checks whether navigation into `fragment_id` may proceed.
    ///
    /// State machine per attempt: pending, then exactly one of `Allowed`,
    /// `Denied(reason)` or `Superseded`.
    pub async fn check(&self, fragment_id: &FragmentId, token: NavToken) -> GuardDecision {
        let Some(descriptor) = self.registry.get(fragment_id).cloned() else {
            if !self.is_current(token) {
                return GuardDecision::Superseded;
            }
            warn!(fragment_id = %fragment_id, "No remote descriptor for fragment");
            return GuardDecision::Denied(DenialReason::UnknownFragment);
        };

        let probe = self.http.head(&descriptor.entry_url).send();
        let outcome = tokio::time::timeout(self.probe_timeout, probe).await;

        // Stale-response guard: a newer navigation owns the router now.
        if !self.is_current(token) {
            debug!(fragment_id = %fragment_id, "Probe result superseded by newer navigation");
            return GuardDecision::Superseded;
        }

        match outcome {
            Err(_) => {
                warn!(fragment_id = %fragment_id, url = %descriptor.entry_url, "Availability probe timed out");
                GuardDecision::Denied(DenialReason::Unreachable {
                    detail: format!("probe timed out after {:?}", self.probe_timeout),
                })
            }
            Ok(Err(error)) => {
                warn!(fragment_id = %fragment_id, url = %descriptor.entry_url, %error, "Availability probe failed");
                GuardDecision::Denied(DenialReason::Unreachable {
                    detail: error.to_string(),
                })
            }
            Ok(Ok(response)) if response.status().is_success() => {
                debug!(fragment_id = %fragment_id, "Fragment entry reachable");
                GuardDecision::Allowed
            }
            Ok(Ok(response)) => {
                warn!(fragment_id = %fragment_id, status = %response.status(), "Fragment entry not available");
                GuardDecision::Denied(DenialReason::Unreachable {
                    detail: format!("HTTP {}", response.status()),
                })
            }
        }
    }
}
