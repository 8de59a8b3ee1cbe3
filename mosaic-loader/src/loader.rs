//! The remote module loader.

use crate::error::{LoadError, LoadResult};
use crate::module::{FragmentModule, RemoteEntry};
use crate::registry::FragmentRegistry;
use futures::future::{BoxFuture, FutureExt, Shared};
use mosaic_types::{FragmentId, RemoteDescriptor};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

type ModuleKey = (FragmentId, String);
type SharedLoad = Shared<BoxFuture<'static, LoadResult<FragmentModule>>>;

/// Resolves `(fragment, exposed module)` pairs to validated modules over
/// the network.
///
/// Concurrent `load` calls for the same key share one in-flight fetch
/// (at most one network request per key at a time); every caller receives
/// the same resolved module or the same propagated error. Resolved modules
/// are cached for the process lifetime; failures are not cached, so a later
/// navigation retries. Forced reload is out of scope.
pub struct ModuleLoader {
    registry: Arc<FragmentRegistry>,
    http: reqwest::Client,
    inflight: Mutex<HashMap<ModuleKey, SharedLoad>>,
    resolved: Mutex<HashMap<ModuleKey, FragmentModule>>,
}

impl ModuleLoader {
    /// Creates a loader over a registry.
    #[must_use]
    pub fn new(registry: Arc<FragmentRegistry>) -> Self {
        Self::with_client(registry, reqwest::Client::new())
    }

    /// Creates a loader with a preconfigured HTTP client.
    #[must_use]
    pub fn with_client(registry: Arc<FragmentRegistry>, http: reqwest::Client) -> Self {
        Self {
            registry,
            http,
            inflight: Mutex::new(HashMap::new()),
            resolved: Mutex::new(HashMap::new()),
        }
    }

    /// Loads the `exposed` module of `fragment_id`.
    ///
    /// Fails with [`LoadError::UnknownFragment`] before any network I/O
    /// when no descriptor is registered.
    pub async fn load(
        &self,
        fragment_id: &FragmentId,
        exposed: &str,
    ) -> LoadResult<FragmentModule> {
        let key: ModuleKey = (fragment_id.clone(), exposed.to_string());

        if let Some(module) = self.resolved.lock().unwrap().get(&key) {
            return Ok(module.clone());
        }

        let descriptor = self
            .registry
            .get(fragment_id)
            .cloned()
            .ok_or_else(|| LoadError::UnknownFragment(fragment_id.clone()))?;

        let shared = {
            let mut inflight = self.inflight.lock().unwrap();
            inflight
                .entry(key.clone())
                .or_insert_with(|| {
                    fetch_module(self.http.clone(), descriptor, exposed.to_string())
                        .boxed()
                        .shared()
                })
                .clone()
        };

        let result = shared.clone().await;

        // Publish to the resolved cache before retiring the in-flight entry
        // so a racing caller always finds one or the other.
        match &result {
            Ok(module) => {
                self.resolved
                    .lock()
                    .unwrap()
                    .insert(key.clone(), module.clone());
                info!(fragment_id = %fragment_id, exposed_module = %exposed, "Remote module loaded");
            }
            Err(error) => {
                warn!(fragment_id = %fragment_id, exposed_module = %exposed, %error, "Remote module load failed");
            }
        }
        self.retire_inflight(&key, &shared);
        result
    }

    /// Removes the in-flight entry for `key`, but only while it still is the
    /// future this waiter awaited. Failures are not cached, so by the time a
    /// waiter resumes another caller may already have started a fresh
    /// attempt under the same key; evicting that newer entry would let a
    /// second concurrent fetch through.
    fn retire_inflight(&self, key: &ModuleKey, awaited: &SharedLoad) {
        let mut inflight = self.inflight.lock().unwrap();
        if inflight.get(key).is_some_and(|current| current.ptr_eq(awaited)) {
            inflight.remove(key);
        }
    }

    /// Whether a module has already been resolved and cached.
    #[must_use]
    pub fn is_loaded(&self, fragment_id: &FragmentId, exposed: &str) -> bool {
        self.resolved
            .lock()
            .unwrap()
            .contains_key(&(fragment_id.clone(), exposed.to_string()))
    }

    /// The registry this loader resolves against.
    #[must_use]
    pub fn registry(&self) -> &FragmentRegistry {
        &self.registry
    }
}

/// Fetches a remote entry and resolves the exposed module from it.
///
/// An unreadable or malformed entry is a [`LoadError::NetworkFailure`]
/// (the module never loaded); a loaded entry missing the exposed key or
/// exposing a malformed module is [`LoadError::ExportMissing`].
async fn fetch_module(
    http: reqwest::Client,
    descriptor: RemoteDescriptor,
    exposed: String,
) -> LoadResult<FragmentModule> {
    let response = http
        .get(&descriptor.entry_url)
        .send()
        .await
        .map_err(|e| LoadError::NetworkFailure {
            url: descriptor.entry_url.clone(),
            detail: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::NetworkFailure {
            url: descriptor.entry_url.clone(),
            detail: format!("HTTP {status}"),
        });
    }

    let entry: RemoteEntry = response
        .json()
        .await
        .map_err(|e| LoadError::NetworkFailure {
            url: descriptor.entry_url.clone(),
            detail: format!("invalid remote entry: {e}"),
        })?;

    entry.resolve(&descriptor.fragment_id, &exposed)
}
