//! Remote entry manifest and the validated fragment module shape.

use crate::error::{LoadError, LoadResult};
use mosaic_types::FragmentId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// The JSON manifest served at a fragment's entry URL.
///
/// Maps exposed module keys (e.g. `"./routes"`) to module definitions.
/// The manifest itself carries no behavior; exposed modules are validated
/// against [`FragmentModule`] when resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteEntry {
    /// The remote's self-declared name.
    pub name: String,
    /// Exposed module key to module definition.
    pub modules: HashMap<String, Value>,
}

impl RemoteEntry {
    /// Resolves and validates an exposed module.
    ///
    /// A missing key and a present-but-malformed definition both surface as
    /// [`LoadError::ExportMissing`]: the capability contract is validated
    /// at load time instead of crashing on first use.
    pub fn resolve(&self, fragment: &FragmentId, exposed: &str) -> LoadResult<FragmentModule> {
        let Some(definition) = self.modules.get(exposed) else {
            return Err(LoadError::ExportMissing {
                fragment: fragment.clone(),
                exposed: exposed.to_string(),
                detail: "module not exposed by remote entry".to_string(),
            });
        };
        serde_json::from_value(definition.clone()).map_err(|e| LoadError::ExportMissing {
            fragment: fragment.clone(),
            exposed: exposed.to_string(),
            detail: format!("invalid module shape: {e}"),
        })
    }
}

/// The capability shape every loadable module must satisfy: a
/// router-mountable set of routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentModule {
    /// Routes to mount under the fragment's path prefix.
    pub routes: Vec<RouteEntry>,

    /// Optional display name for navigation chrome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// One mountable route exposed by a fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Path relative to the fragment prefix ("" for the fragment root).
    pub path: String,
    /// The component the fragment renders at this path.
    pub component: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry() -> RemoteEntry {
        serde_json::from_value(json!({
            "name": "campaign",
            "modules": {
                "./routes": {
                    "routes": [
                        { "path": "", "component": "CampaignList" },
                        { "path": ":id", "component": "CampaignDetail" }
                    ],
                    "display_name": "Campaigns"
                },
                "./broken": { "no_routes_here": true }
            }
        }))
        .unwrap()
    }

    #[test]
    fn resolve_valid_module() {
        let module = entry().resolve(&"campaign".into(), "./routes").unwrap();
        assert_eq!(module.routes.len(), 2);
        assert_eq!(module.routes[1].component, "CampaignDetail");
        assert_eq!(module.display_name.as_deref(), Some("Campaigns"));
    }

    #[test]
    fn missing_export_is_export_missing() {
        let result = entry().resolve(&"campaign".into(), "./Module");
        assert!(matches!(result, Err(LoadError::ExportMissing { .. })));
    }

    #[test]
    fn malformed_export_is_export_missing() {
        let result = entry().resolve(&"campaign".into(), "./broken");
        let Err(LoadError::ExportMissing { detail, .. }) = result else {
            panic!("expected ExportMissing");
        };
        assert!(detail.contains("invalid module shape"));
    }
}
