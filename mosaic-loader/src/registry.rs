//! The fragment registry: fragment id to remote descriptor.

use crate::error::{LoadError, LoadResult};
use mosaic_types::{FragmentId, RemoteDescriptor};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RegistryConfig {
    #[serde(default)]
    remote: Vec<RemoteDescriptor>,
}

/// Static mapping of fragment id to [`RemoteDescriptor`].
///
/// Built once at startup (from code or a TOML file) and read-only
/// afterwards; the loader and the availability guard consume exactly this.
#[derive(Debug, Default, Clone)]
pub struct FragmentRegistry {
    descriptors: HashMap<FragmentId, RemoteDescriptor>,
}

impl FragmentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from descriptors.
    pub fn from_descriptors(descriptors: impl IntoIterator<Item = RemoteDescriptor>) -> Self {
        Self {
            descriptors: descriptors
                .into_iter()
                .map(|d| (d.fragment_id.clone(), d))
                .collect(),
        }
    }

    /// Parses a registry from TOML config text.
    ///
    /// ```toml
    /// [[remote]]
    /// fragment_id = "campaign"
    /// entry_url = "http://localhost:4201/remote-entry.json"
    /// exposed_module = "./routes"
    /// ```
    pub fn from_toml_str(text: &str) -> LoadResult<Self> {
        let config: RegistryConfig =
            toml::from_str(text).map_err(|e| LoadError::Config(e.to_string()))?;
        Ok(Self::from_descriptors(config.remote))
    }

    /// Reads a registry from a TOML config file.
    pub fn from_toml_file(path: &Path) -> LoadResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| LoadError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Looks up the descriptor for a fragment.
    #[must_use]
    pub fn get(&self, fragment_id: &FragmentId) -> Option<&RemoteDescriptor> {
        self.descriptors.get(fragment_id)
    }

    /// Whether a fragment has a descriptor.
    #[must_use]
    pub fn contains(&self, fragment_id: &FragmentId) -> bool {
        self.descriptors.contains_key(fragment_id)
    }

    /// All registered fragment ids.
    pub fn fragment_ids(&self) -> impl Iterator<Item = &FragmentId> {
        self.descriptors.keys()
    }

    /// Number of registered fragments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const CONFIG: &str = r#"
[[remote]]
fragment_id = "campaign"
entry_url = "http://localhost:4201/remote-entry.json"
exposed_module = "./routes"

[[remote]]
fragment_id = "template"
entry_url = "http://localhost:4202/remote-entry.json"
exposed_module = "./routes"
"#;

    #[test]
    fn parses_toml_config() {
        let registry = FragmentRegistry::from_toml_str(CONFIG).unwrap();
        assert_eq!(registry.len(), 2);
        let desc = registry.get(&"campaign".into()).unwrap();
        assert_eq!(desc.entry_url, "http://localhost:4201/remote-entry.json");
        assert_eq!(desc.exposed_module, "./routes");
    }

    #[test]
    fn empty_config_is_valid() {
        let registry = FragmentRegistry::from_toml_str("").unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let result = FragmentRegistry::from_toml_str("[[remote]]\nfragment_id = 42");
        assert!(matches!(result, Err(LoadError::Config(_))));
    }

    #[test]
    fn reads_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CONFIG.as_bytes()).unwrap();
        let registry = FragmentRegistry::from_toml_file(file.path()).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.contains(&"template".into()));
    }

    #[test]
    fn missing_config_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = FragmentRegistry::from_toml_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(LoadError::Config(_))));
    }

    #[test]
    fn unknown_fragment_lookup_is_none() {
        let registry = FragmentRegistry::from_toml_str(CONFIG).unwrap();
        assert!(registry.get(&"unknown".into()).is_none());
        assert!(!registry.contains(&"unknown".into()));
    }
}
