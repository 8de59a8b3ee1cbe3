//! Identifier types used throughout the Mosaic core.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable name of an independently loadable unit ("shell", "campaign",
/// "template").
///
/// Used both as message provenance on the bus and as the lookup key for
/// remote loading and availability checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FragmentId(String);

impl FragmentId {
    /// Creates a fragment ID from a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the fragment name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The host shell's own fragment ID.
    #[must_use]
    pub fn shell() -> Self {
        Self("shell".to_string())
    }
}

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FragmentId {
    type Err = crate::Error;

    /// Parses a fragment id from external input (URLs, config keys).
    ///
    /// Fragment ids double as path prefixes, so an empty name or one
    /// containing whitespace or `/` is rejected. In-code construction via
    /// `new`/`From` stays unchecked.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.contains(|c: char| c.is_whitespace() || c == '/') {
            return Err(crate::Error::InvalidFragmentId(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl From<&str> for FragmentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FragmentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for FragmentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_round_trips() {
        let id = FragmentId::new("campaign");
        assert_eq!(id.to_string(), "campaign");
        assert_eq!("campaign".parse::<FragmentId>().unwrap(), id);
    }

    #[test]
    fn parse_rejects_ids_unusable_as_path_prefixes() {
        for bad in ["", "camp aign", "campaign/detail", "\t"] {
            let result = bad.parse::<FragmentId>();
            assert!(
                matches!(result, Err(crate::Error::InvalidFragmentId(_))),
                "expected rejection of {bad:?}"
            );
        }
    }

    #[test]
    fn serde_transparent() {
        let id = FragmentId::new("template");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"template\"");
        let back: FragmentId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
