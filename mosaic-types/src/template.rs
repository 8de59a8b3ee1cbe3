//! Template variable declarations.
//!
//! Template *content* lives with the template fragment; only the variable
//! declaration shape is shared, because the rendering engine and any send
//! pipeline both consume it.

use serde::{Deserialize, Serialize};

/// The declared type of a template variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    Text,
    Number,
    Date,
    Boolean,
}

/// A variable declared by a template.
///
/// Every `{{name}}` placeholder in template content should correspond to a
/// declared variable; this is not enforced at authoring time (see the
/// renderer's `unbound_placeholders` lint).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateVariable {
    /// The placeholder name referenced as `{{name}}`.
    pub name: String,

    /// Declared value type.
    pub kind: VariableKind,

    /// Fallback value when no binding is supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,

    /// Whether a binding is expected at render time.
    pub required: bool,

    /// Authoring hint shown in editors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TemplateVariable {
    /// Creates a required variable with no default.
    pub fn required(name: impl Into<String>, kind: VariableKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default_value: None,
            required: true,
            description: None,
        }
    }

    /// Creates an optional variable.
    pub fn optional(name: impl Into<String>, kind: VariableKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default_value: None,
            required: false,
            description: None,
        }
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Sets the authoring description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
