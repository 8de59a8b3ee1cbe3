//! `{{name}}` placeholder substitution.

use mosaic_types::TemplateVariable;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A rendered preview: the substituted content plus the bindings used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplatePreview {
    pub content: String,
    pub bindings: HashMap<String, Value>,
}

impl TemplatePreview {
    /// Renders content and keeps the bindings alongside it.
    pub fn new(
        content: &str,
        variables: &[TemplateVariable],
        bindings: HashMap<String, Value>,
    ) -> Self {
        Self {
            content: render(content, variables, &bindings),
            bindings,
        }
    }
}

/// Substitutes every `{{name}}` placeholder in `content`.
///
/// For each declared variable the effective value is the binding if present
/// (a `null` binding counts as absent), else the declared default, else the
/// empty string. Whitespace around the name inside the braces is tolerated.
/// Placeholders naming an undeclared variable are left verbatim, even when
/// a binding of that name exists; the declared list drives substitution.
///
/// Replacement is literal and runs once: substituted values are appended to
/// the output and never re-scanned.
pub fn render(
    content: &str,
    variables: &[TemplateVariable],
    bindings: &HashMap<String, Value>,
) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(open) = rest.find("{{") {
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("}}") else {
            // Unterminated braces: the remainder is literal text.
            break;
        };

        let name = after_open[..close].trim();
        match variables.iter().find(|v| v.name == name) {
            Some(variable) => {
                out.push_str(&rest[..open]);
                out.push_str(&effective_value(variable, bindings));
            }
            None => {
                // Undeclared placeholder: emit it untouched.
                out.push_str(&rest[..open + 2 + close + 2]);
            }
        }
        rest = &after_open[close + 2..];
    }
    out.push_str(rest);
    out
}

/// Placeholders in `content` that no declared variable covers.
///
/// Surfaced as an authoring lint; [`render`] itself stays silent about
/// them. Names are returned in first-occurrence order, deduplicated.
pub fn unbound_placeholders(content: &str, variables: &[TemplateVariable]) -> Vec<String> {
    let mut unbound: Vec<String> = Vec::new();
    let mut rest = content;

    while let Some(open) = rest.find("{{") {
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("}}") else {
            break;
        };
        let name = after_open[..close].trim();
        if !name.is_empty()
            && !variables.iter().any(|v| v.name == name)
            && !unbound.iter().any(|n| n == name)
        {
            unbound.push(name.to_string());
        }
        rest = &after_open[close + 2..];
    }
    unbound
}

fn effective_value(variable: &TemplateVariable, bindings: &HashMap<String, Value>) -> String {
    match bindings.get(&variable.name) {
        Some(Value::Null) | None => variable.default_value.clone().unwrap_or_default(),
        Some(value) => value_to_string(value),
    }
}

/// String form of a binding value: strings unquoted, null empty, everything
/// else via its JSON rendering.
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
