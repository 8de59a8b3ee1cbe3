use mosaic_render::render;
use mosaic_types::{TemplateVariable, VariableKind};
use proptest::prelude::*;
use serde_json::json;
use std::collections::HashMap;

fn var_name() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9]{0,11}"
}

/// Literal text that cannot open or close a placeholder.
fn literal() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,!?-]{0,20}"
}

proptest! {
    // Substituted values pass through literally, even when they contain
    // placeholder syntax themselves — substitution runs exactly once.
    #[test]
    fn substituted_values_never_reexpand(name in var_name(), inner in var_name()) {
        prop_assume!(name != inner);
        let variables = vec![
            TemplateVariable::required(&name, VariableKind::Text),
            TemplateVariable::required(&inner, VariableKind::Text).with_default("TRAP"),
        ];
        let bound = format!("{{{{{inner}}}}}");
        let bindings: HashMap<_, _> =
            [(name.clone(), json!(bound.clone()))].into_iter().collect();

        let rendered = render(&format!("{{{{{name}}}}}"), &variables, &bindings);
        prop_assert_eq!(rendered, bound);
    }

    // Content with no placeholders renders unchanged.
    #[test]
    fn placeholder_free_content_is_identity(text in literal()) {
        let variables = vec![TemplateVariable::required("x", VariableKind::Text)];
        prop_assert_eq!(render(&text, &variables, &HashMap::new()), text);
    }

    // A declared, bound placeholder always disappears from the output and
    // the binding value appears in its place.
    #[test]
    fn bound_placeholder_is_replaced(
        prefix in literal(),
        suffix in literal(),
        name in var_name(),
        value in "[a-zA-Z0-9 ]{0,20}",
    ) {
        let variables = vec![TemplateVariable::required(&name, VariableKind::Text)];
        let bindings: HashMap<_, _> =
            [(name.clone(), json!(value.clone()))].into_iter().collect();

        let content = format!("{prefix}{{{{{name}}}}}{suffix}");
        let rendered = render(&content, &variables, &bindings);
        prop_assert_eq!(rendered, format!("{prefix}{value}{suffix}"));
    }

    // Undeclared placeholders survive verbatim regardless of bindings.
    #[test]
    fn undeclared_placeholder_survives(name in var_name()) {
        let content = format!("{{{{{name}}}}}");
        let rendered = render(&content, &[], &HashMap::new());
        prop_assert_eq!(rendered, content);
    }
}
