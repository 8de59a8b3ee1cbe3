//! Template rendering for Mosaic.
//!
//! A pure mapping from (template content, declared variables, bindings) to
//! a rendered string. Used identically by the preview screen and by any
//! future send pipeline.
//!
//! Substitution runs exactly once: the input is scanned a single time and
//! substituted values are never re-scanned, so a value that happens to
//! contain `{{...}}` syntax comes through verbatim. The function is
//! idempotent only as a consequence of that run-once scan, not as a
//! fixed-point guarantee.

mod render;

pub use render::{render, unbound_placeholders, TemplatePreview};
