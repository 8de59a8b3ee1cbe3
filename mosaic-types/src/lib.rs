//! Core type definitions for Mosaic.
//!
//! This crate defines the fundamental, fragment-agnostic types shared by
//! the host shell and every loadable fragment:
//! - Fragment identifiers
//! - Bus messages and their well-known kinds
//! - Remote descriptors (how a fragment is fetched and resolved)
//! - Template variable declarations
//!
//! Domain data (campaigns, templates, users) belongs to the fragments that
//! own it, not here. Fragments expose nothing of it directly — only the
//! messages and state entries they choose to publish.

mod descriptor;
mod ids;
mod message;
mod template;

pub use descriptor::RemoteDescriptor;
pub use ids::FragmentId;
pub use message::{kinds, state_keys, Message};
pub use template::{TemplateVariable, VariableKind};

/// Errors that can occur constructing core types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A fragment id parsed from external input was empty or contained
    /// characters that would break path-prefix routing.
    #[error("invalid fragment id: {0:?}")]
    InvalidFragmentId(String),
}
