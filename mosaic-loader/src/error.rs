//! Error types for the loader layer.

use mosaic_types::FragmentId;
use thiserror::Error;

/// Result type for loader operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors that can occur when loading remote fragments.
///
/// `Clone` so that singleflight waiters sharing one in-flight load all
/// receive the same propagated error.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    /// No remote descriptor is registered for the fragment.
    #[error("unknown fragment: {0}")]
    UnknownFragment(FragmentId),

    /// The remote entry could not be fetched or read.
    #[error("network failure fetching {url}: {detail}")]
    NetworkFailure { url: String, detail: String },

    /// The entry loaded, but the exposed module is absent or does not
    /// satisfy the expected capability shape.
    #[error("fragment '{fragment}' does not expose '{exposed}': {detail}")]
    ExportMissing {
        fragment: FragmentId,
        exposed: String,
        detail: String,
    },

    /// Registry configuration could not be read.
    #[error("config error: {0}")]
    Config(String),
}
