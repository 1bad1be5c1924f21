use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HashquineError {
    /// A required input container is missing, truncated, or structurally
    /// invalid. Fatal; aborts before any collision work begins.
    #[error("asset error: {0}")]
    Asset(String),

    /// The external collision search failed outright: nonzero exit status or
    /// malformed output files.
    #[error("collision oracle error: {0}")]
    Oracle(String),

    /// An assembly invariant did not hold, e.g. a slot missing during
    /// patching. Indicates a bug, not an input problem.
    #[error("invariant violation: {0}")]
    Invariant(String),

    /// Propagated I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Wrap an I/O error with the operation and path it occurred on.
pub fn asset_error(operation: &str, path: &Path, err: std::io::Error) -> HashquineError {
    HashquineError::Asset(format!("{} '{}': {}", operation, path.display(), err))
}
