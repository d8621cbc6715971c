//! Domain error type shared across the workspace.

/// Errors produced by domain logic.
///
/// The access gate itself never surfaces these to the user (policy failures
/// become redirects); they appear when translating raw store rows into typed
/// records and in the web layer's handler plumbing.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
