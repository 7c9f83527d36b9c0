use thiserror::Error;

/// Unified error type for the cashbook core.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input rejected before any state changed.
    #[error("Validation failed: {0}")]
    Validation(String),
    /// The remote store failed a read or write. For writes this surfaces
    /// after the in-memory mutation has been applied; nothing is rolled
    /// back, and the host decides whether to reload and reconcile.
    #[error("Sync failed: {0}")]
    Sync(#[from] StoreError),
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Failures surfaced by [`crate::store::DocumentStore`] implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(String),

    #[error("Store backend error: {0}")]
    Backend(String),
}
