//! Error types for the estimation pipeline and audit store.

/// Fatal conditions that abort an estimation call.
///
/// Classification misses are deliberately absent: an unmatched scope line
/// degrades to a tagged fallback value instead of failing the run.
#[derive(Debug, thiserror::Error)]
pub enum EstimateError {
    /// The scope record failed input validation before any stage ran.
    #[error("Invalid scope input: {reason}")]
    InvalidInput { reason: String },

    /// A pricing invariant was broken after the stage that was supposed to
    /// enforce it. Indicates a configuration bug; no price is returned.
    #[error("Pricing invariant violated: {reason}")]
    InvariantViolation { reason: String },

    /// The audit append failed. The estimate is not valid until audited, so
    /// the whole call fails; the caller may re-issue it.
    #[error("Audit write failed: {0}")]
    AuditWrite(#[from] AuditStoreError),
}

/// Errors from the audit store implementations.
#[derive(Debug, thiserror::Error)]
pub enum AuditStoreError {
    /// Failed to create the connection pool.
    #[error("Pool creation failed: {0}")]
    Pool(String),

    /// Failed to check out a connection from the pool.
    #[error("Pool error: {0}")]
    PoolRuntime(#[from] deadpool_postgres::PoolError),

    /// Database error.
    #[error("Database error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    /// Entry payload could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Store configuration error.
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

/// Result type for estimation operations.
pub type Result<T> = std::result::Result<T, EstimateError>;
