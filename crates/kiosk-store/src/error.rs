//! Store error types.

/// Errors from entity store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No record with this id exists in the partition.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Entity kind of the partition that was searched.
        kind: &'static str,
        /// The id that failed to resolve.
        id: String,
    },

    /// Encoding or decoding a partition snapshot failed.
    #[error("snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn not_found(kind: &'static str, id: &str) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
