//! Error types for gacha storage.

use gacha_core::GachaError;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// A row could not be converted into a domain record.
    #[error("row decode error: {0}")]
    Decode(String),

    /// Record not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind ("user", "card").
        entity: &'static str,
        /// The id that was looked up.
        id: String,
    },
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<StoreError> for GachaError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity: "user", id } => Self::UserNotFound { user_id: id },
            StoreError::NotFound { entity: "card", id } => Self::CardNotFound { card_id: id },
            other => Self::Storage(other.to_string()),
        }
    }
}
