//! Error types for the gacha card collector.

use crate::ids::IdError;

/// Result type for gacha operations.
pub type Result<T> = std::result::Result<T, GachaError>;

/// Errors that can occur in gacha operations.
#[derive(Debug, thiserror::Error)]
pub enum GachaError {
    /// User not found.
    #[error("user not found: {user_id}")]
    UserNotFound {
        /// The user ID that was not found.
        user_id: String,
    },

    /// Card not found.
    #[error("card not found: {card_id}")]
    CardNotFound {
        /// The card ID that was not found.
        card_id: String,
    },

    /// A roll was attempted while the rollable catalog is empty.
    #[error("the rollable card catalog is empty")]
    EmptyCatalog,

    /// The operation did not complete within its request-scoped deadline.
    #[error("operation timed out")]
    Timeout,

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(String),

    /// Invalid identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] IdError),
}
