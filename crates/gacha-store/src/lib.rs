//! Storage layer for the gacha card collector.
//!
//! This crate defines the [`Store`] trait the engine and façade are written
//! against, plus two backends:
//!
//! - [`PgStore`]: the production PostgreSQL backend (sqlx, parameterized
//!   queries, embedded migrations)
//! - [`MemoryStore`]: an in-memory backend for tests
//!
//! # Atomicity
//!
//! A roll's full effect set (roll transaction, collection item, optional
//! balance update and coin transaction) is applied by [`Store::commit_roll`]
//! as a single unit: either all of it lands or none of it does. The
//! duplicate determination happens inside that unit, serialized per user, so
//! two concurrent rolls of the same card cannot both be scored as new.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod filter;
pub mod memory;
pub mod postgres;

pub use error::{Result, StoreError};
pub use filter::{CollectedCardFilter, RollTransactionFilter};
pub use memory::MemoryStore;
pub use postgres::PgStore;

use chrono::{DateTime, Utc};

use gacha_core::{
    Card, CardId, CollectionId, CollectionItem, RollTransaction, TransactionId, User, UserId,
};

/// Everything the store needs to apply one roll.
///
/// The caller supplies identifiers, the timestamp, and the reward policy;
/// the store decides `new_addition` inside the write transaction and applies
/// the reward only if the roll is a duplicate.
#[derive(Debug, Clone)]
pub struct RollDraft {
    /// Id for the roll transaction and its collection item.
    pub transaction_id: TransactionId,

    /// The rolling user.
    pub user_id: UserId,

    /// The user's active collection.
    pub collection_id: CollectionId,

    /// The drawn card.
    pub card: Card,

    /// Roll timestamp, shared by every record in the effect set.
    pub timestamp: DateTime<Utc>,

    /// Reward to grant if the roll turns out to be a duplicate.
    pub reward: RewardPolicy,
}

/// The reward applied to a duplicate roll.
#[derive(Debug, Clone)]
pub struct RewardPolicy {
    /// Pre-generated id for the coin transaction, used only on duplicates.
    pub coin_transaction_id: TransactionId,

    /// Amount to credit.
    pub amount: i64,

    /// System sentinel identity paying the reward.
    pub payor: String,
}

/// What the store decided while applying a [`RollDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollReceipt {
    /// True iff the card had never appeared in the collection before.
    pub new_addition: bool,

    /// Amount credited; zero for a new card.
    pub rewarded: i64,
}

/// The storage trait defining all database operations.
///
/// Implementations must be safe to share across request tasks.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    // =========================================================================
    // Users
    // =========================================================================

    /// Get a user by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get_user(&self, user_id: &UserId) -> Result<Option<User>>;

    /// Insert the given user unless one with the same id already exists,
    /// returning the stored record either way.
    ///
    /// This is the explicit provisioning step; read paths never create
    /// users.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn ensure_user(&self, user: &User) -> Result<User>;

    /// Get a user's coin balance, or `None` if the user does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn coin_balance(&self, user_id: &UserId) -> Result<Option<i64>>;

    // =========================================================================
    // Catalog
    // =========================================================================

    /// List the full rollable catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn list_cards(&self) -> Result<Vec<Card>>;

    /// Get a single catalog card.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get_card(&self, card_id: &CardId) -> Result<Option<Card>>;

    /// Count the rollable catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn count_cards(&self) -> Result<u64>;

    /// Fetch the catalog entry at `offset` in the catalog's stable order.
    ///
    /// Used for the uniform draw: the caller samples an offset in
    /// `[0, count_cards())` and selects the card at that position.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn card_at(&self, offset: u64) -> Result<Option<Card>>;

    // =========================================================================
    // Roll history
    // =========================================================================

    /// List collected cards matching the filter. An empty result is a valid
    /// outcome, never an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn list_collected(&self, filter: &CollectedCardFilter) -> Result<Vec<CollectionItem>>;

    /// List roll transactions matching the filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn list_rolls(&self, filter: &RollTransactionFilter) -> Result<Vec<RollTransaction>>;

    /// Up to `limit` most recent collection items for the user's collection,
    /// most recent first.
    ///
    /// The recency order comes from the roll-transaction log and is carried
    /// through the join back to collection items by explicit ordinal, not by
    /// natural join order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn recent_rolls(
        &self,
        user_id: &UserId,
        collection_id: CollectionId,
        limit: u32,
    ) -> Result<Vec<CollectionItem>>;

    /// Record a bare roll transaction, returning the written row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn insert_roll_transaction(&self, roll: &RollTransaction) -> Result<RollTransaction>;

    // =========================================================================
    // Compound operations
    // =========================================================================

    /// Apply one roll's full effect set atomically.
    ///
    /// Inside a single transaction, serialized per user: determine
    /// `new_addition` for (collection, card), insert the roll transaction
    /// and collection item, and on a duplicate apply the reward as a
    /// relative balance update plus a coin transaction. Commit-or-rollback
    /// as a unit.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if the user doesn't exist.
    /// - `StoreError::Database` if any write fails (nothing is kept).
    async fn commit_roll(&self, draft: &RollDraft) -> Result<RollReceipt>;
}
