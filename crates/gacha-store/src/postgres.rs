//! PostgreSQL storage implementation.
//!
//! All access goes through parameterized queries; optional filters are
//! expressed as `($n IS NULL OR column = $n)` predicates rather than
//! assembled query text. The roll write set runs in a single transaction
//! with a `FOR UPDATE` lock on the user row, which serializes concurrent
//! rolls by the same user and keeps the duplicate check consistent with its
//! insert.

use sqlx::postgres::{PgPool, PgPoolOptions};

use gacha_core::{Card, CardId, CollectionId, CollectionItem, RollTransaction, User, UserId};

use crate::error::{Result, StoreError};
use crate::filter::{CollectedCardFilter, RollTransactionFilter};
use crate::{RollDraft, RollReceipt, Store};

/// Maximum connections held by the pool.
const MAX_POOL_CONNECTIONS: u32 = 10;

/// PostgreSQL-backed storage implementation.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect to the database and run pending migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unreachable or a migration fails.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_POOL_CONNECTIONS)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool (migrations are the caller's concern).
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

// =============================================================================
// Row types
// =============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: String,
    current_collection_id: uuid::Uuid,
    coin_balance: i64,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self> {
        Ok(Self {
            user_id: UserId::new(row.user_id).map_err(decode)?,
            current_collection_id: CollectionId::from_uuid(row.current_collection_id),
            coin_balance: row.coin_balance,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CardRow {
    card_id: String,
    image_url: String,
}

impl TryFrom<CardRow> for Card {
    type Error = StoreError;

    fn try_from(row: CardRow) -> Result<Self> {
        Ok(Self {
            card_id: CardId::new(row.card_id).map_err(decode)?,
            image_url: row.image_url,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RollRow {
    transaction_id: uuid::Uuid,
    card_id: String,
    requested_by: String,
    collection_id: uuid::Uuid,
    timestamp: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<RollRow> for RollTransaction {
    type Error = StoreError;

    fn try_from(row: RollRow) -> Result<Self> {
        Ok(Self {
            transaction_id: gacha_core::TransactionId::from_uuid(row.transaction_id),
            card_id: CardId::new(row.card_id).map_err(decode)?,
            requested_by: UserId::new(row.requested_by).map_err(decode)?,
            collection_id: CollectionId::from_uuid(row.collection_id),
            timestamp: row.timestamp,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ItemRow {
    transaction_id: uuid::Uuid,
    collection_id: uuid::Uuid,
    card_id: String,
    image_url: String,
    new_addition: bool,
}

impl TryFrom<ItemRow> for CollectionItem {
    type Error = StoreError;

    fn try_from(row: ItemRow) -> Result<Self> {
        Ok(Self {
            transaction_id: gacha_core::TransactionId::from_uuid(row.transaction_id),
            collection_id: CollectionId::from_uuid(row.collection_id),
            card_id: CardId::new(row.card_id).map_err(decode)?,
            image_url: row.image_url,
            new_addition: row.new_addition,
        })
    }
}

fn decode(err: impl std::fmt::Display) -> StoreError {
    StoreError::Decode(err.to_string())
}

fn rows_into<R, T>(rows: Vec<R>) -> Result<Vec<T>>
where
    T: TryFrom<R, Error = StoreError>,
{
    rows.into_iter().map(T::try_from).collect()
}

// =============================================================================
// Store implementation
// =============================================================================

#[async_trait::async_trait]
impl Store for PgStore {
    async fn get_user(&self, user_id: &UserId) -> Result<Option<User>> {
        sqlx::query_as::<_, UserRow>(
            "SELECT user_id, current_collection_id, coin_balance \
             FROM users WHERE user_id = $1",
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await?
        .map(User::try_from)
        .transpose()
    }

    async fn ensure_user(&self, user: &User) -> Result<User> {
        let inserted = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (user_id, current_collection_id, coin_balance) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (user_id) DO NOTHING \
             RETURNING user_id, current_collection_id, coin_balance",
        )
        .bind(user.user_id.as_str())
        .bind(user.current_collection_id.as_uuid())
        .bind(user.coin_balance)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = inserted {
            return row.try_into();
        }

        // Lost the insert race (or the user already existed): fetch the row
        // that won.
        self.get_user(&user.user_id)
            .await?
            .ok_or_else(|| StoreError::NotFound {
                entity: "user",
                id: user.user_id.to_string(),
            })
    }

    async fn coin_balance(&self, user_id: &UserId) -> Result<Option<i64>> {
        let balance: Option<i64> =
            sqlx::query_scalar("SELECT coin_balance FROM users WHERE user_id = $1")
                .bind(user_id.as_str())
                .fetch_optional(&self.pool)
                .await?;
        Ok(balance)
    }

    async fn list_cards(&self) -> Result<Vec<Card>> {
        let rows = sqlx::query_as::<_, CardRow>(
            "SELECT card_id, image_url FROM cards_rollable ORDER BY card_id",
        )
        .fetch_all(&self.pool)
        .await?;
        rows_into(rows)
    }

    async fn get_card(&self, card_id: &CardId) -> Result<Option<Card>> {
        sqlx::query_as::<_, CardRow>(
            "SELECT card_id, image_url FROM cards_rollable WHERE card_id = $1",
        )
        .bind(card_id.as_str())
        .fetch_optional(&self.pool)
        .await?
        .map(Card::try_from)
        .transpose()
    }

    async fn count_cards(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cards_rollable")
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn card_at(&self, offset: u64) -> Result<Option<Card>> {
        let offset =
            i64::try_from(offset).map_err(|_| decode(format!("offset out of range: {offset}")))?;
        sqlx::query_as::<_, CardRow>(
            "SELECT card_id, image_url FROM cards_rollable \
             ORDER BY card_id LIMIT 1 OFFSET $1",
        )
        .bind(offset)
        .fetch_optional(&self.pool)
        .await?
        .map(Card::try_from)
        .transpose()
    }

    async fn list_collected(&self, filter: &CollectedCardFilter) -> Result<Vec<CollectionItem>> {
        let rows = sqlx::query_as::<_, ItemRow>(
            "SELECT transaction_id, collection_id, card_id, image_url, new_addition \
             FROM collected_cards \
             WHERE ($1::uuid IS NULL OR collection_id = $1) \
               AND ($2::text IS NULL OR card_id = $2) \
               AND ($3::bool OR new_addition)",
        )
        .bind(filter.collection_id.map(|id| *id.as_uuid()))
        .bind(filter.card_id.as_ref().map(CardId::as_str))
        .bind(filter.include_duplicates)
        .fetch_all(&self.pool)
        .await?;
        rows_into(rows)
    }

    async fn list_rolls(&self, filter: &RollTransactionFilter) -> Result<Vec<RollTransaction>> {
        let rows = sqlx::query_as::<_, RollRow>(
            "SELECT transaction_id, card_id, requested_by, collection_id, timestamp \
             FROM roll_transactions \
             WHERE ($1::text IS NULL OR requested_by = $1) \
               AND ($2::uuid IS NULL OR collection_id = $2) \
             ORDER BY timestamp",
        )
        .bind(filter.user_id.as_ref().map(UserId::as_str))
        .bind(filter.collection_id.map(|id| *id.as_uuid()))
        .fetch_all(&self.pool)
        .await?;
        rows_into(rows)
    }

    async fn recent_rolls(
        &self,
        user_id: &UserId,
        collection_id: CollectionId,
        limit: u32,
    ) -> Result<Vec<CollectionItem>> {
        // The subquery establishes recency order; the ordinal carries that
        // order through the join back to collection items.
        let rows = sqlx::query_as::<_, ItemRow>(
            "SELECT c.transaction_id, c.collection_id, c.card_id, c.image_url, c.new_addition \
             FROM collected_cards c \
             JOIN (SELECT transaction_id, \
                          row_number() OVER (ORDER BY timestamp DESC) AS ord \
                   FROM roll_transactions \
                   WHERE requested_by = $1 AND collection_id = $2 \
                   ORDER BY timestamp DESC \
                   LIMIT $3) recent USING (transaction_id) \
             ORDER BY recent.ord",
        )
        .bind(user_id.as_str())
        .bind(collection_id.as_uuid())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;
        rows_into(rows)
    }

    async fn insert_roll_transaction(&self, roll: &RollTransaction) -> Result<RollTransaction> {
        let row = sqlx::query_as::<_, RollRow>(
            "INSERT INTO roll_transactions \
             (transaction_id, card_id, requested_by, collection_id, timestamp) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING transaction_id, card_id, requested_by, collection_id, timestamp",
        )
        .bind(roll.transaction_id.as_uuid())
        .bind(roll.card_id.as_str())
        .bind(roll.requested_by.as_str())
        .bind(roll.collection_id.as_uuid())
        .bind(roll.timestamp)
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn commit_roll(&self, draft: &RollDraft) -> Result<RollReceipt> {
        let mut tx = self.pool.begin().await?;

        // Lock the user row for the duration of the write set. Concurrent
        // rolls by the same user queue here, so the duplicate check below
        // cannot race the insert it guards.
        let locked = sqlx::query("SELECT coin_balance FROM users WHERE user_id = $1 FOR UPDATE")
            .bind(draft.user_id.as_str())
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Err(StoreError::NotFound {
                entity: "user",
                id: draft.user_id.to_string(),
            });
        }

        let already_collected: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM collected_cards \
             WHERE collection_id = $1 AND card_id = $2)",
        )
        .bind(draft.collection_id.as_uuid())
        .bind(draft.card.card_id.as_str())
        .fetch_one(&mut *tx)
        .await?;
        let new_addition = !already_collected;

        sqlx::query(
            "INSERT INTO roll_transactions \
             (transaction_id, card_id, requested_by, collection_id, timestamp) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(draft.transaction_id.as_uuid())
        .bind(draft.card.card_id.as_str())
        .bind(draft.user_id.as_str())
        .bind(draft.collection_id.as_uuid())
        .bind(draft.timestamp)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO collected_cards \
             (transaction_id, collection_id, card_id, image_url, new_addition) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(draft.transaction_id.as_uuid())
        .bind(draft.collection_id.as_uuid())
        .bind(draft.card.card_id.as_str())
        .bind(&draft.card.image_url)
        .bind(new_addition)
        .execute(&mut *tx)
        .await?;

        let rewarded = if new_addition {
            0
        } else {
            // Relative update, not a blind overwrite.
            sqlx::query("UPDATE users SET coin_balance = coin_balance + $1 WHERE user_id = $2")
                .bind(draft.reward.amount)
                .bind(draft.user_id.as_str())
                .execute(&mut *tx)
                .await?;

            sqlx::query(
                "INSERT INTO coin_transactions \
                 (transaction_id, roll_transaction_id, amount, payor, payee, timestamp) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(draft.reward.coin_transaction_id.as_uuid())
            .bind(draft.transaction_id.as_uuid())
            .bind(draft.reward.amount)
            .bind(&draft.reward.payor)
            .bind(draft.user_id.as_str())
            .bind(draft.timestamp)
            .execute(&mut *tx)
            .await?;

            draft.reward.amount
        };

        tx.commit().await?;

        Ok(RollReceipt {
            new_addition,
            rewarded,
        })
    }
}
