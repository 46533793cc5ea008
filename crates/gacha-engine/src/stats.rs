//! The stats aggregation workflow.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use gacha_core::{CollectionItem, GachaError, Result, UserId};
use gacha_store::{CollectedCardFilter, RollTransactionFilter, Store};

use crate::roll::DEFAULT_OP_TIMEOUT;

/// How many previous rolls a snapshot carries.
pub const RECENT_ROLL_LIMIT: u32 = 3;

/// Aggregate view of one user's current collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    /// Size of the rollable catalog.
    pub rollable_card_count: u64,

    /// Rolls the user made into the current collection.
    pub roll_count_for_current_collection: u64,

    /// Distinct cards collected.
    pub distinct_roll_count: u64,

    /// Current coin balance.
    pub coin_balance: i64,

    /// The distinct card set itself.
    pub distinct_rolls: Vec<CollectionItem>,

    /// Up to [`RECENT_ROLL_LIMIT`] most recent rolls, most recent first.
    pub previous_rolls: Vec<CollectionItem>,
}

/// Composes the read-side queries into a single snapshot.
#[derive(Clone)]
pub struct StatsAggregator {
    store: Arc<dyn Store>,
    op_timeout: Duration,
}

impl StatsAggregator {
    /// Create an aggregator with the default deadline.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self::with_timeout(store, DEFAULT_OP_TIMEOUT)
    }

    /// Create an aggregator with an explicit deadline.
    #[must_use]
    pub fn with_timeout(store: Arc<dyn Store>, op_timeout: Duration) -> Self {
        Self { store, op_timeout }
    }

    /// Build the stats snapshot for an existing user.
    ///
    /// The five sub-reads are independent and issued concurrently; if any
    /// fails, the whole call fails with that error. Never returns a partial
    /// snapshot.
    ///
    /// # Errors
    ///
    /// - [`GachaError::UserNotFound`] if the user has not been provisioned.
    /// - [`GachaError::Timeout`] if the deadline elapses.
    /// - [`GachaError::Storage`] if the persistence collaborator fails.
    pub async fn stats(&self, user_id: &UserId) -> Result<StatsSnapshot> {
        tokio::time::timeout(self.op_timeout, self.stats_inner(user_id))
            .await
            .map_err(|_| GachaError::Timeout)?
    }

    async fn stats_inner(&self, user_id: &UserId) -> Result<StatsSnapshot> {
        let user = self
            .store
            .get_user(user_id)
            .await?
            .ok_or_else(|| GachaError::UserNotFound {
                user_id: user_id.to_string(),
            })?;
        let collection_id = user.current_collection_id;

        let roll_filter = RollTransactionFilter::for_collection(user.user_id.clone(), collection_id);
        let distinct_filter = CollectedCardFilter::distinct_in(collection_id);

        let (rollable_card_count, rolls, distinct_rolls, balance, previous_rolls) = tokio::try_join!(
            async { self.store.count_cards().await.map_err(GachaError::from) },
            async { self.store.list_rolls(&roll_filter).await.map_err(GachaError::from) },
            async {
                self.store
                    .list_collected(&distinct_filter)
                    .await
                    .map_err(GachaError::from)
            },
            async { self.store.coin_balance(user_id).await.map_err(GachaError::from) },
            async {
                self.store
                    .recent_rolls(user_id, collection_id, RECENT_ROLL_LIMIT)
                    .await
                    .map_err(GachaError::from)
            },
        )?;

        let coin_balance = balance.ok_or_else(|| GachaError::UserNotFound {
            user_id: user_id.to_string(),
        })?;

        Ok(StatsSnapshot {
            rollable_card_count,
            roll_count_for_current_collection: rolls.len() as u64,
            distinct_roll_count: distinct_rolls.len() as u64,
            coin_balance,
            distinct_rolls,
            previous_rolls,
        })
    }
}
