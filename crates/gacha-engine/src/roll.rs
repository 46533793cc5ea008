//! The roll workflow.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;

use gacha_core::{
    Card, GachaError, Result, TransactionId, UserId, DEFAULT_DUPLICATE_REWARD, REWARD_PAYOR,
};
use gacha_store::{RewardPolicy, RollDraft, Store};

use crate::draw::{DrawSource, ThreadRngDraw};

/// Default request-scoped deadline for one engine operation.
pub(crate) const DEFAULT_OP_TIMEOUT: Duration = Duration::from_secs(30);

/// Roll engine configuration.
#[derive(Debug, Clone)]
pub struct RollConfig {
    /// Coins granted for rolling a duplicate.
    pub duplicate_reward: i64,

    /// System sentinel identity recorded as the reward payor.
    pub reward_payor: String,

    /// Deadline for one roll; elapsing surfaces as [`GachaError::Timeout`].
    pub op_timeout: Duration,
}

impl Default for RollConfig {
    fn default() -> Self {
        Self {
            duplicate_reward: DEFAULT_DUPLICATE_REWARD,
            reward_payor: REWARD_PAYOR.to_string(),
            op_timeout: DEFAULT_OP_TIMEOUT,
        }
    }
}

/// What a roll produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollOutcome {
    /// The drawn card.
    pub card: Card,

    /// True iff the card was new to the user's collection.
    pub new_addition: bool,

    /// Coins granted; zero for a new card.
    pub rewarded: i64,
}

/// The central workflow: draw a card, record the roll, reward duplicates.
#[derive(Clone)]
pub struct RollEngine {
    store: Arc<dyn Store>,
    draw: Arc<dyn DrawSource>,
    config: RollConfig,
}

impl RollEngine {
    /// Create an engine using the thread RNG for draws.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, config: RollConfig) -> Self {
        Self::with_draw_source(store, Arc::new(ThreadRngDraw), config)
    }

    /// Create an engine with an explicit draw source.
    #[must_use]
    pub fn with_draw_source(
        store: Arc<dyn Store>,
        draw: Arc<dyn DrawSource>,
        config: RollConfig,
    ) -> Self {
        Self {
            store,
            draw,
            config,
        }
    }

    /// Roll a random card for an existing user.
    ///
    /// The full effect set (roll transaction, collection item, optional
    /// reward) is committed atomically by the store; no partial roll ever
    /// survives a failure.
    ///
    /// # Errors
    ///
    /// - [`GachaError::UserNotFound`] if the user has not been provisioned.
    /// - [`GachaError::EmptyCatalog`] if there are no rollable cards.
    /// - [`GachaError::Timeout`] if the deadline elapses.
    /// - [`GachaError::Storage`] if the persistence collaborator fails.
    pub async fn roll(&self, user_id: &UserId) -> Result<RollOutcome> {
        tokio::time::timeout(self.config.op_timeout, self.roll_inner(user_id))
            .await
            .map_err(|_| GachaError::Timeout)?
    }

    async fn roll_inner(&self, user_id: &UserId) -> Result<RollOutcome> {
        let user = self
            .store
            .get_user(user_id)
            .await?
            .ok_or_else(|| GachaError::UserNotFound {
                user_id: user_id.to_string(),
            })?;

        let catalog_size = self.store.count_cards().await?;
        if catalog_size == 0 {
            return Err(GachaError::EmptyCatalog);
        }

        let offset = self.draw.draw(catalog_size);
        let card = self
            .store
            .card_at(offset)
            .await?
            .ok_or(GachaError::EmptyCatalog)?;

        let draft = RollDraft {
            transaction_id: TransactionId::generate(),
            user_id: user.user_id.clone(),
            collection_id: user.current_collection_id,
            card: card.clone(),
            timestamp: Utc::now(),
            reward: RewardPolicy {
                coin_transaction_id: TransactionId::generate(),
                amount: self.config.duplicate_reward,
                payor: self.config.reward_payor.clone(),
            },
        };

        let receipt = self.store.commit_roll(&draft).await?;

        tracing::info!(
            user_id = %user.user_id,
            card_id = %card.card_id,
            new_addition = receipt.new_addition,
            rewarded = receipt.rewarded,
            "Roll committed"
        );

        Ok(RollOutcome {
            card,
            new_addition: receipt.new_addition,
            rewarded: receipt.rewarded,
        })
    }
}
