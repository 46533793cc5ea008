//! In-memory storage implementation.
//!
//! `MemoryStore` keeps every table in a single mutex-guarded struct, so
//! [`Store::commit_roll`] gets the same all-or-nothing, serialized-per-write
//! behavior the PostgreSQL backend provides with a transaction and row lock.
//! Intended for engine and service tests.

use std::collections::HashMap;

use tokio::sync::Mutex;

use gacha_core::{
    Card, CardId, CoinTransaction, CollectionId, CollectionItem, RollTransaction, User, UserId,
};

use crate::error::{Result, StoreError};
use crate::filter::{CollectedCardFilter, RollTransactionFilter};
use crate::{RollDraft, RollReceipt, Store};

/// In-memory backend for tests.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

/// Rows live in insertion order, which doubles as chronological order.
#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    cards: Vec<Card>,
    rolls: Vec<RollTransaction>,
    collected: Vec<CollectionItem>,
    coins: Vec<CoinTransaction>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load catalog entries. Stands in for the externally managed
    /// `cards_rollable` table.
    pub async fn seed_cards(&self, cards: Vec<Card>) {
        self.inner.lock().await.cards.extend(cards);
    }

    /// Snapshot of all coin transactions, for assertions.
    pub async fn coin_transactions(&self) -> Vec<CoinTransaction> {
        self.inner.lock().await.coins.clone()
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn get_user(&self, user_id: &UserId) -> Result<Option<User>> {
        Ok(self.inner.lock().await.users.get(user_id).cloned())
    }

    async fn ensure_user(&self, user: &User) -> Result<User> {
        let mut tables = self.inner.lock().await;
        let stored = tables
            .users
            .entry(user.user_id.clone())
            .or_insert_with(|| user.clone());
        Ok(stored.clone())
    }

    async fn coin_balance(&self, user_id: &UserId) -> Result<Option<i64>> {
        Ok(self
            .inner
            .lock()
            .await
            .users
            .get(user_id)
            .map(|u| u.coin_balance))
    }

    async fn list_cards(&self) -> Result<Vec<Card>> {
        Ok(self.inner.lock().await.cards.clone())
    }

    async fn get_card(&self, card_id: &CardId) -> Result<Option<Card>> {
        Ok(self
            .inner
            .lock()
            .await
            .cards
            .iter()
            .find(|c| &c.card_id == card_id)
            .cloned())
    }

    async fn count_cards(&self) -> Result<u64> {
        Ok(self.inner.lock().await.cards.len() as u64)
    }

    async fn card_at(&self, offset: u64) -> Result<Option<Card>> {
        let offset = usize::try_from(offset)
            .map_err(|_| StoreError::Decode(format!("offset out of range: {offset}")))?;
        Ok(self.inner.lock().await.cards.get(offset).cloned())
    }

    async fn list_collected(&self, filter: &CollectedCardFilter) -> Result<Vec<CollectionItem>> {
        let tables = self.inner.lock().await;
        Ok(tables
            .collected
            .iter()
            .filter(|item| {
                filter
                    .collection_id
                    .map_or(true, |id| item.collection_id == id)
                    && filter
                        .card_id
                        .as_ref()
                        .map_or(true, |id| &item.card_id == id)
                    && (filter.include_duplicates || item.new_addition)
            })
            .cloned()
            .collect())
    }

    async fn list_rolls(&self, filter: &RollTransactionFilter) -> Result<Vec<RollTransaction>> {
        let tables = self.inner.lock().await;
        Ok(tables
            .rolls
            .iter()
            .filter(|roll| {
                filter
                    .user_id
                    .as_ref()
                    .map_or(true, |id| &roll.requested_by == id)
                    && filter
                        .collection_id
                        .map_or(true, |id| roll.collection_id == id)
            })
            .cloned()
            .collect())
    }

    async fn recent_rolls(
        &self,
        user_id: &UserId,
        collection_id: CollectionId,
        limit: u32,
    ) -> Result<Vec<CollectionItem>> {
        let tables = self.inner.lock().await;

        // Most recent roll ids first, then join back to items in that order.
        let recent_ids: Vec<_> = tables
            .rolls
            .iter()
            .rev()
            .filter(|roll| &roll.requested_by == user_id && roll.collection_id == collection_id)
            .take(limit as usize)
            .map(|roll| roll.transaction_id)
            .collect();

        Ok(recent_ids
            .into_iter()
            .filter_map(|id| {
                tables
                    .collected
                    .iter()
                    .find(|item| item.transaction_id == id)
                    .cloned()
            })
            .collect())
    }

    async fn insert_roll_transaction(&self, roll: &RollTransaction) -> Result<RollTransaction> {
        self.inner.lock().await.rolls.push(roll.clone());
        Ok(roll.clone())
    }

    async fn commit_roll(&self, draft: &RollDraft) -> Result<RollReceipt> {
        // Holding the table lock across the whole effect set is the
        // in-memory equivalent of the transaction + user-row lock.
        let mut tables = self.inner.lock().await;

        if !tables.users.contains_key(&draft.user_id) {
            return Err(StoreError::NotFound {
                entity: "user",
                id: draft.user_id.to_string(),
            });
        }

        let new_addition = !tables.collected.iter().any(|item| {
            item.collection_id == draft.collection_id && item.card_id == draft.card.card_id
        });

        tables.rolls.push(RollTransaction {
            transaction_id: draft.transaction_id,
            card_id: draft.card.card_id.clone(),
            requested_by: draft.user_id.clone(),
            collection_id: draft.collection_id,
            timestamp: draft.timestamp,
        });
        tables.collected.push(CollectionItem {
            transaction_id: draft.transaction_id,
            collection_id: draft.collection_id,
            card_id: draft.card.card_id.clone(),
            image_url: draft.card.image_url.clone(),
            new_addition,
        });

        let rewarded = if new_addition {
            0
        } else {
            tables.coins.push(CoinTransaction {
                transaction_id: draft.reward.coin_transaction_id,
                roll_transaction_id: draft.transaction_id,
                amount: draft.reward.amount,
                payor: draft.reward.payor.clone(),
                payee: draft.user_id.clone(),
                timestamp: draft.timestamp,
            });
            if let Some(user) = tables.users.get_mut(&draft.user_id) {
                user.coin_balance += draft.reward.amount;
            }
            draft.reward.amount
        };

        Ok(RollReceipt {
            new_addition,
            rewarded,
        })
    }
}
