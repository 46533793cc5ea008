//! Typed query filters.
//!
//! Filters are conjunctive and each field is optional: a `None` means "no
//! filter on that field". Backends translate these into their native
//! predicates; no query text is ever assembled from caller input.

use gacha_core::{CardId, CollectionId, UserId};

/// Filter for [`crate::Store::list_collected`].
#[derive(Debug, Clone)]
pub struct CollectedCardFilter {
    /// Restrict to one collection.
    pub collection_id: Option<CollectionId>,

    /// Restrict to one card.
    pub card_id: Option<CardId>,

    /// When false, keep only `new_addition = true` rows, i.e. the distinct
    /// card set of a collection.
    pub include_duplicates: bool,
}

impl CollectedCardFilter {
    /// Filter down to the distinct cards of one collection.
    #[must_use]
    pub fn distinct_in(collection_id: CollectionId) -> Self {
        Self {
            collection_id: Some(collection_id),
            card_id: None,
            include_duplicates: false,
        }
    }

    /// Filter to one (collection, card) pair, duplicates included.
    #[must_use]
    pub fn card_in(collection_id: CollectionId, card_id: CardId) -> Self {
        Self {
            collection_id: Some(collection_id),
            card_id: Some(card_id),
            include_duplicates: true,
        }
    }
}

impl Default for CollectedCardFilter {
    fn default() -> Self {
        Self {
            collection_id: None,
            card_id: None,
            include_duplicates: true,
        }
    }
}

/// Filter for [`crate::Store::list_rolls`].
#[derive(Debug, Clone, Default)]
pub struct RollTransactionFilter {
    /// Restrict to rolls requested by one user.
    pub user_id: Option<UserId>,

    /// Restrict to one collection.
    pub collection_id: Option<CollectionId>,
}

impl RollTransactionFilter {
    /// Rolls a user made into a specific collection.
    #[must_use]
    pub fn for_collection(user_id: UserId, collection_id: CollectionId) -> Self {
        Self {
            user_id: Some(user_id),
            collection_id: Some(collection_id),
        }
    }
}
