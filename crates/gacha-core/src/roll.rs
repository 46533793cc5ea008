//! Roll log records.
//!
//! Every roll appends exactly one [`RollTransaction`] and one
//! [`CollectionItem`] sharing the same transaction id, regardless of
//! outcome. Both are append-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CardId, CollectionId, TransactionId, UserId};

/// The ledger entry for one roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollTransaction {
    /// Unique id generated for this roll.
    pub transaction_id: TransactionId,

    /// The card that was drawn.
    pub card_id: CardId,

    /// The user who rolled.
    pub requested_by: UserId,

    /// The collection the roll landed in.
    pub collection_id: CollectionId,

    /// When the roll happened.
    pub timestamp: DateTime<Utc>,
}

/// One card landing in a collection.
///
/// `new_addition` is computed at roll time from the collection's existing
/// items and never changes retroactively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionItem {
    /// The roll that produced this item.
    pub transaction_id: TransactionId,

    /// The collection the item belongs to.
    pub collection_id: CollectionId,

    /// The card that was drawn.
    pub card_id: CardId,

    /// Card art, denormalized from the catalog at roll time.
    pub image_url: String,

    /// True iff this card had never previously appeared in this collection.
    pub new_addition: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_item_serde_field_names() {
        let item = CollectionItem {
            transaction_id: TransactionId::generate(),
            collection_id: CollectionId::generate(),
            card_id: CardId::new("3").unwrap(),
            image_url: "https://cards.example/3.png".into(),
            new_addition: true,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["new_addition"], true);
        assert_eq!(json["card_id"], "3");
        let back: CollectionItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn roll_transaction_serde_roundtrip() {
        let roll = RollTransaction {
            transaction_id: TransactionId::generate(),
            card_id: CardId::new("3").unwrap(),
            requested_by: UserId::new("user-a").unwrap(),
            collection_id: CollectionId::generate(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&roll).unwrap();
        let back: RollTransaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, roll);
    }
}
