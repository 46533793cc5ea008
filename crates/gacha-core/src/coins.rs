//! Coin transactions.
//!
//! Coins are granted for rolling a duplicate. A [`CoinTransaction`] exists
//! for a roll iff that roll's `new_addition` flag is false.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{TransactionId, UserId};

/// Default reward for rolling a duplicate card.
pub const DEFAULT_DUPLICATE_REWARD: i64 = 10;

/// Sentinel payor identity used for system-granted rewards.
pub const REWARD_PAYOR: &str = "REWARDED";

/// A coin grant linked to the roll that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinTransaction {
    /// Unique id for this grant.
    pub transaction_id: TransactionId,

    /// The roll that triggered the grant.
    pub roll_transaction_id: TransactionId,

    /// Amount credited.
    pub amount: i64,

    /// Paying identity; [`REWARD_PAYOR`] for system rewards.
    pub payor: String,

    /// The user being credited.
    pub payee: UserId,

    /// When the grant happened.
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coin_transaction_serde_roundtrip() {
        let tx = CoinTransaction {
            transaction_id: TransactionId::generate(),
            roll_transaction_id: TransactionId::generate(),
            amount: DEFAULT_DUPLICATE_REWARD,
            payor: REWARD_PAYOR.to_string(),
            payee: UserId::new("user-a").unwrap(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["amount"], 10);
        assert_eq!(json["payor"], "REWARDED");
        let back: CoinTransaction = serde_json::from_value(json).unwrap();
        assert_eq!(back, tx);
    }
}
