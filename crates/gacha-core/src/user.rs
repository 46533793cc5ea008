//! User records.

use serde::{Deserialize, Serialize};

use crate::ids::{CollectionId, UserId};

/// A player of the collection game.
///
/// Users are created through an explicit provisioning step; read paths
/// never create them. The active collection id is stable for the life of
/// the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Caller-supplied user id.
    pub user_id: UserId,

    /// The user's active collection.
    pub current_collection_id: CollectionId,

    /// Coin balance. Equals the sum of coin transactions paid to the user.
    pub coin_balance: i64,
}

impl User {
    /// Create a new user with a fresh collection and zero balance.
    #[must_use]
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            current_collection_id: CollectionId::generate(),
            coin_balance: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_has_zero_balance_and_fresh_collection() {
        let a = User::new(UserId::new("user-a").unwrap());
        let b = User::new(UserId::new("user-b").unwrap());
        assert_eq!(a.coin_balance, 0);
        assert_ne!(a.current_collection_id, b.current_collection_id);
    }

    #[test]
    fn user_serde_field_names() {
        let user = User::new(UserId::new("user-a").unwrap());
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["user_id"], "user-a");
        assert!(json["current_collection_id"].is_string());
        assert_eq!(json["coin_balance"], 0);

        let back: User = serde_json::from_value(json).unwrap();
        assert_eq!(back, user);
    }
}
