//! Catalog cards.

use serde::{Deserialize, Serialize};

use crate::ids::CardId;

/// An immutable catalog entry. The full catalog is the rollable pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Catalog card id.
    pub card_id: CardId,

    /// Where the card art lives.
    pub image_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_serde_roundtrip() {
        let card = Card {
            card_id: CardId::new("7").unwrap(),
            image_url: "https://cards.example/7.png".into(),
        };
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["card_id"], "7");
        let back: Card = serde_json::from_value(json).unwrap();
        assert_eq!(back, card);
    }
}
