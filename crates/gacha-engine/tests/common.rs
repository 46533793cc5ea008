//! Shared fixtures for engine integration tests.

#![allow(dead_code)] // Some helpers are used by different test files

use std::sync::Arc;

use gacha_core::{Card, CardId, User, UserId};
use gacha_engine::{RollConfig, RollEngine, ScriptedDraw, StatsAggregator};
use gacha_store::{MemoryStore, Store};

/// A memory-backed engine with a scripted draw sequence and one
/// provisioned user.
pub struct Fixture {
    pub store: Arc<MemoryStore>,
    pub engine: RollEngine,
    pub stats: StatsAggregator,
    pub user: User,
}

/// Build a catalog card with a predictable image URL.
pub fn card(id: &str) -> Card {
    Card {
        card_id: CardId::new(id).unwrap(),
        image_url: format!("https://cards.example/{id}.png"),
    }
}

/// Seed `catalog`, provision one user, and script the given draw offsets.
pub async fn fixture_with(
    catalog: Vec<Card>,
    draws: impl IntoIterator<Item = u64>,
    config: RollConfig,
) -> Fixture {
    let store = Arc::new(MemoryStore::new());
    store.seed_cards(catalog).await;

    let user = store
        .ensure_user(&User::new(UserId::new("user-a").unwrap()))
        .await
        .unwrap();

    let engine = RollEngine::with_draw_source(
        store.clone(),
        Arc::new(ScriptedDraw::new(draws)),
        config,
    );
    let stats = StatsAggregator::new(store.clone());

    Fixture {
        store,
        engine,
        stats,
        user,
    }
}

/// Default-config fixture.
pub async fn fixture(catalog: Vec<Card>, draws: impl IntoIterator<Item = u64>) -> Fixture {
    fixture_with(catalog, draws, RollConfig::default()).await
}
