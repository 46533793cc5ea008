//! Common test utilities for gacha-service integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;

use gacha_core::Card;
use gacha_service::{create_router, AppState, ServiceConfig};
use gacha_store::MemoryStore;

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Handle on the backing store for seeding and inspection.
    pub store: Arc<MemoryStore>,
}

impl TestHarness {
    /// Create a new test harness over an empty in-memory store.
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            database_url: "postgres://unused".into(),
            ..ServiceConfig::default()
        };

        let state = AppState::new(store.clone(), config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server, store }
    }

    /// Create a harness with a pre-seeded card catalog.
    pub async fn with_cards(cards: Vec<Card>) -> Self {
        let harness = Self::new();
        harness.store.seed_cards(cards).await;
        harness
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a catalog card with a derived image url.
pub fn card(id: &str) -> Card {
    Card {
        card_id: gacha_core::CardId::new(id).unwrap(),
        image_url: format!("https://cards.example/{id}.png"),
    }
}
