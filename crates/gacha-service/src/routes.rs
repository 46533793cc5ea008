//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{cards, collections, health, rolls, stats, transactions, users};
use crate::state::AppState;

/// Maximum concurrent requests for API endpoints.
const API_MAX_CONCURRENT_REQUESTS: usize = 50;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Users
/// - `POST /api/users` - Provision a user (idempotent)
/// - `GET /api/users/:user_id` - Look up a user
///
/// ## Cards
/// - `GET /api/cards` - List the rollable catalog
/// - `GET /api/cards/:card_id` - Look up a card
///
/// ## Rolls
/// - `POST /api/roll` - Execute a roll for a user
/// - `POST /api/rolltransactions` - Record a roll transaction
///
/// ## History
/// - `GET /api/collections/:collection_id` - List collected cards
/// - `GET /api/transactions/:user_id` - List roll transactions
/// - `GET /api/stats/:user_id` - Per-user stats snapshot
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    // Build CORS layer
    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    // Create concurrency-limited API routes
    let api_routes = Router::new()
        // Users
        .route("/users", post(users::create_user))
        .route("/users/:user_id", get(users::get_user))
        // Cards
        .route("/cards", get(cards::list_cards))
        .route("/cards/:card_id", get(cards::get_card))
        // Rolls
        .route("/roll", post(rolls::roll))
        .route("/rolltransactions", post(transactions::record_transaction))
        // History
        .route("/collections/:collection_id", get(collections::list_collected))
        .route("/transactions/:user_id", get(transactions::list_transactions))
        .route("/stats/:user_id", get(stats::get_stats))
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS));

    Router::new()
        // Health (public, no rate limit)
        .route("/health", get(health::health))
        // API routes (rate limited)
        .nest("/api", api_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
