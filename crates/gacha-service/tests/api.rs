//! HTTP API integration tests.

mod common;

use axum::http::StatusCode;
use common::{card, TestHarness};
use serde_json::{json, Value};

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn health_check_reports_ok() {
    let harness = TestHarness::new();

    let response = harness.server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}

// ============================================================================
// Users
// ============================================================================

#[tokio::test]
async fn unknown_user_lookup_returns_empty_results() {
    let harness = TestHarness::new();

    let response = harness.server.get("/api/users/stranger").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["results"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn provisioning_makes_user_visible() {
    let harness = TestHarness::new();

    let created = harness
        .server
        .post("/api/users")
        .json(&json!({"user_id": "alice"}))
        .await;
    created.assert_status_ok();

    let user: Value = created.json();
    assert_eq!(user["user_id"], "alice");
    assert_eq!(user["coin_balance"], 0);

    let response = harness.server.get("/api/users/alice").await;
    let body: Value = response.json();
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["user_id"], "alice");
}

#[tokio::test]
async fn provisioning_is_idempotent() {
    let harness = TestHarness::new();

    let first = harness
        .server
        .post("/api/users")
        .json(&json!({"user_id": "alice"}))
        .await;
    let second = harness
        .server
        .post("/api/users")
        .json(&json!({"user_id": "alice"}))
        .await;

    let a: Value = first.json();
    let b: Value = second.json();
    assert_eq!(a["current_collection_id"], b["current_collection_id"]);
}

#[tokio::test]
async fn blank_user_id_is_rejected() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/api/users")
        .json(&json!({"user_id": "   "}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "bad_request");
}

// ============================================================================
// Cards
// ============================================================================

#[tokio::test]
async fn card_catalog_is_listed_in_envelope() {
    let harness = TestHarness::with_cards(vec![card("1"), card("2")]).await;

    let response = harness.server.get("/api/cards").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["card_id"], "1");
}

#[tokio::test]
async fn missing_card_is_404() {
    let harness = TestHarness::with_cards(vec![card("1")]).await;

    let response = harness.server.get("/api/cards/99").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "not_found");
}

// ============================================================================
// Rolls
// ============================================================================

#[tokio::test]
async fn roll_for_unknown_user_is_404() {
    let harness = TestHarness::with_cards(vec![card("1")]).await;

    let response = harness
        .server
        .post("/api/roll")
        .json(&json!({"user_id": "ghost"}))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn roll_on_empty_catalog_is_conflict() {
    let harness = TestHarness::new();
    harness
        .server
        .post("/api/users")
        .json(&json!({"user_id": "alice"}))
        .await
        .assert_status_ok();

    let response = harness
        .server
        .post("/api/roll")
        .json(&json!({"user_id": "alice"}))
        .await;
    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn duplicate_roll_grants_the_reward() {
    // Single-card catalog makes every draw deterministic.
    let harness = TestHarness::with_cards(vec![card("1")]).await;
    harness
        .server
        .post("/api/users")
        .json(&json!({"user_id": "alice"}))
        .await
        .assert_status_ok();

    let first: Value = harness
        .server
        .post("/api/roll")
        .json(&json!({"user_id": "alice"}))
        .await
        .json();
    assert_eq!(first["card"]["card_id"], "1");
    assert_eq!(first["new_addition"], true);
    assert_eq!(first["rewarded"], 0);

    let second: Value = harness
        .server
        .post("/api/roll")
        .json(&json!({"user_id": "alice"}))
        .await
        .json();
    assert_eq!(second["new_addition"], false);
    assert_eq!(second["rewarded"], 10);

    let lookup: Value = harness.server.get("/api/users/alice").await.json();
    assert_eq!(lookup["results"][0]["coin_balance"], 10);
}

// ============================================================================
// Collections and transactions
// ============================================================================

#[tokio::test]
async fn collection_listing_supports_duplicates_filter() {
    let harness = TestHarness::with_cards(vec![card("1")]).await;
    let user: Value = harness
        .server
        .post("/api/users")
        .json(&json!({"user_id": "alice"}))
        .await
        .json();
    let collection_id = user["current_collection_id"].as_str().unwrap().to_string();

    for _ in 0..3 {
        harness
            .server
            .post("/api/roll")
            .json(&json!({"user_id": "alice"}))
            .await
            .assert_status_ok();
    }

    let all: Value = harness
        .server
        .get(&format!("/api/collections/{collection_id}"))
        .await
        .json();
    assert_eq!(all["results"].as_array().unwrap().len(), 3);

    let distinct: Value = harness
        .server
        .get(&format!("/api/collections/{collection_id}"))
        .add_query_param("duplicates", "false")
        .await
        .json();
    assert_eq!(distinct["results"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_collection_id_is_rejected() {
    let harness = TestHarness::new();

    let response = harness.server.get("/api/collections/not-a-uuid").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn transactions_list_for_user() {
    let harness = TestHarness::with_cards(vec![card("1")]).await;
    harness
        .server
        .post("/api/users")
        .json(&json!({"user_id": "alice"}))
        .await
        .assert_status_ok();

    harness
        .server
        .post("/api/roll")
        .json(&json!({"user_id": "alice"}))
        .await
        .assert_status_ok();

    let body: Value = harness.server.get("/api/transactions/alice").await.json();
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["requested_by"], "alice");
    assert_eq!(results[0]["card_id"], "1");
}

#[tokio::test]
async fn recorded_transaction_is_echoed_and_listed() {
    let harness = TestHarness::new();
    let user: Value = harness
        .server
        .post("/api/users")
        .json(&json!({"user_id": "bob"}))
        .await
        .json();
    let collection_id = user["current_collection_id"].as_str().unwrap();

    let transaction = json!({
        "transaction_id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
        "card_id": "42",
        "requested_by": "bob",
        "collection_id": collection_id,
        "timestamp": "2026-08-28T12:00:00Z"
    });

    let response = harness
        .server
        .post("/api/rolltransactions")
        .json(&transaction)
        .await;
    response.assert_status_ok();

    let echoed: Value = response.json();
    assert_eq!(echoed["transaction_id"], "7c9e6679-7425-40de-944b-e07fc1f90ae7");

    let body: Value = harness.server.get("/api/transactions/bob").await.json();
    assert_eq!(body["results"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn transaction_for_unknown_user_is_404() {
    let harness = TestHarness::new();

    let transaction = json!({
        "transaction_id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
        "card_id": "42",
        "requested_by": "nobody",
        "collection_id": "550e8400-e29b-41d4-a716-446655440000",
        "timestamp": "2026-08-28T12:00:00Z"
    });

    let response = harness
        .server
        .post("/api/rolltransactions")
        .json(&transaction)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "not_found");
}

// ============================================================================
// Stats
// ============================================================================

#[tokio::test]
async fn stats_for_unknown_user_is_404() {
    let harness = TestHarness::new();

    let response = harness.server.get("/api/stats/ghost").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stats_reflect_rolls_and_rewards() {
    let harness = TestHarness::with_cards(vec![card("1")]).await;
    harness
        .server
        .post("/api/users")
        .json(&json!({"user_id": "alice"}))
        .await
        .assert_status_ok();

    for _ in 0..2 {
        harness
            .server
            .post("/api/roll")
            .json(&json!({"user_id": "alice"}))
            .await
            .assert_status_ok();
    }

    let snapshot: Value = harness.server.get("/api/stats/alice").await.json();
    assert_eq!(snapshot["rollable_card_count"], 1);
    assert_eq!(snapshot["roll_count_for_current_collection"], 2);
    assert_eq!(snapshot["distinct_roll_count"], 1);
    assert_eq!(snapshot["coin_balance"], 10);
    assert_eq!(snapshot["previous_rolls"].as_array().unwrap().len(), 2);
}
