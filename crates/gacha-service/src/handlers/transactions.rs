//! Roll transaction handlers.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use gacha_core::{CollectionId, RollTransaction, UserId};
use gacha_store::{RollTransactionFilter, Store};

use crate::error::ApiError;
use crate::handlers::ResultsEnvelope;
use crate::state::AppState;

/// Query parameters for transaction listing.
#[derive(Debug, Deserialize)]
pub struct TransactionQuery {
    /// Restrict to one collection.
    pub collection_id: Option<String>,
}

/// List the roll transactions a user has made, oldest first.
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<TransactionQuery>,
) -> Result<Json<ResultsEnvelope<RollTransaction>>, ApiError> {
    let user_id = UserId::new(user_id)?;
    let collection_id = query
        .collection_id
        .as_deref()
        .map(CollectionId::from_str)
        .transpose()?;

    let filter = RollTransactionFilter {
        user_id: Some(user_id),
        collection_id,
    };
    let rolls = state.store.list_rolls(&filter).await?;
    Ok(Json(ResultsEnvelope::new(rolls)))
}

/// Record a roll transaction supplied by the caller.
///
/// The roll endpoint records its own transaction atomically; this exists
/// for clients that resolve the card themselves and only need the ledger
/// write. The requesting user must already be provisioned.
pub async fn record_transaction(
    State(state): State<Arc<AppState>>,
    Json(roll): Json<RollTransaction>,
) -> Result<Json<RollTransaction>, ApiError> {
    state
        .store
        .get_user(&roll.requested_by)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("user not found: {}", roll.requested_by)))?;

    let stored = state.store.insert_roll_transaction(&roll).await?;

    tracing::info!(
        transaction_id = %stored.transaction_id,
        requested_by = %stored.requested_by,
        "Roll transaction recorded"
    );
    Ok(Json(stored))
}
