//! Rollable catalog handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use gacha_core::{Card, CardId};
use gacha_store::Store;

use crate::error::ApiError;
use crate::handlers::ResultsEnvelope;
use crate::state::AppState;

/// List the rollable catalog.
pub async fn list_cards(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ResultsEnvelope<Card>>, ApiError> {
    let cards = state.store.list_cards().await?;
    Ok(Json(ResultsEnvelope::new(cards)))
}

/// Look up a single card by id.
pub async fn get_card(
    State(state): State<Arc<AppState>>,
    Path(card_id): Path<String>,
) -> Result<Json<Card>, ApiError> {
    let card_id = CardId::new(card_id)?;
    let card = state
        .store
        .get_card(&card_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("card not found: {card_id}")))?;
    Ok(Json(card))
}
