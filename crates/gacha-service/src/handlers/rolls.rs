//! Roll execution handler.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use gacha_core::UserId;
use gacha_engine::RollOutcome;

use crate::error::ApiError;
use crate::state::AppState;

/// Roll request.
#[derive(Debug, Deserialize)]
pub struct RollRequest {
    /// The user rolling.
    pub user_id: String,
}

/// Execute a roll for a user.
///
/// Draws a card from the catalog, records the transaction and collection
/// item, and grants the duplicate reward when the card was already held.
pub async fn roll(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RollRequest>,
) -> Result<Json<RollOutcome>, ApiError> {
    let user_id = UserId::new(body.user_id)?;
    let outcome = state.engine.roll(&user_id).await?;
    Ok(Json(outcome))
}
