//! Stats snapshot handler.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use gacha_core::UserId;
use gacha_engine::StatsSnapshot;

use crate::error::ApiError;
use crate::state::AppState;

/// Aggregate a stats snapshot for a user's current collection.
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<StatsSnapshot>, ApiError> {
    let user_id = UserId::new(user_id)?;
    let snapshot = state.stats.stats(&user_id).await?;
    Ok(Json(snapshot))
}
