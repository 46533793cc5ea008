//! User lookup and provisioning handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use gacha_core::{User, UserId};
use gacha_store::Store;

use crate::error::ApiError;
use crate::handlers::ResultsEnvelope;
use crate::state::AppState;

/// Look up a user by id.
///
/// Returns an envelope with zero or one user so clients can distinguish
/// "unknown user" from an error without a 404 branch.
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ResultsEnvelope<User>>, ApiError> {
    let user_id = UserId::new(user_id)?;
    let results = state.store.get_user(&user_id).await?.into_iter().collect();
    Ok(Json(ResultsEnvelope::new(results)))
}

/// Create user request.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    /// Caller-supplied user id.
    pub user_id: String,
}

/// Provision a user.
///
/// Idempotent: provisioning an existing user returns the stored record
/// unchanged, keeping its collection id and balance.
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateUserRequest>,
) -> Result<Json<User>, ApiError> {
    let user_id = UserId::new(body.user_id)?;
    let user = state.store.ensure_user(&User::new(user_id)).await?;

    tracing::info!(user_id = %user.user_id, "User provisioned");
    Ok(Json(user))
}
