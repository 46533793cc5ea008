//! Collection history handlers.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use gacha_core::{CardId, CollectionId, CollectionItem};
use gacha_store::{CollectedCardFilter, Store};

use crate::error::ApiError;
use crate::handlers::ResultsEnvelope;
use crate::state::AppState;

/// Query parameters for collection listing.
#[derive(Debug, Deserialize)]
pub struct CollectionQuery {
    /// Restrict to one card.
    pub card_id: Option<String>,

    /// When false, return only first-time acquisitions.
    pub duplicates: Option<bool>,
}

/// List the items collected into a collection.
pub async fn list_collected(
    State(state): State<Arc<AppState>>,
    Path(collection_id): Path<String>,
    Query(query): Query<CollectionQuery>,
) -> Result<Json<ResultsEnvelope<CollectionItem>>, ApiError> {
    let collection_id = CollectionId::from_str(&collection_id)?;
    let card_id = query.card_id.map(CardId::new).transpose()?;

    let filter = CollectedCardFilter {
        collection_id: Some(collection_id),
        card_id,
        include_duplicates: query.duplicates.unwrap_or(true),
    };
    let items = state.store.list_collected(&filter).await?;
    Ok(Json(ResultsEnvelope::new(items)))
}
