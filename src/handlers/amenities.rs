use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::JsonBody;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{Amenity, AmenityPatch};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AmenityPayload {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct AmenityView {
    pub id: String,
    pub name: String,
}

impl From<&Amenity> for AmenityView {
    fn from(amenity: &Amenity) -> Self {
        Self {
            id: amenity.base.id.clone(),
            name: amenity.name.clone(),
        }
    }
}

/// POST /amenities/ - register a new amenity
pub async fn create(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<AmenityPayload>,
) -> ApiResult<AmenityView> {
    if payload.name.is_empty() {
        return Err(ApiError::invalid_input());
    }

    let amenity = state.facade.create_amenity(&payload.name).await?;
    Ok(ApiResponse::created(AmenityView::from(&amenity)))
}

/// GET /amenities/ - list all amenities
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<AmenityView>> {
    let amenities = state.facade.get_all_amenities().await;
    Ok(ApiResponse::success(amenities.iter().map(AmenityView::from).collect()))
}

/// GET /amenities/:amenity_id
pub async fn show(State(state): State<AppState>, Path(amenity_id): Path<String>) -> ApiResult<AmenityView> {
    let amenity = state
        .facade
        .get_amenity(&amenity_id)
        .await
        .ok_or_else(|| ApiError::not_found("Amenity not found"))?;
    Ok(ApiResponse::success(AmenityView::from(&amenity)))
}

/// PUT /amenities/:amenity_id
pub async fn update(
    State(state): State<AppState>,
    Path(amenity_id): Path<String>,
    JsonBody(patch): JsonBody<AmenityPatch>,
) -> ApiResult<Value> {
    if state.facade.get_amenity(&amenity_id).await.is_none() {
        return Err(ApiError::not_found("Amenity not found"));
    }
    if patch.name.is_none() {
        return Err(ApiError::invalid_input());
    }

    state.facade.update_amenity(&amenity_id, patch).await?;
    Ok(ApiResponse::message("Amenity updated successfully"))
}
