use axum::extract::{Extension, Path, State};
use serde::Serialize;
use serde_json::Value;

use super::amenities::AmenityView;
use super::reviews::ReviewSummary;
use super::users::UserView;
use super::JsonBody;
use crate::auth::{authorize, Action};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::models::{NewPlace, Place, PlacePatch};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct PlaceView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub owner_id: String,
    pub amenities: Vec<String>,
}

impl From<&Place> for PlaceView {
    fn from(place: &Place) -> Self {
        Self {
            id: place.base.id.clone(),
            title: place.title.clone(),
            description: place.description.clone(),
            price: place.price,
            latitude: place.latitude,
            longitude: place.longitude,
            owner_id: place.owner_id.clone(),
            amenities: place.amenities.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlaceSummary {
    pub id: String,
    pub title: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize)]
pub struct PlaceDetails {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub owner: Option<UserView>,
    pub amenities: Vec<AmenityView>,
}

/// POST /places/
pub async fn create(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    JsonBody(input): JsonBody<NewPlace>,
) -> ApiResult<PlaceView> {
    authorize(&caller, Action::CreatePlace { owner_id: &input.owner_id })?;

    let place = state.facade.create_place(input).await?;
    Ok(ApiResponse::created(PlaceView::from(&place)))
}

/// GET /places/
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<PlaceSummary>> {
    let places = state.facade.get_all_places().await;
    let summaries = places
        .into_iter()
        .map(|p| PlaceSummary {
            id: p.base.id,
            title: p.title,
            latitude: p.latitude,
            longitude: p.longitude,
        })
        .collect();
    Ok(ApiResponse::success(summaries))
}

/// GET /places/:place_id - place with its owner and amenities resolved
pub async fn show(State(state): State<AppState>, Path(place_id): Path<String>) -> ApiResult<PlaceDetails> {
    let place = state
        .facade
        .get_place(&place_id)
        .await
        .ok_or_else(|| ApiError::not_found("Place not found"))?;

    let owner = state.facade.get_user(&place.owner_id).await;
    let amenities = state.facade.get_place_amenities(&place).await;

    Ok(ApiResponse::success(PlaceDetails {
        owner: owner.as_ref().map(UserView::from),
        amenities: amenities.iter().map(AmenityView::from).collect(),
        id: place.base.id,
        title: place.title,
        description: place.description,
        price: place.price,
        latitude: place.latitude,
        longitude: place.longitude,
    }))
}

/// PUT /places/:place_id - owner or admin only
pub async fn update(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
    Extension(caller): Extension<AuthUser>,
    JsonBody(patch): JsonBody<PlacePatch>,
) -> ApiResult<Value> {
    let place = state
        .facade
        .get_place(&place_id)
        .await
        .ok_or_else(|| ApiError::not_found("Place not found"))?;

    authorize(&caller, Action::ModifyPlace { owner_id: &place.owner_id }).inspect_err(|denied| {
        tracing::warn!(caller = %caller.id, place_id = %place_id, "place update denied: {}", denied);
    })?;

    state.facade.update_place(&place_id, patch).await?;
    Ok(ApiResponse::message("Place updated successfully"))
}

/// GET /places/:place_id/reviews
pub async fn reviews(State(state): State<AppState>, Path(place_id): Path<String>) -> ApiResult<Vec<ReviewSummary>> {
    let reviews = state.facade.get_reviews_by_place(&place_id).await?;
    Ok(ApiResponse::success(reviews.iter().map(ReviewSummary::from).collect()))
}
