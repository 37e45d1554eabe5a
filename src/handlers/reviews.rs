use axum::extract::{Extension, Path, State};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::JsonBody;
use crate::auth::{authorize, Action};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::models::{Review, ReviewPatch};
use crate::services::NewReview;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ReviewView {
    pub id: String,
    pub text: String,
    pub rating: i64,
    pub user_id: String,
    pub place_id: String,
}

impl From<&Review> for ReviewView {
    fn from(review: &Review) -> Self {
        Self {
            id: review.base.id.clone(),
            text: review.text.clone(),
            rating: review.rating,
            user_id: review.user_id.clone(),
            place_id: review.place_id.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewSummary {
    pub id: String,
    pub text: String,
    pub rating: i64,
}

impl From<&Review> for ReviewSummary {
    fn from(review: &Review) -> Self {
        Self {
            id: review.base.id.clone(),
            text: review.text.clone(),
            rating: review.rating,
        }
    }
}

/// Editable review fields; author and place stay fixed.
#[derive(Debug, Deserialize)]
pub struct ReviewUpdate {
    pub text: Option<String>,
    pub rating: Option<i64>,
}

impl From<ReviewUpdate> for ReviewPatch {
    fn from(body: ReviewUpdate) -> Self {
        ReviewPatch {
            text: body.text,
            rating: body.rating,
            ..Default::default()
        }
    }
}

/// POST /reviews/
pub async fn create(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    JsonBody(input): JsonBody<NewReview>,
) -> ApiResult<ReviewView> {
    authorize(&caller, Action::CreateReview { author_id: &input.user_id })?;

    let review = state.facade.create_review(input).await?;
    Ok(ApiResponse::created(ReviewView::from(&review)))
}

/// GET /reviews/
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<ReviewSummary>> {
    let reviews = state.facade.get_all_reviews().await;
    Ok(ApiResponse::success(reviews.iter().map(ReviewSummary::from).collect()))
}

/// GET /reviews/:review_id
pub async fn show(State(state): State<AppState>, Path(review_id): Path<String>) -> ApiResult<ReviewView> {
    let review = find(&state, &review_id).await?;
    Ok(ApiResponse::success(ReviewView::from(&review)))
}

/// PUT /reviews/:review_id - author or admin only
pub async fn update(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
    Extension(caller): Extension<AuthUser>,
    JsonBody(body): JsonBody<ReviewUpdate>,
) -> ApiResult<Value> {
    let review = find(&state, &review_id).await?;
    authorize(&caller, Action::ModifyReview { author_id: &review.user_id })?;

    state.facade.update_review(&review_id, body.into()).await?;
    Ok(ApiResponse::message("Review updated successfully"))
}

/// DELETE /reviews/:review_id - author or admin only
pub async fn delete(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
    Extension(caller): Extension<AuthUser>,
) -> ApiResult<Value> {
    let review = find(&state, &review_id).await?;
    authorize(&caller, Action::ModifyReview { author_id: &review.user_id })?;

    state.facade.delete_review(&review_id).await?;
    Ok(ApiResponse::message("Review deleted successfully"))
}

async fn find(state: &AppState, review_id: &str) -> Result<Review, ApiError> {
    state
        .facade
        .get_review(review_id)
        .await
        .ok_or_else(|| ApiError::not_found("Review not found"))
}
