use axum::extract::State;
use serde::{Deserialize, Serialize};

use super::JsonBody;
use crate::auth::{issue_token, Identity};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

/// POST /auth/login - exchange credentials for a bearer token
pub async fn login(State(state): State<AppState>, JsonBody(body): JsonBody<LoginRequest>) -> ApiResult<LoginResponse> {
    let user = match state.facade.authenticate(&body.email, &body.password).await {
        Some(user) => user,
        None => {
            tracing::warn!("Failed login attempt");
            return Err(ApiError::unauthorized("Invalid credentials"));
        }
    };

    let access_token = issue_token(&state.config.security, &Identity::from(&user))?;
    tracing::info!(user_id = %user.base.id, "login succeeded");
    Ok(ApiResponse::success(LoginResponse { access_token }))
}
