use axum::extract::{Extension, Path, State};
use serde::{Deserialize, Serialize};

use super::JsonBody;
use crate::auth::{authorize, Action};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::models::{NewUser, User, UserPatch};
use crate::AppState;

/// Registration body. `is_admin` is not accepted here.
#[derive(Debug, Deserialize)]
pub struct UserRegistration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl From<UserRegistration> for NewUser {
    fn from(body: UserRegistration) -> Self {
        NewUser {
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            password: body.password,
            is_admin: false,
        }
    }
}

/// Public fields of a user; the password never leaves the facade.
#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.base.id.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
        }
    }
}

/// POST /users/ - register a new user (token required, non-admin callers only)
pub async fn create(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    JsonBody(body): JsonBody<UserRegistration>,
) -> ApiResult<UserView> {
    authorize(&caller, Action::CreateUser).inspect_err(|denied| {
        tracing::warn!(caller = %caller.id, "user creation denied: {}", denied);
    })?;

    if state.facade.get_user_by_email(&body.email).await.is_some() {
        return Err(ApiError::bad_request("Email already registered"));
    }

    let user = state.facade.create_user(body.into()).await?;
    Ok(ApiResponse::success(UserView::from(&user)))
}

/// GET /users/
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<UserView>> {
    let users = state.facade.get_all_users().await;
    Ok(ApiResponse::success(users.iter().map(UserView::from).collect()))
}

/// GET /users/:user_id
pub async fn show(State(state): State<AppState>, Path(user_id): Path<String>) -> ApiResult<UserView> {
    let user = state
        .facade
        .get_user(&user_id)
        .await
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(ApiResponse::success(UserView::from(&user)))
}

/// PUT /users/:user_id
///
/// Admins may edit anyone, including email and password, as long as their
/// stored record still carries the admin flag. Everyone else may only edit
/// their own names.
pub async fn update(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Extension(caller): Extension<AuthUser>,
    JsonBody(mut patch): JsonBody<UserPatch>,
) -> ApiResult<UserView> {
    let action = Action::UpdateUser {
        user_id: &user_id,
        touches_credentials: patch.touches_credentials(),
    };
    authorize(&caller, action).inspect_err(|denied| {
        tracing::warn!(caller = %caller.id, target = %user_id, "user update denied: {}", denied);
    })?;

    if caller.is_admin {
        let still_admin = state
            .facade
            .get_user(&caller.id)
            .await
            .is_some_and(|u| u.is_admin);
        if !still_admin {
            tracing::warn!(caller = %caller.id, "admin claim no longer backed by an admin account");
            return Err(ApiError::forbidden("Admin privileges required"));
        }

        if let Some(email) = &patch.email {
            if let Some(existing) = state.facade.get_user_by_email(email).await {
                if existing.base.id != user_id {
                    return Err(ApiError::bad_request("Email already registered"));
                }
            }
        }
    } else {
        // Only admins can grant or revoke admin rights.
        patch.is_admin = None;
    }

    if state.facade.get_user(&user_id).await.is_none() {
        return Err(ApiError::not_found("User not found"));
    }

    let user = state.facade.update_user(&user_id, patch).await?;
    Ok(ApiResponse::success(UserView::from(&user)))
}
