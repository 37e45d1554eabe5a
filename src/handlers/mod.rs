// handlers/mod.rs - HTTP resource handlers
//
// One module per resource namespace, each mounted under /api/v1.
// Public reads need no token; every mutation except amenities goes through
// jwt_auth_middleware and receives the caller as `Extension<AuthUser>`.

use axum::extract::FromRequest;

use crate::error::ApiError;

pub mod amenities;
pub mod auth;
pub mod places;
pub mod reviews;
pub mod users;

/// `axum::Json` whose rejections render as `{"error": "Invalid input data"}`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
