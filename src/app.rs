use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower::Layer;
use tower_http::{
    cors::CorsLayer,
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::handlers;
use crate::middleware::jwt_auth_middleware;
use crate::models::NewUser;
use crate::services::{FacadeError, HbnbFacade};

/// Shared per-request context: configuration plus the facade.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub facade: Arc<HbnbFacade>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self::with_facade(config, Arc::new(HbnbFacade::in_memory()))
    }

    pub fn with_facade(config: AppConfig, facade: Arc<HbnbFacade>) -> Self {
        Self {
            config: Arc::new(config),
            facade,
        }
    }

    /// Create the configured bootstrap admin, if any. Safe to call twice.
    pub async fn seed_admin(&self) -> Result<(), FacadeError> {
        let seed = &self.config.seed;
        let (Some(email), Some(password)) = (&seed.admin_email, &seed.admin_password) else {
            return Ok(());
        };

        if self.facade.get_user_by_email(email).await.is_some() {
            tracing::debug!("Seed admin {} already present", email);
            return Ok(());
        }

        let admin = self
            .facade
            .create_user(NewUser {
                first_name: seed.admin_first_name.clone(),
                last_name: seed.admin_last_name.clone(),
                email: email.clone(),
                password: password.clone(),
                is_admin: true,
            })
            .await?;
        tracing::info!(user_id = %admin.base.id, "Seeded admin account {}", admin.email);
        Ok(())
    }
}

/// The served application: `/amenities/` and `/amenities` resolve to the same route.
pub type App = NormalizePath<Router>;

pub fn app(state: AppState) -> App {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

pub fn router(state: AppState) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api/v1/auth", auth_routes())
        .nest("/api/v1/amenities", amenity_routes())
        .nest("/api/v1/users", user_routes(&state))
        .nest("/api/v1/places", place_routes(&state))
        .nest("/api/v1/reviews", review_routes(&state));

    if state.config.security.enable_cors {
        router = router.layer(cors_layer(&state.config));
    }
    if state.config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(handlers::auth::login))
}

fn amenity_routes() -> Router<AppState> {
    use handlers::amenities;

    Router::new()
        .route("/", get(amenities::list).post(amenities::create))
        .route("/:amenity_id", get(amenities::show).put(amenities::update))
}

fn user_routes(state: &AppState) -> Router<AppState> {
    use handlers::users;

    Router::new()
        // Token required
        .route("/", post(users::create))
        .route("/:user_id", put(users::update))
        .route_layer(from_fn_with_state(state.clone(), jwt_auth_middleware))
        // Public reads
        .route("/", get(users::list))
        .route("/:user_id", get(users::show))
}

fn place_routes(state: &AppState) -> Router<AppState> {
    use handlers::places;

    Router::new()
        .route("/", post(places::create))
        .route("/:place_id", put(places::update))
        .route_layer(from_fn_with_state(state.clone(), jwt_auth_middleware))
        .route("/", get(places::list))
        .route("/:place_id", get(places::show))
        .route("/:place_id/reviews", get(places::reviews))
}

fn review_routes(state: &AppState) -> Router<AppState> {
    use handlers::reviews;

    Router::new()
        .route("/", post(reviews::create))
        .route("/:review_id", put(reviews::update).delete(reviews::delete))
        .route_layer(from_fn_with_state(state.clone(), jwt_auth_middleware))
        .route("/", get(reviews::list))
        .route("/:review_id", get(reviews::show))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "HBnB API",
        "version": version,
        "endpoints": {
            "auth": "/api/v1/auth/login",
            "amenities": "/api/v1/amenities[/:amenity_id]",
            "users": "/api/v1/users[/:user_id]",
            "places": "/api/v1/places[/:place_id[/reviews]]",
            "reviews": "/api/v1/reviews[/:review_id]",
        }
    }))
}

async fn health() -> axum::response::Json<Value> {
    axum::response::Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
    }))
}
