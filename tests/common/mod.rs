#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::{extract::Request, ServiceExt};
use reqwest::StatusCode;
use serde_json::{json, Value};

use hbnb_api::auth::{issue_token, Identity};
use hbnb_api::config::AppConfig;
use hbnb_api::models::{NewUser, User};
use hbnb_api::{app, AppState};

pub const ADMIN_EMAIL: &str = "admin@hbnb.io";
pub const ADMIN_PASSWORD: &str = "admin-password";
pub const PASSWORD: &str = "password";

/// In-process server bound to a free port, alive for the current test's runtime.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub state: AppState,
    pub client: reqwest::Client,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;

        let mut config = AppConfig::development();
        config.server.port = port;
        config.api.enable_request_logging = false;
        config.seed.admin_email = Some(ADMIN_EMAIL.to_string());
        config.seed.admin_password = Some(ADMIN_PASSWORD.to_string());

        let state = AppState::new(config);
        state.seed_admin().await?;

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;
        let service = app(state.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, ServiceExt::<Request>::into_make_service(service)).await;
        });

        let server = Self {
            port,
            base_url: format!("http://127.0.0.1:{}", port),
            state,
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(format!("{}/health", self.base_url)).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    /// Register a regular user directly through the facade.
    pub async fn user(&self, email: &str) -> Result<User> {
        let user = self
            .state
            .facade
            .create_user(NewUser {
                first_name: "Test".to_string(),
                last_name: "User".to_string(),
                email: email.to_string(),
                password: PASSWORD.to_string(),
                is_admin: false,
            })
            .await?;
        Ok(user)
    }

    pub async fn admin(&self) -> Result<User> {
        self.state
            .facade
            .get_user_by_email(ADMIN_EMAIL)
            .await
            .context("seed admin missing")
    }

    pub fn token_for(&self, user: &User) -> Result<String> {
        Ok(issue_token(&self.state.config.security, &Identity::from(user))?)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let res = self
            .client
            .post(self.url("/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed with {}", res.status());

        let body: Value = res.json().await?;
        body["access_token"]
            .as_str()
            .map(str::to_string)
            .context("login response missing access_token")
    }

    pub async fn admin_token(&self) -> Result<String> {
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    /// Create an amenity and return its id.
    pub async fn amenity(&self, name: &str) -> Result<String> {
        let res = self
            .client
            .post(self.url("/amenities"))
            .json(&json!({ "name": name }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "amenity create failed with {}", res.status());
        id_of(res).await
    }

    /// Create a place owned by `owner` and return its id.
    pub async fn place(&self, owner: &User, amenities: &[String]) -> Result<String> {
        let res = self
            .client
            .post(self.url("/places"))
            .bearer_auth(self.token_for(owner)?)
            .json(&json!({
                "title": "Cozy Apartment",
                "description": "A nice place to stay",
                "price": 100.0,
                "latitude": 37.7749,
                "longitude": -122.4194,
                "owner_id": owner.base.id,
                "amenities": amenities,
            }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "place create failed with {}", res.status());
        id_of(res).await
    }
}

pub async fn id_of(res: reqwest::Response) -> Result<String> {
    let body: Value = res.json().await?;
    body["id"].as_str().map(str::to_string).context("response missing id")
}

pub async fn error_of(res: reqwest::Response) -> Result<String> {
    let body: Value = res.json().await?;
    body["error"].as_str().map(str::to_string).context("response missing error field")
}
