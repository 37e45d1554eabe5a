use anyhow::{anyhow, Context};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

const API_PREFIX: &str = "/api/v1";

/// Thin reqwest wrapper around the `/api/v1` surface
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(server: &str, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: server.trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    pub async fn get(&self, path: &str) -> anyhow::Result<Value> {
        self.send(self.request(Method::GET, path)).await
    }

    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> anyhow::Result<Value> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, self.url(path))
            .timeout(Duration::from_secs(10));

        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> anyhow::Result<Value> {
        let response = builder
            .send()
            .await
            .with_context(|| format!("could not reach {}", self.base_url))?;

        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);

        if status.is_success() {
            return Ok(body);
        }

        Err(anyhow!("{}", describe_failure(status, &body)))
    }
}

fn describe_failure(status: StatusCode, body: &Value) -> String {
    match body.get("error").and_then(Value::as_str) {
        Some(message) => format!("{} ({})", message, status.as_u16()),
        None => format!("request failed with status {}", status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn url_joins_base_and_api_prefix() {
        let client = ApiClient::new("http://localhost:5000/", None);
        assert_eq!(client.url("/amenities"), "http://localhost:5000/api/v1/amenities");
    }

    #[test]
    fn failure_uses_error_field_when_present() {
        let message = describe_failure(StatusCode::NOT_FOUND, &json!({"error": "Amenity not found"}));
        assert_eq!(message, "Amenity not found (404)");

        let message = describe_failure(StatusCode::BAD_GATEWAY, &Value::Null);
        assert!(message.contains("502"));
    }
}
