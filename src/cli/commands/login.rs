use serde_json::{json, Value};

use crate::cli::client::ApiClient;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

pub async fn handle(
    client: &ApiClient,
    email: &str,
    password: &str,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let body = client
        .post("/auth/login", &json!({ "email": email, "password": password }))
        .await?;

    let token = body
        .get("access_token")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow::anyhow!("server response did not include an access token"))?;

    tracing::debug!("Logged in as {}", email);

    match output_format {
        OutputFormat::Json => output_success(&output_format, "Login successful", Some(json!({ "access_token": token }))),
        OutputFormat::Text => {
            println!("{}", token);
            Ok(())
        }
    }
}
