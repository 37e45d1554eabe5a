use serde_json::json;

use crate::auth::{issue_token, Identity};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::config;

/// Mint a token locally. Only useful when JWT_SECRET matches the server's.
pub fn handle(id: &str, admin: bool, output_format: OutputFormat) -> anyhow::Result<()> {
    let identity = Identity {
        id: id.to_string(),
        is_admin: admin,
    };
    let token = issue_token(&config().security, &identity)?;

    match output_format {
        OutputFormat::Json => output_success(
            &output_format,
            "Token issued",
            Some(json!({ "access_token": token, "is_admin": admin })),
        ),
        OutputFormat::Text => {
            println!("{}", token);
            Ok(())
        }
    }
}
