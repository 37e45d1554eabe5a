use clap::Subcommand;
use serde_json::{json, Value};

use crate::cli::client::ApiClient;
use crate::cli::utils::*;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum AmenityCommands {
    #[command(about = "List all amenities")]
    List,

    #[command(about = "Show a single amenity")]
    Show {
        #[arg(help = "Amenity ID")]
        id: String,
    },

    #[command(about = "Create an amenity")]
    Create {
        #[arg(help = "Amenity name")]
        name: String,
    },
}

pub async fn handle(client: &ApiClient, cmd: AmenityCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AmenityCommands::List => {
            let body = client.get("/amenities").await?;
            let rows = body.as_array().cloned().unwrap_or_default();
            output_table(&output_format, "amenities", &[("id", 38), ("name", 30)], &rows)
        }
        AmenityCommands::Show { id } => {
            let body = client.get(&format!("/amenities/{}", id)).await?;
            output_record(&output_format, &body)
        }
        AmenityCommands::Create { name } => {
            let body = client.post("/amenities", &json!({ "name": name })).await?;
            let id = body.get("id").and_then(Value::as_str).unwrap_or_default();
            output_success(
                &output_format,
                &format!("Amenity '{}' created with id {}", name, id),
                Some(json!({ "amenity": body })),
            )
        }
    }
}
