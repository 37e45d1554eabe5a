use clap::Subcommand;

use crate::cli::client::ApiClient;
use crate::cli::utils::*;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "List all users")]
    List,

    #[command(about = "Show a single user")]
    Show {
        #[arg(help = "User ID")]
        id: String,
    },
}

pub async fn handle(client: &ApiClient, cmd: UserCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        UserCommands::List => {
            let body = client.get("/users").await?;
            let rows = body.as_array().cloned().unwrap_or_default();
            output_table(
                &output_format,
                "users",
                &[("id", 38), ("first_name", 16), ("last_name", 16), ("email", 32)],
                &rows,
            )
        }
        UserCommands::Show { id } => {
            let body = client.get(&format!("/users/{}", id)).await?;
            output_record(&output_format, &body)
        }
    }
}
