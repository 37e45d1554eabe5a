pub mod client;
pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVER: &str = "http://127.0.0.1:5000";

#[derive(Parser)]
#[command(name = "hbnb")]
#[command(about = "HBnB CLI - Command-line interface for the HBnB API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, default_value = DEFAULT_SERVER, help = "Base URL of the HBnB server")]
    pub server: String,

    #[arg(long, global = true, help = "Bearer token for protected calls (falls back to HBNB_TOKEN)")]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Mint an access token with the configured secret")]
    Token {
        #[arg(long, help = "User id placed in the token subject")]
        id: String,
        #[arg(long, help = "Mark the token as carrying admin privileges")]
        admin: bool,
    },

    #[command(about = "Exchange credentials for an access token")]
    Login {
        #[arg(help = "Account email")]
        email: String,
        #[arg(help = "Account password")]
        password: String,
    },

    #[command(about = "Amenity operations")]
    Amenity {
        #[command(subcommand)]
        cmd: commands::amenity::AmenityCommands,
    },

    #[command(about = "User operations")]
    User {
        #[command(subcommand)]
        cmd: commands::user::UserCommands,
    },

    #[command(about = "Show the effective configuration")]
    Config,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let token = cli.token.clone().or_else(|| std::env::var("HBNB_TOKEN").ok());
    let client = client::ApiClient::new(&cli.server, token);

    match cli.command {
        Commands::Token { id, admin } => commands::token::handle(&id, admin, output_format),
        Commands::Login { email, password } => {
            commands::login::handle(&client, &email, &password, output_format).await
        }
        Commands::Amenity { cmd } => commands::amenity::handle(&client, cmd, output_format).await,
        Commands::User { cmd } => commands::user::handle(&client, cmd, output_format).await,
        Commands::Config => commands::config::handle(output_format),
    }
}
