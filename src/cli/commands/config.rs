use crate::cli::OutputFormat;
use crate::config::config;

pub fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let config = config();

    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        OutputFormat::Text => {
            println!("Environment:      {:?}", config.environment);
            println!("Bind address:     {}", config.bind_addr());
            println!("Log filter:       {}", config.api.log_filter);
            println!("Request logging:  {}", config.api.enable_request_logging);
            println!("JWT expiry:       {}h", config.security.jwt_expiry_hours);
            println!("CORS:             {}", config.security.enable_cors);
            if !config.security.cors_origins.is_empty() {
                println!("CORS origins:     {}", config.security.cors_origins.join(", "));
            }
            match &config.seed.admin_email {
                Some(email) => println!("Seed admin:       {}", email),
                None => println!("Seed admin:       (none)"),
            }
        }
    }
    Ok(())
}
