mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "googlecore")]
#[command(about = "Call Google Maps Platform web services with typed status errors")]
struct Cli {
    /// Output format: table or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// API key sent with every request
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Override the API base URL
    #[arg(long, env = "GOOGLECORE_BASE_URL", global = true, hide = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available API methods
    Methods,
    /// Call an API method
    Call(commands::call::CallArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("googlecore=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "table" => OutputFormat::Table,
        _ => OutputFormat::Json,
    };

    match &cli.command {
        Commands::Methods => commands::methods::run(&format)?,
        Commands::Call(args) => {
            commands::call::run(
                args,
                cli.api_key.as_deref(),
                cli.base_url.as_deref(),
                &format,
            )
            .await?
        }
    }

    Ok(())
}
