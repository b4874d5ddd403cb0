//! The `call` subcommand: invoke one API method, optionally across pages.

use anyhow::{bail, Context, Result};
use clap::Args;
use googlecore::{collect_pages, Arguments, ClientConfig, GoogleApiClient, StatusPolicy, MAPS};

use crate::output::{print_json, print_pages_table, OutputFormat};

#[derive(Args)]
pub struct CallArgs {
    /// Method name (see `googlecore methods`)
    pub method: String,

    /// Method argument as name=value (repeatable)
    #[arg(short = 'a', long = "arg", value_parser = parse_argument)]
    pub args: Vec<(String, String)>,

    /// Number of pages to fetch for paginated methods
    #[arg(long, default_value = "1")]
    pub pages: usize,

    /// Treat missing or unrecognised response statuses as errors
    /// (also enabled by GOOGLECORE_STRICT_STATUS)
    #[arg(long)]
    pub strict_status: bool,
}

/// Parses a `name=value` pair.
pub fn parse_argument(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected name=value, got '{}'", raw)),
    }
}

pub async fn run(
    args: &CallArgs,
    api_key: Option<&str>,
    base_url: Option<&str>,
    format: &OutputFormat,
) -> Result<()> {
    let Some(api_key) = api_key else {
        bail!("No API key given. Pass --api-key or set GOOGLE_API_KEY.");
    };

    let mut config = ClientConfig::new(api_key).with_env_policies();
    if args.strict_status {
        config = config.with_status_policy(StatusPolicy::Strict);
    }
    let client = match base_url {
        Some(url) => GoogleApiClient::connect_with_base_url(&MAPS, url, config)?,
        None => GoogleApiClient::connect(&MAPS, config)?,
    };

    let method = client
        .method(&args.method)
        .with_context(|| format!("Unknown method '{}'. Run `googlecore methods`.", args.method))?;
    let call_args: Arguments = args.args.iter().cloned().collect();

    let pages = if args.pages > 1 && method.api_method().paginated {
        let stream = client.paginate(&args.method, &call_args, args.pages)?;
        collect_pages(stream).await?
    } else {
        vec![client.call(&args.method, &call_args).await?]
    };

    match format {
        OutputFormat::Table => print_pages_table(&pages),
        OutputFormat::Json => {
            if pages.len() == 1 {
                print_json(&pages[0]);
            } else {
                print_json(&pages);
            }
        }
    }

    Ok(())
}
