mod commands;
mod output;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clickcheck_api::Client;
use tracing_subscriber::EnvFilter;

use crate::output::OutputFormat;

const DEFAULT_LOG_FILTER: &str = "clickcheck=info";

#[derive(Parser)]
#[command(name = "clickcheck")]
#[command(about = "Analyze website privacy and security risks with the ClickCheck API")]
struct Cli {
    /// Output format: table, json, csv, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// API token
    #[arg(long, env = "CLICKCHECK_API_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Override the API base URL
    #[arg(long, env = "CLICKCHECK_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "CLICKCHECK_TIMEOUT_SECS", default_value = "120", global = true)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a URL for privacy and security risks
    Scan(commands::scan::ScanArgs),
    /// Check whether a domain is blacklisted
    Check(commands::check::CheckArgs),
    /// Report a domain to the blacklist
    Report(commands::report::ReportArgs),
    /// Show the credit balance of the API token
    Balance,
}

/// Uses `RUST_LOG` when it holds a valid filter, otherwise `clickcheck=info`.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn build_client(cli: &Cli) -> Result<Client> {
    let token = cli
        .token
        .as_deref()
        .filter(|t| !t.is_empty())
        .context("No API token: pass --token or set CLICKCHECK_API_TOKEN")?;
    let mut builder = Client::builder(token).timeout(Duration::from_secs(cli.timeout));
    if let Some(base_url) = &cli.base_url {
        builder = builder.base_url(base_url);
    }
    Ok(builder.build()?)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output);
    let client = build_client(&cli)?;

    match &cli.command {
        Commands::Scan(args) => commands::scan::run(args, &client, &format).await?,
        Commands::Check(args) => commands::check::run(args, &client, &format).await?,
        Commands::Report(args) => commands::report::run(args, &client, &format).await?,
        Commands::Balance => commands::balance::run(&client, &format).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scan_with_mode() {
        let cli = Cli::try_parse_from([
            "clickcheck",
            "--token",
            "abc",
            "scan",
            "https://example.com",
            "--mode",
            "strict",
        ])
        .unwrap();
        match cli.command {
            Commands::Scan(args) => {
                assert_eq!(args.url, "https://example.com");
                assert_eq!(args.mode, "strict");
            }
            _ => panic!("expected scan command"),
        }
    }

    #[test]
    fn build_client_applies_overrides() {
        let cli = Cli::try_parse_from([
            "clickcheck",
            "--token",
            "abc",
            "--base-url",
            "http://localhost:8080/api/v1",
            "--timeout",
            "5",
            "balance",
        ])
        .unwrap();
        let client = build_client(&cli).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api/v1");
        assert_eq!(client.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn log_filter_prefers_rust_log() {
        assert_eq!(log_filter(Some("clickcheck=debug")).to_string(), "clickcheck=debug");
    }

    #[test]
    fn log_filter_defaults_without_rust_log() {
        assert_eq!(log_filter(None).to_string(), "clickcheck=info");
        assert_eq!(log_filter(Some("")).to_string(), "clickcheck=info");
    }

    #[test]
    fn build_client_requires_token() {
        let cli = Cli::try_parse_from(["clickcheck", "--token", "", "balance"]).unwrap();
        assert!(build_client(&cli).is_err());
    }
}
