use anyhow::Result;
use clap::Args;
use clickcheck_api::Client;

use crate::output::{print_scan, OutputFormat};

#[derive(Args)]
pub struct ScanArgs {
    /// URL to analyze (must start with http:// or https://)
    pub url: String,

    /// Evaluation mode: default, strict, lenient
    #[arg(long, default_value = "default")]
    pub mode: String,
}

pub async fn run(args: &ScanArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    eprintln!("Scanning {} ({} mode)...", args.url, args.mode);
    let result = client.scan_url_with_mode(&args.url, &args.mode).await?;
    tracing::info!(
        "Scan {} finished: {} (score {:.2})",
        result.id,
        result.status,
        result.score
    );
    print_scan(&result, format)
}
