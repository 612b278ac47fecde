use anyhow::Result;
use clap::Args;
use clickcheck_api::Client;

use crate::output::{print_blacklist_status, OutputFormat};

#[derive(Args)]
pub struct CheckArgs {
    /// Domain to look up (e.g. example.com)
    pub domain: String,

    /// Specific URL on the domain
    #[arg(long)]
    pub url: Option<String>,
}

pub async fn run(args: &CheckArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let status = client
        .check_blacklist(&args.domain, args.url.as_deref())
        .await?;
    print_blacklist_status(&status, format)
}
