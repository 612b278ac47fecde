use anyhow::Result;
use clickcheck_api::Client;

use crate::output::{print_balance, OutputFormat};

pub async fn run(client: &Client, format: &OutputFormat) -> Result<()> {
    let balance = client.get_balance().await?;
    print_balance(&balance, format)
}
