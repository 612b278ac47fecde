use anyhow::Result;
use clap::Args;
use clickcheck_api::types::ReportStatus;
use clickcheck_api::{BlacklistReport, Client};

use crate::output::{print_report, OutputFormat};

#[derive(Args)]
pub struct ReportArgs {
    /// Domain to report (e.g. malicious-site.com)
    pub domain: String,

    /// Specific URL on the domain
    #[arg(long)]
    pub url: Option<String>,

    /// Why the domain should be blacklisted
    #[arg(long)]
    pub reason: Option<String>,

    /// Evidence or description supporting the report
    #[arg(long)]
    pub evidence: Option<String>,
}

fn build_report(args: &ReportArgs) -> BlacklistReport {
    let mut report = BlacklistReport::new(&args.domain);
    if let Some(url) = &args.url {
        report = report.with_url(url);
    }
    if let Some(reason) = &args.reason {
        report = report.with_reason(reason);
    }
    if let Some(evidence) = &args.evidence {
        report = report.with_evidence(evidence);
    }
    report
}

pub async fn run(args: &ReportArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let result = client.report_blacklist(&build_report(args)).await?;
    if result.status == ReportStatus::Verified {
        if let Some(reward) = result.reward_credits {
            eprintln!("Report verified, {} credit(s) rewarded.", reward);
        }
    }
    print_report(&result, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_report_copies_optional_fields() {
        let args = ReportArgs {
            domain: "bad.example".to_string(),
            url: None,
            reason: Some("phishing".to_string()),
            evidence: Some("fake login form".to_string()),
        };
        let report = build_report(&args);
        assert_eq!(report.domain, "bad.example");
        assert!(report.url.is_none());
        assert_eq!(report.reason.as_deref(), Some("phishing"));
        assert_eq!(report.evidence.as_deref(), Some("fake login form"));
    }
}
