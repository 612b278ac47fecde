use anyhow::Result;
use clickcheck_api::types::{
    parse_timestamp, ApiResponse, Balance, BlacklistStatus, ReportResult, ScanResult,
};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Self {
        match value {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "md" | "markdown" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct ScanRow {
    #[tabled(rename = "Domain")]
    #[serde(rename = "Domain")]
    domain: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Score")]
    #[serde(rename = "Score")]
    score: String,
    #[tabled(rename = "VirusTotal")]
    #[serde(rename = "VirusTotal")]
    virustotal: String,
    #[tabled(rename = "Credits")]
    #[serde(rename = "Credits")]
    credits: String,
    #[tabled(rename = "Scanned")]
    #[serde(rename = "Scanned")]
    scanned: String,
    #[tabled(rename = "Summary")]
    #[serde(rename = "Summary")]
    summary: String,
}

#[derive(Tabled, Serialize)]
struct BlacklistRow {
    #[tabled(rename = "Domain")]
    #[serde(rename = "Domain")]
    domain: String,
    #[tabled(rename = "Blacklisted")]
    #[serde(rename = "Blacklisted")]
    blacklisted: String,
    #[tabled(rename = "Severity")]
    #[serde(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Reason")]
    #[serde(rename = "Reason")]
    reason: String,
    #[tabled(rename = "Reports")]
    #[serde(rename = "Reports")]
    reports: String,
    #[tabled(rename = "First Detected")]
    #[serde(rename = "First Detected")]
    first_detected: String,
}

#[derive(Tabled, Serialize)]
struct ReportRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Domain")]
    #[serde(rename = "Domain")]
    domain: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Reward")]
    #[serde(rename = "Reward")]
    reward: String,
    #[tabled(rename = "Message")]
    #[serde(rename = "Message")]
    message: String,
}

#[derive(Tabled, Serialize)]
struct BalanceRow {
    #[tabled(rename = "Token")]
    #[serde(rename = "Token")]
    token: String,
    #[tabled(rename = "Balance")]
    #[serde(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Used")]
    #[serde(rename = "Used")]
    used: String,
    #[tabled(rename = "Last Used")]
    #[serde(rename = "Last Used")]
    last_used: String,
}

// -- Row builders --

fn build_scan_rows(scans: &[ScanResult]) -> Vec<ScanRow> {
    scans
        .iter()
        .map(|s| ScanRow {
            domain: s.domain.clone(),
            status: s.status.to_string(),
            score: format!("{:.2}", s.score),
            virustotal: s
                .virustotal_risk
                .map(|r| format!("{:.2}", r))
                .unwrap_or_else(|| "-".to_string()),
            credits: format_credits(s.credits_used),
            scanned: format_timestamp(Some(&s.created_at)),
            summary: s.summary.clone(),
        })
        .collect()
}

fn build_blacklist_rows(statuses: &[BlacklistStatus]) -> Vec<BlacklistRow> {
    statuses
        .iter()
        .map(|b| BlacklistRow {
            domain: b.domain.clone(),
            blacklisted: if b.blacklisted { "yes" } else { "no" }.to_string(),
            severity: b.severity.clone().unwrap_or_else(|| "-".to_string()),
            reason: b.reason.clone().unwrap_or_else(|| "-".to_string()),
            reports: b
                .report_count
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string()),
            first_detected: format_timestamp(b.first_detected.as_deref()),
        })
        .collect()
}

fn build_report_rows(reports: &[ReportResult]) -> Vec<ReportRow> {
    reports
        .iter()
        .map(|r| ReportRow {
            id: r.id,
            domain: r.domain.clone(),
            status: r.status.to_string(),
            reward: r
                .reward_credits
                .map(format_credits)
                .unwrap_or_else(|| "-".to_string()),
            message: r.message.clone(),
        })
        .collect()
}

fn build_balance_rows(balances: &[Balance]) -> Vec<BalanceRow> {
    balances
        .iter()
        .map(|b| BalanceRow {
            token: b.token_name.clone(),
            balance: format_credits(b.balance_credits),
            used: format_credits(b.total_used_credits),
            last_used: format_timestamp(b.last_used.as_deref()),
        })
        .collect()
}

// -- Rendering --

fn print_rows<R: Tabled + Serialize>(rows: Vec<R>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => print_json(&rows),
    }
    Ok(())
}

/// JSON output prints the response body as the API returned it, not the table rows.
pub fn print_scan(scan: &ApiResponse<ScanResult>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(scan);
            Ok(())
        }
        _ => print_rows(build_scan_rows(std::slice::from_ref(&**scan)), format),
    }
}

pub fn print_blacklist_status(
    status: &ApiResponse<BlacklistStatus>,
    format: &OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(status);
            Ok(())
        }
        _ => print_rows(build_blacklist_rows(std::slice::from_ref(&**status)), format),
    }
}

pub fn print_report(report: &ApiResponse<ReportResult>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(report);
            Ok(())
        }
        _ => print_rows(build_report_rows(std::slice::from_ref(&**report)), format),
    }
}

pub fn print_balance(balance: &ApiResponse<Balance>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(balance);
            Ok(())
        }
        _ => print_rows(build_balance_rows(std::slice::from_ref(&**balance)), format),
    }
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

/// Credits with up to three decimals and no trailing zeros.
fn format_credits(value: f64) -> String {
    let text = format!("{:.3}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn format_timestamp(value: Option<&str>) -> String {
    match value {
        None => "-".to_string(),
        Some(raw) => parse_timestamp(raw)
            .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| raw.to_string()),
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
