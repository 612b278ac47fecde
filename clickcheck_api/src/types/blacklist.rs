//! Blacklist lookup and report responses.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::parse_timestamp;

/// Result of `GET /check`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlacklistStatus {
    pub blacklisted: bool,

    pub domain: String,

    #[serde(default)]
    pub severity: Option<String>,

    #[serde(default)]
    pub reason: Option<String>,

    #[serde(default)]
    pub first_detected: Option<String>,

    #[serde(default)]
    pub report_count: Option<i64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BlacklistStatus {
    pub fn first_detected_utc(&self) -> Option<DateTime<Utc>> {
        self.first_detected.as_deref().and_then(parse_timestamp)
    }
}

/// Review state of a submitted blacklist report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Verified,
    Rejected,
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Verified => "verified",
            ReportStatus::Rejected => "rejected",
        };
        f.write_str(value)
    }
}

/// Result of `POST /blacklist/report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResult {
    pub id: i64,

    pub domain: String,

    pub status: ReportStatus,

    /// Credits granted once the report is verified and added.
    #[serde(default)]
    pub reward_credits: Option<f64>,

    pub message: String,

    pub created_at: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ReportResult {
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }
}
