//! Scan results returned by `POST /scans/analyze`.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::parse_timestamp;

/// Overall verdict for a scanned URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScanStatus {
    Safe,
    Caution,
    Unsafe,
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            ScanStatus::Safe => "SAFE",
            ScanStatus::Caution => "CAUTION",
            ScanStatus::Unsafe => "UNSAFE",
        };
        f.write_str(value)
    }
}

/// Privacy and security analysis of a single URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub id: i64,

    pub url: String,

    pub domain: String,

    pub status: ScanStatus,

    /// Risk score between 0.0 (no risk) and 1.0.
    pub score: f64,

    pub summary: String,

    /// Structured analysis produced by the service. Shape varies by model version.
    #[serde(default)]
    pub ai_analysis: Option<Value>,

    /// Privacy policy the analysis was based on, if one was found.
    #[serde(default)]
    pub privacy_document_url: Option<String>,

    #[serde(default)]
    pub virustotal_data: Option<Value>,

    #[serde(default)]
    pub virustotal_risk: Option<f64>,

    /// ISO-8601 creation time as sent by the API. See [`ScanResult::created_at_utc`].
    pub created_at: String,

    pub credits_used: f64,

    /// Fields the API returned that this record does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ScanResult {
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }
}
