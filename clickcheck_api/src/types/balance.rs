use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::parse_timestamp;

/// Credit balance and usage of the API token, from `GET /balance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balance {
    pub balance_credits: f64,

    pub total_used_credits: f64,

    pub token_name: String,

    #[serde(default)]
    pub last_used: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Balance {
    pub fn last_used_utc(&self) -> Option<DateTime<Utc>> {
        self.last_used.as_deref().and_then(parse_timestamp)
    }
}
