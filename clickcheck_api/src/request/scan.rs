//! Scan request body and the [`EvaluationMode`] setting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// How strictly the service scores a URL.
///
/// Serialized with the values the API expects (`default`, `strikt`,
/// `grosszuegig`). Parsing accepts those as well as the English names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvaluationMode {
    /// Balanced evaluation. This is the default.
    #[default]
    #[serde(rename = "default")]
    Default,
    /// Very critical, reports every risk it finds.
    #[serde(rename = "strikt")]
    Strict,
    /// Optimistic, minimizes concerns.
    #[serde(rename = "grosszuegig")]
    Lenient,
}

impl EvaluationMode {
    /// The value sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationMode::Default => "default",
            EvaluationMode::Strict => "strikt",
            EvaluationMode::Lenient => "grosszuegig",
        }
    }
}

impl fmt::Display for EvaluationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvaluationMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(EvaluationMode::Default),
            "strict" | "strikt" => Ok(EvaluationMode::Strict),
            "lenient" | "grosszuegig" => Ok(EvaluationMode::Lenient),
            _ => Err(Error::InvalidArgument(format!(
                "Invalid evaluation_mode: {}. Must be 'default', 'strict', or 'lenient'",
                s
            ))),
        }
    }
}

/// Body of `POST /scans/analyze`.
#[derive(Debug, Clone, Serialize)]
pub struct ScanRequest {
    pub url: String,
    pub evaluation_mode: EvaluationMode,
}

impl ScanRequest {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            evaluation_mode: EvaluationMode::default(),
        }
    }

    pub fn with_evaluation_mode(mut self, evaluation_mode: EvaluationMode) -> Self {
        self.evaluation_mode = evaluation_mode;
        self
    }
}
