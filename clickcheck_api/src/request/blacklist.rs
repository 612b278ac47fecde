//! Blacklist lookup parameters and report body.

use serde::Serialize;
use url::Url;

/// Query for `GET /check`.
#[derive(Debug, Clone)]
pub struct BlacklistLookup {
    pub domain: String,
    /// More specific URL on the domain. Empty strings are not sent.
    pub url: Option<String>,
}

impl BlacklistLookup {
    pub fn new(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            url: None,
        }
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    /// Appends the lookup parameters to the given URL, returning the modified URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut().append_pair("domain", &self.domain);
        if let Some(target) = self.url.as_deref().filter(|u| !u.is_empty()) {
            url.query_pairs_mut().append_pair("url", target);
        }
        url
    }
}

/// Body of `POST /blacklist/report`.
///
/// Absent optional fields are sent as `null`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BlacklistReport {
    pub domain: String,
    pub url: Option<String>,
    pub reason: Option<String>,
    pub evidence: Option<String>,
}

impl BlacklistReport {
    pub fn new(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            ..Default::default()
        }
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    pub fn with_reason(mut self, reason: &str) -> Self {
        self.reason = Some(reason.to_string());
        self
    }

    pub fn with_evidence(mut self, evidence: &str) -> Self {
        self.evidence = Some(evidence.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/api/v1/check").unwrap()
    }

    #[test]
    fn lookup_with_domain_only() {
        let url = BlacklistLookup::new("example.com").add_to_url(&base_url());
        assert_eq!(url.query(), Some("domain=example.com"));
    }

    #[test]
    fn lookup_skips_empty_url() {
        let url = BlacklistLookup::new("example.com")
            .with_url("")
            .add_to_url(&base_url());
        assert_eq!(url.query(), Some("domain=example.com"));
    }

    #[test]
    fn report_sends_nulls_for_missing_fields() {
        let body = serde_json::to_value(BlacklistReport::new("bad.example").with_reason("phishing"))
            .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "domain": "bad.example",
                "url": null,
                "reason": "phishing",
                "evidence": null
            })
        );
    }
}
