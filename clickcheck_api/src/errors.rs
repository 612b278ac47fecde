//! Error types for the API client.

use std::time::Duration;

/// Broad category of an [`Error`], for callers that only care about the kind
/// of failure and not its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport failure, timeout, or an unreadable success body.
    Generic,
    /// The API answered with a non-success status.
    Api,
    /// The API answered 429.
    RateLimit,
    /// The API answered 402.
    InsufficientCredits,
    /// The caller passed a value the client refuses to send.
    InvalidArgument,
}

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request did not complete within the client timeout.
    #[error("Request timed out")]
    Timeout,
    /// The request could not be sent or the response could not be read.
    #[error("Network error: {0}")]
    Network(String),
    /// A success response carried a body that does not match the expected record.
    #[error("Failed to parse response: {0}")]
    Decode(String),
    /// The API returned a non-success status other than 402 or 429.
    #[error("{message}")]
    Api { status: u16, message: String },
    /// The API rejected the request because the rate limit was reached.
    #[error("{message}")]
    RateLimited {
        message: String,
        /// Seconds to wait before retrying.
        retry_after: u64,
        /// Requests allowed per minute, when the API reported it.
        limit: Option<u64>,
        remaining: u64,
    },
    /// The API token has no credits left for this operation.
    #[error("{0}")]
    InsufficientCredits(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Returns the broad category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Timeout | Error::Network(_) | Error::Decode(_) => ErrorKind::Generic,
            Error::Api { .. } => ErrorKind::Api,
            Error::RateLimited { .. } => ErrorKind::RateLimit,
            Error::InsufficientCredits(_) => ErrorKind::InsufficientCredits,
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
        }
    }

    /// HTTP status code that produced this error, if it came from a response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::RateLimited { .. } => Some(429),
            Error::InsufficientCredits(_) => Some(402),
            _ => None,
        }
    }

    /// How long to wait before retrying, for rate-limit errors.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Error::RateLimited { retry_after, .. } => Some(Duration::from_secs(*retry_after)),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Error::Timeout
        } else {
            Error::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_message_only() {
        let err = Error::Api {
            status: 404,
            message: "Test error".to_string(),
        };
        assert_eq!(err.to_string(), "Test error");
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.kind(), ErrorKind::Api);
    }

    #[test]
    fn rate_limit_error_exposes_retry_metadata() {
        let err = Error::RateLimited {
            message: "Rate limit exceeded".to_string(),
            retry_after: 60,
            limit: Some(100),
            remaining: 0,
        };
        assert_eq!(err.retry_after(), Some(Duration::from_secs(60)));
        assert_eq!(err.status_code(), Some(429));
        assert_eq!(err.kind(), ErrorKind::RateLimit);
        match err {
            Error::RateLimited {
                limit, remaining, ..
            } => {
                assert_eq!(limit, Some(100));
                assert_eq!(remaining, 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn generic_errors_share_a_kind() {
        assert_eq!(Error::Timeout.kind(), ErrorKind::Generic);
        assert_eq!(Error::Network("reset".into()).kind(), ErrorKind::Generic);
        assert_eq!(Error::Decode("eof".into()).kind(), ErrorKind::Generic);
        assert_eq!(Error::Timeout.to_string(), "Request timed out");
        assert_eq!(
            Error::Network("connection refused".into()).to_string(),
            "Network error: connection refused"
        );
        assert!(Error::Timeout.status_code().is_none());
        assert!(Error::Timeout.retry_after().is_none());
    }

    #[test]
    fn insufficient_credits_reports_402() {
        let err = Error::InsufficientCredits("Out of credits".into());
        assert_eq!(err.status_code(), Some(402));
        assert_eq!(err.kind(), ErrorKind::InsufficientCredits);
        assert_eq!(err.to_string(), "Out of credits");
    }
}
