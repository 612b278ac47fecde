//! Client for the ClickCheck website privacy and security scanning API.
//!
//! ```no_run
//! # async fn run() -> Result<(), clickcheck_api::Error> {
//! use clickcheck_api::{Client, EvaluationMode};
//!
//! let client = Client::new("your_api_token")?;
//! let result = client.scan_url("https://example.com", EvaluationMode::Default).await?;
//! println!("Status: {}, Score: {}", result.status, result.score);
//! # Ok(())
//! # }
//! ```

mod client;
mod errors;
mod request;
pub mod types;
mod user_agent;
pub use self::client::{Client, ClientBuilder, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use self::errors::{Error, ErrorKind};
pub use self::request::{BlacklistLookup, BlacklistReport, EvaluationMode, ScanRequest};
