use std::time::Duration;
use thiserror::Error;

/// Errors that abort a whole crawl
///
/// Per-page fetch failures are not represented here: they are contained by the
/// crawler and never reach the caller.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The crawl did not finish before the deadline
    #[error("crawl timed out after {} seconds", .0.as_secs_f64())]
    Timeout(Duration),

    /// Unexpected failure while extracting or associating page data
    #[error("crawl failed: {0}")]
    Internal(String),

    /// The crawl request itself is unusable
    #[error("invalid crawl request: {0}")]
    InvalidRequest(String),

    /// Configuration could not be loaded or compiled
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CrawlError>;

impl From<regex::Error> for CrawlError {
    fn from(err: regex::Error) -> Self {
        CrawlError::Config(err.to_string())
    }
}
