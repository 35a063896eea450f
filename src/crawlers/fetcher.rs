use async_trait::async_trait;
use thiserror::Error;

/// Failure to load a single page
///
/// Always contained by the crawler: the page contributes no records and the
/// crawl moves on.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No browser session could be established
    #[error("could not connect to WebDriver: {0}")]
    Connect(String),

    /// The browser failed to load the URL
    #[error("failed to load {url}: {message}")]
    Navigation { url: String, message: String },

    /// The page loaded but its rendered source could not be read
    #[error("failed to read source of {url}: {message}")]
    Source { url: String, message: String },
}

/// Renders a URL into its final HTML
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Load `url` and return the rendered document source
    async fn render(&self, url: &str) -> Result<String, FetchError>;

    /// Release whatever session the fetcher holds
    async fn shutdown(&self) {}
}
