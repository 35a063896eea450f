pub mod association;
pub mod config;
pub mod crawlers;
pub mod error;
pub mod filter;
pub mod guard;
pub mod parsers;
pub mod patterns;
pub mod results;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types for convenience
pub use config::{CrawlRequest, CrawlerConfig};
pub use error::CrawlError;
pub use results::PersonRecord;

use crawlers::{Crawler, WebDriverFetcher};
use parsers::{HtmlDocumentParser, RuleBasedAnalyzer};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Builder for a single bounded person crawl
pub struct Scrape {
    url: String,
    max_depth: Option<usize>,
    webdriver_url: Option<String>,
    config: CrawlerConfig,
}

impl Scrape {
    /// Create a new Scrape builder for the given seed URL
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            max_depth: None,
            webdriver_url: None,
            config: CrawlerConfig::default(),
        }
    }

    /// Create a builder from a request as received from a caller
    pub fn from_request(request: CrawlRequest) -> Self {
        Self::new(&request.url).with_max_depth(request.max_depth)
    }

    /// Set the maximum crawl depth (the seed is depth 1)
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Set the total timeout (maximum runtime)
    pub fn with_total_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.total_timeout_secs = timeout_seconds;
        self
    }

    /// Use this WebDriver endpoint, ignoring `WEBDRIVER_URL`
    pub fn with_webdriver_url(mut self, webdriver_url: &str) -> Self {
        self.webdriver_url = Some(webdriver_url.to_string());
        self
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: CrawlerConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a file
    pub fn with_config_file(
        self,
        path: impl AsRef<Path>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let config = CrawlerConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a string
    pub fn with_config_str(self, config_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config = CrawlerConfig::from_json(config_str)?;
        Ok(self.with_config(config))
    }

    /// The request this builder will run
    pub fn request(&self) -> CrawlRequest {
        CrawlRequest::new(&self.url).with_max_depth(self.max_depth.unwrap_or(self.config.max_depth))
    }

    /// Hard deadline for the whole crawl
    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.config.total_timeout_secs)
    }

    /// WebDriver endpoint: explicit setting, then `WEBDRIVER_URL`, then configuration
    pub fn effective_webdriver_url(&self) -> String {
        if let Some(url) = &self.webdriver_url {
            return url.clone();
        }
        let mut config = self.config.clone();
        config.apply_env();
        config.webdriver_url
    }

    /// Crawler wired with the browser fetcher, HTML parser and rule-based analyzer
    pub fn build_crawler(&self) -> Crawler {
        let fetcher = WebDriverFetcher::new(&self.effective_webdriver_url());
        Crawler::new(
            Arc::new(fetcher),
            Arc::new(HtmlDocumentParser),
            Arc::new(RuleBasedAnalyzer),
        )
        .with_patterns(
            self.config.include_patterns.clone(),
            self.config.exclude_patterns.clone(),
        )
        .with_max_pages(self.config.max_pages)
    }

    /// Run the crawl under the configured deadline
    pub async fn run(self) -> Result<Vec<PersonRecord>, CrawlError> {
        let crawler = Arc::new(self.build_crawler());
        guard::run_bounded(crawler, self.request(), self.deadline()).await
    }
}
