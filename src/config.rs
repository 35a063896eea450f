use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// A single crawl request as accepted from callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlRequest {
    /// Absolute seed URL
    pub url: String,

    /// Deepest level to visit, the seed being level 1
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl CrawlRequest {
    /// Create a request with the default depth
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            max_depth: default_max_depth(),
        }
    }

    /// Override the maximum depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Configuration for the person crawler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Maximum crawl depth used when a request does not carry one
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Hard deadline for a whole crawl, in seconds
    #[serde(default = "default_total_timeout_secs")]
    pub total_timeout_secs: u64,

    /// Stop fetching after this many pages (unlimited when absent)
    #[serde(default)]
    pub max_pages: Option<usize>,

    /// Regex patterns a same-domain link must match to be followed
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Regex patterns that prevent a same-domain link from being followed
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            max_depth: default_max_depth(),
            total_timeout_secs: default_total_timeout_secs(),
            max_pages: None,
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
        }
    }
}

impl CrawlerConfig {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Apply the `WEBDRIVER_URL` environment override, if set
    pub fn apply_env(&mut self) {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.webdriver_url = webdriver_url;
            }
        }
    }
}

/// Default crawl depth
fn default_max_depth() -> usize {
    2
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

/// Ten minutes
fn default_total_timeout_secs() -> u64 {
    600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_depth() {
        let request: CrawlRequest = serde_json::from_str(r#"{"url": "https://example.com"}"#).unwrap();
        assert_eq!(request.url, "https://example.com");
        assert_eq!(request.max_depth, 2);

        let request: CrawlRequest =
            serde_json::from_str(r#"{"url": "https://example.com", "max_depth": 0}"#).unwrap();
        assert_eq!(request.max_depth, 0);
    }

    #[test]
    fn test_request_requires_url() {
        assert!(serde_json::from_str::<CrawlRequest>(r#"{"max_depth": 3}"#).is_err());
    }

    #[test]
    fn test_config_defaults() {
        let config = CrawlerConfig::from_json("{}").unwrap();
        assert_eq!(config.webdriver_url, "http://localhost:4444");
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.total_timeout_secs, 600);
        assert!(config.max_pages.is_none());
        assert!(config.include_patterns.is_empty());
        assert!(config.exclude_patterns.is_empty());
    }

    #[test]
    fn test_config_overrides() {
        let json = r#"{
            "webdriver_url": "http://localhost:9515",
            "max_depth": 4,
            "total_timeout_secs": 30,
            "max_pages": 50,
            "exclude_patterns": ["\\.pdf$"]
        }"#;
        let config = CrawlerConfig::from_json(json).unwrap();
        assert_eq!(config.webdriver_url, "http://localhost:9515");
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.total_timeout_secs, 30);
        assert_eq!(config.max_pages, Some(50));
        assert_eq!(config.exclude_patterns, vec![r"\.pdf$".to_string()]);
    }

    #[test]
    fn test_config_from_missing_file() {
        assert!(CrawlerConfig::from_file("/nonexistent/people-crawler.json").is_err());
    }
}
