use crate::error::{CrawlError, Result};
use crate::utils::network_location;
use regex::Regex;
use url::Url;

/// Decides which discovered links stay in the crawl
///
/// A link is followed only when its network location equals the seed's.
/// Optional include/exclude patterns narrow that further; exclusions take
/// precedence over inclusions.
#[derive(Debug)]
pub struct DomainFilter {
    domain: String,
    include_regexes: Vec<Regex>,
    exclude_regexes: Vec<Regex>,
}

impl DomainFilter {
    /// Create a filter scoped to the seed URL's network location
    pub fn for_seed(seed: &Url) -> Result<Self> {
        let domain = network_location(seed);
        if domain.is_empty() {
            return Err(CrawlError::InvalidRequest(format!(
                "seed URL has no network location: {}",
                seed
            )));
        }
        Ok(Self::new(domain))
    }

    /// Create a filter for an explicit network location
    pub fn new(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            include_regexes: Vec::new(),
            exclude_regexes: Vec::new(),
        }
    }

    /// Compile include and exclude patterns into the filter
    pub fn with_patterns(mut self, include: &[String], exclude: &[String]) -> Result<Self> {
        self.include_regexes = include
            .iter()
            .map(|p| Regex::new(p))
            .collect::<std::result::Result<_, _>>()?;
        self.exclude_regexes = exclude
            .iter()
            .map(|p| Regex::new(p))
            .collect::<std::result::Result<_, _>>()?;
        Ok(self)
    }

    /// Network location every followed link must share
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Determine if an absolute link should be crawled
    pub fn should_crawl(&self, link: &str) -> bool {
        let Ok(url) = Url::parse(link) else {
            return false;
        };

        if network_location(&url) != self.domain {
            return false;
        }

        if self.exclude_regexes.iter().any(|re| re.is_match(link)) {
            return false;
        }

        self.include_regexes.is_empty() || self.include_regexes.iter().any(|re| re.is_match(link))
    }
}
