use crate::association::associate;
use crate::config::CrawlRequest;
use crate::crawlers::fetcher::PageFetcher;
use crate::error::{CrawlError, Result};
use crate::filter::DomainFilter;
use crate::parsers::{DocumentParser, TextAnalyzer};
use crate::patterns::{find_all_emails, find_all_phones};
use crate::results::{PageText, PersonRecord};
use std::collections::HashSet;
use std::sync::Arc;
use url::Url;

/// Counters for one crawl, logged when it ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Fetches attempted, failed ones included
    pub pages_attempted: usize,
    /// Fetches that failed and were skipped
    pub fetch_failures: usize,
    /// Person records produced
    pub records: usize,
}

/// Sequential, depth-first person crawler
///
/// Owns the collaborators. Every call to [`Crawler::crawl`] gets its own
/// visited set, so one `Crawler` can serve repeated crawls.
pub struct Crawler {
    fetcher: Arc<dyn PageFetcher>,
    parser: Arc<dyn DocumentParser>,
    analyzer: Arc<dyn TextAnalyzer>,
    include_patterns: Vec<String>,
    exclude_patterns: Vec<String>,
    max_pages: Option<usize>,
}

impl Crawler {
    /// Create a crawler from its three collaborators
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        parser: Arc<dyn DocumentParser>,
        analyzer: Arc<dyn TextAnalyzer>,
    ) -> Self {
        Self {
            fetcher,
            parser,
            analyzer,
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            max_pages: None,
        }
    }

    /// Restrict followed links with include/exclude regex patterns
    pub fn with_patterns(mut self, include: Vec<String>, exclude: Vec<String>) -> Self {
        self.include_patterns = include;
        self.exclude_patterns = exclude;
        self
    }

    /// Stop after this many fetch attempts
    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Release the fetcher's session
    pub async fn shutdown(&self) {
        self.fetcher.shutdown().await;
    }

    /// Crawl from the request's seed and collect every person record found
    pub async fn crawl(&self, request: &CrawlRequest) -> Result<Vec<PersonRecord>> {
        let seed = Url::parse(&request.url)
            .map_err(|e| CrawlError::InvalidRequest(format!("{}: {}", request.url, e)))?;
        let filter = DomainFilter::for_seed(&seed)?
            .with_patterns(&self.include_patterns, &self.exclude_patterns)?;

        ::log::info!(
            "Starting crawl of {} (domain {}, max depth {})",
            request.url,
            filter.domain(),
            request.max_depth
        );
        let start_time = std::time::Instant::now();

        let mut visited = HashSet::new();
        let mut stats = CrawlStats::default();
        let result = self
            .crawl_from(
                &request.url,
                &filter,
                &mut visited,
                request.max_depth,
                1,
                &mut stats,
            )
            .await;

        self.fetcher.shutdown().await;

        ::log::info!(
            "Crawl of {} complete - {} pages attempted, {} failed, {} records in {:.2} seconds",
            request.url,
            stats.pages_attempted,
            stats.fetch_failures,
            stats.records,
            start_time.elapsed().as_secs_f64()
        );
        result
    }

    /// Visit `url` at `depth` and everything reachable from it within `max_depth`
    ///
    /// Records come back in pre-order: a page's own records precede those of
    /// the pages reached through its links, and links are followed in the
    /// order they appear on the page.
    pub async fn crawl_from(
        &self,
        url: &str,
        filter: &DomainFilter,
        visited: &mut HashSet<String>,
        max_depth: usize,
        depth: usize,
        stats: &mut CrawlStats,
    ) -> Result<Vec<PersonRecord>> {
        let mut records = Vec::new();
        let mut frontier = vec![(url.to_string(), depth)];

        while let Some((url, depth)) = frontier.pop() {
            if depth > max_depth {
                ::log::trace!("Skipping {} beyond max depth {}", url, max_depth);
                continue;
            }
            if visited.contains(&url) {
                ::log::trace!("Skipping already visited: {}", url);
                continue;
            }
            if self.max_pages.is_some_and(|limit| stats.pages_attempted >= limit) {
                ::log::info!("Page limit reached, not fetching {}", url);
                break;
            }

            // Mark before fetching so a link back to this page is never queued again
            visited.insert(url.clone());
            stats.pages_attempted += 1;
            ::log::info!("Scraping URL: {} at depth {}", url, depth);

            let html = match self.fetcher.render(&url).await {
                Ok(html) => html,
                Err(e) => {
                    ::log::error!("Failed to load {}: {}", url, e);
                    stats.fetch_failures += 1;
                    continue;
                }
            };

            let page = self.extract(&url, html).await?;
            let page_records = associate(&page.sentences, &page.person_names, &page.images);
            ::log::debug!("Found {} people on {}", page_records.len(), url);
            stats.records += page_records.len();
            records.extend(page_records);

            if depth >= max_depth {
                continue;
            }

            let children = page
                .links
                .into_iter()
                .filter(|link| filter.should_crawl(link) && !visited.contains(link))
                .collect::<Vec<_>>();
            ::log::debug!("Queuing {} same-domain links from {}", children.len(), url);

            // Reversed so the first link on the page is popped first
            frontier.extend(children.into_iter().rev().map(|link| (link, depth + 1)));
        }

        Ok(records)
    }

    /// Runs the document and text collaborators over one rendered page
    ///
    /// Both collaborators are synchronous, so they run on the blocking pool.
    async fn extract(&self, url: &str, html: String) -> Result<PageText> {
        let base = Url::parse(url).map_err(|e| CrawlError::Internal(format!("{}: {}", url, e)))?;
        let parser = Arc::clone(&self.parser);
        let analyzer = Arc::clone(&self.analyzer);

        let (document, analysis) = tokio::task::spawn_blocking(move || {
            let document = parser.parse(&html, &base)?;
            let analysis = analyzer.analyze(&document.text)?;
            Ok::<_, CrawlError>((document, analysis))
        })
        .await
        .map_err(|e| match e.try_into_panic() {
            Ok(payload) => std::panic::resume_unwind(payload),
            Err(e) => CrawlError::Internal(e.to_string()),
        })??;

        let person_names = analysis
            .person_names
            .into_iter()
            .filter(|name| {
                let blank = name.trim().is_empty();
                if blank {
                    ::log::trace!("Dropping blank name reported for {}", url);
                }
                !blank
            })
            .collect();

        let page = PageText {
            url: url.to_string(),
            emails: find_all_emails(&document.text),
            phone_numbers: find_all_phones(&document.text),
            sentences: analysis.sentences,
            person_names,
            links: document.links,
            images: document.images,
        };

        ::log::info!("Found {} links in {}", page.links.len(), url);
        ::log::debug!(
            "Page {} has {} sentences, {} names, {} emails, {} phone numbers, {} images",
            page.url,
            page.sentences.len(),
            page.person_names.len(),
            page.emails.len(),
            page.phone_numbers.len(),
            page.images.len()
        );

        Ok(page)
    }
}
