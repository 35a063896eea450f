use crate::config::CrawlRequest;
use crate::crawlers::Crawler;
use crate::error::{CrawlError, Result};
use crate::results::PersonRecord;
use std::any::Any;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// How long an abandoned crawl gets to release its browser session
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Runs one crawl on its own task under a hard deadline
///
/// The caller gets either the complete record list or a single error: a
/// timeout, or the crawl's own failure (panics included). Records gathered
/// before a failure are discarded.
pub async fn run_bounded(
    crawler: Arc<Crawler>,
    request: CrawlRequest,
    deadline: Duration,
) -> Result<Vec<PersonRecord>> {
    let worker = Arc::clone(&crawler);
    let mut handle = tokio::spawn(async move { worker.crawl(&request).await });

    match timeout(deadline, &mut handle).await {
        Ok(Ok(result)) => {
            if let Err(e) = &result {
                ::log::error!("Error during scraping: {}", e);
            }
            result
        }
        Ok(Err(join_error)) => {
            let message = if join_error.is_panic() {
                panic_message(join_error.into_panic())
            } else {
                join_error.to_string()
            };
            ::log::error!("Error during scraping: {}", message);
            crawler.shutdown().await;
            Err(CrawlError::Internal(message))
        }
        Err(_) => {
            ::log::error!(
                "Error during scraping: deadline of {} seconds exceeded",
                deadline.as_secs_f64()
            );
            handle.abort();
            // Cancellation lands at the task's next suspension point
            if timeout(SHUTDOWN_GRACE, &mut handle).await.is_err() {
                ::log::warn!("Crawl task still running after cancellation, detaching it");
            }
            if timeout(SHUTDOWN_GRACE, crawler.shutdown()).await.is_err() {
                ::log::warn!("Abandoning browser session that did not close in time");
            }
            Err(CrawlError::Timeout(deadline))
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "crawl task panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        FailingAnalyzer, KnownNamesAnalyzer, PanickingAnalyzer, StallingAnalyzer, StubFetcher,
        crawler_with,
    };

    const SEED: &str = "https://example.com/";

    #[tokio::test]
    async fn test_success_returns_records_unchanged() {
        let fetcher = Arc::new(
            StubFetcher::new().with_page(SEED, "<p>Jane Doe can be reached at jane@example.com.</p>"),
        );
        let crawler = Arc::new(crawler_with(fetcher.clone(), KnownNamesAnalyzer::new(&["Jane Doe"])));

        let records = run_bounded(crawler, CrawlRequest::new(SEED), Duration::from_secs(5))
            .await
            .expect("crawl should succeed");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Jane Doe");
        assert_eq!(records[0].contact_information.as_deref(), Some("jane@example.com."));
    }

    #[tokio::test]
    async fn test_deadline_yields_timeout_not_partial_list() {
        let fetcher = Arc::new(
            StubFetcher::new()
                .with_page(SEED, "<p>Jane Doe.</p><a href=\"/slow\">slow</a>")
                .with_page("https://example.com/slow", "<p>Tom Ray.</p>")
                .with_delay("https://example.com/slow", Duration::from_secs(30)),
        );
        let crawler = Arc::new(crawler_with(
            fetcher.clone(),
            KnownNamesAnalyzer::new(&["Jane Doe", "Tom Ray"]),
        ));

        let result = run_bounded(crawler, CrawlRequest::new(SEED), Duration::from_millis(200)).await;

        assert!(matches!(result, Err(CrawlError::Timeout(d)) if d == Duration::from_millis(200)));
        assert_eq!(fetcher.shutdown_count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_stalled_analyzer_cannot_hold_caller_past_deadline() {
        let fetcher = Arc::new(StubFetcher::new().with_page(SEED, "<p>Jane Doe.</p>"));
        let crawler = Arc::new(crawler_with(
            fetcher.clone(),
            StallingAnalyzer::new(Duration::from_secs(3)),
        ));

        let start = std::time::Instant::now();
        let result = run_bounded(crawler, CrawlRequest::new(SEED), Duration::from_millis(200)).await;
        let elapsed = start.elapsed();

        assert!(matches!(result, Err(CrawlError::Timeout(_))));
        assert!(elapsed < Duration::from_secs(2), "caller waited {:?}", elapsed);
        assert_eq!(fetcher.shutdown_count(), 1);
    }

    #[tokio::test]
    async fn test_panic_becomes_internal_error() {
        let fetcher = Arc::new(StubFetcher::new().with_page(SEED, "<p>Anything.</p>"));
        let crawler = Arc::new(crawler_with(fetcher, PanickingAnalyzer));

        let result = run_bounded(crawler, CrawlRequest::new(SEED), Duration::from_secs(5)).await;

        match result {
            Err(CrawlError::Internal(message)) => assert_eq!(message, "analyzer exploded"),
            other => panic!("expected internal error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_crawl_error_is_reported() {
        let fetcher = Arc::new(StubFetcher::new().with_page(SEED, "<p>Anything.</p>"));
        let crawler = Arc::new(crawler_with(fetcher, FailingAnalyzer));

        let result = run_bounded(crawler, CrawlRequest::new(SEED), Duration::from_secs(5)).await;

        assert!(matches!(result, Err(CrawlError::Internal(m)) if m == "analyzer unavailable"));
    }

    #[tokio::test]
    async fn test_invalid_seed_is_reported() {
        let fetcher = Arc::new(StubFetcher::new());
        let crawler = Arc::new(crawler_with(fetcher.clone(), KnownNamesAnalyzer::new(&[])));

        let result = run_bounded(crawler, CrawlRequest::new("not a url"), Duration::from_secs(5)).await;

        assert!(matches!(result, Err(CrawlError::InvalidRequest(_))));
        assert!(fetcher.fetch_log().is_empty());
    }
}
