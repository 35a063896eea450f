//! In-memory collaborators for crawler tests.

use crate::crawlers::{Crawler, FetchError, PageFetcher};
use crate::error::{CrawlError, Result};
use crate::parsers::text::{normalize_whitespace_in_segment, split_sentences};
use crate::parsers::{HtmlDocumentParser, TextAnalysis, TextAnalyzer};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Serves canned HTML per URL and records every fetch
#[derive(Default)]
pub struct StubFetcher {
    pages: HashMap<String, String>,
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
    fetches: Mutex<Vec<String>>,
    shutdowns: AtomicUsize,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn with_failure(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    pub fn with_delay(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }

    /// Every URL passed to `render`, in call order
    pub fn fetch_log(&self) -> Vec<String> {
        self.fetches.lock().unwrap().clone()
    }

    pub fn fetch_count(&self, url: &str) -> usize {
        self.fetches.lock().unwrap().iter().filter(|u| *u == url).count()
    }

    pub fn shutdown_count(&self) -> usize {
        self.shutdowns.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn render(&self, url: &str) -> std::result::Result<String, FetchError> {
        self.fetches.lock().unwrap().push(url.to_string());

        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }

        match self.pages.get(url) {
            Some(html) if !self.failing.contains(url) => Ok(html.clone()),
            _ => Err(FetchError::Navigation {
                url: url.to_string(),
                message: "net::ERR_NAME_NOT_RESOLVED".to_string(),
            }),
        }
    }

    async fn shutdown(&self) {
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
    }
}

/// Reports the listed names wherever they occur, sentence by sentence
pub struct KnownNamesAnalyzer {
    names: Vec<String>,
}

impl KnownNamesAnalyzer {
    pub fn new(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
        }
    }
}

impl TextAnalyzer for KnownNamesAnalyzer {
    fn analyze(&self, text: &str) -> Result<TextAnalysis> {
        let sentences = split_sentences(&normalize_whitespace_in_segment(text));
        let person_names = sentences
            .iter()
            .flat_map(|sentence| {
                self.names
                    .iter()
                    .filter(|name| sentence.contains(name.as_str()))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .collect();

        Ok(TextAnalysis {
            sentences,
            person_names,
        })
    }
}

pub struct PanickingAnalyzer;

impl TextAnalyzer for PanickingAnalyzer {
    fn analyze(&self, _text: &str) -> Result<TextAnalysis> {
        panic!("analyzer exploded");
    }
}

/// Blocks its thread before answering, like a slow model would
pub struct StallingAnalyzer {
    stall: Duration,
}

impl StallingAnalyzer {
    pub fn new(stall: Duration) -> Self {
        Self { stall }
    }
}

impl TextAnalyzer for StallingAnalyzer {
    fn analyze(&self, _text: &str) -> Result<TextAnalysis> {
        std::thread::sleep(self.stall);
        Ok(TextAnalysis::default())
    }
}

pub struct FailingAnalyzer;

impl TextAnalyzer for FailingAnalyzer {
    fn analyze(&self, _text: &str) -> Result<TextAnalysis> {
        Err(CrawlError::Internal("analyzer unavailable".to_string()))
    }
}

/// Crawler over the stub fetcher, the real HTML parser and the given analyzer
pub fn crawler_with(fetcher: Arc<StubFetcher>, analyzer: impl TextAnalyzer + 'static) -> Crawler {
    Crawler::new(fetcher, Arc::new(HtmlDocumentParser), Arc::new(analyzer))
}
