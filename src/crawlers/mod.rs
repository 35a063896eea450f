pub mod crawler;
pub mod fetcher;
pub mod web;

pub use crawler::{CrawlStats, Crawler};
pub use fetcher::{FetchError, PageFetcher};
pub use web::WebDriverFetcher;
