use crate::crawlers::fetcher::{FetchError, PageFetcher};
use async_trait::async_trait;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder};
use tokio::sync::Mutex;

/// Alternative WebDriver endpoints tried when the configured one is down
const FALLBACK_WEBDRIVER_URLS: [&str; 4] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4723", // Appium default
    "http://localhost:9222", // Chrome debug port default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// Page fetcher that drives a real browser over WebDriver
///
/// The session is opened on the first fetch and reused for the rest of the
/// crawl. A lost session is re-established once per page before the page is
/// reported as failed.
pub struct WebDriverFetcher {
    webdriver_url: String,
    client: Mutex<Option<Client>>,
}

impl WebDriverFetcher {
    /// Create a fetcher for the given WebDriver endpoint
    pub fn new(webdriver_url: &str) -> Self {
        Self {
            webdriver_url: webdriver_url.to_string(),
            client: Mutex::new(None),
        }
    }
}

#[async_trait]
impl PageFetcher for WebDriverFetcher {
    async fn render(&self, url: &str) -> Result<String, FetchError> {
        let mut client_opt = self.client.lock().await;

        // Lazily initialize the WebDriver client
        if client_opt.is_none() {
            ::log::debug!("Connecting to WebDriver for {}", url);
            *client_opt = Some(connect_to_webdriver(&self.webdriver_url).await?);
        }

        for attempt in 0..2 {
            let Some(client) = client_opt.as_ref() else {
                break;
            };

            match load_page(client, url).await {
                Ok(html) => {
                    ::log::debug!("Completed loading: {}", url);
                    return Ok(html);
                }
                Err(e) if attempt == 0 && is_session_lost(e.cause()) => {
                    ::log::warn!("Lost WebDriver session while loading {}", url);
                    *client_opt = attempt_reconnect(&self.webdriver_url).await;
                }
                Err(e) => return Err(e.into_fetch_error(url)),
            }
        }

        Err(FetchError::Connect(format!(
            "session for {} could not be re-established",
            url
        )))
    }

    async fn shutdown(&self) {
        let client = self.client.lock().await.take();
        if let Some(client) = client {
            if let Err(e) = client.close().await {
                ::log::warn!("Failed to close WebDriver client: {}", e);
            } else {
                ::log::debug!("Closed WebDriver session");
            }
        }
    }
}

/// Which step of loading a page failed
enum LoadError {
    Navigation(CmdError),
    Source(CmdError),
}

impl LoadError {
    fn cause(&self) -> &CmdError {
        match self {
            LoadError::Navigation(e) | LoadError::Source(e) => e,
        }
    }

    fn into_fetch_error(self, url: &str) -> FetchError {
        match self {
            LoadError::Navigation(e) => FetchError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            },
            LoadError::Source(e) => FetchError::Source {
                url: url.to_string(),
                message: e.to_string(),
            },
        }
    }
}

/// Navigates to the URL and returns the rendered page source
async fn load_page(client: &Client, url: &str) -> Result<String, LoadError> {
    let start = std::time::Instant::now();

    client.goto(url).await.map_err(LoadError::Navigation)?;
    let html = client.source().await.map_err(LoadError::Source)?;

    ::log::debug!(
        "Rendered {} ({} bytes) in {:.2} seconds",
        url,
        html.len(),
        start.elapsed().as_secs_f64()
    );
    Ok(html)
}

fn is_session_lost(error: &CmdError) -> bool {
    error.to_string().contains("Unable to find session")
}

/// Connects to the WebDriver instance, trying common local endpoints as fallbacks
async fn connect_to_webdriver(webdriver_url: &str) -> Result<Client, FetchError> {
    let first_error = match ClientBuilder::native().connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            return Ok(client);
        }
        Err(e) => {
            ::log::error!(
                "Failed to connect to WebDriver at {}: {}",
                webdriver_url,
                e
            );
            e.to_string()
        }
    };

    for url in FALLBACK_WEBDRIVER_URLS
        .iter()
        .filter(|url| **url != webdriver_url)
    {
        ::log::info!("Trying fallback WebDriver URL: {}", url);
        if let Ok(client) = ClientBuilder::native().connect(url).await {
            ::log::debug!("Connected to fallback WebDriver at {}", url);
            return Ok(client);
        }
    }

    ::log::error!(
        "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
    );
    Err(FetchError::Connect(format!("{}: {}", webdriver_url, first_error)))
}

/// Attempts to open a fresh WebDriver session
async fn attempt_reconnect(webdriver_url: &str) -> Option<Client> {
    ::log::warn!("Attempting to reconnect WebDriver session");
    match ClientBuilder::native().connect(webdriver_url).await {
        Ok(client) => {
            ::log::info!("Successfully reconnected to WebDriver");
            Some(client)
        }
        Err(e) => {
            ::log::error!("Failed to reconnect to WebDriver: {}", e);
            None
        }
    }
}
