use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "people-crawler")]
#[command(about = "Crawls a site and extracts people with their contact, family and party details")]
#[command(version)]
pub struct Args {
    /// Seed URL to crawl (absolute)
    pub url: String,

    /// Maximum crawl depth, the seed page being depth 1
    #[arg(short = 'd', long)]
    pub max_depth: Option<usize>,

    /// Total timeout in seconds (maximum runtime)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// WebDriver endpoint (overrides WEBDRIVER_URL and the config file)
    #[arg(short, long)]
    pub webdriver_url: Option<String>,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}
