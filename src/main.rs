use clap::Parser;
use people_crawler::{PersonRecord, Scrape};
use std::process::ExitCode;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    ::log::info!("Starting crawler for URL: {}", args.url);

    let scrape = match build_scrape(&args) {
        Ok(scrape) => scrape,
        Err(e) => return report_failure(&e.to_string()),
    };

    ::log::info!(
        "Web crawling requires a WebDriver server, using {}",
        scrape.effective_webdriver_url()
    );

    let start_time = std::time::Instant::now();
    match scrape.run().await {
        Ok(records) => {
            ::log::info!(
                "Crawling complete - {} records in {:.2} seconds",
                records.len(),
                start_time.elapsed().as_secs_f64()
            );
            print_records(&records, args.pretty)
        }
        Err(e) => report_failure(&e.to_string()),
    }
}

fn build_scrape(args: &Args) -> Result<Scrape, Box<dyn std::error::Error>> {
    let mut scrape = Scrape::new(&args.url);

    if let Some(path) = &args.config {
        scrape = scrape.with_config_file(path)?;
    }
    if let Some(max_depth) = args.max_depth {
        scrape = scrape.with_max_depth(max_depth);
    }
    if let Some(timeout) = args.timeout {
        scrape = scrape.with_total_timeout(timeout);
    }
    if let Some(webdriver_url) = &args.webdriver_url {
        scrape = scrape.with_webdriver_url(webdriver_url);
    }

    Ok(scrape)
}

fn print_records(records: &[PersonRecord], pretty: bool) -> ExitCode {
    let output = if pretty {
        serde_json::to_string_pretty(records)
    } else {
        serde_json::to_string(records)
    };

    match output {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => report_failure(&e.to_string()),
    }
}

fn report_failure(message: &str) -> ExitCode {
    ::log::error!("{}", message);
    eprintln!("{}", serde_json::json!({ "detail": message }));
    ExitCode::FAILURE
}
