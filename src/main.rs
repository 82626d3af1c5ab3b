//! # HuffPost Scraper
//!
//! Scrapes article bodies from HuffPost for every link in a dataset of
//! article metadata, rendering each page in headless Chromium and writing
//! one JSON file per article.
//!
//! ## Usage
//!
//! ```sh
//! huffpost_scraper -d dataset.json -o ./out
//! ```
//!
//! ## Architecture
//!
//! 1. **Loading**: Read the dataset and optional YAML config
//! 2. **Batching**: Split links into groups (10 by default) so the site is not hammered
//! 3. **Rendering**: Open each batch's tabs concurrently, blocking images,
//!    fonts, media, stylesheets and ad hosts
//! 4. **Output**: Extract headline, dek, body paragraphs and lead image alt
//!    text, and write them to `<output_dir>/<uuid>.json`
//!
//! One failing article is logged and skipped; it never aborts the run.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod batch;
mod browser;
mod cli;
mod config;
mod dataset;
mod error;
mod filter;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use browser::chromium::{ChromiumBrowser, LaunchOptions};
use cli::Cli;
use config::ScraperConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("huffpost_scraper starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // ---- Config ----
    let config = match &args.config {
        Some(path) => ScraperConfig::load(path)?,
        None => ScraperConfig::default(),
    }
    .with_overrides(args.batch_size)?;
    info!(
        batch_size = config.batch_size,
        navigation_timeout_secs = config.navigation_timeout_secs,
        "Configuration ready"
    );

    // ---- Dataset ----
    let dataset = dataset::load_dataset(&args.dataset).await?;

    // ---- Browser ----
    let options = LaunchOptions {
        executable: args.chrome.clone(),
        headful: args.headful,
        navigation_timeout: config.navigation_timeout(),
    };
    let browser = ChromiumBrowser::launch(options, config.request_filter()).await?;

    // The browser is closed whether or not the run succeeded.
    let outcome = pipeline::run(&browser, dataset, &config, &args.output_dir).await;
    if let Err(e) = browser.shutdown().await {
        warn!(error = %e, "Browser shutdown failed");
    }

    let report = match outcome {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "Scrape aborted");
            return Err(e.into());
        }
    };

    for failure in &report.failures {
        warn!(url = %failure.url, error = %failure.error, "Article failed");
    }

    let elapsed = start_time.elapsed();
    info!(
        dataset = report.dataset,
        batches = report.batches,
        batch = report.first_batch,
        written = report.written.len(),
        lost = report.lost,
        failed = report.failures.len(),
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
