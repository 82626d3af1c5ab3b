//! The scrape run: batches in, JSON files out.
//!
//! 1. **Reset**: wipe and recreate the output directory
//! 2. **Batch**: split the dataset into groups of `batch_size`
//! 3. **Per batch, in order**:
//!    - drop entries with a bad link and log how many were lost
//!    - open every remaining tab concurrently and wait for all of them
//!    - for each opened tab in order: extract, close, write the file
//! 4. **Report**: log a summary and return a [`RunReport`]
//!
//! A failure to open, read or write one article is recorded in the report
//! and the run moves on. Only a failure to prepare the output directory
//! stops the run.

use crate::batch::into_batches;
use crate::browser::{BrowserHandle, Tab};
use crate::config::ScraperConfig;
use crate::dataset::partition_bad_links;
use crate::error::ScrapeError;
use crate::models::DatasetEntry;
use crate::outputs::json::{reset_output_dir, write_article};
use crate::scrapers::huffpost::{Selectors, extract_article};
use crate::utils::truncate_for_log;
use futures::future::join_all;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// One article that did not make it to disk.
#[derive(Debug)]
pub struct TabFailure {
    pub url: String,
    pub error: ScrapeError,
}

/// Result of processing a single dataset entry.
pub type TabOutcome = Result<PathBuf, TabFailure>;

/// Summary of a finished run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Entries in the dataset.
    pub dataset: usize,
    /// Number of batches.
    pub batches: usize,
    /// Size of the first batch before bad links were dropped (0 if none).
    pub first_batch: usize,
    /// Entries skipped for a bad link.
    pub lost: usize,
    pub written: Vec<PathBuf>,
    pub failures: Vec<TabFailure>,
}

/// Scrape every entry of `dataset` through `browser` into `output_dir`.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display()))]
pub async fn run<B: BrowserHandle>(
    browser: &B,
    dataset: Vec<DatasetEntry>,
    config: &ScraperConfig,
    output_dir: &Path,
) -> Result<RunReport, ScrapeError> {
    reset_output_dir(output_dir).await?;

    let mut report = RunReport {
        dataset: dataset.len(),
        ..RunReport::default()
    };

    let batches = into_batches(dataset, config.batch_size);
    report.batches = batches.len();
    report.first_batch = batches.first().map_or(0, Vec::len);

    for (index, batch) in batches.into_iter().enumerate() {
        let (articles, lost) = partition_bad_links(batch, &config.bad_link_prefix);
        if lost > 0 {
            info!(batch = index, lost, "Lost {lost} articles because of bad link");
        }
        report.lost += lost;

        for outcome in scrape_batch(browser, &articles, &config.selectors, output_dir).await {
            match outcome {
                Ok(path) => report.written.push(path),
                Err(failure) => {
                    warn!(batch = index, url = %failure.url, error = %failure.error, "Skipping article");
                    report.failures.push(failure);
                }
            }
        }
    }

    info!(
        dataset = report.dataset,
        batches = report.batches,
        batch = report.first_batch,
        written = report.written.len(),
        lost = report.lost,
        failed = report.failures.len(),
        "Scrape complete"
    );
    Ok(report)
}

/// Open every tab of a batch at once, then extract and write them in order.
async fn scrape_batch<B: BrowserHandle>(
    browser: &B,
    articles: &[DatasetEntry],
    selectors: &Selectors,
    output_dir: &Path,
) -> Vec<TabOutcome> {
    for article in articles {
        debug!(
            url = %article.link,
            headline = %article.headline,
            category = %article.category,
            date = %article.date,
            authors = %article.authors,
            description = %truncate_for_log(&article.short_description, 80),
            "Queued article"
        );
    }
    info!(tabs = articles.len(), "Load article tabs");
    let opened = join_all(articles.iter().map(|article| browser.open_tab(&article.link))).await;
    info!("Done");

    let mut outcomes = Vec::with_capacity(opened.len());
    for (article, tab) in articles.iter().zip(opened) {
        let outcome = match tab {
            Ok(tab) => scrape_tab(tab, selectors, output_dir).await,
            Err(error) => Err(TabFailure {
                url: article.link.clone(),
                error,
            }),
        };
        outcomes.push(outcome);
    }
    outcomes
}

/// Extract one loaded tab, close it, and write the result.
///
/// The tab is closed whether or not extraction succeeded.
async fn scrape_tab<T: Tab>(tab: T, selectors: &Selectors, output_dir: &Path) -> TabOutcome {
    let url = tab.url().to_string();
    let snapshot = tab.snapshot(selectors).await;

    if let Err(e) = tab.close().await {
        warn!(%url, error = %e, "Closing tab failed");
    }

    let fail = |error| TabFailure {
        url: url.clone(),
        error,
    };
    let article = extract_article(snapshot.map_err(fail)?);
    debug!(
        %url,
        header = %truncate_for_log(article.bodyHeaderText.as_deref().unwrap_or(""), 80),
        paragraphs = article.bodyText.len(),
        "Extracted article"
    );

    write_article(output_dir, &article).await.map_err(fail)
}
