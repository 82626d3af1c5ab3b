//! Command-line interface definitions.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Paths can also be provided via environment variables. Everything that
//! tunes the scrape itself lives in the optional YAML config file.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the scraper.
///
/// # Examples
///
/// ```sh
/// # Defaults: ./dataset.json in, ./out out, 10 tabs at a time
/// huffpost_scraper
///
/// # JSON Lines dataset from Kaggle, custom output directory
/// huffpost_scraper -d News_Category_Dataset_v3.json -o ./articles
///
/// # Tuned run with a config file and a specific Chrome binary
/// huffpost_scraper -c scraper.yaml --chrome /usr/bin/chromium -b 5
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Dataset of article links (JSON array or JSON Lines)
    #[arg(short, long, env = "SCRAPER_DATASET", default_value = "dataset.json")]
    pub dataset: PathBuf,

    /// Output directory, wiped at the start of every run
    #[arg(short, long, env = "SCRAPER_OUTPUT_DIR", default_value = "./out")]
    pub output_dir: PathBuf,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of tabs opened at once (overrides the config file)
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Chrome/Chromium executable (auto-detected when omitted)
    #[arg(long, env = "CHROME_PATH")]
    pub chrome: Option<PathBuf>,

    /// Show the browser window instead of running headless
    #[arg(long)]
    pub headful: bool,
}
