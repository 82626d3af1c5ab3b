//! Error types for the scraper.
//!
//! Each stage has its own enum so callers can tell a fatal setup problem
//! (bad config, unreadable dataset, browser that will not start) apart from
//! a failure that only affects a single article.

use std::path::PathBuf;

/// Errors raised while loading or validating [`crate::config::ScraperConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config file is not valid YAML for the expected shape.
    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// A value is present but unusable.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors raised while loading the article dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read dataset {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A JSON array dataset failed to parse.
    #[error("failed to parse dataset: {0}")]
    Parse(#[source] serde_json::Error),

    /// A JSON Lines dataset failed to parse on a given line (1-based).
    #[error("failed to parse dataset line {line}: {source}")]
    ParseLine {
        line: usize,
        source: serde_json::Error,
    },
}

/// Errors raised while driving the browser or writing output.
///
/// Everything except [`ScrapeError::Launch`] and [`ScrapeError::OutputDir`]
/// is scoped to one article and ends up in the run report instead of
/// stopping the run.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error("failed to open tab for {url}: {reason}")]
    OpenTab { url: String, reason: String },

    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("navigation to {url} timed out after {secs}s")]
    NavigationTimeout { url: String, secs: u64 },

    #[error("failed to read page {url}: {reason}")]
    Extraction { url: String, reason: String },

    #[error("failed to close tab for {url}: {reason}")]
    Close { url: String, reason: String },

    #[error("failed to close browser: {0}")]
    Shutdown(String),

    #[error("failed to prepare output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize article: {0}")]
    Serialize(#[from] serde_json::Error),
}
