//! Loading the article dataset and screening out unusable links.
//!
//! The dataset is either a JSON array of entries or JSON Lines (one entry
//! per line), which is how the public HuffPost News Category dataset ships.

use crate::error::DatasetError;
use crate::models::DatasetEntry;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Links with this prefix are two URLs glued together in the source data.
pub const DEFAULT_BAD_LINK_PREFIX: &str = "https://www.huffingtonpost.comhttp";

/// Read and parse the dataset at `path`.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn load_dataset(path: &Path) -> Result<Vec<DatasetEntry>, DatasetError> {
    let raw = fs::read_to_string(path)
        .await
        .map_err(|source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let entries = parse_dataset(&raw)?;
    info!(count = entries.len(), "Loaded dataset");
    Ok(entries)
}

/// Parse dataset text, detecting array vs. JSON Lines by the first
/// non-whitespace character.
pub fn parse_dataset(raw: &str) -> Result<Vec<DatasetEntry>, DatasetError> {
    if raw.trim_start().starts_with('[') {
        return serde_json::from_str(raw).map_err(DatasetError::Parse);
    }

    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line)
                .map_err(|source| DatasetError::ParseLine { line: i + 1, source })
        })
        .collect()
}

/// Split a batch into entries worth opening and the number dropped
/// because their link starts with `bad_prefix`.
pub fn partition_bad_links(
    batch: Vec<DatasetEntry>,
    bad_prefix: &str,
) -> (Vec<DatasetEntry>, usize) {
    let total = batch.len();
    let kept: Vec<DatasetEntry> = batch
        .into_iter()
        .filter(|entry| !entry.link.starts_with(bad_prefix))
        .collect();
    let lost = total - kept.len();
    (kept, lost)
}
