//! Splitting the dataset into fixed-size batches.
//!
//! A batch is the unit of concurrency: every tab of a batch is opened at
//! once, and the next batch starts only after the previous one has been
//! fully extracted and written.

use crate::models::{Batch, DatasetEntry};
use itertools::Itertools;

/// Number of tabs opened at once unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Split `entries` into consecutive batches of `size` entries.
///
/// Order is preserved and every entry lands in exactly one batch. Only the
/// last batch may be shorter. When `entries.len()` is a multiple of `size`
/// the last batch is full and no empty trailing batch is produced. An empty
/// dataset yields no batches.
///
/// `size` must be non-zero; configuration validation guarantees that.
pub fn into_batches(entries: Vec<DatasetEntry>, size: usize) -> Vec<Batch> {
    debug_assert!(size > 0, "batch size must be non-zero");
    entries
        .into_iter()
        .chunks(size.max(1))
        .into_iter()
        .map(|chunk| chunk.collect::<Batch>())
        .collect()
}
