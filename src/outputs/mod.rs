//! Output generation.
//!
//! # Submodules
//!
//! - [`json`]: Resets the output directory and writes one JSON file per article
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── <uuid>.json
//! ├── <uuid>.json
//! └── ...
//! ```

pub mod json;
