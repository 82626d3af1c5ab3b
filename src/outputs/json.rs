//! JSON output of extracted articles.
//!
//! Every article is written to its own file named with a fresh UUID v4:
//! ```text
//! out/
//! ├── 0b9f0c57-2a4e-4f53-9d0e-5d8c1d2b8a11.json
//! └── 6f1d7c3a-91e2-4b8f-a7f6-0e4c6a1d2f90.json
//! ```
//!
//! Nothing ties a filename back to its dataset entry. Writes are not
//! atomic: a crash mid-write can leave a truncated file behind.

use crate::error::ScrapeError;
use crate::models::ExtractedArticle;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Delete `dir` if it exists, then create it empty.
///
/// Removal is best effort and its error is only logged. Creation errors
/// are returned.
#[instrument(level = "info", skip_all, fields(dir = %dir.display()))]
pub async fn reset_output_dir(dir: &Path) -> Result<(), ScrapeError> {
    if let Err(e) = fs::remove_dir_all(dir).await {
        debug!(error = %e, "Output directory removal failed; continuing");
    }

    fs::create_dir_all(dir)
        .await
        .map_err(|source| ScrapeError::OutputDir {
            path: dir.to_path_buf(),
            source,
        })?;
    info!("Output directory ready");
    Ok(())
}

/// Write `article` as pretty-printed JSON to `<dir>/<uuid>.json`.
///
/// # Returns
///
/// The path of the written file.
#[instrument(level = "debug", skip_all, fields(dir = %dir.display()))]
pub async fn write_article(dir: &Path, article: &ExtractedArticle) -> Result<PathBuf, ScrapeError> {
    let json = serde_json::to_string_pretty(article)?;
    let path = dir.join(format!("{}.json", Uuid::new_v4()));

    fs::write(&path, json)
        .await
        .map_err(|source| ScrapeError::Write {
            path: path.clone(),
            source,
        })?;
    debug!(path = %path.display(), "Wrote article JSON");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> ExtractedArticle {
        ExtractedArticle {
            bodyHeaderText: Some("Header".to_string()),
            bodyHeaderTextSubtitle: None,
            bodyText: vec!["One".to_string(), "Two".to_string()],
            bodyImageAltText: Some("Alt".to_string()),
        }
    }

    #[tokio::test]
    async fn test_reset_creates_missing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out");

        reset_output_dir(&out).await.unwrap();
        assert!(out.is_dir());
    }

    #[tokio::test]
    async fn test_reset_removes_stale_files() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out");
        std::fs::create_dir_all(out.join("nested")).unwrap();
        std::fs::write(out.join("stale.json"), "{}").unwrap();
        std::fs::write(out.join("nested").join("old.json"), "{}").unwrap();

        reset_output_dir(&out).await.unwrap();
        assert_eq!(std::fs::read_dir(&out).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_reset_fails_when_parent_is_a_file() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let err = reset_output_dir(&blocker.join("out")).await.unwrap_err();
        assert!(matches!(err, ScrapeError::OutputDir { .. }));
    }

    #[tokio::test]
    async fn test_write_article_pretty_json() {
        let tmp = tempfile::tempdir().unwrap();

        let path = write_article(tmp.path(), &article()).await.unwrap();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("json"));
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap();
        assert!(Uuid::parse_str(stem).is_ok());

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\n  \"bodyHeaderText\": \"Header\""));
        assert!(!written.contains("bodyHeaderTextSubtitle"));
        let back: ExtractedArticle = serde_json::from_str(&written).unwrap();
        assert_eq!(back, article());
    }

    #[tokio::test]
    async fn test_write_article_unique_names() {
        let tmp = tempfile::tempdir().unwrap();

        let a = write_article(tmp.path(), &article()).await.unwrap();
        let b = write_article(tmp.path(), &article()).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 2);
    }
}
