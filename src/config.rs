//! Scraper configuration.
//!
//! Every key has a default, and a YAML file can override any subset of them:
//!
//! ```yaml
//! batch_size: 5
//! navigation_timeout_secs: 60
//! bad_link_prefix: "https://www.huffingtonpost.comhttp"
//! blocked_resource_types: [image, font, media, stylesheet]
//! block_list:
//!   - googlesyndication.com
//!   - "*.doubleclick.net"
//! selectors:
//!   body_text: ".cli-text"
//! ```

use crate::batch::DEFAULT_BATCH_SIZE;
use crate::dataset::DEFAULT_BAD_LINK_PREFIX;
use crate::error::ConfigError;
use crate::filter::{BlockPattern, DEFAULT_BLOCK_LIST, DEFAULT_BLOCKED_KINDS, RequestFilter, ResourceKind};
use crate::scrapers::huffpost::Selectors;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument};

/// Five minutes per navigation.
pub const DEFAULT_NAVIGATION_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScraperConfig {
    /// Tabs opened at once.
    pub batch_size: usize,
    pub navigation_timeout_secs: u64,
    /// Dataset links starting with this are skipped.
    pub bad_link_prefix: String,
    pub blocked_resource_types: Vec<ResourceKind>,
    pub block_list: Vec<BlockPattern>,
    pub selectors: Selectors,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            navigation_timeout_secs: DEFAULT_NAVIGATION_TIMEOUT_SECS,
            bad_link_prefix: DEFAULT_BAD_LINK_PREFIX.to_string(),
            blocked_resource_types: DEFAULT_BLOCKED_KINDS.to_vec(),
            block_list: DEFAULT_BLOCK_LIST.iter().map(|p| BlockPattern::parse(p)).collect(),
            selectors: Selectors::default(),
        }
    }
}

impl ScraperConfig {
    /// Load a config file, falling back to defaults for missing keys.
    ///
    /// The result is not validated here; CLI overrides are applied first
    /// by [`ScraperConfig::with_overrides`].
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ScraperConfig =
            serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        info!("Loaded configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::Invalid("batch_size must be at least 1".to_string()));
        }
        if self.navigation_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "navigation_timeout_secs must be at least 1".to_string(),
            ));
        }
        let selectors = [
            ("body_text", &self.selectors.body_text),
            ("body_image", &self.selectors.body_image),
            ("header", &self.selectors.header),
            ("subtitle", &self.selectors.subtitle),
        ];
        if let Some((name, _)) = selectors.iter().find(|(_, s)| s.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!("selectors.{name} must not be empty")));
        }
        Ok(())
    }

    /// Apply command-line overrides, then validate the final config.
    pub fn with_overrides(mut self, batch_size: Option<usize>) -> Result<Self, ConfigError> {
        if let Some(batch_size) = batch_size {
            self.batch_size = batch_size;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    pub fn request_filter(&self) -> RequestFilter {
        RequestFilter::new(self.blocked_resource_types.clone(), self.block_list.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Verdict;

    #[test]
    fn test_defaults_are_valid() {
        let config = ScraperConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.batch_size, 10);
        assert_eq!(config.navigation_timeout(), Duration::from_secs(300));
        assert_eq!(config.request_filter(), RequestFilter::default());
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let config: ScraperConfig =
            serde_yaml::from_str(include_str!("../scraper.example.yaml")).unwrap();
        assert_eq!(config, ScraperConfig::default());
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let config: ScraperConfig = serde_yaml::from_str(
            "batch_size: 3\nselectors:\n  header: \"h1.title\"\n",
        )
        .unwrap();
        assert_eq!(config.batch_size, 3);
        assert_eq!(config.selectors.header, "h1.title");
        assert_eq!(config.selectors.body_text, ".cli-text");
        assert_eq!(config.bad_link_prefix, DEFAULT_BAD_LINK_PREFIX);
    }

    #[test]
    fn test_block_list_from_yaml() {
        let config: ScraperConfig = serde_yaml::from_str(
            "blocked_resource_types: []\nblock_list: [\"*.example.net\", tracker]\n",
        )
        .unwrap();
        let filter = config.request_filter();
        assert_eq!(
            filter.decide(ResourceKind::Image, "https://cdn.example.net/a.png"),
            Verdict::Abort
        );
        assert_eq!(
            filter.decide(ResourceKind::Image, "https://www.huffpost.com/a.png"),
            Verdict::Continue
        );
        assert_eq!(
            filter.decide(ResourceKind::Script, "https://x.com/tracker.js"),
            Verdict::Abort
        );
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let config = ScraperConfig {
            batch_size: 0,
            ..ScraperConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_empty_selector_rejected() {
        let mut config = ScraperConfig::default();
        config.selectors.subtitle = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("selectors.subtitle"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(serde_yaml::from_str::<ScraperConfig>("batch_sise: 3\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "navigation_timeout_secs: 30\n").unwrap();

        let config = ScraperConfig::load(&path).unwrap();
        assert_eq!(config.navigation_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_cli_batch_size_overrides_invalid_file_value() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "batch_size: 0\n").unwrap();

        let config = ScraperConfig::load(&path)
            .unwrap()
            .with_overrides(Some(5))
            .unwrap();
        assert_eq!(config.batch_size, 5);
    }

    #[test]
    fn test_invalid_value_rejected_after_overrides() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "batch_size: 0\n").unwrap();

        let loaded = ScraperConfig::load(&path).unwrap();
        assert!(matches!(
            loaded.with_overrides(None),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ScraperConfig::default().with_overrides(Some(0)),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            ScraperConfig::load(&tmp.path().join("missing.yaml")),
            Err(ConfigError::Read { .. })
        ));
    }
}
