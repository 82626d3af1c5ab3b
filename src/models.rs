//! Data models for dataset entries and extracted articles.
//!
//! This module defines the core data structures used throughout the application:
//! - [`DatasetEntry`]: One row of the article metadata dataset
//! - [`Batch`]: A group of entries whose tabs are opened together
//! - [`ExtractedArticle`]: The body text pulled out of a rendered article page
//!
//! `ExtractedArticle` uses camelCase field names so the JSON written to disk
//! keeps the key names downstream consumers expect, hence the
//! `#[allow(non_snake_case)]` attribute.

use serde::{Deserialize, Serialize};

/// One row of the article dataset.
///
/// Only `link` drives scraping. The remaining metadata is carried along
/// for logging. Some rows of the public HuffPost dataset leave metadata
/// fields out, so everything except `link` defaults to an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatasetEntry {
    /// Absolute URL of the article.
    pub link: String,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub authors: String,
    #[serde(default)]
    pub date: String,
}

/// An ordered group of at most `batch_size` dataset entries.
pub type Batch = Vec<DatasetEntry>;

/// Article body extracted from a rendered page.
///
/// Keys serialize in declaration order. Absent optional fields are left
/// out of the JSON entirely; `bodyText` is always present, possibly empty.
#[allow(non_snake_case)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExtractedArticle {
    /// Text of the `h1.headline` element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bodyHeaderText: Option<String>,
    /// Text of the `div.dek` subtitle element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bodyHeaderTextSubtitle: Option<String>,
    /// Non-empty text of every body paragraph, in document order.
    #[serde(default)]
    pub bodyText: Vec<String>,
    /// Alt text of the lead image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bodyImageAltText: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_entry_defaults_missing_metadata() {
        let json = r#"{"link": "https://www.huffpost.com/entry/a", "headline": "A"}"#;
        let entry: DatasetEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.link, "https://www.huffpost.com/entry/a");
        assert_eq!(entry.headline, "A");
        assert_eq!(entry.authors, "");
        assert_eq!(entry.date, "");
    }

    #[test]
    fn test_dataset_entry_requires_link() {
        let json = r#"{"headline": "No link"}"#;
        assert!(serde_json::from_str::<DatasetEntry>(json).is_err());
    }

    #[test]
    fn test_extracted_article_key_order() {
        let article = ExtractedArticle {
            bodyHeaderText: Some("Header".to_string()),
            bodyHeaderTextSubtitle: Some("Dek".to_string()),
            bodyText: vec!["One".to_string()],
            bodyImageAltText: Some("Alt".to_string()),
        };

        let json = serde_json::to_string(&article).unwrap();
        let header = json.find("bodyHeaderText\"").unwrap();
        let subtitle = json.find("bodyHeaderTextSubtitle").unwrap();
        let body = json.find("bodyText").unwrap();
        let alt = json.find("bodyImageAltText").unwrap();
        assert!(header < subtitle && subtitle < body && body < alt);
    }

    #[test]
    fn test_extracted_article_omits_absent_fields() {
        let article = ExtractedArticle::default();

        let json = serde_json::to_string(&article).unwrap();
        assert_eq!(json, r#"{"bodyText":[]}"#);

        let back: ExtractedArticle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, article);
    }
}
