//! HuffPost article extraction.
//!
//! A rendered article page is read in a single script evaluation that
//! returns the raw DOM values ([`RawArticle`]). Normalizing them into an
//! [`ExtractedArticle`] happens on the Rust side in [`extract_article`],
//! so the rules for what counts as absent live in one testable place.
//!
//! # Default selectors
//!
//! | Field | Selector | Read |
//! |-------|----------|------|
//! | `bodyText` | `.cli-text` | `textContent` of every match |
//! | `bodyImageAltText` | `.cli-image img` | `alt` of the first match |
//! | `bodyHeaderText` | `h1.headline` | `textContent` of the first match |
//! | `bodyHeaderTextSubtitle` | `div.dek` | `textContent` of the first match |

use crate::models::ExtractedArticle;
use serde::Deserialize;

/// CSS selectors used to pull the article out of the DOM.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub body_text: String,
    pub body_image: String,
    pub header: String,
    pub subtitle: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            body_text: ".cli-text".to_string(),
            body_image: ".cli-image img".to_string(),
            header: "h1.headline".to_string(),
            subtitle: "div.dek".to_string(),
        }
    }
}

/// DOM values as the page reports them, before any cleanup.
///
/// `None` means the element (or attribute) was missing or its text
/// content was `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    #[serde(default)]
    pub body_text: Vec<Option<String>>,
    pub body_image_alt: Option<String>,
    pub header: Option<String>,
    pub subtitle: Option<String>,
}

/// Build the script that reads a [`RawArticle`] from the current page.
///
/// Selectors are embedded as JSON string literals so quotes in them
/// cannot break out of the script.
pub fn snapshot_script(selectors: &Selectors) -> Result<String, serde_json::Error> {
    let body_text = serde_json::to_string(&selectors.body_text)?;
    let body_image = serde_json::to_string(&selectors.body_image)?;
    let header = serde_json::to_string(&selectors.header)?;
    let subtitle = serde_json::to_string(&selectors.subtitle)?;

    Ok(format!(
        r#"(() => {{
    const text = (el) => (el === null ? null : el.textContent);
    const image = document.querySelector({body_image});
    return {{
        bodyText: Array.from(document.querySelectorAll({body_text}), (el) => el.textContent),
        bodyImageAlt: image === null ? null : image.getAttribute("alt"),
        header: text(document.querySelector({header})),
        subtitle: text(document.querySelector({subtitle})),
    }};
}})()"#
    ))
}

/// Turn raw DOM values into the record written to disk.
///
/// Null and empty body paragraphs are dropped, order is kept. Empty
/// header, subtitle and alt text become absent. Text is not trimmed.
pub fn extract_article(raw: RawArticle) -> ExtractedArticle {
    ExtractedArticle {
        bodyHeaderText: non_empty(raw.header),
        bodyHeaderTextSubtitle: non_empty(raw.subtitle),
        bodyText: raw.body_text.into_iter().filter_map(non_empty).collect(),
        bodyImageAltText: non_empty(raw.body_image_alt),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
