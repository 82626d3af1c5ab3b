//! Site-specific extraction.
//!
//! Each scraper module knows which DOM elements hold the article on its
//! site and how to turn them into an [`crate::models::ExtractedArticle`].
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | HuffPost | [`huffpost`] | Rendered DOM via headless Chromium | Body paragraphs, headline, dek, lead image alt |
//!
//! # Common Patterns
//!
//! Each scraper module exports:
//! - `Selectors`: the CSS selectors it reads, overridable from config
//! - `snapshot_script(selectors)`: script returning the raw DOM values
//! - `extract_article(raw)`: cleans raw values into the output record

pub mod huffpost;
