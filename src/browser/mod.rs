//! Browser abstraction used by the scrape pipeline.
//!
//! The pipeline only needs two things from a browser: open a tab on a URL
//! (with request filtering already in place) and read the article out of
//! it. [`BrowserHandle`] and [`Tab`] capture exactly that, so the pipeline
//! can run against headless Chromium in production and an in-memory fake
//! in tests.

pub mod chromium;

use crate::error::ScrapeError;
use crate::scrapers::huffpost::{RawArticle, Selectors};

/// A running browser that can open article tabs.
pub trait BrowserHandle {
    /// The tab type this browser hands out.
    type Tab: Tab;

    /// Open a new tab, install the request filter, navigate to `url` and
    /// wait for navigation to settle.
    ///
    /// On error no tab is left open.
    async fn open_tab(&self, url: &str) -> Result<Self::Tab, ScrapeError>;
}

/// A loaded article tab.
pub trait Tab {
    /// URL the tab was opened on.
    fn url(&self) -> &str;

    /// Read the raw article values out of the page.
    async fn snapshot(&self, selectors: &Selectors) -> Result<RawArticle, ScrapeError>;

    /// Close the tab.
    async fn close(self) -> Result<(), ScrapeError>;
}
