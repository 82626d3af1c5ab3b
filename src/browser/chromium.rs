//! Headless Chromium backend built on `chromiumoxide`.
//!
//! The browser is launched with request interception switched on. Every tab
//! gets its own listener task that answers each paused request according to
//! the [`RequestFilter`], so blocked resources never hit the network.

use crate::browser::{BrowserHandle, Tab};
use crate::error::ScrapeError;
use crate::filter::{RequestFilter, ResourceKind, Verdict};
use crate::scrapers::huffpost::{RawArticle, Selectors, snapshot_script};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::fetch::{
    ContinueRequestParams, EventRequestPaused, FailRequestParams,
};
use chromiumoxide::cdp::browser_protocol::network::{ErrorReason, ResourceType};
use chromiumoxide::Page;
use futures::StreamExt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Launch options for [`ChromiumBrowser`].
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Chrome/Chromium executable; detected automatically when `None`.
    pub executable: Option<PathBuf>,
    /// Show the browser window.
    pub headful: bool,
    /// Upper bound for a single tab's navigation.
    pub navigation_timeout: Duration,
}

/// A launched Chromium process plus the task driving its CDP connection.
pub struct ChromiumBrowser {
    browser: Browser,
    handler: JoinHandle<()>,
    filter: Arc<RequestFilter>,
    navigation_timeout: Duration,
}

impl ChromiumBrowser {
    #[instrument(level = "info", skip_all, fields(headful = options.headful))]
    pub async fn launch(options: LaunchOptions, filter: RequestFilter) -> Result<Self, ScrapeError> {
        let mut builder = BrowserConfig::builder()
            .enable_request_intercept()
            .request_timeout(options.navigation_timeout)
            .args(vec![
                "--disable-dev-shm-usage",
                "--disable-gpu",
                "--no-first-run",
                "--no-default-browser-check",
            ]);
        if options.headful {
            builder = builder.with_head();
        }
        if let Some(path) = options.executable {
            builder = builder.chrome_executable(path);
        }
        let config = builder.build().map_err(ScrapeError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ScrapeError::Launch(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!(error = %e, "Browser handler event error");
                }
            }
        });

        info!("Browser launched");
        Ok(Self {
            browser,
            handler,
            filter: Arc::new(filter),
            navigation_timeout: options.navigation_timeout,
        })
    }

    /// Close the browser and wait for the process to exit.
    #[instrument(level = "info", skip_all)]
    pub async fn shutdown(mut self) -> Result<(), ScrapeError> {
        let closed = self.browser.close().await;
        if let Err(e) = self.browser.wait().await {
            warn!(error = %e, "Waiting for browser exit failed");
        }
        self.handler.abort();
        closed.map_err(|e| ScrapeError::Shutdown(e.to_string()))?;
        info!("Browser closed");
        Ok(())
    }

    async fn navigate(page: &Page, url: &str) -> Result<(), chromiumoxide::error::CdpError> {
        page.goto(url).await?;
        page.wait_for_navigation().await?;
        Ok(())
    }
}

impl BrowserHandle for ChromiumBrowser {
    type Tab = ChromiumTab;

    async fn open_tab(&self, url: &str) -> Result<ChromiumTab, ScrapeError> {
        debug!(%url, "Opening tab");
        let open_error = |e: chromiumoxide::error::CdpError| ScrapeError::OpenTab {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let page = self.browser.new_page("about:blank").await.map_err(open_error)?;
        let paused = match page.event_listener::<EventRequestPaused>().await {
            Ok(paused) => paused,
            Err(e) => {
                if let Err(close_err) = page.close().await {
                    debug!(error = %close_err, "Closing failed tab errored");
                }
                return Err(open_error(e));
            }
        };
        let interceptor = tokio::spawn(intercept_requests(
            page.clone(),
            paused,
            Arc::clone(&self.filter),
        ));

        let failure = match tokio::time::timeout(self.navigation_timeout, Self::navigate(&page, url)).await {
            Ok(Ok(())) => None,
            Ok(Err(e)) => Some(ScrapeError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Some(ScrapeError::NavigationTimeout {
                url: url.to_string(),
                secs: self.navigation_timeout.as_secs(),
            }),
        };

        if let Some(e) = failure {
            interceptor.abort();
            if let Err(close_err) = page.close().await {
                debug!(error = %close_err, "Closing failed tab errored");
            }
            return Err(e);
        }

        Ok(ChromiumTab {
            url: url.to_string(),
            page,
            interceptor,
        })
    }
}

/// Answer every paused request of one page until its event stream ends.
async fn intercept_requests(
    page: Page,
    mut paused: chromiumoxide::listeners::EventStream<EventRequestPaused>,
    filter: Arc<RequestFilter>,
) {
    while let Some(event) = paused.next().await {
        let kind = resource_kind(&event.resource_type);
        let verdict = filter.decide(kind, &event.request.url);
        let answered = match verdict {
            Verdict::Abort => page
                .execute(FailRequestParams::new(
                    event.request_id.clone(),
                    ErrorReason::BlockedByClient,
                ))
                .await
                .map(|_| ()),
            Verdict::Continue => page
                .execute(ContinueRequestParams::new(event.request_id.clone()))
                .await
                .map(|_| ()),
        };
        if let Err(e) = answered {
            debug!(url = %event.request.url, ?verdict, error = %e, "Answering paused request failed");
        }
    }
}

fn resource_kind(resource_type: &ResourceType) -> ResourceKind {
    match resource_type {
        ResourceType::Document => ResourceKind::Document,
        ResourceType::Stylesheet => ResourceKind::Stylesheet,
        ResourceType::Image => ResourceKind::Image,
        ResourceType::Media => ResourceKind::Media,
        ResourceType::Font => ResourceKind::Font,
        ResourceType::Script => ResourceKind::Script,
        ResourceType::Xhr => ResourceKind::Xhr,
        ResourceType::Fetch => ResourceKind::Fetch,
        _ => ResourceKind::Other,
    }
}

/// A Chromium page opened on an article.
pub struct ChromiumTab {
    url: String,
    page: Page,
    interceptor: JoinHandle<()>,
}

impl Tab for ChromiumTab {
    fn url(&self) -> &str {
        &self.url
    }

    async fn snapshot(&self, selectors: &Selectors) -> Result<RawArticle, ScrapeError> {
        let extraction_error = |reason: String| ScrapeError::Extraction {
            url: self.url.clone(),
            reason,
        };

        let script = snapshot_script(selectors).map_err(|e| extraction_error(e.to_string()))?;
        let result = self
            .page
            .evaluate(script)
            .await
            .map_err(|e| extraction_error(e.to_string()))?;
        result
            .into_value::<RawArticle>()
            .map_err(|e| extraction_error(e.to_string()))
    }

    async fn close(self) -> Result<(), ScrapeError> {
        self.interceptor.abort();
        self.page.close().await.map_err(|e| ScrapeError::Close {
            url: self.url,
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_kind_maps_blocked_types() {
        assert_eq!(resource_kind(&ResourceType::Image), ResourceKind::Image);
        assert_eq!(resource_kind(&ResourceType::Font), ResourceKind::Font);
        assert_eq!(resource_kind(&ResourceType::Media), ResourceKind::Media);
        assert_eq!(resource_kind(&ResourceType::Stylesheet), ResourceKind::Stylesheet);
    }

    #[test]
    fn test_resource_kind_maps_allowed_types() {
        assert_eq!(resource_kind(&ResourceType::Document), ResourceKind::Document);
        assert_eq!(resource_kind(&ResourceType::Script), ResourceKind::Script);
        assert_eq!(resource_kind(&ResourceType::Xhr), ResourceKind::Xhr);
        assert_eq!(resource_kind(&ResourceType::Fetch), ResourceKind::Fetch);
    }

    #[test]
    fn test_resource_kind_falls_back_to_other() {
        for resource_type in [
            ResourceType::Ping,
            ResourceType::Manifest,
            ResourceType::Other,
        ] {
            assert_eq!(resource_kind(&resource_type), ResourceKind::Other);
        }
    }

    #[test]
    fn test_default_filter_blocks_images_reported_by_chromium() {
        let filter = RequestFilter::default();
        let kind = resource_kind(&ResourceType::Image);
        assert_eq!(
            filter.decide(kind, "https://img.huffpost.com/a.jpg"),
            Verdict::Abort
        );
    }
}
