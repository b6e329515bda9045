// ABOUTME: Per-call page fetch: navigate an isolated page, wait for readiness, return rendered HTML.
// ABOUTME: The page is released on every exit path and the whole render is deadline-bounded.

use std::time::Duration;

use chromiumoxide::page::Page;
use tracing::{debug, warn};
use url::Url;

use crate::browser::BrowserSession;
use crate::error::PreviewError;
use crate::options::Options;

/// Probe used as the render-readiness signal. Client-rendered pages often
/// populate their headline well after the initial navigation settles.
const READINESS_SELECTOR: &str = "h1";

/// Navigates an isolated page scoped to `session` and returns its fully
/// rendered HTML serialization.
///
/// A single failed attempt is terminal: navigation, load-wait, and content
/// retrieval errors surface as fetch errors wrapping the cause, and the
/// deadline in `opts.timeout` bounds the whole render. The page is closed
/// whichever way the call exits.
pub(crate) async fn fetch_rendered_html(
    session: &BrowserSession,
    url: &Url,
    opts: &Options,
) -> Result<String, PreviewError> {
    let page = session.new_page(url.as_str()).await?;

    let result = match tokio::time::timeout(opts.timeout, render(&page, url, opts)).await {
        Ok(result) => result,
        Err(_) => Err(PreviewError::timeout(url.as_str(), "Fetch", None)),
    };

    if let Err(err) = page.close().await {
        warn!(url = %url, error = %err, "failed to close page");
    }

    result
}

async fn render(page: &Page, url: &Url, opts: &Options) -> Result<String, PreviewError> {
    page.goto(url.as_str())
        .await
        .map_err(|e| PreviewError::fetch(url.as_str(), "Navigate", Some(e.into())))?;

    // Readiness probe. Pages that never render a heading still get previewed;
    // the load signal below is the mandatory part.
    if !wait_for_element(page, READINESS_SELECTOR, opts.readiness_timeout).await {
        debug!(url = %url, selector = READINESS_SELECTOR, "readiness probe never matched");
    }

    page.wait_for_navigation()
        .await
        .map_err(|e| PreviewError::fetch(url.as_str(), "WaitForLoad", Some(e.into())))?;

    page.content()
        .await
        .map_err(|e| PreviewError::fetch(url.as_str(), "Content", Some(e.into())))
}

/// Polls for an element with exponential backoff: 100ms doubling to a 1s cap.
async fn wait_for_element(page: &Page, selector: &str, timeout: Duration) -> bool {
    let start = std::time::Instant::now();
    let mut interval = Duration::from_millis(100);
    let max_interval = Duration::from_secs(1);

    loop {
        if page.find_element(selector).await.is_ok() {
            return true;
        }

        if start.elapsed() >= timeout {
            return false;
        }

        tokio::time::sleep(interval).await;
        interval = (interval * 2).min(max_interval);
    }
}
