// ABOUTME: Configuration options for the preview client and the fluent ClientBuilder.
// ABOUTME: The builder can attach the shared browser session and a custom scraper set.

use std::sync::Arc;
use std::time::Duration;

use crate::browser::BrowserSession;
use crate::client::Client;
use crate::extract::scrapers::ScraperSet;

/// Configuration options for the preview client.
#[derive(Debug, Clone)]
pub struct Options {
    /// Upper bound on one render: navigation through content retrieval.
    pub timeout: Duration,
    /// How long the readiness probe polls for a heading before giving up.
    pub readiness_timeout: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            readiness_timeout: Duration::from_secs(5),
        }
    }
}

/// Builder for constructing [`Client`] instances with custom configuration.
pub struct ClientBuilder {
    opts: Options,
    session: Option<Arc<BrowserSession>>,
    scrapers: Option<ScraperSet>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
            session: None,
            scrapers: None,
        }
    }

    /// Set the per-render deadline.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set how long the readiness probe polls for a heading.
    pub fn readiness_timeout(mut self, timeout: Duration) -> Self {
        self.opts.readiness_timeout = timeout;
        self
    }

    /// Attach the shared browser session. Required for [`Client::build`];
    /// [`Client::build_from_html`] works without one.
    pub fn session(mut self, session: Arc<BrowserSession>) -> Self {
        self.session = Some(session);
        self
    }

    /// Install a custom scraper set instead of the built-in variants.
    pub fn scrapers(mut self, scrapers: ScraperSet) -> Self {
        self.scrapers = Some(scrapers);
        self
    }

    /// Build the client with the configured options.
    pub fn build(self) -> Client {
        Client::new(
            self.opts,
            self.session,
            self.scrapers.unwrap_or_default(),
        )
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
