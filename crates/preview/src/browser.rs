// ABOUTME: BrowserSession owning the shared headless Chromium process and its event driver.
// ABOUTME: Handles executable discovery, managed download fallback, launch, and idempotent teardown.

//! The shared browser session.
//!
//! Exactly one session exists per process: the surrounding program opens it at
//! startup, hands it out behind an `Arc`, and closes it once at shutdown.
//! Every fetch borrows the session to open its own isolated page; the session
//! itself holds no per-call state.
//!
//! Teardown is a barrier: once [`BrowserSession::close`] has taken the browser
//! out of the slot, later [`BrowserSession::new_page`] calls fail with
//! [`ErrorCode::Closed`](crate::ErrorCode::Closed) instead of touching a dead
//! process.

use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

use anyhow::anyhow;
use chromiumoxide::browser::{Browser, BrowserConfigBuilder, HeadlessMode};
use chromiumoxide::fetcher::{BrowserFetcher, BrowserFetcherOptions};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::PreviewError;

/// Configuration for launching the shared browser process.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Run without a visible window. On by default; turning it off helps when
    /// debugging selector chains against a live page.
    pub headless: bool,
    /// Explicit Chrome/Chromium executable. When unset, the session searches
    /// `CHROMIUM_PATH`, well-known install locations, and `which`, then falls
    /// back to downloading a managed build.
    pub executable: Option<PathBuf>,
    pub window_size: (u32, u32),
    /// Deadline applied by the CDP transport to individual browser commands.
    pub request_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            headless: true,
            executable: None,
            window_size: (1920, 1080),
            request_timeout: Duration::from_secs(30),
        }
    }
}

struct SessionInner {
    browser: Browser,
    handler: JoinHandle<()>,
    user_data_dir: PathBuf,
}

/// The process-lifetime handle to the headless browser.
pub struct BrowserSession {
    inner: Mutex<Option<SessionInner>>,
}

impl BrowserSession {
    /// Opens a session with default configuration.
    pub async fn open() -> Result<Self, PreviewError> {
        Self::open_with(SessionConfig::default()).await
    }

    /// Locates or downloads a browser, launches it, and starts the event
    /// driver. Failure here is fatal for the surrounding program: nothing in
    /// the engine works without the browser.
    pub async fn open_with(config: SessionConfig) -> Result<Self, PreviewError> {
        let executable = match config.executable.clone() {
            Some(path) => path,
            None => match find_browser_executable() {
                Some(path) => path,
                None => download_managed_browser()
                    .await
                    .map_err(|e| PreviewError::browser("", "Open", Some(e)))?,
            },
        };

        let user_data_dir =
            std::env::temp_dir().join(format!("glimpse_browser_{}", std::process::id()));
        std::fs::create_dir_all(&user_data_dir)
            .map_err(|e| PreviewError::browser("", "Open", Some(e.into())))?;

        let mut builder = BrowserConfigBuilder::default()
            .request_timeout(config.request_timeout)
            .window_size(config.window_size.0, config.window_size.1)
            .user_data_dir(user_data_dir.clone())
            .chrome_executable(executable)
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-extensions")
            .arg("--disable-background-networking")
            .arg("--hide-scrollbars")
            .arg("--mute-audio");

        if config.headless {
            builder = builder.headless_mode(HeadlessMode::default());
        } else {
            builder = builder.with_head();
        }

        // Setuid sandboxing is unavailable inside containers.
        if in_container() {
            info!("containerized environment detected, disabling sandbox");
            builder = builder.arg("--no-sandbox").arg("--disable-setuid-sandbox");
        }

        let browser_config = builder
            .build()
            .map_err(|e| PreviewError::browser("", "Open", Some(anyhow!(e))))?;

        let (browser, mut events) = Browser::launch(browser_config)
            .await
            .map_err(|e| PreviewError::browser("", "Open", Some(e.into())))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if let Err(err) = event {
                    // CDP noise (unknown events, benign deserialization
                    // mismatches) lands here; nothing actionable.
                    debug!(error = %err, "browser event handler error");
                }
            }
            debug!("browser event handler finished");
        });

        info!(profile = %user_data_dir.display(), "browser launched");

        Ok(Self {
            inner: Mutex::new(Some(SessionInner {
                browser,
                handler,
                user_data_dir,
            })),
        })
    }

    /// Opens a fresh blank page for one fetch. Fails with `Closed` once
    /// teardown has begun; `url` is only carried for error context.
    pub(crate) async fn new_page(&self, url: &str) -> Result<Page, PreviewError> {
        let guard = self.inner.lock().await;
        let inner = guard
            .as_ref()
            .ok_or_else(|| PreviewError::closed(url, "NewPage"))?;

        inner
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| PreviewError::browser(url, "NewPage", Some(e.into())))
    }

    /// Stops the browser process and the event driver, then removes the
    /// temporary profile. Safe to call more than once; shutdown must proceed,
    /// so errors are logged rather than escalated.
    pub async fn close(&self) {
        let Some(mut inner) = self.inner.lock().await.take() else {
            return;
        };

        if let Err(err) = inner.browser.close().await {
            warn!(error = %err, "failed to close browser");
        }
        if let Err(err) = inner.browser.wait().await {
            warn!(error = %err, "failed to wait for browser exit");
        }
        inner.handler.abort();

        if let Err(err) = std::fs::remove_dir_all(&inner.user_data_dir) {
            warn!(
                path = %inner.user_data_dir.display(),
                error = %err,
                "failed to remove browser profile directory"
            );
        }

        info!("browser closed");
    }
}

/// Searches the environment override, well-known install paths, and `which`.
fn find_browser_executable() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("CHROMIUM_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            info!(path = %path.display(), "using browser from CHROMIUM_PATH");
            return Some(path);
        }
        warn!(path = %path.display(), "CHROMIUM_PATH points to a non-existent file");
    }

    const CANDIDATES: &[&str] = &[
        "/usr/bin/google-chrome",
        "/usr/bin/google-chrome-stable",
        "/usr/bin/chromium",
        "/usr/bin/chromium-browser",
        "/snap/bin/chromium",
        "/opt/google/chrome/chrome",
        "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
        "/Applications/Chromium.app/Contents/MacOS/Chromium",
        "/opt/homebrew/bin/chromium",
    ];

    for candidate in CANDIDATES {
        let path = PathBuf::from(candidate);
        if path.exists() {
            info!(path = %path.display(), "found browser executable");
            return Some(path);
        }
    }

    for cmd in ["chromium", "chromium-browser", "google-chrome", "chrome"] {
        if let Ok(output) = Command::new("which").arg(cmd).output() {
            if output.status.success() {
                let found = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !found.is_empty() {
                    info!(path = %found, "found browser via which");
                    return Some(PathBuf::from(found));
                }
            }
        }
    }

    None
}

/// Downloads a managed Chromium build into the user cache directory.
async fn download_managed_browser() -> Result<PathBuf, anyhow::Error> {
    info!("no local browser found, downloading a managed Chromium build");

    let cache_dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("glimpse/chromium");
    std::fs::create_dir_all(&cache_dir)?;

    let fetcher = BrowserFetcher::new(
        BrowserFetcherOptions::builder()
            .with_path(&cache_dir)
            .build()?,
    );
    let revision = fetcher.fetch().await?;

    info!(path = %revision.folder_path.display(), "downloaded Chromium");
    Ok(revision.executable_path)
}

fn in_container() -> bool {
    std::path::Path::new("/.dockerenv").exists()
        || std::env::var("container").is_ok()
        || std::env::var("KUBERNETES_SERVICE_HOST").is_ok()
}
