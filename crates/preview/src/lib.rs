// ABOUTME: Main library entry point for the Glimpse link-preview engine.
// ABOUTME: Re-exports the public API: BrowserSession, Client, Preview, PreviewError, scraper types.

//! Glimpse - link previews for arbitrary URLs.
//!
//! Renders a page in a shared headless browser (so JavaScript-generated
//! content is captured) and extracts a three-field preview (title,
//! description, image) through ordered, per-field selector chains. Site
//! specific scraper variants layer specialized extractors over a generic
//! fallback strategy.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use glimpse_preview::{BrowserSession, Client, PreviewError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), PreviewError> {
//!     let session = Arc::new(BrowserSession::open().await?);
//!     let client = Client::builder().session(session.clone()).build();
//!
//!     let preview = client.build("https://example.com/article").await?;
//!     println!("{}", preview);
//!
//!     session.close().await;
//!     Ok(())
//! }
//! ```

pub mod browser;
pub mod client;
pub mod error;
pub mod extract;
mod fetch;
pub mod options;
pub mod preview;

pub use crate::browser::{BrowserSession, SessionConfig};
pub use crate::client::Client;
pub use crate::error::{ErrorCode, PreviewError};
pub use crate::extract::chain::{scrape, Extractor, Handler};
pub use crate::extract::scrapers::{GenericScraper, PinterestScraper, Scraper, ScraperSet};
pub use crate::options::{ClientBuilder, Options};
pub use crate::preview::Preview;
