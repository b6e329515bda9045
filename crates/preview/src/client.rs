// ABOUTME: The preview assembler: fetch, parse, select a scraper variant, run the three chains.
// ABOUTME: Field misses are recovered locally; only an entirely empty result is an error.

use std::sync::Arc;

use scraper::Html;
use tracing::{debug, warn};
use url::Url;

use crate::browser::BrowserSession;
use crate::error::PreviewError;
use crate::extract::chain::{scrape, Extractor};
use crate::extract::parse_document;
use crate::extract::scrapers::ScraperSet;
use crate::fetch::fetch_rendered_html;
use crate::options::{ClientBuilder, Options};
use crate::preview::Preview;

/// The preview client.
///
/// Renders a URL in the shared browser session, picks the scraper variant
/// whose predicate accepts the URL, and runs the three field chains against
/// the rendered document. Calls are independent and may run concurrently over
/// one shared session.
pub struct Client {
    opts: Options,
    session: Option<Arc<BrowserSession>>,
    scrapers: ScraperSet,
}

impl Client {
    /// Create a new ClientBuilder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn new(opts: Options, session: Option<Arc<BrowserSession>>, scrapers: ScraperSet) -> Self {
        Self {
            opts,
            session,
            scrapers,
        }
    }

    /// Renders `url` and assembles its preview.
    ///
    /// A missing field is recorded as absent and never aborts the other two
    /// extractions; the call fails with NotFound only when every field comes
    /// back empty. Fetch and parse failures propagate wrapped with their
    /// cause. Requires an attached browser session.
    pub async fn build(&self, url: &str) -> Result<Preview, PreviewError> {
        let target = parse_url(url, "Build")?;

        let session = self.session.as_ref().ok_or_else(|| {
            PreviewError::browser(url, "Build", Some(anyhow::anyhow!("no browser session attached")))
        })?;

        let html = fetch_rendered_html(session, &target, &self.opts).await?;
        self.assemble(&html, &target, "Build")
    }

    /// Assembles a preview from already rendered HTML.
    ///
    /// Same extraction semantics as [`Client::build`]; needs no browser
    /// session.
    pub fn build_from_html(&self, html: &str, url: &str) -> Result<Preview, PreviewError> {
        let target = parse_url(url, "BuildFromHtml")?;
        self.assemble(html, &target, "BuildFromHtml")
    }

    fn assemble(&self, html: &str, url: &Url, op: &str) -> Result<Preview, PreviewError> {
        let doc = parse_document(html, url.as_str())?;

        let scraper = self.scrapers.select(url);
        debug!(url = %url, scraper = scraper.name(), "selected scraper variant");

        let preview = Preview {
            title: scrape_field(&doc, &scraper.title_chain(), url, "title"),
            description: scrape_field(&doc, &scraper.description_chain(), url, "description"),
            image: scrape_field(&doc, &scraper.image_chain(), url, "image"),
        };

        if preview.is_empty() {
            return Err(PreviewError::not_found(url.as_str(), op));
        }

        Ok(preview)
    }
}

fn scrape_field(doc: &Html, chain: &[Extractor], url: &Url, field: &'static str) -> Option<String> {
    let value = scrape(doc, chain);
    if value.is_none() {
        warn!(url = %url, field, "field not found");
    }
    value
}

fn parse_url(url: &str, op: &str) -> Result<Url, PreviewError> {
    if url.is_empty() {
        return Err(PreviewError::invalid_url(url, op, None));
    }

    Url::parse(url).map_err(|e| PreviewError::invalid_url(url, op, Some(e.into())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn client() -> Client {
        Client::builder().build()
    }

    #[test]
    fn builds_full_preview_from_html() {
        let html = r#"<!DOCTYPE html>
<html>
<head>
    <meta property="og:title" content="A Title">
    <meta property="og:description" content="A description">
    <meta property="og:image" content="https://example.com/a.png">
</head>
<body><h1>Heading</h1></body>
</html>"#;

        let preview = client()
            .build_from_html(html, "https://example.com/page")
            .expect("preview should build");

        assert_eq!(preview.title, Some("A Title".to_string()));
        assert_eq!(preview.description, Some("A description".to_string()));
        assert_eq!(preview.image, Some("https://example.com/a.png".to_string()));
    }

    #[test]
    fn partial_preview_is_not_an_error() {
        let html = "<html><head><title>Only Title</title></head><body></body></html>";

        let preview = client()
            .build_from_html(html, "https://example.com/page")
            .expect("partial preview should build");

        assert_eq!(preview.title, Some("Only Title".to_string()));
        assert_eq!(preview.description, None);
        assert_eq!(preview.image, None);
    }

    #[test]
    fn all_fields_absent_is_not_found() {
        let html = "<html><body><div>no signals here</div></body></html>";

        let err = client()
            .build_from_html(html, "https://example.com/page")
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[test]
    fn empty_url_is_invalid() {
        let err = client().build_from_html("<html></html>", "").unwrap_err();
        assert!(err.is_invalid_url());
    }

    #[test]
    fn malformed_url_is_invalid() {
        let err = client()
            .build_from_html("<html></html>", "not a url")
            .unwrap_err();
        assert!(err.is_invalid_url());
    }

    #[test]
    fn empty_html_is_a_parse_error() {
        let err = client()
            .build_from_html("  ", "https://example.com/page")
            .unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn pinterest_url_uses_specialized_chain() {
        let html = r#"<html>
<head><meta property="og:description" content="generic description"></head>
<body><div data-test-id="truncated-description">pin description</div></body>
</html>"#;

        let preview = client()
            .build_from_html(html, "https://www.pinterest.com/pin/961166745447040917/")
            .expect("preview should build");

        assert_eq!(preview.description, Some("pin description".to_string()));
    }

    #[test]
    fn non_pinterest_url_sticks_to_generic_chain() {
        let html = r#"<html>
<head><meta property="og:description" content="generic description"></head>
<body><div data-test-id="truncated-description">pin description</div></body>
</html>"#;

        let preview = client()
            .build_from_html(html, "https://example.com/article")
            .expect("preview should build");

        assert_eq!(preview.description, Some("generic description".to_string()));
    }

    #[tokio::test]
    async fn build_without_session_fails_with_browser_error() {
        let err = client().build("https://example.com/").await.unwrap_err();
        assert!(err.is_browser());
    }

    #[test]
    fn concurrent_calls_produce_independent_results() {
        let client = client();

        let first = r#"<html><head><meta property="og:title" content="first"></head></html>"#;
        let second = r#"<html><head><meta property="og:title" content="second"></head></html>"#;

        std::thread::scope(|scope| {
            let a = scope.spawn(|| client.build_from_html(first, "https://a.example.com/"));
            let b = scope.spawn(|| client.build_from_html(second, "https://b.example.com/"));

            let first_preview = a.join().expect("thread").expect("preview");
            let second_preview = b.join().expect("thread").expect("preview");

            assert_eq!(first_preview.title, Some("first".to_string()));
            assert_eq!(second_preview.title, Some("second".to_string()));
        });
    }
}
