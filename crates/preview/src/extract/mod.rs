// ABOUTME: Extraction module housing the document parser and the selector-chain machinery.
// ABOUTME: Submodules: chain (extractor + chain evaluation), scrapers (generic and site variants).

//! Selector-based preview extraction.
//!
//! Submodules:
//! - `chain`: a single selector+handler extractor and ordered chain evaluation.
//! - `scrapers`: the scraper variants supplying per-field chains, plus the
//!   predicate-driven variant selector.

pub mod chain;
pub mod scrapers;

use scraper::Html;

use crate::error::PreviewError;

/// Normalizes whitespace in a string by collapsing runs of whitespace into single spaces.
pub(crate) fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parses rendered HTML into a queryable document.
///
/// Parsing is permissive: malformed markup never fails. The only unreadable
/// input is an empty serialization, which is reported as a parse error.
pub fn parse_document(html: &str, url: &str) -> Result<Html, PreviewError> {
    if html.trim().is_empty() {
        return Err(PreviewError::parse(
            url,
            "ParseDocument",
            Some(anyhow::anyhow!("empty document")),
        ));
    }

    Ok(Html::parse_document(html))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_runs() {
        assert_eq!(normalize_whitespace("  hello   world  "), "hello world");
        assert_eq!(normalize_whitespace("no\textra\nspaces"), "no extra spaces");
        assert_eq!(normalize_whitespace(""), "");
    }

    #[test]
    fn parse_accepts_malformed_html() {
        let doc = parse_document("<p>unclosed <b>nested", "https://example.com");
        assert!(doc.is_ok());
    }

    #[test]
    fn parse_rejects_empty_input() {
        let err = parse_document("   \n", "https://example.com").unwrap_err();
        assert!(err.is_parse());
    }
}
