// ABOUTME: A single selector+handler extraction rule and ordered chain evaluation.
// ABOUTME: Handlers are stored closures returning Option<String>; None is the NotFound outcome.

//! Extractor chains.
//!
//! An [`Extractor`] pairs a CSS selector with a handler closure that pulls a
//! string out of the first matching node. A chain is just an ordered slice of
//! extractors; [`scrape`] evaluates it in declaration order and the first
//! extractor that produces a value wins. Order encodes priority: authored
//! metadata sits ahead of structural heuristics.

use std::fmt;

use scraper::{ElementRef, Html, Selector};

use crate::extract::normalize_whitespace;

/// A stored field handler. `None` means the node carried nothing usable,
/// which is an expected outcome rather than a failure.
pub type Handler = Box<dyn for<'a> Fn(ElementRef<'a>) -> Option<String> + Send + Sync>;

/// A (selector, handler) extraction rule for one field.
pub struct Extractor {
    selector: String,
    handler: Handler,
}

impl Extractor {
    pub fn new(
        selector: impl Into<String>,
        handler: impl for<'a> Fn(ElementRef<'a>) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            selector: selector.into(),
            handler: Box::new(handler),
        }
    }

    /// Rule yielding the whitespace-normalized inner text of the matched node.
    pub fn text(selector: impl Into<String>) -> Self {
        Self::new(selector, |el| {
            let text = normalize_whitespace(&el.text().collect::<Vec<_>>().join(" "));
            (!text.is_empty()).then_some(text)
        })
    }

    /// Rule yielding the trimmed value of `name` on the matched node.
    pub fn attr(selector: impl Into<String>, name: &'static str) -> Self {
        Self::new(selector, move |el| {
            el.value()
                .attr(name)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        })
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Runs this rule against `doc`.
    ///
    /// Only the first node matching the selector in document order is
    /// consulted; no node, an unparseable selector, or a handler miss on that
    /// node all come back as `None`.
    pub fn extract(&self, doc: &Html) -> Option<String> {
        let sel = Selector::parse(&self.selector).ok()?;
        let node = doc.select(&sel).next()?;
        (self.handler)(node)
    }
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extractor")
            .field("selector", &self.selector)
            .finish_non_exhaustive()
    }
}

/// Evaluates `chain` in order and returns the first extracted value.
///
/// `None` means every extractor in the chain missed.
pub fn scrape(doc: &Html, chain: &[Extractor]) -> Option<String> {
    chain.iter().find_map(|extractor| extractor.extract(doc))
}
