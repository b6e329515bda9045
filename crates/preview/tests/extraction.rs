// ABOUTME: Integration tests exercising the public extraction API end to end.
// ABOUTME: Covers priority ordering, fallback composition, partial tolerance, and call isolation.

use glimpse_preview::{Client, Extractor, GenericScraper, Scraper, ScraperSet};
use pretty_assertions::assert_eq;
use url::Url;

const PIN_URL: &str = "https://www.pinterest.com/pin/961166745447040917/";

#[test]
fn metadata_precedes_tag_fallback() {
    let html = r#"<html>
<head>
    <meta property="og:title" content="X">
    <title>X2</title>
</head>
<body></body>
</html>"#;

    let client = Client::builder().build();
    let preview = client
        .build_from_html(html, "https://example.com/")
        .expect("preview");

    assert_eq!(preview.title, Some("X".to_string()));
}

#[test]
fn chain_miss_yields_absent_field_not_an_error() {
    // Title present, description and image chains match nothing.
    let html = "<html><head><title>T</title></head><body></body></html>";

    let client = Client::builder().build();
    let preview = client
        .build_from_html(html, "https://example.com/")
        .expect("preview");

    assert_eq!(preview.title, Some("T".to_string()));
    assert_eq!(preview.description, None);
    assert_eq!(preview.image, None);
}

#[test]
fn entirely_empty_document_reports_not_found() {
    let client = Client::builder().build();
    let err = client
        .build_from_html("<html><body></body></html>", "https://example.com/")
        .unwrap_err();

    assert!(err.is_not_found());
}

#[test]
fn specialized_variant_wins_then_falls_back() {
    let client = Client::builder().build();

    // Specialized selector present: it outranks the generic metadata.
    let with_pin = r#"<html>
<head><meta property="og:description" content="generic"></head>
<body><div data-test-id="truncated-description">from pinterest markup</div></body>
</html>"#;
    let preview = client.build_from_html(with_pin, PIN_URL).expect("preview");
    assert_eq!(
        preview.description,
        Some("from pinterest markup".to_string())
    );

    // Specialized selector absent: the generic chain still produces a value.
    let without_pin = r#"<html>
<head><meta property="og:description" content="generic"></head>
<body></body>
</html>"#;
    let preview = client
        .build_from_html(without_pin, PIN_URL)
        .expect("preview");
    assert_eq!(preview.description, Some("generic".to_string()));
}

#[test]
fn custom_variant_is_consulted_before_generic() {
    struct DocsScraper {
        generic: GenericScraper,
    }

    impl Scraper for DocsScraper {
        fn name(&self) -> &'static str {
            "docs"
        }

        fn matches(&self, url: &Url) -> bool {
            url.host_str().is_some_and(|host| host.contains("docs"))
        }

        fn title_chain(&self) -> Vec<Extractor> {
            let mut chain = vec![Extractor::text("header .doc-title")];
            chain.extend(self.generic.title_chain());
            chain
        }

        fn description_chain(&self) -> Vec<Extractor> {
            self.generic.description_chain()
        }

        fn image_chain(&self) -> Vec<Extractor> {
            self.generic.image_chain()
        }
    }

    let mut scrapers = ScraperSet::empty();
    scrapers.register(Box::new(DocsScraper {
        generic: GenericScraper,
    }));

    let client = Client::builder().scrapers(scrapers).build();

    let html = r#"<html>
<head><title>Plain Title</title></head>
<body><header><span class="doc-title">Doc Title</span></header></body>
</html>"#;

    let preview = client
        .build_from_html(html, "https://docs.example.com/guide")
        .expect("preview");
    assert_eq!(preview.title, Some("Doc Title".to_string()));

    // A non-matching host skips the variant entirely.
    let preview = client
        .build_from_html(html, "https://example.com/guide")
        .expect("preview");
    assert_eq!(preview.title, Some("Plain Title".to_string()));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_builds_are_isolated() {
    let client = std::sync::Arc::new(Client::builder().build());

    let mut handles = Vec::new();
    for i in 0..8 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            let html = format!(
                r#"<html><head><meta property="og:title" content="title-{i}"></head></html>"#
            );
            let url = format!("https://host{i}.example.com/");
            (i, client.build_from_html(&html, &url))
        }));
    }

    for handle in handles {
        let (i, result) = handle.await.expect("task");
        let preview = result.expect("preview");
        assert_eq!(preview.title, Some(format!("title-{i}")));
    }
}
