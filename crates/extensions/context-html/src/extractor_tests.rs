use super::*;
use vocab_protocols::PageSource;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn context(html: &str, selected: &str) -> String {
    context_at(html, selected, 0)
}

fn context_at(html: &str, selected: &str, occurrence: usize) -> String {
    let document = Html::parse_document(html);
    extract_context(&document, selected, occurrence).text
}

#[test]
fn test_nearest_block_ancestor_wins() {
    let html = "<div>Outer text <p>The <b>ubiquitous</b> phones.</p></div>";
    assert_eq!(context(html, "ubiquitous"), "The ubiquitous phones.");
}

#[test]
fn test_container_within_level_bound() {
    let html = "<body><div>Near context <span><span><span>word</span></span></span></div></body>";
    assert_eq!(context(html, "word"), "Near context word");
}

#[test]
fn test_container_beyond_level_bound_falls_back() {
    let html = "<body><div>Deep context \
        <span><span><span><span><span>word</span></span></span></span></span></div></body>";
    assert_eq!(context(html, "word"), "word");
}

#[test]
fn test_walk_stops_at_body() {
    let html = "<html><body>Loose <span>word</span> text</body></html>";
    assert_eq!(context(html, "word"), "word");
}

#[test]
fn test_text_directly_in_body_uses_body_text() {
    let html = "<html><body>Loose word text</body></html>";
    assert_eq!(context(html, "word"), "Loose word text");
}

#[test]
fn test_primary_cap() {
    let html = format!("<p>word {}</p>", "x".repeat(2000));
    let text = context(&html, "word");
    assert_eq!(text.chars().count(), PRIMARY_CONTEXT_LIMIT);
    assert!(text.starts_with("word x"));
}

#[test]
fn test_fallback_cap() {
    let html = format!("<body><span>word {}</span></body>", "y".repeat(2000));
    let text = context(&html, "word");
    assert_eq!(text.chars().count(), FALLBACK_CONTEXT_LIMIT);
}

#[test]
fn test_no_anchor_is_empty() {
    let html = "<p>Nothing to see here.</p>";
    assert_eq!(context(html, "absent"), "");
    assert_eq!(context(html, "   "), "");
}

#[test]
fn test_occurrence_selects_match() {
    let html = "<p>First bank of the river.</p><p>Second bank account.</p>";
    assert_eq!(context_at(html, "bank", 0), "First bank of the river.");
    assert_eq!(context_at(html, "bank", 1), "Second bank account.");
}

#[test]
fn test_occurrence_counts_matches_within_a_node() {
    let html = "<p>bank and bank</p><p>bank again</p>";
    assert_eq!(context_at(html, "bank", 1), "bank and bank");
    assert_eq!(context_at(html, "bank", 2), "bank again");
}

#[test]
fn test_occurrence_past_end_uses_last_match() {
    let html = "<p>First bank.</p><p>Second bank.</p>";
    assert_eq!(context_at(html, "bank", 9), "Second bank.");
}

#[test]
fn test_script_text_is_not_an_anchor() {
    let html = "<body><script>var word = 1;</script><p>The word <script>x()</script>here</p></body>";
    assert_eq!(context(html, "word"), "The word here");
}

#[test]
fn test_hidden_text_is_not_an_anchor() {
    let html = r#"<p style="display:none">hidden word</p><p>shown word</p>"#;
    assert_eq!(context(html, "word"), "shown word");
}

#[test]
fn test_inline_display_block_qualifies() {
    let styled = r#"<body>Outer <span style="display: block">Styled <em>word</em> here</span></body>"#;
    assert_eq!(context(styled, "word"), "Styled word here");

    let plain = "<body>Outer <span>Styled <em>word</em> here</span></body>";
    assert_eq!(context(plain, "word"), "word");
}

#[test]
fn test_table_cell() {
    let html = "<table><tr><td>cell word</td><td>other</td></tr></table>";
    assert_eq!(context(html, "word"), "cell word");
}

#[test]
fn test_selection_spanning_nodes_anchors_on_first_word() {
    let html = "<p>The <b>quick</b> fox jumps.</p>";
    assert_eq!(context(html, "quick fox"), "The quick fox jumps.");
}

#[test]
fn test_selection_whitespace_is_collapsed() {
    let html = "<p>\n   some    word\n   here</p>";
    assert_eq!(context(html, "some\n word"), "some word here");
}

#[tokio::test]
async fn test_extractor_inline_html() {
    let extractor = HtmlContextExtractor::new().unwrap();
    let event = SelectionEvent::new(
        "ephemeral",
        PageSource::Html("<p>An ephemeral moment.</p>".to_string()),
    )
    .unwrap();
    let snippet = extractor.extract(&event).await.unwrap();
    assert_eq!(snippet.as_str(), "An ephemeral moment.");
}

#[tokio::test]
async fn test_extractor_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("page.html");
    std::fs::write(
        &file,
        "<html><body><article><h1>Title</h1><p>A <i>laconic</i> reply.</p></article></body></html>",
    )
    .unwrap();

    let extractor = HtmlContextExtractor::new().unwrap();
    let event = SelectionEvent::new("laconic", PageSource::File(file)).unwrap();
    let snippet = extractor.extract(&event).await.unwrap();
    assert_eq!(snippet.as_str(), "A laconic reply.");
}

#[tokio::test]
async fn test_extractor_from_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/post"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<ul><li>first item</li><li>the salient point</li></ul>"),
        )
        .mount(&server)
        .await;

    let extractor = HtmlContextExtractor::new().unwrap();
    let event =
        SelectionEvent::new("salient", PageSource::Url(format!("{}/post", server.uri()))).unwrap();
    let snippet = extractor.extract(&event).await.unwrap();
    assert_eq!(snippet.as_str(), "the salient point");
}

#[tokio::test]
async fn test_extractor_propagates_load_errors() {
    let dir = tempfile::tempdir().unwrap();
    let extractor = HtmlContextExtractor::new().unwrap();
    let event =
        SelectionEvent::new("word", PageSource::File(dir.path().join("missing.html"))).unwrap();
    assert!(extractor.extract(&event).await.is_err());
}

#[test]
fn test_selection_across_nodes_keeps_single_spaces() {
    let html = "<p>An <b>ubiquitous </b> device here.</p>";
    let text = context(html, "ubiquitous device");
    assert_eq!(text, "An ubiquitous device here.");
    assert!(text.contains("ubiquitous device"));
}
