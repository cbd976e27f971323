use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::models::PageSnapshot;

// ── Selectors ────────────────────────────────────────────────────────────────

static TITLE_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());

static META_DESCRIPTION_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[name="description"]"#).unwrap());

static H1_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());

/// Elements whose text never reaches the rendered page.
const HIDDEN_TAGS: &[&str] = &["head", "script", "style", "noscript", "template"];

// ── Snapshot extraction ──────────────────────────────────────────────────────

pub fn snapshot_from_html(html: &str, is_https: bool) -> PageSnapshot {
    let document = Html::parse_document(html);

    // Kept verbatim: surrounding whitespace counts toward the title length.
    let title = document.select(&TITLE_SEL).next().map(collect_text);

    let meta_description = document
        .select(&META_DESCRIPTION_SEL)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|content| content.trim().to_string());

    let heading = document
        .select(&H1_SEL)
        .next()
        .map(|el| collect_text(el).trim().to_string());

    let word_count = visible_text(document.root_element())
        .split_whitespace()
        .count();

    PageSnapshot {
        title,
        meta_description,
        heading,
        word_count,
        is_https,
    }
}

// ── DOM utility helpers ──────────────────────────────────────────────────────

/// Collect all text from an element and its descendants.
fn collect_text(el: ElementRef<'_>) -> String {
    el.text().collect::<Vec<_>>().join("")
}

/// Like `collect_text`, but skips subtrees that are not rendered.
///
/// Walks with an explicit stack so nesting depth is bounded by the heap, not
/// the thread stack.
fn visible_text(el: ElementRef<'_>) -> String {
    use scraper::node::Node;
    let mut result = String::new();
    let mut stack = vec![*el];
    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Text(text) => result.push_str(&*text.text),
            Node::Element(element) => {
                if HIDDEN_TAGS.contains(&element.name()) {
                    continue;
                }
                // Reversed so children pop in document order.
                stack.extend(node.children().rev());
            }
            _ => {}
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::{generate_insights, Insight};
    use crate::test_support::words;

    #[test]
    fn extracts_all_fields() {
        let html = format!(
            r#"<html><head>
                <title>A Reasonably Long Page Title</title>
                <meta name="description" content="  Everything about widgets ">
            </head><body>
                <h1>  Welcome  </h1>
                <h1>Second heading</h1>
                <p>{}</p>
            </body></html>"#,
            words(10)
        );
        let snapshot = snapshot_from_html(&html, true);
        assert_eq!(snapshot.title.as_deref(), Some("A Reasonably Long Page Title"));
        assert_eq!(
            snapshot.meta_description.as_deref(),
            Some("Everything about widgets")
        );
        assert_eq!(snapshot.heading.as_deref(), Some("Welcome"));
        // "Welcome", "Second heading" and the paragraph.
        assert_eq!(snapshot.word_count, 13);
        assert!(snapshot.is_https);
    }

    #[test]
    fn missing_elements_are_absent() {
        let snapshot = snapshot_from_html("<html><body><p>hello there</p></body></html>", false);
        assert_eq!(snapshot.title, None);
        assert_eq!(snapshot.meta_description, None);
        assert_eq!(snapshot.heading, None);
        assert_eq!(snapshot.word_count, 2);
        assert!(!snapshot.is_https);
    }

    #[test]
    fn other_meta_tags_are_not_descriptions() {
        let html = r#"<head>
            <meta name="keywords" content="a, b">
            <meta property="og:description" content="social">
        </head>"#;
        assert_eq!(snapshot_from_html(html, false).meta_description, None);
    }

    #[test]
    fn description_without_content_is_absent() {
        let html = r#"<head><meta name="description"></head>"#;
        assert_eq!(snapshot_from_html(html, false).meta_description, None);
    }

    #[test]
    fn heading_text_includes_nested_markup() {
        let html = "<body><h1>\n  Hello <em>big</em> world\n</h1></body>";
        assert_eq!(
            snapshot_from_html(html, false).heading.as_deref(),
            Some("Hello big world")
        );
    }

    #[test]
    fn scripts_and_styles_are_not_counted() {
        let html = r#"<html><head><title>ignored title words</title>
            <style>body { color: red; }</style></head>
            <body>
                <script>var a = 1; var b = 2;</script>
                <noscript>enable javascript please</noscript>
                <p>one two three</p>
            </body></html>"#;
        assert_eq!(snapshot_from_html(html, false).word_count, 3);
    }

    #[test]
    fn inline_markup_does_not_split_words() {
        let html = "<body><p>un<b>break</b>able text</p></body>";
        assert_eq!(snapshot_from_html(html, false).word_count, 2);
    }

    #[test]
    fn empty_document_has_no_words() {
        let snapshot = snapshot_from_html("", false);
        assert_eq!(snapshot.word_count, 0);
        assert_eq!(snapshot.title, None);
    }

    #[test]
    fn title_whitespace_is_preserved() {
        let html = "<head><title>\n      Short title         \n    </title></head>";
        let snapshot = snapshot_from_html(html, false);
        let title = snapshot.title.as_deref().unwrap();
        assert_eq!(title.trim(), "Short title");
        assert_eq!(title.chars().count(), 32);
        assert!(!generate_insights(&snapshot).contains(&Insight::ShortTitle));
    }

    #[test]
    fn adjacent_blocks_join_like_plain_text() {
        // No whitespace between the blocks, so their text runs together.
        let html = "<body><div>one</div><div>two</div>\n<p>three</p></body>";
        assert_eq!(snapshot_from_html(html, false).word_count, 2);
    }

    #[test]
    fn deeply_nested_page_does_not_overflow() {
        let depth = 50_000;
        let html = format!(
            "<html><body>{}word{}</body></html>",
            "<span>".repeat(depth),
            "</span>".repeat(depth)
        );
        assert_eq!(snapshot_from_html(&html, false).word_count, 1);
    }

    #[test]
    fn hidden_tags_inside_deep_nesting_are_skipped() {
        let depth = 10_000;
        let html = format!(
            "<body>{}visible<script>hidden code</script>{}</body>",
            "<div>".repeat(depth),
            "</div>".repeat(depth)
        );
        assert_eq!(snapshot_from_html(&html, false).word_count, 1);
    }
}
