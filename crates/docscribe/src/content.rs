//! Plain-text rendering of documentation markup.
//!
//! Parses raw HTML with the `scraper` crate and keeps only the readable text,
//! which is what gets sent to the text-completion provider.

use scraper::{Html, Node};

/// Elements whose text content is never readable prose.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Extract readable text from an HTML document.
///
/// Every text node outside script/style-like elements is trimmed, empty
/// nodes are dropped, and the rest are joined with a single space.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut parts: Vec<&str> = Vec::new();

    for node in document.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let skipped = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| SKIPPED_ELEMENTS.contains(&el.name()))
        });
        if skipped {
            continue;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed);
        }
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_strips_scripts_and_styles() {
        let html = r#"<html><head>
            <title>Pets API</title>
            <style>body { color: red; }</style>
            <script>var secret = 1;</script>
          </head><body>
            <h1>Pets</h1>
            <p>  List   all pets. </p>
            <noscript>Enable JS</noscript>
          </body></html>"#;

        let text = extract_text(html);
        assert_eq!(text, "Pets API Pets List   all pets.");
        assert!(!text.contains("secret"));
        assert!(!text.contains("color"));
        assert!(!text.contains("Enable JS"));
    }

    #[test]
    fn test_extract_text_nested_inline() {
        let html = "<div><code>GET</code> <b>/users/{id}</b> returns a user</div>";
        assert_eq!(extract_text(html), "GET /users/{id} returns a user");
    }

    #[test]
    fn test_extract_text_empty_document() {
        assert_eq!(extract_text(""), "");
        assert_eq!(extract_text("<script>only()</script>"), "");
    }
}
