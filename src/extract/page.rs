//! Title and snippet extraction
//!
//! Uses CSS selectors and the parsed node tree from `scraper`. The html5ever
//! parser recovers from any malformed input, so extraction never fails; it
//! only degrades to empty text or the `"N/A"` title.

use scraper::{Html, Node, Selector};

/// Title used when a page has neither a heading nor a `<title>`
pub const UNTITLED: &str = "N/A";

/// Elements whose text never reaches the reader
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Title and text snippet of one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSignals {
    pub title: String,
    pub snippet: String,
}

impl PageSignals {
    /// Parse `html` and extract its signals
    pub fn from_html(html: &str, snippet_chars: usize) -> Self {
        Self::from_document(&Html::parse_document(html), snippet_chars)
    }

    /// Extract signals from an already parsed document
    ///
    /// Title is the first `<h1>`, else `<title>`, else `"N/A"`. The snippet is
    /// the first `snippet_chars` characters of the visible text.
    pub fn from_document(document: &Html, snippet_chars: usize) -> Self {
        let title = first_text(document, "h1")
            .or_else(|| first_text(document, "title"))
            .unwrap_or_else(|| UNTITLED.to_string());

        let snippet = truncate_chars(&visible_text(document), snippet_chars);

        Self { title, snippet }
    }
}

/// All visible text, whitespace-normalized and joined by single spaces
pub fn visible_text(document: &Html) -> String {
    let mut parts: Vec<&str> = Vec::new();

    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if !hidden {
            parts.push(text);
        }
    }

    clean_text(&parts.join(" "))
}

/// Text of the first element matching `selector` that has any
fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .map(|el| clean_text(&el.text().collect::<Vec<_>>().join(" ")))
        .find(|text| !text.is_empty())
}

/// Normalize whitespace
fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First `max_chars` characters of `text`
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}
