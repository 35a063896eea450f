use crate::error::Result;
use crate::parsers::{DocumentParser, ParsedDocument};
use crate::utils::resolve_reference;
use scraper::{Html, Node, Selector};
use url::Url;

/// Elements whose text never reaches the reader
const NON_CONTENT_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Document collaborator backed by `scraper`
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlDocumentParser;

impl DocumentParser for HtmlDocumentParser {
    fn parse(&self, html: &str, base: &Url) -> Result<ParsedDocument> {
        Ok(parse(html, base))
    }
}

/// Parses HTML content to extract text, links and images
pub fn parse(html: &str, base: &Url) -> ParsedDocument {
    let doc = Html::parse_document(html);

    let text = extract_text(&doc);
    let links = extract_attr(&doc, "a[href]", "href", base);
    let images = extract_attr(&doc, "img[src]", "src", base);

    ::log::debug!(
        "HTML parser found {} links and {} images in {}",
        links.len(),
        images.len(),
        base
    );
    if !links.is_empty() {
        ::log::trace!(
            "First few links: {:?}",
            links.iter().take(5).collect::<Vec<_>>()
        );
    }

    ParsedDocument::new(text, links, images)
}

/// Joins every visible text node, trimmed, with a single space
fn extract_text(doc: &Html) -> String {
    doc.root_element()
        .descendants()
        .filter_map(|node| match node.value() {
            Node::Text(text) => Some((node, text)),
            _ => None,
        })
        .filter(|(node, _)| {
            !node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|e| NON_CONTENT_ELEMENTS.iter().any(|n| *n == e.name()))
            })
        })
        .map(|(_, text)| text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collects a non-empty attribute from every match of `selector`, resolved against `base`
fn extract_attr(doc: &Html, selector: &str, attr: &str, base: &Url) -> Vec<String> {
    let selector = Selector::parse(selector).expect("valid selector");
    doc.select(&selector)
        .filter_map(|e| e.value().attr(attr))
        .filter(|value| !value.is_empty())
        .filter_map(|value| resolve_reference(base, value))
        .collect()
}
