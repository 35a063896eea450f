pub mod html;
pub mod text;

#[cfg(test)]
mod tests;

use crate::error::Result;
use url::Url;

pub use html::HtmlDocumentParser;
pub use text::{RuleBasedAnalyzer, TextAnalysis, TextAnalyzer};

/// Result of parsing a rendered document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    /// Plain text of the document
    pub text: String,
    /// Absolute hyperlink targets in document order
    pub links: Vec<String>,
    /// Absolute image sources in document order
    pub images: Vec<String>,
}

impl ParsedDocument {
    /// Creates a new parse result
    pub fn new(text: String, links: Vec<String>, images: Vec<String>) -> Self {
        Self {
            text,
            links,
            images,
        }
    }
}

/// Turns rendered HTML into text, links and images
pub trait DocumentParser: Send + Sync {
    /// Parse `html`, resolving every reference against `base`
    fn parse(&self, html: &str, base: &Url) -> Result<ParsedDocument>;
}
