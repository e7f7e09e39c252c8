use scraper::html::Select;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use harvest_logging::harvest_debug;

use crate::decode::decode_html;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("failed to parse the HTML document ({encoding}): {message}")]
    Malformed { encoding: String, message: String },
    #[error("invalid CSS selector {selector:?}: {message}")]
    InvalidSelector { selector: String, message: String },
}

/// A parsed HTML tree that can be queried with CSS selectors.
pub struct ParsedDocument {
    html: Html,
}

impl ParsedDocument {
    pub fn from_html(text: &str) -> Self {
        Self {
            html: Html::parse_document(text),
        }
    }

    /// All elements matching `selector`, in document order.
    pub fn select<'a, 'b>(&'a self, selector: &'b Selector) -> Select<'a, 'b> {
        self.html.select(selector)
    }

    /// Trimmed text of the first element matching `selector`.
    pub fn select_text(&self, selector: &Selector) -> Option<String> {
        self.html
            .select(selector)
            .next()
            .map(|element| element_text(&element))
    }
}

/// Decode `bytes` and parse the result permissively.
pub fn parse_document(
    bytes: &[u8],
    content_type: Option<&str>,
) -> Result<ParsedDocument, DocumentError> {
    let decoded = decode_html(bytes, content_type)?;
    harvest_debug!("Decoded {} bytes as {}", bytes.len(), decoded.encoding_label);
    Ok(ParsedDocument::from_html(&decoded.html))
}

pub fn compile_selector(css: &str) -> Result<Selector, DocumentError> {
    Selector::parse(css).map_err(|err| DocumentError::InvalidSelector {
        selector: css.to_string(),
        message: err.to_string(),
    })
}

/// Concatenated descendant text, trimmed at both ends.
pub(crate) fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
