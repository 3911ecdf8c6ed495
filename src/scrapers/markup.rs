//! Markup querying capability used by the extraction pipeline.
//!
//! The pipeline never touches an HTML library directly: it asks nodes for
//! sub-nodes by CSS selector and reads their text. [`scraper`] is the backend
//! used in production.

use crate::error::MarkupError;
use scraper::{ElementRef, Selector};

pub trait MarkupNode: Sized {
    /// All descendants matching `selector`, in document order
    fn query(&self, selector: &str) -> Result<Vec<Self>, MarkupError>;

    /// Text content with runs of whitespace collapsed to single spaces
    fn text_content(&self) -> String;

    /// Serialized children of this node
    fn inner_markup(&self) -> String;

    /// Serialized node including its own tag
    fn outer_markup(&self) -> String;
}

impl<'a> MarkupNode for ElementRef<'a> {
    fn query(&self, selector: &str) -> Result<Vec<Self>, MarkupError> {
        let parsed = Selector::parse(selector).map_err(|e| MarkupError::InvalidSelector {
            selector: selector.to_string(),
            reason: format!("{:?}", e),
        })?;
        Ok(self.select(&parsed).collect())
    }

    fn text_content(&self) -> String {
        normalize_whitespace(&self.text().collect::<String>())
    }

    fn inner_markup(&self) -> String {
        self.inner_html()
    }

    fn outer_markup(&self) -> String {
        self.html()
    }
}

pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
