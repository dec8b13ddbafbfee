//! Ordered selector fallbacks
//!
//! Target sites run markup experiments constantly, so each field is looked up
//! through a list of selectors tried in order.

use super::{ParsingError, ParsingResult};
use crate::infrastructure::document::PageDocument;
use scraper::Selector;
use tracing::{debug, warn};

/// Compiled fallback list for one field
#[derive(Debug, Clone)]
pub struct SelectorChain {
    label: &'static str,
    selectors: Vec<(String, Selector)>,
}

impl SelectorChain {
    /// Compile selector strings, skipping invalid ones
    ///
    /// Fails only when none of a non-empty list compiles.
    pub fn compile(label: &'static str, selector_strings: &[String]) -> ParsingResult<Self> {
        let mut selectors = Vec::with_capacity(selector_strings.len());
        let mut errors = Vec::new();

        for selector_str in selector_strings {
            match Selector::parse(selector_str) {
                Ok(selector) => selectors.push((selector_str.clone(), selector)),
                Err(e) => {
                    warn!("Failed to compile {} selector '{}': {}", label, selector_str, e);
                    errors.push(format!("'{selector_str}': {e}"));
                }
            }
        }

        if selectors.is_empty() && !selector_strings.is_empty() {
            return Err(ParsingError::invalid_selector(
                &selector_strings.join(", "),
                format!("no valid {label} selectors ({})", errors.join(", ")),
            ));
        }

        Ok(Self { label, selectors })
    }

    /// Text of the first selector yielding non-empty content
    pub fn first_text(&self, document: &dyn PageDocument) -> Option<String> {
        for (i, (source, selector)) in self.selectors.iter().enumerate() {
            if let Some(text) = document.first_text(selector) {
                debug!("Extracted {} using selector {} ({}): {}", self.label, i, source, text);
                return Some(text);
            }
        }

        debug!(
            "Failed to extract {} using {} selectors",
            self.label,
            self.selectors.len()
        );
        None
    }

    /// Attribute of the first selector yielding a non-empty value
    pub fn first_attr(&self, document: &dyn PageDocument, attr: &str) -> Option<String> {
        self.selectors
            .iter()
            .find_map(|(_, selector)| document.first_attr(selector, attr))
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::document::LiveDocument;

    fn chain(list: &[&str]) -> ParsingResult<SelectorChain> {
        let owned: Vec<String> = list.iter().map(|s| (*s).to_string()).collect();
        SelectorChain::compile("title", &owned)
    }

    #[test]
    fn test_first_non_empty_selector_wins() {
        let doc = LiveDocument::new(
            None,
            r#"<div data-field="headline">  </div>
               <div class="pv-top-card-section__headline">Engineer</div>
               <div class="profile-overview-card__headline">Ignored</div>"#,
        );
        let chain = chain(&[
            r#"[data-field="headline"]"#,
            ".pv-top-card-section__headline",
            ".profile-overview-card__headline",
        ])
        .unwrap();

        assert_eq!(chain.first_text(&doc).as_deref(), Some("Engineer"));
    }

    #[test]
    fn test_invalid_selectors_are_skipped() {
        let chain = chain(&["div[", "h1"]).unwrap();
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_all_invalid_is_an_error() {
        let err = chain(&["div[", "::"]).unwrap_err();
        assert!(matches!(err, ParsingError::InvalidSelector { .. }));
    }

    #[test]
    fn test_miss_is_none() {
        let doc = LiveDocument::new(None, "<p>nothing here</p>");
        let chain = chain(&["h1", ".headline"]).unwrap();
        assert_eq!(chain.first_text(&doc), None);
    }
}
