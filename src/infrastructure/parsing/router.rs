//! Parse request routing
//!
//! Parsers are registered as `(predicate, factory)` pairs in priority order.
//! The first registration whose predicate accepts the URL builds a fresh
//! parser for the request.

use super::{LinkedInParser, PageParser, ParsingConfig, ParsingError, ParsingResult, XParser};
use crate::domain::profile::NormalizedRecord;
use crate::infrastructure::document::PageDocument;
use std::fmt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

pub type ParserFactory =
    Box<dyn Fn(&ParsingConfig) -> ParsingResult<Box<dyn PageParser>> + Send + Sync>;

/// One site registration
pub struct ParserRegistration {
    pub name: &'static str,
    pub predicate: fn(&str) -> bool,
    pub factory: ParserFactory,
}

impl ParserRegistration {
    pub fn new<F>(name: &'static str, predicate: fn(&str) -> bool, factory: F) -> Self
    where
        F: Fn(&ParsingConfig) -> ParsingResult<Box<dyn PageParser>> + Send + Sync + 'static,
    {
        Self {
            name,
            predicate,
            factory: Box::new(factory),
        }
    }

    pub fn linkedin() -> Self {
        Self::new(LinkedInParser::NAME, LinkedInParser::is_linkedin_profile_url, |config| {
            Ok(Box::new(LinkedInParser::with_config(config)?))
        })
    }

    pub fn x() -> Self {
        Self::new(XParser::NAME, XParser::is_x_profile_url, |config| {
            Ok(Box::new(XParser::with_config(config)?))
        })
    }
}

impl fmt::Debug for ParserRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserRegistration")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Selects a parser per request and assembles the normalized record
#[derive(Debug)]
pub struct ParseRequestRouter {
    config: ParsingConfig,
    registrations: Vec<ParserRegistration>,
}

impl ParseRequestRouter {
    /// Router with no parsers registered
    pub const fn empty(config: ParsingConfig) -> Self {
        Self {
            config,
            registrations: Vec::new(),
        }
    }

    /// Router with every built-in site, professional network first
    pub fn new(config: ParsingConfig) -> Self {
        Self::empty(config)
            .with_registration(ParserRegistration::linkedin())
            .with_registration(ParserRegistration::x())
    }

    #[must_use]
    pub fn with_registration(mut self, registration: ParserRegistration) -> Self {
        self.registrations.push(registration);
        self
    }

    pub const fn config(&self) -> &ParsingConfig {
        &self.config
    }

    pub fn registered_names(&self) -> Vec<&'static str> {
        self.registrations.iter().map(|r| r.name).collect()
    }

    /// Build the first parser whose site claims `url`
    pub fn select(&self, url: &str) -> ParsingResult<Box<dyn PageParser>> {
        for registration in &self.registrations {
            if !(registration.predicate)(url) {
                continue;
            }

            let parser = (registration.factory)(&self.config)?;
            if parser.is_relevant_page(url) {
                debug!("Selected parser '{}' for {}", registration.name, url);
                return Ok(parser);
            }
        }

        Err(ParsingError::no_parser_applies(Some(url)))
    }

    /// Parse the page `document` currently shows
    ///
    /// `url` overrides the document location. Readiness is awaited before
    /// any field is read; fields the parser does not support stay `None`.
    pub async fn parse_current_page(
        &self,
        document: &dyn PageDocument,
        url: Option<&str>,
        cancel: &CancellationToken,
    ) -> ParsingResult<NormalizedRecord> {
        let Some(url) = url.map(str::to_string).or_else(|| document.location()) else {
            return Err(ParsingError::no_parser_applies(None));
        };

        let parser = self.select(&url)?;
        let token = parser.wait_until_ready(document, cancel).await?;

        let mut record = NormalizedRecord::default();
        for &field in parser.supported_fields() {
            record.set(field, parser.get_value(document, &token, field, Some(&url))?);
        }

        info!(
            "Parsed {} page {} ({} of {} fields)",
            parser.name(),
            url,
            record.populated_fields().len(),
            parser.supported_fields().len()
        );
        Ok(record)
    }
}

impl Default for ParseRequestRouter {
    fn default() -> Self {
        Self::new(ParsingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_order() {
        let router = ParseRequestRouter::default();
        assert_eq!(router.registered_names(), vec!["linkedin", "x"]);
    }

    #[test]
    fn test_select_by_url() {
        let router = ParseRequestRouter::default();

        let parser = router.select("https://www.linkedin.com/in/jane").unwrap();
        assert_eq!(parser.name(), "linkedin");

        let parser = router.select("https://x.com/jdoe").unwrap();
        assert_eq!(parser.name(), "x");

        let err = router.select("https://x.com/settings").err().unwrap();
        assert!(matches!(err, ParsingError::NoParserApplies { .. }));
    }

    #[test]
    fn test_empty_router_applies_to_nothing() {
        let router = ParseRequestRouter::empty(ParsingConfig::default());
        assert!(router.select("https://x.com/jdoe").is_err());
    }
}
