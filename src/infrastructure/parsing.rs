//! Profile page parsing infrastructure
//!
//! Every supported site gets a `PageParser` implementation. Parsers are
//! selected per request by `ParseRequestRouter`, wait for their own readiness
//! anchor, and only then extract fields.

pub mod canonical;
pub mod config;
pub mod error;
pub mod linkedin_parser;
pub mod patterns;
pub mod router;
pub mod selectors;
pub mod x_parser;

// Re-export public types
pub use config::ParsingConfig;
pub use error::{ParsingError, ParsingResult};
pub use linkedin_parser::LinkedInParser;
pub use router::{ParseRequestRouter, ParserRegistration};
pub use selectors::SelectorChain;
pub use x_parser::XParser;

use crate::domain::profile::ProfileField;
use crate::infrastructure::document::PageDocument;
use crate::infrastructure::readiness::ReadinessToken;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Capability set every site-specific parser provides
#[async_trait]
pub trait PageParser: Send + Sync {
    /// Short stable name used in logs and errors
    fn name(&self) -> &'static str;

    /// Fields this parser can populate, in extraction order
    fn supported_fields(&self) -> &'static [ProfileField];

    /// Whether `url` is a profile page of this parser's site
    fn is_relevant_page(&self, url: &str) -> bool;

    /// Wait for the element that marks the page as rendered
    async fn wait_until_ready(
        &self,
        document: &dyn PageDocument,
        cancel: &CancellationToken,
    ) -> ParsingResult<ReadinessToken>;

    /// Value of one field
    ///
    /// `Ok(None)` when the page is not relevant, the field is unsupported, or
    /// the page lacks the content. `Err(NotReady)` when `token` was not
    /// issued for `document`.
    fn get_value(
        &self,
        document: &dyn PageDocument,
        token: &ReadinessToken,
        field: ProfileField,
        url: Option<&str>,
    ) -> ParsingResult<Option<String>>;

    fn supports(&self, field: ProfileField) -> bool {
        self.supported_fields().contains(&field)
    }

    /// `get_value` keyed by the sidebar's string field names
    fn get_value_by_key(
        &self,
        document: &dyn PageDocument,
        token: &ReadinessToken,
        key: &str,
        url: Option<&str>,
    ) -> ParsingResult<Option<String>> {
        match key.parse::<ProfileField>() {
            Ok(field) => self.get_value(document, token, field, url),
            Err(_) => {
                let unsupported = ParsingError::unsupported_field(key, self.name());
                debug!("{}", unsupported);
                Ok(None)
            }
        }
    }
}

/// Shared entry checks for `get_value`
///
/// Returns `Ok(false)` when the field should degrade to `None`.
pub(crate) fn check_field_request(
    parser: &dyn PageParser,
    document: &dyn PageDocument,
    token: &ReadinessToken,
    field: ProfileField,
) -> ParsingResult<bool> {
    if !token.is_for(document) {
        return Err(ParsingError::not_ready(parser.name()));
    }

    if !parser.supports(field) {
        debug!("{}", ParsingError::unsupported_field(field.as_str(), parser.name()));
        return Ok(false);
    }

    Ok(true)
}
