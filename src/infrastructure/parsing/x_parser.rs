//! Microblog (X/Twitter) profile parser
//!
//! A page is a profile when its first path segment is a 4-15 character
//! handle that is not one of the site's reserved system routes.

use super::canonical::{canonicalize_x_profile, x_handle};
use super::config::{ParsingConfig, XSelectors};
use super::{PageParser, ParsingResult, SelectorChain, check_field_request};
use crate::domain::profile::{ProfileField, ProfileIdentifier};
use crate::infrastructure::document::PageDocument;
use crate::infrastructure::readiness::{ReadinessToken, WaitOptions, wait_for_element};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::debug;

const SUPPORTED_FIELDS: &[ProfileField] = &[
    ProfileField::Profile,
    ProfileField::Handle,
    ProfileField::Name,
    ProfileField::Bio,
];

pub struct XParser {
    ready_anchor: String,
    wait_options: WaitOptions,
    name_selectors: SelectorChain,
    bio_selectors: SelectorChain,
    canonical_link_selectors: SelectorChain,
}

impl XParser {
    pub const NAME: &'static str = "x";

    pub fn new() -> ParsingResult<Self> {
        Self::with_config(&ParsingConfig::default())
    }

    pub fn with_config(config: &ParsingConfig) -> ParsingResult<Self> {
        let XSelectors {
            ready_anchor,
            name,
            bio,
            canonical_link,
        } = &config.x;

        Ok(Self {
            ready_anchor: ready_anchor.clone(),
            wait_options: config.readiness.wait_options(),
            name_selectors: SelectorChain::compile("name", name)?,
            bio_selectors: SelectorChain::compile("bio", bio)?,
            canonical_link_selectors: SelectorChain::compile("canonical link", canonical_link)?,
        })
    }

    /// Whether `url` is an X/Twitter profile page
    pub fn is_x_profile_url(url: &str) -> bool {
        x_handle(url).is_some()
    }

    /// Profile identifier: requested URL, then the document location, then
    /// the canonical `<link>`
    fn profile_identifier(
        &self,
        document: &dyn PageDocument,
        url: Option<&str>,
    ) -> Option<ProfileIdentifier> {
        let requested = url.and_then(canonicalize_x_profile);
        if let Some(profile) =
            requested.or_else(|| document.location().as_deref().and_then(canonicalize_x_profile))
        {
            return Some(profile);
        }

        let canonical = self.canonical_link_selectors.first_attr(document, "href")?;
        debug!("Falling back to canonical link {}", canonical);
        canonicalize_x_profile(&canonical)
    }
}

#[async_trait]
impl PageParser for XParser {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn supported_fields(&self) -> &'static [ProfileField] {
        SUPPORTED_FIELDS
    }

    fn is_relevant_page(&self, url: &str) -> bool {
        Self::is_x_profile_url(url)
    }

    async fn wait_until_ready(
        &self,
        document: &dyn PageDocument,
        cancel: &CancellationToken,
    ) -> ParsingResult<ReadinessToken> {
        wait_for_element(document, &self.ready_anchor, self.wait_options, cancel).await
    }

    fn get_value(
        &self,
        document: &dyn PageDocument,
        token: &ReadinessToken,
        field: ProfileField,
        url: Option<&str>,
    ) -> ParsingResult<Option<String>> {
        if !check_field_request(self, document, token, field)? {
            return Ok(None);
        }

        let Some(target) = url.map(str::to_string).or_else(|| document.location()) else {
            return Ok(None);
        };

        if !self.is_relevant_page(&target) {
            return Ok(None);
        }

        let value = match field {
            ProfileField::Profile => self
                .profile_identifier(document, url)
                .map(ProfileIdentifier::into_string),
            ProfileField::Handle => self
                .profile_identifier(document, url)
                .and_then(|profile| profile.last_segment().map(str::to_string)),
            ProfileField::Name => self.name_selectors.first_text(document),
            ProfileField::Bio => self.bio_selectors.first_text(document),
            ProfileField::Title | ProfileField::Org | ProfileField::Location => None,
        };

        Ok(value)
    }
}
