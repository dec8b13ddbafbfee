//! Professional network (LinkedIn) profile parser
//!
//! Relevance is the `/in/` profile route. The first `<h1>` is the readiness
//! anchor and also carries the display name.

use super::canonical::{canonicalize_profile_url, strip_protocol};
use super::config::{LinkedInSelectors, ParsingConfig};
use super::patterns::LINKEDIN_PROFILE_REGEX;
use super::{PageParser, ParsingResult, SelectorChain, check_field_request};
use crate::domain::profile::{ProfileField, ProfileIdentifier};
use crate::infrastructure::document::PageDocument;
use crate::infrastructure::readiness::{ReadinessToken, WaitOptions, wait_for_element};
use async_trait::async_trait;
use std::sync::OnceLock;
use tokio_util::sync::CancellationToken;
use tracing::debug;

const SUPPORTED_FIELDS: &[ProfileField] = &[
    ProfileField::Profile,
    ProfileField::Name,
    ProfileField::Title,
    ProfileField::Org,
    ProfileField::Location,
];

pub struct LinkedInParser {
    ready_anchor: String,
    wait_options: WaitOptions,
    name_selectors: SelectorChain,
    title_selectors: SelectorChain,
    org_selectors: SelectorChain,
    location_selectors: SelectorChain,

    /// Canonical URL captured by the first relevant `is_relevant_page` call
    real_url: OnceLock<ProfileIdentifier>,
}

impl LinkedInParser {
    pub const NAME: &'static str = "linkedin";

    pub fn new() -> ParsingResult<Self> {
        Self::with_config(&ParsingConfig::default())
    }

    pub fn with_config(config: &ParsingConfig) -> ParsingResult<Self> {
        let LinkedInSelectors {
            ready_anchor,
            name,
            title,
            org,
            location,
        } = &config.linkedin;

        Ok(Self {
            ready_anchor: ready_anchor.clone(),
            wait_options: config.readiness.wait_options(),
            name_selectors: SelectorChain::compile("name", name)?,
            title_selectors: SelectorChain::compile("title", title)?,
            org_selectors: SelectorChain::compile("org", org)?,
            location_selectors: SelectorChain::compile("location", location)?,
            real_url: OnceLock::new(),
        })
    }

    /// Whether `url` is a LinkedIn profile page
    pub fn is_linkedin_profile_url(url: &str) -> bool {
        LINKEDIN_PROFILE_REGEX.is_match(url)
    }

    /// Canonical URL cached during relevance testing, if any
    pub fn cached_profile(&self) -> Option<&ProfileIdentifier> {
        self.real_url.get()
    }

    fn profile_url(&self, url: &str) -> Option<String> {
        if let Some(cached) = self.real_url.get() {
            return Some(cached.to_string());
        }
        canonicalize_profile_url(url)
            .map(ProfileIdentifier::into_string)
            .or_else(|| Some(strip_protocol(url)).filter(|s| !s.is_empty()))
    }
}

#[async_trait]
impl PageParser for LinkedInParser {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn supported_fields(&self) -> &'static [ProfileField] {
        SUPPORTED_FIELDS
    }

    fn is_relevant_page(&self, url: &str) -> bool {
        let detected = Self::is_linkedin_profile_url(url);
        if detected && self.real_url.get().is_none() {
            if let Some(canonical) = canonicalize_profile_url(url) {
                debug!("Caching LinkedIn profile URL {}", canonical);
                let _ = self.real_url.set(canonical);
            }
        }
        detected
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

        let Some(target) = url
            .map(str::to_string)
            .or_else(|| self.real_url.get().map(ToString::to_string))
            .or_else(|| document.location())
        else {
            return Ok(None);
        };

        if !self.is_relevant_page(&target) {
            return Ok(None);
        }

        let value = match field {
            ProfileField::Profile => self.profile_url(&target),
            ProfileField::Name => self.name_selectors.first_text(document),
            ProfileField::Title => self.title_selectors.first_text(document),
            ProfileField::Org => self.org_selectors.first_text(document),
            ProfileField::Location => self.location_selectors.first_text(document),
            ProfileField::Handle | ProfileField::Bio => None,
        };

        Ok(value)
    }
}
