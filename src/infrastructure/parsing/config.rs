//! Parsing configuration for profile extraction
//!
//! Centralized readiness timing and CSS selectors per site.

use crate::infrastructure::config::defaults;
use crate::infrastructure::readiness::WaitOptions;
use serde::{Deserialize, Serialize};

/// Main parsing configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// Readiness wait bounds shared by every parser
    pub readiness: ReadinessConfig,

    /// Professional network profile selectors
    pub linkedin: LinkedInSelectors,

    /// Microblog profile selectors
    pub x: XSelectors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadinessConfig {
    /// Hard deadline for the anchor element
    pub timeout_ms: u64,

    /// Fallback poll interval
    pub poll_interval_ms: u64,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            timeout_ms: defaults::READINESS_TIMEOUT_MS,
            poll_interval_ms: defaults::READINESS_POLL_INTERVAL_MS,
        }
    }
}

impl ReadinessConfig {
    pub const fn wait_options(&self) -> WaitOptions {
        WaitOptions::from_millis(self.timeout_ms, self.poll_interval_ms)
    }
}

/// CSS selectors for professional network profile pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkedInSelectors {
    /// Element whose presence means the profile has rendered
    pub ready_anchor: String,

    pub name: Vec<String>,
    pub title: Vec<String>,
    pub org: Vec<String>,
    pub location: Vec<String>,
}

impl Default for LinkedInSelectors {
    fn default() -> Self {
        Self {
            ready_anchor: "h1".to_string(),
            name: vec!["h1".to_string()],
            title: vec![
                "[data-field=\"headline\"]".to_string(),
                ".pv-top-card-section__headline".to_string(),
                ".profile-overview-card__headline".to_string(),
                ".pv-text-details__left-panel .text-body-medium".to_string(),
            ],
            org: vec![
                ".pv-top-card-v2-section__company-name".to_string(),
                ".profile-overview-card__company-name".to_string(),
                "[data-field=\"experience_company_logo\"] span[aria-hidden=\"true\"]".to_string(),
            ],
            location: vec![
                ".pv-top-card-section__location".to_string(),
                ".profile-overview-card__location".to_string(),
                ".pv-text-details__left-panel .text-body-small.inline".to_string(),
            ],
        }
    }
}

/// CSS selectors for microblog profile pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XSelectors {
    pub ready_anchor: String,

    pub name: Vec<String>,
    pub bio: Vec<String>,

    /// Where to find the canonical profile URL when the live one is unusable
    pub canonical_link: Vec<String>,
}

impl Default for XSelectors {
    fn default() -> Self {
        Self {
            ready_anchor: "main".to_string(),
            name: vec![
                "[data-testid=\"UserName\"]".to_string(),
                "[data-testid=\"UserProfileHeader-Name\"]".to_string(),
            ],
            bio: vec![
                "[data-testid=\"UserDescription\"]".to_string(),
                "[data-testid=\"UserProfileHeader-bio\"]".to_string(),
            ],
            canonical_link: vec!["link[rel=\"canonical\"]".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_readiness_timing() {
        let options = ParsingConfig::default().readiness.wait_options();
        assert_eq!(options.timeout, Duration::from_millis(15_000));
        assert_eq!(options.poll_interval, Duration::from_millis(120));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: ParsingConfig =
            serde_json::from_str(r#"{ "readiness": { "timeout_ms": 500 } }"#).unwrap();

        assert_eq!(config.readiness.timeout_ms, 500);
        assert_eq!(config.readiness.poll_interval_ms, 120);
        assert_eq!(config.linkedin, LinkedInSelectors::default());
    }
}
