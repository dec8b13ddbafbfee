//! Profile URL canonicalization
//!
//! Canonical form: host without `www.`, lower-cased, followed by the path
//! without a trailing slash. Protocol, query, and fragment are dropped.

use super::patterns::{PROTOCOL_WWW_REGEX, X_HANDLE_REGEX, is_reserved_path};
use crate::domain::profile::ProfileIdentifier;
use url::Url;

/// Canonicalize any profile URL, with or without a scheme
pub fn canonicalize_profile_url(raw: &str) -> Option<ProfileIdentifier> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let absolute = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    let parsed = Url::parse(&absolute).ok()?;

    let host = parsed.host_str()?.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    let path = parsed.path().trim_end_matches('/');

    Some(ProfileIdentifier::new(format!("{host}{path}")))
}

/// Strip only the protocol and `www.` prefix, keeping the rest verbatim
pub fn strip_protocol(raw: &str) -> String {
    PROTOCOL_WWW_REGEX.replace(raw.trim(), "").into_owned()
}

/// Handle of a microblog profile URL, if the URL is a non-reserved profile
pub fn x_handle(raw: &str) -> Option<String> {
    let caps = X_HANDLE_REGEX.captures(raw.trim())?;
    let handle = caps.get(1)?.as_str();
    (!is_reserved_path(handle)).then(|| handle.to_ascii_lowercase())
}

/// Canonical `x.com/<handle>` identifier for a microblog profile URL
pub fn canonicalize_x_profile(raw: &str) -> Option<ProfileIdentifier> {
    x_handle(raw).map(|handle| ProfileIdentifier::new(format!("x.com/{handle}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://www.linkedin.com/in/jane-doe/")]
    #[case("http://linkedin.com/in/jane-doe")]
    #[case("www.linkedin.com/in/jane-doe/")]
    #[case("linkedin.com/in/jane-doe")]
    #[case("https://WWW.LinkedIn.com/in/jane-doe?trk=public#about")]
    fn test_linkedin_variants_share_identifier(#[case] url: &str) {
        assert_eq!(
            canonicalize_profile_url(url).unwrap().as_str(),
            "linkedin.com/in/jane-doe"
        );
    }

    #[rstest]
    #[case("https://x.com/JDoe", Some("x.com/jdoe"))]
    #[case("https://www.twitter.com/jdoe/", Some("x.com/jdoe"))]
    #[case("x.com/jdoe/status/12345", Some("x.com/jdoe"))]
    #[case("https://x.com/settings", None)]
    #[case("https://x.com/Explore", None)]
    #[case("https://x.com/abc", None)]
    #[case("https://example.com/jdoe", None)]
    fn test_x_canonicalization(#[case] url: &str, #[case] expected: Option<&str>) {
        assert_eq!(
            canonicalize_x_profile(url).as_ref().map(ProfileIdentifier::as_str),
            expected
        );
    }

    #[test]
    fn test_empty_or_hostless_input() {
        assert!(canonicalize_profile_url("   ").is_none());
        assert!(canonicalize_profile_url("https://").is_none());
    }

    #[test]
    fn test_strip_protocol_keeps_path() {
        assert_eq!(
            strip_protocol("https://www.linkedin.com/in/jane/"),
            "linkedin.com/in/jane/"
        );
    }

    proptest! {
        #[test]
        fn prop_protocol_www_and_slash_do_not_matter(
            slug in "[a-z0-9][a-z0-9-]{0,30}",
            https in any::<bool>(),
            www in any::<bool>(),
            slash in any::<bool>(),
        ) {
            let url = format!(
                "{}{}linkedin.com/in/{}{}",
                if https { "https://" } else { "http://" },
                if www { "www." } else { "" },
                slug,
                if slash { "/" } else { "" },
            );
            let id = canonicalize_profile_url(&url).unwrap();
            prop_assert_eq!(id.as_str(), format!("linkedin.com/in/{slug}"));
        }

        #[test]
        fn prop_x_identifier_ignores_protocol_and_www(
            handle in "[a-z0-9_]{4,15}",
            https in any::<bool>(),
            www in any::<bool>(),
            slash in any::<bool>(),
        ) {
            prop_assume!(!is_reserved_path(&handle));
            let url = format!(
                "{}{}x.com/{}{}",
                if https { "https://" } else { "http://" },
                if www { "www." } else { "" },
                handle,
                if slash { "/" } else { "" },
            );
            let id = canonicalize_x_profile(&url).unwrap();
            prop_assert_eq!(id.as_str(), format!("x.com/{handle}"));
        }
    }
}
