//! Regex patterns shared by every page parser
//!
//! Compiled once and handed to each variant instead of living on a common
//! base type.

#![allow(clippy::unwrap_used)]

use once_cell::sync::Lazy;
use regex::Regex;

/// North-American style phone numbers, e.g. `(555) 123-4567`
pub static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(?\d{3}\)?[\s.\-]?\d{3}[\s.\-]?\d{4}").unwrap());

pub static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap());

/// Leading protocol and `www.` prefix
pub static PROTOCOL_WWW_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:https?://)?(?:www\.)?").unwrap());

/// LinkedIn profile route marker
pub static LINKEDIN_PROFILE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)linkedin\.com/in/").unwrap());

/// X/Twitter handle occupying the whole first path segment
pub static X_HANDLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:https?://)?(?:www\.|mobile\.)?(?:x\.com|twitter\.com)/([a-z0-9_-]{4,15})(?:[/?#]|$)")
        .unwrap()
});

/// X/Twitter routes that look like handles but are system pages
pub const RESERVED_PATHS: &[&str] = &[
    "home",
    "explore",
    "notifications",
    "messages",
    "search",
    "settings",
    "i",
    "compose",
    "admin",
    "help",
    "about",
    "privacy",
    "terms",
    "downloads",
    "bookmarks",
    "lists",
    "topics",
    "moments",
];

pub fn is_reserved_path(segment: &str) -> bool {
    RESERVED_PATHS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(segment))
}

pub fn first_email(text: &str) -> Option<String> {
    EMAIL_REGEX.find(text).map(|m| m.as_str().to_string())
}

pub fn first_phone(text: &str) -> Option<String> {
    PHONE_REGEX.find(text).map(|m| m.as_str().to_string())
}
