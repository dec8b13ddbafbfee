//! Contact draft the sidebar form edits
//!
//! Parsed records are merged in explicitly: page data only fills fields the
//! user (or a stored mark) has not already filled. Email and phone are single
//! values.

use crate::domain::profile::NormalizedRecord;
use crate::infrastructure::parsing::patterns::{first_email, first_phone};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDraft {
    pub id: Option<String>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub org: Option<String>,
    pub www: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    #[serde(rename = "on_x")]
    pub on_x: Option<String>,
    #[serde(default)]
    pub outreach_count: u32,
    pub last_contact: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    #[serde(default)]
    pub has_replied: bool,
}

fn fill(slot: &mut Option<String>, value: Option<&str>) {
    if slot.as_deref().is_none_or(str::is_empty) {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            *slot = Some(value.to_string());
        }
    }
}

impl ContactDraft {
    /// Fill empty fields from a parsed page record
    ///
    /// The profile identifier lands in `linkedin` or `on_x` depending on its
    /// host. Email and phone are lifted from the bio when still empty.
    pub fn merge_page_data(&mut self, record: &NormalizedRecord) {
        fill(&mut self.name, record.name.as_deref());
        fill(&mut self.org, record.org.as_deref());
        fill(&mut self.title, record.title.as_deref());
        fill(&mut self.location, record.location.as_deref());

        if let Some(profile) = record.profile.as_deref() {
            if profile.starts_with("linkedin.com/") {
                fill(&mut self.linkedin, Some(profile));
            } else if profile.starts_with("x.com/") || profile.starts_with("twitter.com/") {
                fill(&mut self.on_x, Some(profile));
            }
        }

        if let Some(bio) = record.bio.as_deref() {
            fill(&mut self.email, first_email(bio).as_deref());
            fill(&mut self.phone, first_phone(bio).as_deref());
        }

        if self.outreach_count == 0 {
            self.outreach_count = record.outreach_count.unwrap_or(0);
        }
    }

    /// Notes block: one `key=value` line per filled field, name and email excluded
    pub fn compose_notes(&self) -> String {
        let mut notes = Vec::new();
        let fields = [
            ("org", &self.org),
            ("title", &self.title),
            ("www", &self.www),
            ("linkedin", &self.linkedin),
            ("on_x", &self.on_x),
            ("location", &self.location),
            ("phone", &self.phone),
        ];
        for (key, value) in fields {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                notes.push(format!("{key}={value}"));
            }
        }

        if self.outreach_count > 0 {
            notes.push(format!("outreachCount={}", self.outreach_count));
        }
        if self.has_replied {
            notes.push("hasReplied=true".to_string());
        }
        if let Some(last_contact) = self.last_contact {
            let local = last_contact.with_timezone(&Local);
            notes.push(format!("lastContact={}", local.format("%b %-d, %Y %-I:%M %p")));
        }

        notes.join("\n")
    }

    /// Name as stored by the marks backend
    pub fn storage_name(&self) -> Option<String> {
        self.name
            .as_deref()
            .map(normalize_name)
            .filter(|n| !n.is_empty())
    }
}

/// `"  Jane   Doe "` → `"jane#doe"`
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("#")
}

/// `"jane#doe"` → `"Jane Doe"`
pub fn denormalize_name(normalized: &str) -> String {
    normalized
        .replace('#', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn linkedin_record() -> NormalizedRecord {
        NormalizedRecord {
            profile: Some("linkedin.com/in/jane-doe".to_string()),
            name: Some("Jane Doe".to_string()),
            org: Some("Acme Corp".to_string()),
            ..NormalizedRecord::default()
        }
    }

    #[test]
    fn test_merge_only_fills_empty_fields() {
        let mut draft = ContactDraft {
            org: Some("Existing Org".to_string()),
            ..ContactDraft::default()
        };

        draft.merge_page_data(&linkedin_record());

        assert_eq!(draft.name.as_deref(), Some("Jane Doe"));
        assert_eq!(draft.org.as_deref(), Some("Existing Org"));
        assert_eq!(draft.linkedin.as_deref(), Some("linkedin.com/in/jane-doe"));
        assert_eq!(draft.on_x, None);
    }

    #[test]
    fn test_merge_x_profile_and_bio_contacts() {
        let record = NormalizedRecord {
            profile: Some("x.com/jdoe".to_string()),
            handle: Some("jdoe".to_string()),
            bio: Some("DMs open. jane@example.org | 555.123.4567".to_string()),
            ..NormalizedRecord::default()
        };
        let mut draft = ContactDraft::default();

        draft.merge_page_data(&record);

        assert_eq!(draft.on_x.as_deref(), Some("x.com/jdoe"));
        assert_eq!(draft.email.as_deref(), Some("jane@example.org"));
        assert_eq!(draft.phone.as_deref(), Some("555.123.4567"));
    }

    #[test]
    fn test_empty_record_leaves_draft_unchanged() {
        let mut draft = ContactDraft {
            name: Some("Kept".to_string()),
            ..ContactDraft::default()
        };
        let before = draft.clone();

        draft.merge_page_data(&NormalizedRecord::default());

        assert_eq!(draft, before);
    }

    #[test]
    fn test_compose_notes() {
        let draft = ContactDraft {
            name: Some("Jane Doe".to_string()),
            email: Some("jane@example.org".to_string()),
            org: Some("Acme".to_string()),
            phone: Some("555-123-4567".to_string()),
            outreach_count: 2,
            has_replied: true,
            ..ContactDraft::default()
        };

        assert_eq!(
            draft.compose_notes(),
            "org=Acme\nphone=555-123-4567\noutreachCount=2\nhasReplied=true"
        );
    }

    #[test]
    fn test_compose_notes_formats_last_contact() {
        let draft = ContactDraft {
            last_contact: Some(Utc.with_ymd_and_hms(2025, 8, 15, 4, 30, 0).unwrap()),
            ..ContactDraft::default()
        };

        let notes = draft.compose_notes();
        assert!(notes.starts_with("lastContact="));
        assert!(notes.contains("2025"));
    }

    #[test]
    fn test_name_normalization() {
        assert_eq!(normalize_name("  Jane   Doe "), "jane#doe");
        assert_eq!(denormalize_name("jane#doe"), "Jane Doe");
        assert_eq!(denormalize_name(""), "");

        let draft = ContactDraft {
            name: Some("Ada Lovelace".to_string()),
            ..ContactDraft::default()
        };
        assert_eq!(draft.storage_name().as_deref(), Some("ada#lovelace"));
    }

    #[test]
    fn test_draft_json_uses_sidebar_keys() {
        let json = serde_json::to_value(ContactDraft::default()).unwrap();
        assert!(json.get("outreachCount").is_some());
        assert!(json.get("on_x").is_some());
        assert!(json.get("hasReplied").is_some());
    }
}
