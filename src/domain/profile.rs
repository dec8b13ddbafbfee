//! Profile record types shared by every page parser
//!
//! `NormalizedRecord` is the only shape callers ever see, whatever site the
//! page came from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Semantic field a page parser can populate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileField {
    Profile,
    Name,
    Title,
    Org,
    Location,
    Handle,
    Bio,
}

impl ProfileField {
    pub const ALL: [Self; 7] = [
        Self::Profile,
        Self::Name,
        Self::Title,
        Self::Org,
        Self::Location,
        Self::Handle,
        Self::Bio,
    ];

    /// Wire key used by the sidebar
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Name => "name",
            Self::Title => "title",
            Self::Org => "org",
            Self::Location => "location",
            Self::Handle => "handle",
            Self::Bio => "bio",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileField {
    type Err = UnknownFieldKey;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(key.trim()))
            .ok_or_else(|| UnknownFieldKey(key.to_string()))
    }
}

/// A field key outside the closed `ProfileField` set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown profile field key '{0}'")]
pub struct UnknownFieldKey(pub String);

/// Uniform output of any page parser
///
/// Every key is always serialized; fields the matched parser does not
/// support are `null`, never missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub profile: Option<String>,
    pub name: Option<String>,
    pub org: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "outreachCount")]
    pub outreach_count: Option<u32>,
    pub handle: Option<String>,
    pub bio: Option<String>,
}

impl NormalizedRecord {
    /// Read a field by its semantic name
    pub fn get(&self, field: ProfileField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Store a value, mapping empty strings to `None`
    pub fn set(&mut self, field: ProfileField, value: Option<String>) {
        *self.slot_mut(field) = value.filter(|v| !v.is_empty());
    }

    /// Fields currently holding a value, in `ProfileField::ALL` order
    pub fn populated_fields(&self) -> Vec<ProfileField> {
        ProfileField::ALL
            .into_iter()
            .filter(|field| self.slot(*field).is_some())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.populated_fields().is_empty() && self.outreach_count.is_none()
    }

    fn slot(&self, field: ProfileField) -> &Option<String> {
        match field {
            ProfileField::Profile => &self.profile,
            ProfileField::Name => &self.name,
            ProfileField::Title => &self.title,
            ProfileField::Org => &self.org,
            ProfileField::Location => &self.location,
            ProfileField::Handle => &self.handle,
            ProfileField::Bio => &self.bio,
        }
    }

    fn slot_mut(&mut self, field: ProfileField) -> &mut Option<String> {
        match field {
            ProfileField::Profile => &mut self.profile,
            ProfileField::Name => &mut self.name,
            ProfileField::Title => &mut self.title,
            ProfileField::Org => &mut self.org,
            ProfileField::Location => &mut self.location,
            ProfileField::Handle => &mut self.handle,
            ProfileField::Bio => &mut self.bio,
        }
    }
}

/// Canonical profile URL: no protocol, no `www.`, no trailing slash
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileIdentifier(String);

impl ProfileIdentifier {
    pub(crate) fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment, e.g. the handle of `x.com/jdoe`
    pub fn last_segment(&self) -> Option<&str> {
        self.0.rsplit('/').next().filter(|s| !s.is_empty())
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ProfileIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
