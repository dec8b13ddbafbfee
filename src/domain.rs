//! Domain module - profile records and identifiers
//!
//! Types here carry no parsing logic; every site parser produces them.

pub mod profile;

pub use profile::{NormalizedRecord, ProfileField, ProfileIdentifier, UnknownFieldKey};
