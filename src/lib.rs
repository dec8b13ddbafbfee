//! LeedzEx - profile page parsing core
//!
//! Extracts structured profile fields from professional network and
//! microblog pages that render asynchronously, and hands them to the sidebar
//! as one uniform record.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{ContactDraft, ParseRequest, ParseRequestHandler, ParseResponse};
pub use domain::{NormalizedRecord, ProfileField, ProfileIdentifier};
pub use infrastructure::{
    LiveDocument, PageDocument, PageParser, ParseRequestRouter, ParsingConfig, ParsingError,
    ParsingResult, ReadinessToken, WaitOptions, wait_for_element,
};
