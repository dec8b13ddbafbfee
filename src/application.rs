//! Application layer module
//!
//! Request handling for the sidebar relay and the contact draft the parsed
//! records are merged into.

pub mod contact_draft;
pub mod parse_request_handler;

pub use contact_draft::{ContactDraft, denormalize_name, normalize_name};
pub use parse_request_handler::{
    FixedTab, ParseFailure, ParseRequest, ParseRequestHandler, ParseResponse, TabInfo,
    TabUrlProvider,
};
