//! Infrastructure layer for documents, readiness, parsing, and configuration

pub mod config;
pub mod document;
pub mod logging;
pub mod parsing;
pub mod parsing_error;
pub mod readiness;

// Re-export commonly used items
pub use config::{AppConfig, ConfigManager, LoggingConfig};
pub use document::{DocumentId, LiveDocument, PageDocument};
pub use logging::{flush_logs, get_log_directory, init_logging, init_logging_with_config};
pub use parsing::{
    LinkedInParser, PageParser, ParseRequestRouter, ParserRegistration, ParsingConfig,
    ParsingError, ParsingResult, XParser,
};
pub use readiness::{Detection, ReadinessToken, WaitOptions, wait_for_element};
