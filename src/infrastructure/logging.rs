//! Logging system configuration and initialization
//!
//! - Console output on stderr so stdout stays free for command results
//! - Optional non-blocking file output, plain or JSON
//! - `RUST_LOG` overrides the configured filter
//! - Old log files beyond `max_files` are removed on startup

#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use chrono::Local;
use lazy_static::lazy_static;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{info, warn};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{self, time::FormatTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

pub use crate::infrastructure::config::LoggingConfig;

// Keeps the file writer alive for the life of the process
lazy_static! {
    static ref LOG_GUARDS: Mutex<Vec<tracing_appender::non_blocking::WorkerGuard>> =
        Mutex::new(Vec::new());
}

/// Local wall-clock timestamps with milliseconds
struct LocalTimeFormatter;

impl FormatTime for LocalTimeFormatter {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S%.3f %z"))
    }
}

/// Get the log directory relative to the executable location
pub fn get_log_directory() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    exe_dir.join("logs")
}

/// Initialize the logging system with default configuration
pub fn init_logging() -> Result<()> {
    init_logging_with_config(&LoggingConfig::default())
}

/// Build the filter from configuration unless `RUST_LOG` is set
pub fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let mut filter = EnvFilter::new(&config.level);

        if !config.level.eq_ignore_ascii_case("trace") {
            for (module, level) in &config.module_filters {
                match format!("{}={}", module, level).parse() {
                    Ok(directive) => filter = filter.add_directive(directive),
                    Err(e) => eprintln!("Ignoring log filter {}={}: {}", module, level, e),
                }
            }
        }

        filter
    })
}

/// Initialize logging with custom configuration
pub fn init_logging_with_config(config: &LoggingConfig) -> Result<()> {
    init_logging_in(config, &get_log_directory())
}

/// Initialize logging, writing log files (when enabled) under `log_dir`
pub fn init_logging_in(config: &LoggingConfig, log_dir: &Path) -> Result<()> {
    let console_layer = config.console_output.then(|| {
        fmt::Layer::new()
            .with_writer(std::io::stderr)
            .with_timer(LocalTimeFormatter)
            .with_target(false)
    });

    if !config.file_output && console_layer.is_none() {
        return Err(anyhow!("No logging output configured"));
    }

    let registry = Registry::default()
        .with(build_env_filter(config))
        .with(console_layer);

    if config.file_output {
        std::fs::create_dir_all(log_dir)
            .map_err(|e| anyhow!("Failed to create log directory {:?}: {}", log_dir, e))?;

        if config.auto_cleanup_logs {
            cleanup_old_logs(log_dir, config.max_files)?;
        }

        let file_appender = rolling::never(log_dir, &config.file_name);
        let (file_writer, file_guard) = non_blocking(file_appender);
        LOG_GUARDS
            .lock()
            .map_err(|_| anyhow!("Log guard registry poisoned"))?
            .push(file_guard);

        if config.json_format {
            let file_layer = fmt::Layer::new()
                .json()
                .with_writer(file_writer)
                .with_timer(LocalTimeFormatter)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false);
            registry.with(file_layer).try_init()?;
        } else {
            let file_layer = fmt::Layer::new()
                .with_writer(file_writer)
                .with_timer(LocalTimeFormatter)
                .with_target(false)
                .with_ansi(false);
            registry.with(file_layer).try_init()?;
        }

        info!("Log directory: {:?}", log_dir);
    } else {
        registry.try_init()?;
    }

    info!("Logging system initialized");
    info!("Log level: {}", config.level);
    info!("File output: {}", config.file_output);
    Ok(())
}

/// Flush and release the file writers
///
/// Statics are never dropped, so call this before the process exits.
pub fn flush_logs() -> usize {
    LOG_GUARDS
        .lock()
        .map(|mut guards| guards.drain(..).count())
        .unwrap_or(0)
}

/// Remove the oldest `.log` files so at most `max_files` remain
pub fn cleanup_old_logs(log_dir: &Path, max_files: u32) -> Result<usize> {
    if !log_dir.exists() {
        return Ok(0);
    }

    let mut log_files = Vec::new();
    for entry in std::fs::read_dir(log_dir)? {
        let entry = entry?;
        let path = entry.path();
        let is_log = path.extension().and_then(|ext| ext.to_str()) == Some("log");
        if path.is_file() && is_log {
            if let Ok(modified) = entry.metadata().and_then(|m| m.modified()) {
                log_files.push((path, modified));
            }
        }
    }

    // Newest first
    log_files.sort_by(|a, b| b.1.cmp(&a.1));

    let keep = max_files as usize;
    let mut removed = 0;
    for (path, _) in log_files.iter().skip(keep) {
        if let Err(e) = std::fs::remove_file(path) {
            warn!("Failed to remove old log file {:?}: {}", path, e);
        } else {
            removed += 1;
        }
    }

    if removed > 0 {
        info!("Removed {} old log files (keeping {})", removed, keep);
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(!config.level.is_empty());
        assert!(config.console_output);
        assert!(!config.file_output);
    }

    #[test]
    fn test_log_directory_is_deterministic() {
        let log_dir = get_log_directory();
        assert!(log_dir.to_string_lossy().ends_with("logs"));
    }

    #[test]
    fn test_file_output_writes_into_log_dir() {
        let dir = TempDir::new().unwrap();
        let config = LoggingConfig {
            level: "debug".to_string(),
            console_output: false,
            file_output: true,
            ..LoggingConfig::default()
        };

        init_logging_in(&config, dir.path()).unwrap();
        tracing::error!("file sink check");
        assert!(init_logging_in(&config, dir.path()).is_err());

        assert!(flush_logs() >= 1);
        assert_eq!(flush_logs(), 0);

        let written = std::fs::read_to_string(dir.path().join(&config.file_name)).unwrap();
        assert!(written.contains("file sink check"));
    }

    #[test]
    fn test_no_output_is_rejected() {
        let config = LoggingConfig {
            console_output: false,
            file_output: false,
            ..LoggingConfig::default()
        };
        assert!(init_logging_in(&config, Path::new("unused")).is_err());
    }

    #[test]
    fn test_cleanup_keeps_newest_files() {
        let dir = TempDir::new().unwrap();
        let now = SystemTime::now();
        for (i, name) in ["a.log", "b.log", "c.log"].iter().enumerate() {
            let path = dir.path().join(name);
            std::fs::write(&path, "x").unwrap();
            let file = std::fs::File::options().write(true).open(&path).unwrap();
            file.set_modified(now - Duration::from_secs(60 * (3 - i as u64)))
                .unwrap();
        }
        std::fs::write(dir.path().join("notes.txt"), "keep").unwrap();

        let removed = cleanup_old_logs(dir.path(), 2).unwrap();

        assert_eq!(removed, 1);
        assert!(!dir.path().join("a.log").exists());
        assert!(dir.path().join("c.log").exists());
        assert!(dir.path().join("notes.txt").exists());
    }
}
