//! LeedzEx command line entry point
//!
//! Parses a saved profile page the way the sidebar would and prints the
//! response envelope as JSON on stdout. Logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use leedz_ex_lib::application::{ContactDraft, FixedTab, ParseRequest, ParseRequestHandler};
use leedz_ex_lib::infrastructure::{
    ConfigManager, LiveDocument, ParseRequestRouter, flush_logs, init_logging_with_config,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "leedz-ex")]
#[command(about = "Extract contact fields from saved profile pages")]
#[command(version)]
struct Cli {
    /// Configuration file path (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a saved page
    Parse {
        /// URL the page was loaded from
        #[arg(short, long)]
        url: String,

        /// Path to the saved HTML
        #[arg(long)]
        html: PathBuf,

        /// Override the readiness timeout
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Print the merged contact draft instead of the raw response
        #[arg(long)]
        draft: bool,
    },

    /// Print the effective configuration
    ShowConfig,

    /// Overwrite the configuration file with defaults
    ResetConfig,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let outcome = run(Cli::parse()).await;
    flush_logs();
    outcome
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let manager = match cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new()?,
    };
    let mut config = manager.load_config().await?;
    init_logging_with_config(&config.logging)?;

    match cli.command {
        Commands::Parse {
            url,
            html,
            timeout_ms,
            draft,
        } => {
            if let Some(timeout_ms) = timeout_ms {
                config.parsing.readiness.timeout_ms = timeout_ms;
            }

            let content = tokio::fs::read_to_string(&html)
                .await
                .with_context(|| format!("Failed to read {}", html.display()))?;
            let document = LiveDocument::new(Some(&url), content);
            debug!("Loaded {} bytes from {:?}", document.html().len(), html);

            let handler = ParseRequestHandler::new(
                ParseRequestRouter::new(config.parsing),
                FixedTab::url(url),
            );
            let cancel = CancellationToken::new();
            let on_interrupt = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("Interrupted, cancelling parse");
                    on_interrupt.cancel();
                }
            });

            let response = handler
                .handle(&document, &ParseRequest::default(), &cancel)
                .await;

            if draft {
                let mut contact = ContactDraft::default();
                if let Some(record) = &response.data {
                    contact.merge_page_data(record);
                }
                contact.notes = Some(contact.compose_notes()).filter(|n| !n.is_empty());
                println!("{}", serde_json::to_string_pretty(&contact)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&response)?);
            }

            if !response.ok {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::ShowConfig => {
            info!("Configuration file: {:?}", manager.config_path());
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::ResetConfig => {
            let config = manager.reset_to_defaults().await?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}
