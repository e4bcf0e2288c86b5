//! CLI for the cdl concurrent downloader.

mod commands;

use anyhow::Result;
use cdl_core::config::{self, CdlConfig};
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_download, run_help, run_test};

/// Top-level CLI for cdl.
#[derive(Debug, Parser)]
#[command(name = "cdl")]
#[command(about = "cdl: download a file over HTTP, in parallel byte ranges when the server allows it", long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Show usage, or the description of one command.
    Help {
        /// Command to describe.
        command: Option<String>,
    },

    /// Test if the server supports partial (byte-range) requests.
    Test {
        /// Direct HTTP/HTTPS URL to probe.
        url: String,
    },

    /// Download a file from a URL.
    Download {
        /// Direct HTTP/HTTPS URL to download.
        url: String,
        /// Directory to save into (default: current directory).
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
        /// Number of parallel byte ranges (overrides config).
        #[arg(long, value_name = "N")]
        segments: Option<usize>,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = match Cli::try_parse() {
            Ok(cli) => cli,
            Err(err) => match unknown_command_name(&err) {
                Some(name) => {
                    println!("The command {} doesn't exist", name);
                    return Ok(());
                }
                None => err.exit(),
            },
        };

        match cli.command {
            None => run_help(None),
            Some(CliCommand::Help { command }) => run_help(command.as_deref()),
            Some(CliCommand::Test { url }) => {
                let cfg = load_config(None)?;
                run_test(&cfg, &url).await?;
            }
            Some(CliCommand::Download {
                url,
                output_dir,
                segments,
            }) => {
                let cfg = load_config(segments)?;
                let output_dir = match output_dir {
                    Some(dir) => dir,
                    None => std::env::current_dir()?,
                };
                run_download(&cfg, &url, &output_dir).await?;
            }
        }

        Ok(())
    }
}

/// Config file values with command-line overrides applied.
fn load_config(segments: Option<usize>) -> Result<CdlConfig> {
    let mut cfg = config::load_or_init()?;
    if let Some(n) = segments {
        cfg.segments = n;
    }
    cfg.validate()?;
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(cfg)
}

/// Name of the unrecognized command, if that is what the parse error is about.
pub(crate) fn unknown_command_name(err: &clap::Error) -> Option<String> {
    if err.kind() != ErrorKind::InvalidSubcommand {
        return None;
    }
    match err.get(ContextKind::InvalidSubcommand) {
        Some(ContextValue::String(name)) => Some(name.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
