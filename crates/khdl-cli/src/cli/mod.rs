//! CLI for the khdl soundtrack album downloader.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use khdl_core::config;
use std::path::PathBuf;

use commands::{run_download, show_config};

/// Top-level CLI. Without a subcommand, behaves like `khdl download`.
#[derive(Debug, Parser)]
#[command(name = "khdl")]
#[command(about = "Download soundtrack albums from downloads.khinsider.com", long_about = None)]
pub struct Cli {
    /// Log at debug level (RUST_LOG still takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download one or more albums.
    #[command(visible_alias = "dl")]
    Download(DownloadArgs),

    /// Print the config file path and the effective settings.
    Config,
}

#[derive(Debug, Clone, Default, Args)]
pub struct DownloadArgs {
    /// Album page URLs. If none are given, the input file is read, or you are prompted.
    pub urls: Vec<String>,

    /// File with one album URL per line (default from config: inputs.txt).
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Root output directory (default from config: downloads).
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match self.command {
            Some(CliCommand::Config) => show_config(&cfg)?,
            Some(CliCommand::Download(args)) => run_download(&mut cfg, args).await?,
            None => run_download(&mut cfg, DownloadArgs::default()).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
