//! CLI for covercheck, the book-cover URL validator.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use covercheck_core::config::{self, CoverConfig};
use covercheck_core::BatchStrategy;
use std::path::PathBuf;

use commands::{run_audit, run_check, run_config, run_sniff, AuditOptions};

/// Top-level CLI for covercheck.
#[derive(Debug, Parser)]
#[command(name = "covercheck")]
#[command(about = "covercheck: validate remote cover-image URLs with HEAD and ranged GET", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Probe one or more cover URLs and print a verdict for each.
    Check {
        /// HTTP/HTTPS cover URLs.
        #[arg(required = true)]
        urls: Vec<String>,

        #[command(flatten)]
        probe: ProbeArgs,
    },

    /// Check every candidate in a JSON file of `{"id", "url"}` objects.
    Audit {
        /// Path to the JSON array of candidates.
        path: PathBuf,

        /// Print the full result as JSON instead of a report.
        #[arg(long)]
        json: bool,

        /// Write the candidates that passed to this file, in input order.
        #[arg(long, value_name = "OUT")]
        keep: Option<PathBuf>,

        /// How many invalid covers to list in the report.
        #[arg(long, default_value = "10", value_name = "N")]
        show: usize,

        #[command(flatten)]
        probe: ProbeArgs,
    },

    /// Read the header of a local image file and print format and dimensions.
    Sniff {
        /// Path to the image file.
        path: PathBuf,
    },

    /// Print the effective configuration as TOML.
    Config,
}

/// Per-invocation overrides on top of the config file and `COVER_*` env vars.
#[derive(Debug, Clone, Default, Args)]
pub struct ProbeArgs {
    /// Maximum probes in flight.
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Timeout for each HEAD and each GET, in milliseconds.
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Minimum body size in bytes.
    #[arg(long, value_name = "BYTES")]
    pub min_bytes: Option<u64>,

    /// Minimum width and height in pixels.
    #[arg(long, value_name = "PX")]
    pub min_dimension: Option<u32>,

    /// Prefix window fetched by the ranged GET.
    #[arg(long, value_name = "BYTES")]
    pub probe_bytes: Option<u64>,

    /// Batch scheduling: pool or chunked.
    #[arg(long, value_name = "STRATEGY")]
    pub strategy: Option<BatchStrategy>,
}

impl ProbeArgs {
    pub fn apply(&self, cfg: &mut CoverConfig) {
        if let Some(v) = self.concurrency {
            cfg.concurrency = v;
        }
        if let Some(v) = self.timeout_ms {
            cfg.timeout_ms = v;
        }
        if let Some(v) = self.min_bytes {
            cfg.min_bytes = v;
        }
        if let Some(v) = self.min_dimension {
            cfg.min_dimension_px = v;
        }
        if let Some(v) = self.probe_bytes {
            cfg.probe_bytes = v;
        }
        if let Some(v) = self.strategy {
            cfg.strategy = v;
        }
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Check { urls, probe } => {
                probe.apply(&mut cfg);
                run_check(&cfg, &urls).await?;
            }
            CliCommand::Audit {
                path,
                json,
                keep,
                show,
                probe,
            } => {
                probe.apply(&mut cfg);
                let opts = AuditOptions {
                    path,
                    json,
                    keep,
                    show,
                };
                run_audit(&cfg, &opts).await?;
            }
            CliCommand::Sniff { path } => run_sniff(&cfg, &path)?,
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
