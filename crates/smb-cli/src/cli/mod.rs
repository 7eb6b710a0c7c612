//! CLI for the SMB sitemap builder.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use smb_core::config::{self, SmbConfig};
use smb_core::BuilderConfig;
use std::path::PathBuf;
use std::time::Duration;

use commands::{run_build, run_config, run_inspect, run_ping};

/// Top-level CLI for the SMB sitemap builder.
#[derive(Debug, Parser)]
#[command(name = "smb")]
#[command(about = "SMB: partitioned XML sitemap and sitemap index builder", long_about = None)]
pub struct Cli {
    /// Print timestamped progress lines (files created, compressed, pings) to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Where the documents go and how they are named. Unset flags fall back to config.toml.
#[derive(Debug, Clone, Default, Args)]
pub struct TargetArgs {
    /// Base URL used in generated links (e.g. https://example.com).
    #[arg(long)]
    pub host: Option<String>,

    /// Directory to write the documents into (must exist).
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Base filename: index is NAME.xml, chunks NAME1.xml, NAME2.xml, ...
    #[arg(long, value_name = "NAME")]
    pub filename: Option<String>,

    /// Gzip every document.
    #[arg(long, conflicts_with = "no_compress")]
    pub compress: bool,

    /// Write plain .xml documents.
    #[arg(long)]
    pub no_compress: bool,
}

impl TargetArgs {
    /// Merge flags over `cfg`. Validation is left to `Builder::new`.
    pub fn resolve(&self, cfg: &SmbConfig, verbose: bool) -> Result<BuilderConfig> {
        let host = self.host.clone().or_else(|| cfg.host.clone()).unwrap_or_default();
        let output_dir = match self.output_dir.clone().or_else(|| cfg.output_dir.clone()) {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };
        let filename = self.filename.clone().unwrap_or_else(|| cfg.filename.clone());
        let compress = if self.compress {
            true
        } else if self.no_compress {
            false
        } else {
            cfg.compress
        };
        Ok(BuilderConfig::new(host, output_dir, filename)
            .compress(compress)
            .verbose(verbose))
    }
}

/// Search engine ping options.
#[derive(Debug, Clone, Default, Args)]
pub struct PingArgs {
    /// Extra ping URL template; `%s` is replaced by the encoded index URL. Repeatable.
    #[arg(long = "ping-target", value_name = "TEMPLATE")]
    pub targets: Vec<String>,

    /// Do not ping the built-in Google and Bing endpoints.
    #[arg(long)]
    pub no_default_targets: bool,

    /// Per-target timeout in seconds (default from config, 5).
    #[arg(long, value_name = "SECS")]
    pub ping_timeout: Option<u64>,
}

/// Ping settings after merging flags over config.toml.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPing {
    pub targets: Vec<String>,
    pub include_defaults: bool,
    pub timeout: Duration,
}

impl PingArgs {
    pub fn resolve(&self, cfg: &SmbConfig) -> ResolvedPing {
        let mut targets = cfg.ping.targets.clone();
        targets.extend(self.targets.iter().cloned());
        ResolvedPing {
            targets,
            include_defaults: cfg.ping.include_defaults && !self.no_default_targets,
            timeout: self
                .ping_timeout
                .map(|s| Duration::from_secs(s.max(1)))
                .unwrap_or_else(|| cfg.ping.timeout()),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Build the sitemap chunks and index from a JSON / JSON Lines file of URL records.
    Build {
        /// Input file: a JSON array (.json) or one record per line (.jsonl, .ndjson).
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        target: TargetArgs,

        /// Ping search engines after a successful build.
        #[arg(long)]
        ping: bool,

        #[command(flatten)]
        ping_args: PingArgs,
    },

    /// Ping search engines with the index location without building.
    Ping {
        #[command(flatten)]
        target: TargetArgs,

        #[command(flatten)]
        ping_args: PingArgs,
    },

    /// Parse a generated sitemap or index (.xml or .xml.gz) and list its entries.
    Inspect {
        /// Path to the document.
        path: PathBuf,
    },

    /// Show the config file path and current values.
    Config,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let verbose = self.verbose;

        match self.command {
            CliCommand::Build {
                input,
                target,
                ping,
                ping_args,
            } => {
                let builder_cfg = target.resolve(&cfg, verbose)?;
                let ping = ping.then(|| ping_args.resolve(&cfg));
                run_build(&input, builder_cfg, ping).await?;
            }
            CliCommand::Ping { target, ping_args } => {
                let builder_cfg = target.resolve(&cfg, verbose)?;
                run_ping(builder_cfg, &ping_args.resolve(&cfg)).await?;
            }
            CliCommand::Inspect { path } => run_inspect(&path).await?,
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
