//! `smb build` – write sitemap chunks and the index, then optionally ping.

use anyhow::{Context, Result};
use smb_core::source::{FileSource, UrlSource};
use smb_core::{BuildSummary, Builder, BuilderConfig, UrlRecord};
use std::path::Path;

use super::ping::report_outcomes;
use crate::cli::ResolvedPing;

/// At most this many protocol warnings are logged individually.
const MAX_LOGGED_WARNINGS: usize = 20;

fn log_protocol_warnings(records: &[UrlRecord]) {
    let mut total = 0usize;
    for warning in records.iter().flat_map(UrlRecord::protocol_warnings) {
        if total < MAX_LOGGED_WARNINGS {
            tracing::warn!("{}", warning);
        }
        total += 1;
    }
    if total > MAX_LOGGED_WARNINGS {
        tracing::warn!("{} more protocol warning(s) not shown", total - MAX_LOGGED_WARNINGS);
    }
}

fn print_summary(summary: &BuildSummary) {
    println!(
        "Wrote {} URL(s) into {} sitemap file(s).",
        summary.record_count, summary.chunk_count
    );
    for path in &summary.chunk_paths {
        println!("  {}", path.display());
    }
    println!("Index: {}", summary.index_path.display());
}

pub async fn run_build(input: &Path, cfg: BuilderConfig, ping: Option<ResolvedPing>) -> Result<()> {
    let builder = Builder::new(cfg)?;

    let summary = tokio::task::spawn_blocking({
        let input = input.to_path_buf();
        let builder = builder.clone();
        move || -> Result<BuildSummary> {
            let records = FileSource::new(&input).records()?;
            tracing::info!("read {} URL record(s) from {}", records.len(), input.display());
            log_protocol_warnings(&records);
            Ok(builder.build_files(&records)?)
        }
    })
    .await
    .context("build task join")??;
    print_summary(&summary);

    if let Some(ping) = ping {
        let outcomes = builder
            .ping_search_engines(&ping.targets, ping.include_defaults, ping.timeout)
            .await;
        report_outcomes(&outcomes);
    }
    Ok(())
}
