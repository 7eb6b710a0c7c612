//! `smb ping` – notify search engines of the index location.

use anyhow::Result;
use smb_core::ping::PingOutcome;
use smb_core::{Builder, BuilderConfig};

use crate::cli::ResolvedPing;

/// Print one line per target. Failures never make the command fail.
pub(super) fn report_outcomes(outcomes: &[PingOutcome]) {
    for outcome in outcomes {
        match &outcome.result {
            Ok(code) => println!("  ok    {} (HTTP {})", outcome.target, code),
            Err(e) => println!("  fail  {}: {}", outcome.target, e),
        }
    }
    let ok = outcomes.iter().filter(|o| o.is_success()).count();
    println!("Pinged {} of {} target(s).", ok, outcomes.len());
}

pub async fn run_ping(cfg: BuilderConfig, ping: &ResolvedPing) -> Result<()> {
    let builder = Builder::new(cfg)?;
    println!("Index: {}", builder.index_location());
    let outcomes = builder
        .ping_search_engines(&ping.targets, ping.include_defaults, ping.timeout)
        .await;
    report_outcomes(&outcomes);
    Ok(())
}
