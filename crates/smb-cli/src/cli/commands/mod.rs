//! CLI command handlers, one per file.

mod build;
mod config;
mod inspect;
mod ping;

pub use build::run_build;
pub use config::run_config;
pub use inspect::run_inspect;
pub use ping::run_ping;
