pub mod config;
pub mod logging;

pub mod builder;
pub mod error;
pub mod ping;
pub mod record;
pub mod source;
pub mod storage;
pub mod xml;

pub use builder::{BuildSummary, Builder, MAX_ITEMS_PER_FILE};
pub use config::BuilderConfig;
pub use error::{Result, SitemapError};
pub use record::UrlRecord;
