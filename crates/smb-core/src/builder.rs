//! Chunk Writer and Index Writer.
//!
//! URL records are split by position into runs of at most
//! `MAX_ITEMS_PER_FILE`; run `i` (1-based) becomes `<filename><i>.xml`.
//! The index `<filename>.xml` then lists every chunk under
//! `<host>/sitemaps/`. Builds are sequential: chunk `i` is on disk before
//! chunk `i + 1` is serialized, and the index is written last.

use chrono::{Local, SecondsFormat};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::BuilderConfig;
use crate::error::{Result, SitemapError};
use crate::ping::{self, PingOutcome};
use crate::record::UrlRecord;
use crate::storage;
use crate::xml::{self, IndexEntry};

/// Protocol limit on `<url>` entries per sitemap file.
pub const MAX_ITEMS_PER_FILE: usize = 50_000;

/// Number of chunk files needed for `total` records.
pub fn chunk_count(total: usize, per_file: usize) -> usize {
    total.div_ceil(per_file.max(1))
}

/// What a successful `build_files` produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub record_count: usize,
    pub chunk_count: usize,
    /// Index file as it exists on disk (`.xml` or `.xml.gz`).
    pub index_path: PathBuf,
    /// Chunk files as they exist on disk, in chunk order.
    pub chunk_paths: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Builder {
    config: BuilderConfig,
    max_items_per_file: usize,
}

impl Builder {
    /// Validate `config` and create a builder. Nothing is written yet.
    pub fn new(config: BuilderConfig) -> Result<Self> {
        if config.host.trim().is_empty() {
            return Err(SitemapError::InvalidConfiguration("invalid host".into()));
        }
        if url::Url::parse(&config.host).is_err() {
            return Err(SitemapError::InvalidConfiguration(format!(
                "host {:?} is not an absolute URL",
                config.host
            )));
        }
        if config.output_dir.as_os_str().is_empty() {
            return Err(SitemapError::InvalidConfiguration(
                "invalid output directory".into(),
            ));
        }
        if config.filename.is_empty() {
            return Err(SitemapError::InvalidConfiguration("invalid filename".into()));
        }
        if config.filename.contains(['/', '\\']) {
            return Err(SitemapError::InvalidConfiguration(format!(
                "filename {:?} must not contain path separators",
                config.filename
            )));
        }
        Ok(Self {
            config,
            max_items_per_file: MAX_ITEMS_PER_FILE,
        })
    }

    /// Lower the per-file record limit (clamped to `1..=MAX_ITEMS_PER_FILE`).
    pub fn with_max_items_per_file(mut self, n: usize) -> Self {
        self.max_items_per_file = n.clamp(1, MAX_ITEMS_PER_FILE);
        self
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn max_items_per_file(&self) -> usize {
        self.max_items_per_file
    }

    /// Write all chunk files, then the index.
    ///
    /// The first error aborts the build. Chunks completed before the failure
    /// stay on disk; the file being produced when it happened is removed.
    pub fn build_files(&self, urls: &[UrlRecord]) -> Result<BuildSummary> {
        self.progress(format_args!("start creating files process"));

        let chunk_count = self.build_chunks(urls)?;
        self.build_index(chunk_count)?;

        self.progress(format_args!("end creating files process"));

        Ok(BuildSummary {
            record_count: urls.len(),
            chunk_count,
            index_path: self.on_disk(&self.index_path()),
            chunk_paths: (1..=chunk_count)
                .map(|i| self.on_disk(&self.chunk_path(i)))
                .collect(),
        })
    }

    /// Partition `urls` by position and write one `urlset` file per chunk.
    /// Returns the number of chunk files written (0 for empty input).
    pub fn build_chunks(&self, urls: &[UrlRecord]) -> Result<usize> {
        let total = chunk_count(urls.len(), self.max_items_per_file);

        for (i, chunk) in (1..).zip(urls.chunks(self.max_items_per_file)) {
            let path = self.chunk_path(i);
            tracing::debug!(chunk = i, of = total, records = chunk.len(), "serializing chunk");
            self.write_or_clean(&path, xml::serialize_urlset(chunk, &path))?;
        }

        Ok(total)
    }

    /// Write the `sitemapindex` listing chunks `1..=chunk_count`. Every entry
    /// carries the same build timestamp.
    pub fn build_index(&self, chunk_count: usize) -> Result<()> {
        let lastmod = Local::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let entries: Vec<IndexEntry> = (1..=chunk_count)
            .map(|i| IndexEntry {
                location: self.chunk_location(i),
                last_modified: lastmod.clone(),
            })
            .collect();

        let path = self.index_path();
        self.write_or_clean(&path, xml::serialize_index(&entries, &path))
    }

    /// Public URL of chunk `i`: `<host>/sitemaps/<filename><i>.xml[.gz]`.
    pub fn chunk_location(&self, i: usize) -> String {
        self.location(&format!("{}{}.xml", self.config.filename, i))
    }

    /// Public URL of the index: `<host>/sitemaps/<filename>.xml[.gz]`.
    pub fn index_location(&self) -> String {
        self.location(&format!("{}.xml", self.config.filename))
    }

    fn location(&self, name: &str) -> String {
        let mut loc = format!("{}/sitemaps/{}", self.config.host, name);
        if self.config.compress {
            loc.push_str(storage::GZ_SUFFIX);
        }
        loc
    }

    /// Uncompressed path of chunk `i` under the output directory.
    pub fn chunk_path(&self, i: usize) -> PathBuf {
        self.config
            .output_dir
            .join(format!("{}{}.xml", self.config.filename, i))
    }

    /// Uncompressed path of the index under the output directory.
    pub fn index_path(&self) -> PathBuf {
        self.config
            .output_dir
            .join(format!("{}.xml", self.config.filename))
    }

    fn on_disk(&self, path: &Path) -> PathBuf {
        if self.config.compress {
            storage::gz_path(path)
        } else {
            path.to_path_buf()
        }
    }

    fn write_or_clean(&self, path: &Path, document: Result<Vec<u8>>) -> Result<()> {
        let result = document
            .and_then(|bytes| storage::write_document(&bytes, path, self.config.compress));
        match result {
            Ok(()) => {
                self.progress(format_args!("created file: {}", path.display()));
                if self.config.compress {
                    self.progress(format_args!("compressed {}", path.display()));
                }
                Ok(())
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "build aborted: {}", e);
                storage::remove_artifacts(path);
                Err(e)
            }
        }
    }

    /// Notify search engines that the index changed. `extra_targets` come first,
    /// followed by the built-in Google and Bing endpoints when
    /// `include_defaults` is set. Failures are only logged; they never affect
    /// the build.
    pub async fn ping_search_engines(
        &self,
        extra_targets: &[String],
        include_defaults: bool,
        timeout: Duration,
    ) -> Vec<PingOutcome> {
        let targets = if include_defaults {
            ping::with_default_targets(extra_targets)
        } else {
            extra_targets.to_vec()
        };
        let outcomes = ping::ping_all(&self.index_location(), &targets, timeout).await;
        for outcome in &outcomes {
            match &outcome.result {
                Ok(_) => self.progress(format_args!("ping succeeded: {}", outcome.target)),
                Err(e) => tracing::warn!("ping failed for {}: {}", outcome.target, e),
            }
        }
        outcomes
    }

    fn progress(&self, args: fmt::Arguments<'_>) {
        if self.config.verbose {
            tracing::info!("{}", args);
        } else {
            tracing::debug!("{}", args);
        }
    }
}
