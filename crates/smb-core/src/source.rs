//! Where URL records come from.
//!
//! The builder only needs an ordered slice of records; this trait is the
//! seam for whatever produces them (file, database, crawler).

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::record::UrlRecord;

/// Trait implemented by URL record sources. Order is significant: it is the
/// order entries appear across the chunk files.
pub trait UrlSource {
    fn records(&self) -> Result<Vec<UrlRecord>>;
}

/// Input layout of a `FileSource`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// One JSON array of records.
    JsonArray,
    /// One JSON record per line; blank lines are skipped.
    JsonLines,
}

impl FileFormat {
    /// `.jsonl` / `.ndjson` are JSON Lines; anything else is a JSON array.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("jsonl") | Some("ndjson") => FileFormat::JsonLines,
            _ => FileFormat::JsonArray,
        }
    }
}

/// Records read from a JSON or JSON Lines file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    format: FileFormat,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = FileFormat::from_path(&path);
        Self { path, format }
    }

    pub fn with_format(mut self, format: FileFormat) -> Self {
        self.format = format;
        self
    }
}

impl UrlSource for FileSource {
    fn records(&self) -> Result<Vec<UrlRecord>> {
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("read {}", self.path.display()))?;
        match self.format {
            FileFormat::JsonArray => serde_json::from_str(&data)
                .with_context(|| format!("parse JSON array in {}", self.path.display())),
            FileFormat::JsonLines => parse_json_lines(&data)
                .with_context(|| format!("parse JSON lines in {}", self.path.display())),
        }
    }
}

fn parse_json_lines(data: &str) -> Result<Vec<UrlRecord>> {
    let mut records = Vec::new();
    for (n, line) in data.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record = serde_json::from_str(line).with_context(|| format!("line {}", n + 1))?;
        records.push(record);
    }
    Ok(records)
}

/// In-memory source; mostly for tests and embedding.
impl UrlSource for Vec<UrlRecord> {
    fn records(&self) -> Result<Vec<UrlRecord>> {
        Ok(self.clone())
    }
}
