//! `sitemapindex` documents.

use std::path::Path;

use super::schema::index_attributes;
use super::DocWriter;
use crate::error::Result;

/// One `<sitemap>` entry of the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub location: String,
    pub last_modified: String,
}

/// Serialize the index document. An empty `entries` still yields a
/// well-formed, empty `sitemapindex`.
pub fn serialize_index(entries: &[IndexEntry], path: &Path) -> Result<Vec<u8>> {
    let mut w = DocWriter::new(path, 512 + entries.len() * 128)?;
    w.open_root("sitemapindex", &index_attributes())?;
    for entry in entries {
        w.open("sitemap")?;
        w.text_element("loc", &entry.location)?;
        w.text_element("lastmod", &entry.last_modified)?;
        w.close("sitemap")?;
    }
    w.close("sitemapindex")?;
    Ok(w.finish())
}
