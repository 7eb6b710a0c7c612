//! `urlset` chunk documents.

use std::path::Path;

use super::schema::urlset_attributes;
use super::DocWriter;
use crate::error::{Result, SitemapError};
use crate::record::UrlRecord;

/// Rough per-entry size used to pre-size the document buffer.
const BYTES_PER_URL: usize = 192;

/// Serialize one chunk of records as a complete `urlset` document.
///
/// Entries keep the slice order. `path` names the target file in errors.
pub fn serialize_urlset(records: &[UrlRecord], path: &Path) -> Result<Vec<u8>> {
    let mut w = DocWriter::new(path, 1024 + records.len() * BYTES_PER_URL)?;
    w.open_root("urlset", &urlset_attributes())?;
    for record in records {
        write_url(&mut w, record, path)?;
    }
    w.close("urlset")?;
    Ok(w.finish())
}

fn write_url(w: &mut DocWriter<'_>, record: &UrlRecord, path: &Path) -> Result<()> {
    if record.location.is_empty() {
        return Err(SitemapError::serialization(path, "url record with empty location"));
    }
    if !record.priority.is_finite() {
        return Err(SitemapError::serialization(
            path,
            format!("{}: priority {} is not a number", record.location, record.priority),
        ));
    }

    w.open("url")?;
    w.text_element("loc", &record.location)?;
    if record.mobile {
        w.empty("mobile:mobile")?;
    }
    w.text_element("changefreq", &record.change_frequency)?;
    w.text_element("priority", &record.priority.to_string())?;
    w.text_element("lastmod", &record.last_modified)?;
    w.close("url")
}
