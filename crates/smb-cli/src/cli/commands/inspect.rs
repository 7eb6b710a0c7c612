//! `smb inspect <path>` – list the entries of a generated document.

use anyhow::{Context, Result};
use smb_core::{storage, xml};
use std::path::Path;

pub async fn run_inspect(path: &Path) -> Result<()> {
    let bytes = storage::read_document(path)?;
    let looks_like_index = bytes.windows(13).any(|w| w == b"<sitemapindex");

    if looks_like_index {
        let entries =
            xml::parse_index(&bytes).with_context(|| format!("parse {}", path.display()))?;
        println!("sitemapindex: {} sitemap(s)", entries.len());
        for e in &entries {
            println!("  {}  {}", e.last_modified, e.location);
        }
    } else {
        let records =
            xml::parse_urlset(&bytes).with_context(|| format!("parse {}", path.display()))?;
        let mobile = records.iter().filter(|r| r.mobile).count();
        println!("urlset: {} url(s), {} mobile", records.len(), mobile);
        for r in &records {
            println!("  {}", r.location);
        }
    }
    Ok(())
}
