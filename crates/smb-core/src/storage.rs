//! Document files on disk.
//!
//! Every file is written to a `.part` sibling, synced, and renamed onto its
//! final name. With compression the plain file is read back, gzipped into
//! `<path>.gz` the same way, and removed, so a successful write leaves
//! exactly one of `<path>` or `<path>.gz`.

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, SitemapError};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Suffix of compressed documents.
pub const GZ_SUFFIX: &str = ".gz";

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut o = path.as_os_str().to_owned();
    o.push(suffix);
    PathBuf::from(o)
}

/// Path for the temp file: appends `.part` (e.g. `site1.xml` → `site1.xml.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    with_suffix(final_path, TEMP_SUFFIX)
}

/// Path of the compressed variant: appends `.gz`.
pub fn gz_path(path: &Path) -> PathBuf {
    with_suffix(path, GZ_SUFFIX)
}

/// Write `content` to `path`, replacing whatever was there. If `compress`,
/// the file ends up as `<path>.gz` instead and `<path>` is removed.
///
/// Errors are returned as-is; partially written artifacts are left for the
/// caller to clean up (see `remove_artifacts`).
pub fn write_document(content: &[u8], path: &Path, compress: bool) -> Result<()> {
    write_atomic(path, |f| f.write_all(content))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote document");

    let gz = gz_path(path);
    if compress {
        compress_file(path, &gz)?;
        fs::remove_file(path).map_err(|e| SitemapError::io(path, e))?;
        tracing::debug!(path = %gz.display(), "compressed document");
    } else {
        // A previous compressed build may have left a stale .gz next to us.
        remove_if_exists(&gz)?;
    }
    Ok(())
}

/// Gzip the file at `src` into `dst`.
fn compress_file(src: &Path, dst: &Path) -> Result<()> {
    let plain = fs::read(src).map_err(|e| SitemapError::io(src, e))?;
    write_atomic(dst, |f| {
        let mut encoder = GzEncoder::new(f, Compression::default());
        encoder.write_all(&plain)?;
        encoder.finish()?;
        Ok(())
    })
}

/// Create `<path>.part`, fill it with `fill`, sync, and rename onto `path`.
fn write_atomic<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let tmp = temp_path(path);
    let mut file = File::options()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&tmp)
        .map_err(|e| SitemapError::io(&tmp, e))?;
    fill(&mut file).map_err(|e| SitemapError::io(&tmp, e))?;
    file.sync_all().map_err(|e| SitemapError::io(&tmp, e))?;
    drop(file);

    fs::rename(&tmp, path).map_err(|e| SitemapError::io(path, e))?;
    Ok(())
}

/// Read a document back, gunzipping it when the name ends in `.gz`.
pub fn read_document(path: &Path) -> Result<Vec<u8>> {
    let raw = fs::read(path).map_err(|e| SitemapError::io(path, e))?;
    if path.extension().and_then(|e| e.to_str()) != Some("gz") {
        return Ok(raw);
    }
    let mut out = Vec::with_capacity(raw.len() * 4);
    GzDecoder::new(raw.as_slice())
        .read_to_end(&mut out)
        .map_err(|e| SitemapError::io(path, e))?;
    Ok(out)
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(SitemapError::io(path, e)),
    }
}

/// Best-effort removal of everything a failed `write_document(.., path, ..)`
/// may have left behind: the plain file, the `.gz`, and both temp files.
pub fn remove_artifacts(path: &Path) {
    let gz = gz_path(path);
    for p in [temp_path(path), path.to_path_buf(), temp_path(&gz), gz] {
        if let Err(e) = remove_if_exists(&p) {
            tracing::warn!("cleanup failed: {}", e);
        }
    }
}
