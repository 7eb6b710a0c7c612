//! Sitemap XML documents.
//!
//! Documents are streamed with `quick_xml::Writer` into a pre-sized byte
//! buffer and handed to `storage::write_document` in one piece. The reader
//! half parses generated documents back (round-trip checks, `smb inspect`).

mod index;
mod read;
mod schema;
mod urlset;

pub use index::{serialize_index, IndexEntry};
pub use read::{parse_index, parse_urlset};
pub use schema::{
    SITEMAP_NS, SITEMAP_INDEX_SCHEMA_LOCATION, URLSET_NAMESPACES, URLSET_SCHEMA_LOCATION, XSI_NS,
};
pub use urlset::serialize_urlset;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::path::Path;

use crate::error::{Result, SitemapError};

/// Writer over the in-memory document buffer. `path` is only used for error
/// messages.
pub(crate) struct DocWriter<'p> {
    inner: Writer<Vec<u8>>,
    path: &'p Path,
}

impl<'p> DocWriter<'p> {
    /// New buffer with the XML declaration already written.
    pub(crate) fn new(path: &'p Path, capacity: usize) -> Result<Self> {
        let mut w = DocWriter {
            inner: Writer::new(Vec::with_capacity(capacity)),
            path,
        };
        w.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        w.inner.get_mut().push(b'\n');
        Ok(w)
    }

    fn event(&mut self, event: Event<'_>) -> Result<()> {
        self.inner
            .write_event(event)
            .map_err(|e| SitemapError::serialization(self.path, e.to_string()))
    }

    pub(crate) fn open_root(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let start = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.event(Event::Start(start))
    }

    pub(crate) fn open(&mut self, name: &str) -> Result<()> {
        self.event(Event::Start(BytesStart::new(name)))
    }

    pub(crate) fn close(&mut self, name: &str) -> Result<()> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    pub(crate) fn empty(&mut self, name: &str) -> Result<()> {
        self.event(Event::Empty(BytesStart::new(name)))
    }

    /// `<name>text</name>` with `text` escaped. Fails on characters XML 1.0
    /// cannot carry at all (escaping does not help those).
    pub(crate) fn text_element(&mut self, name: &str, text: &str) -> Result<()> {
        if let Some(c) = text.chars().find(|c| !is_xml_char(*c)) {
            return Err(SitemapError::serialization(
                self.path,
                format!("<{}> contains character U+{:04X} not allowed in XML", name, c as u32),
            ));
        }
        self.open(name)?;
        self.event(Event::Text(BytesText::new(text)))?;
        self.close(name)
    }

    pub(crate) fn finish(self) -> Vec<u8> {
        self.inner.into_inner()
    }
}

/// XML 1.0 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}
