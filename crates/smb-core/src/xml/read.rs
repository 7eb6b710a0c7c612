//! Read generated documents back into entries.

use anyhow::{bail, Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

use super::index::IndexEntry;
use crate::record::UrlRecord;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Field {
    None,
    Loc,
    ChangeFreq,
    Priority,
    LastMod,
}

fn field_for(name: &[u8]) -> Field {
    match name {
        b"loc" => Field::Loc,
        b"changefreq" => Field::ChangeFreq,
        b"priority" => Field::Priority,
        b"lastmod" => Field::LastMod,
        _ => Field::None,
    }
}

/// Parse a `urlset` document into records, in document order.
pub fn parse_urlset(xml: &[u8]) -> Result<Vec<UrlRecord>> {
    let mut reader = Reader::from_reader(xml);

    let mut records = Vec::new();
    let mut current: Option<UrlRecord> = None;
    let mut field = Field::None;
    let mut saw_root = false;
    let mut buf = Vec::new();

    loop {
        match reader
            .read_event_into(&mut buf)
            .with_context(|| format!("malformed urlset at byte {}", reader.buffer_position()))?
        {
            Event::Start(e) => match e.name().as_ref() {
                b"urlset" => saw_root = true,
                b"url" => current = Some(UrlRecord::new(String::new())),
                other => field = field_for(other),
            },
            Event::Empty(e) => {
                if e.name().as_ref() == b"mobile:mobile" {
                    if let Some(rec) = current.as_mut() {
                        rec.mobile = true;
                    }
                }
            }
            Event::Text(t) => {
                let text = t.unescape().context("invalid text in urlset")?;
                if let Some(rec) = current.as_mut() {
                    match field {
                        Field::Loc => rec.location = text.into_owned(),
                        Field::ChangeFreq => rec.change_frequency = text.into_owned(),
                        Field::Priority => {
                            rec.priority = text
                                .trim()
                                .parse()
                                .with_context(|| format!("invalid priority {:?}", text))?
                        }
                        Field::LastMod => rec.last_modified = text.into_owned(),
                        Field::None => {}
                    }
                }
            }
            Event::End(e) => {
                if e.name().as_ref() == b"url" {
                    if let Some(rec) = current.take() {
                        records.push(rec);
                    }
                }
                field = Field::None;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        bail!("document has no <urlset> root");
    }
    Ok(records)
}

/// Parse a `sitemapindex` document into entries, in document order.
pub fn parse_index(xml: &[u8]) -> Result<Vec<IndexEntry>> {
    let mut reader = Reader::from_reader(xml);

    let mut entries = Vec::new();
    let mut current: Option<IndexEntry> = None;
    let mut field = Field::None;
    let mut saw_root = false;
    let mut buf = Vec::new();

    loop {
        match reader
            .read_event_into(&mut buf)
            .with_context(|| {
                format!("malformed sitemapindex at byte {}", reader.buffer_position())
            })?
        {
            Event::Start(e) => match e.name().as_ref() {
                b"sitemapindex" => saw_root = true,
                b"sitemap" => {
                    current = Some(IndexEntry {
                        location: String::new(),
                        last_modified: String::new(),
                    })
                }
                other => field = field_for(other),
            },
            Event::Text(t) => {
                let text = t.unescape().context("invalid text in sitemapindex")?;
                if let Some(entry) = current.as_mut() {
                    match field {
                        Field::Loc => entry.location = text.into_owned(),
                        Field::LastMod => entry.last_modified = text.into_owned(),
                        _ => {}
                    }
                }
            }
            Event::End(e) => {
                if e.name().as_ref() == b"sitemap" {
                    if let Some(entry) = current.take() {
                        entries.push(entry);
                    }
                }
                field = Field::None;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        bail!("document has no <sitemapindex> root");
    }
    Ok(entries)
}
