//! End-to-end builds into temp directories: chunk boundaries, index
//! contents, compression toggling and failure cleanup.

use flate2::read::GzDecoder;
use smb_core::storage::{gz_path, temp_path};
use smb_core::xml::{parse_index, parse_urlset};
use smb_core::{Builder, BuilderConfig, SitemapError, UrlRecord, MAX_ITEMS_PER_FILE};
use std::fs;
use std::io::Read;
use std::path::Path;
use tempfile::tempdir;

const HOST: &str = "http://example.com";

fn records(n: usize) -> Vec<UrlRecord> {
    (0..n)
        .map(|i| {
            UrlRecord::new(format!("http://example.com/page{}", i))
                .mobile(i % 3 == 0)
                .change_frequency("hourly")
                .priority(if i % 2 == 0 { 1.0 } else { 0.5 })
                .last_modified("2024-01-01T00:00:00Z")
        })
        .collect()
}

fn builder(dir: &Path, compress: bool) -> Builder {
    Builder::new(BuilderConfig::new(HOST, dir, "site").compress(compress)).unwrap()
}

fn read_maybe_gz(path: &Path) -> Vec<u8> {
    let raw = fs::read(path).unwrap();
    if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        let mut out = Vec::new();
        GzDecoder::new(raw.as_slice()).read_to_end(&mut out).unwrap();
        out
    } else {
        raw
    }
}

#[test]
fn three_records_make_one_chunk_and_one_index_entry() {
    let dir = tempdir().unwrap();
    let input = records(3);
    let summary = builder(dir.path(), false).build_files(&input).unwrap();

    assert_eq!(summary.chunk_count, 1);
    assert_eq!(summary.record_count, 3);
    let chunk = dir.path().join("site1.xml");
    assert_eq!(summary.chunk_paths, vec![chunk.clone()]);
    assert_eq!(summary.index_path, dir.path().join("site.xml"));

    let urls = parse_urlset(&fs::read(&chunk).unwrap()).unwrap();
    assert_eq!(urls, input);

    let index = parse_index(&fs::read(dir.path().join("site.xml")).unwrap()).unwrap();
    assert_eq!(index.len(), 1);
    assert_eq!(index[0].location, "http://example.com/sitemaps/site1.xml");
    assert!(!dir.path().join("site2.xml").exists());
}

#[test]
fn empty_input_writes_empty_index_only() {
    let dir = tempdir().unwrap();
    let summary = builder(dir.path(), false).build_files(&[]).unwrap();

    assert_eq!(summary.chunk_count, 0);
    assert!(summary.chunk_paths.is_empty());
    let index_xml = fs::read(dir.path().join("site.xml")).unwrap();
    assert!(parse_index(&index_xml).unwrap().is_empty());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn exact_limit_has_no_trailing_chunk() {
    let dir = tempdir().unwrap();
    let count = builder(dir.path(), false)
        .build_chunks(&records(MAX_ITEMS_PER_FILE))
        .unwrap();
    assert_eq!(count, 1);
    assert!(!dir.path().join("site2.xml").exists());
}

#[test]
fn one_past_limit_spills_single_record() {
    let dir = tempdir().unwrap();
    let input = records(MAX_ITEMS_PER_FILE + 1);
    let count = builder(dir.path(), false).build_chunks(&input).unwrap();
    assert_eq!(count, 2);

    let first = parse_urlset(&fs::read(dir.path().join("site1.xml")).unwrap()).unwrap();
    let second = parse_urlset(&fs::read(dir.path().join("site2.xml")).unwrap()).unwrap();
    assert_eq!(first.len(), MAX_ITEMS_PER_FILE);
    assert_eq!(second.len(), 1);
    assert_eq!(second[0], input[MAX_ITEMS_PER_FILE]);
}

#[test]
fn chunks_concatenate_back_to_input() {
    let dir = tempdir().unwrap();
    let input = records(10);
    let b = builder(dir.path(), false).with_max_items_per_file(3);
    let summary = b.build_files(&input).unwrap();
    assert_eq!(summary.chunk_count, 4);

    let mut rebuilt = Vec::new();
    for (n, path) in summary.chunk_paths.iter().enumerate() {
        let chunk = parse_urlset(&fs::read(path).unwrap()).unwrap();
        assert_eq!(chunk[0], input[n * 3], "chunk {} starts at input {}", n + 1, n * 3);
        rebuilt.extend(chunk);
    }
    assert_eq!(rebuilt, input);

    let index = parse_index(&fs::read(&summary.index_path).unwrap()).unwrap();
    let locs: Vec<_> = index.iter().map(|e| e.location.as_str()).collect();
    assert_eq!(
        locs,
        vec![
            "http://example.com/sitemaps/site1.xml",
            "http://example.com/sitemaps/site2.xml",
            "http://example.com/sitemaps/site3.xml",
            "http://example.com/sitemaps/site4.xml",
        ]
    );
    assert!(index.iter().all(|e| e.last_modified == index[0].last_modified));
    assert!(!index[0].last_modified.is_empty());
}

#[test]
fn compressed_build_leaves_only_gz_files() {
    let dir = tempdir().unwrap();
    let input = records(5);
    let summary = builder(dir.path(), true)
        .with_max_items_per_file(2)
        .build_files(&input)
        .unwrap();
    assert_eq!(summary.chunk_count, 3);

    for i in 1..=3 {
        let plain = dir.path().join(format!("site{}.xml", i));
        assert!(!plain.exists());
        assert!(gz_path(&plain).exists());
    }
    assert_eq!(summary.index_path, dir.path().join("site.xml.gz"));
    assert!(!dir.path().join("site.xml").exists());

    let index = parse_index(&read_maybe_gz(&summary.index_path)).unwrap();
    assert_eq!(index[2].location, "http://example.com/sitemaps/site3.xml.gz");

    let chunk = parse_urlset(&read_maybe_gz(&summary.chunk_paths[0])).unwrap();
    assert_eq!(chunk, input[..2].to_vec());
}

#[test]
fn toggling_compression_never_leaves_both_variants() {
    let dir = tempdir().unwrap();
    let input = records(4);

    builder(dir.path(), false).build_files(&input).unwrap();
    builder(dir.path(), true).build_files(&input).unwrap();
    for name in ["site.xml", "site1.xml"] {
        let p = dir.path().join(name);
        assert!(!p.exists() && gz_path(&p).exists(), "{}", name);
    }

    builder(dir.path(), false).build_files(&input).unwrap();
    for name in ["site.xml", "site1.xml"] {
        let p = dir.path().join(name);
        assert!(p.exists() && !gz_path(&p).exists(), "{}", name);
    }
}

#[test]
fn mobile_marker_only_on_mobile_records() {
    let dir = tempdir().unwrap();
    let input = vec![
        UrlRecord::new("http://example.com/m").mobile(true),
        UrlRecord::new("http://example.com/d"),
    ];
    builder(dir.path(), false).build_chunks(&input).unwrap();
    let xml = fs::read_to_string(dir.path().join("site1.xml")).unwrap();
    assert_eq!(xml.matches("<mobile:mobile/>").count(), 1);
    assert!(xml.contains("<loc>http://example.com/m</loc><mobile:mobile/>"));
    assert!(xml.contains("<loc>http://example.com/d</loc><changefreq>"));
}

#[test]
fn serialization_failure_keeps_earlier_chunks() {
    let dir = tempdir().unwrap();
    let mut input = records(4);
    input[3].location.clear();

    let err = builder(dir.path(), false)
        .with_max_items_per_file(2)
        .build_files(&input)
        .unwrap_err();
    assert!(matches!(err, SitemapError::Serialization { .. }), "{}", err);

    assert!(dir.path().join("site1.xml").exists());
    assert!(!dir.path().join("site2.xml").exists());
    assert!(!dir.path().join("site.xml").exists());
}

#[test]
fn failed_index_write_cleans_temp_file() {
    let dir = tempdir().unwrap();
    // A directory where the index should go makes the final rename fail.
    fs::create_dir(dir.path().join("site.xml")).unwrap();

    let err = builder(dir.path(), false).build_files(&records(2)).unwrap_err();
    assert!(matches!(err, SitemapError::Io { .. }), "{}", err);

    assert!(dir.path().join("site1.xml").exists());
    assert!(!temp_path(&dir.path().join("site.xml")).exists());
}

#[test]
fn failed_compression_removes_plain_and_temp_files() {
    let dir = tempdir().unwrap();
    let chunk2 = dir.path().join("site2.xml");
    // A directory squatting on the compressed name makes the gzip rename fail.
    fs::create_dir(gz_path(&chunk2)).unwrap();

    let err = builder(dir.path(), true)
        .with_max_items_per_file(2)
        .build_files(&records(3))
        .unwrap_err();
    assert!(matches!(err, SitemapError::Io { .. }), "{}", err);

    assert!(gz_path(&dir.path().join("site1.xml")).exists());
    assert!(!chunk2.exists());
    assert!(!temp_path(&chunk2).exists());
    assert!(!temp_path(&gz_path(&chunk2)).exists());
    assert!(!gz_path(&dir.path().join("site.xml")).exists());
}

#[test]
fn missing_output_dir_is_io_failure() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope");
    let err = builder(&missing, false).build_files(&records(1)).unwrap_err();
    assert!(matches!(err, SitemapError::Io { .. }), "{}", err);
}

#[test]
fn verbose_flag_does_not_change_output() {
    let quiet_dir = tempdir().unwrap();
    let loud_dir = tempdir().unwrap();
    let input = records(3);

    let quiet = builder(quiet_dir.path(), false);
    let loud_cfg = BuilderConfig::new(HOST, loud_dir.path(), "site").verbose(true);
    let loud = Builder::new(loud_cfg).unwrap();
    quiet.build_chunks(&input).unwrap();
    loud.build_chunks(&input).unwrap();

    assert_eq!(
        fs::read(quiet_dir.path().join("site1.xml")).unwrap(),
        fs::read(loud_dir.path().join("site1.xml")).unwrap()
    );
}
