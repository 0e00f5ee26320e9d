//! Integration tests for wacz-core.
//!
//! These tests write WACZ files to a temporary directory and inspect them
//! through [`WaczArchive`], the same way callers do.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::PathBuf;

use serde_json::json;
use tempfile::TempDir;
use wacz_core::InspectionConfig;
use wacz_core::InvalidWaczError;
use wacz_core::WaczArchive;
use wacz_core::date::parse_iso8601;
use wacz_core::test_utils::EXAMPLE_CDX_PATH;
use wacz_core::test_utils::EXAMPLE_CREATED;
use wacz_core::test_utils::EXAMPLE_PAGE_ID;
use wacz_core::test_utils::EXAMPLE_PAGE_TEXT;
use wacz_core::test_utils::EXAMPLE_PAGE_TS;
use wacz_core::test_utils::EXAMPLE_PAGE_URL;
use wacz_core::test_utils::EXAMPLE_WARC_PATH;
use wacz_core::test_utils::WaczTestBuilder;
use wacz_core::test_utils::build_archive;
use wacz_core::test_utils::example_manifest;
use wacz_core::test_utils::example_members;
use wacz_core::test_utils::tampered_example;
use wacz_core::test_utils::valid_example;

const PAGES_PATH: &str = "pages/pages.jsonl";

/// Writes archive bytes to `<temp>/<name>` and opens a handle on the file.
fn write_archive(temp: &TempDir, name: &str, data: &[u8]) -> WaczArchive {
    let path: PathBuf = temp.path().join(name);
    fs::write(&path, data).expect("failed to write archive");
    WaczArchive::open(path)
}

fn members_without(path: &str) -> Vec<(&'static str, Vec<u8>)> {
    example_members()
        .into_iter()
        .filter(|(name, _)| *name != path)
        .collect()
}

fn archive_without(temp: &TempDir, path: &str) -> WaczArchive {
    let members = members_without(path);
    let data = build_archive(&example_manifest(&members), &members);
    write_archive(temp, "partial.wacz", &data)
}

fn archive_with_pages(temp: &TempDir, pages: &str) -> WaczArchive {
    let mut members = members_without(PAGES_PATH);
    members.push((PAGES_PATH, pages.as_bytes().to_vec()));
    let data = build_archive(&example_manifest(&members), &members);
    write_archive(temp, "pages.wacz", &data)
}

#[test]
fn test_valid_example_validates() {
    let temp = TempDir::new().unwrap();
    let archive = write_archive(&temp, "valid-example.wacz", &valid_example());
    archive.validate().unwrap();
}

#[test]
fn test_missing_manifest() {
    let temp = TempDir::new().unwrap();
    let mut builder = WaczTestBuilder::new();
    for (path, data) in example_members() {
        builder = builder.add_file(path, &data);
    }
    let archive = write_archive(&temp, "no-manifest.wacz", &builder.build());

    let err = archive.validate().unwrap_err();
    assert_eq!(err.reason(), "Does not contain datapackage.json");
    assert_eq!(err.member(), Some("datapackage.json"));

    let err = archive.get_metadata().unwrap_err();
    assert_eq!(err.reason(), "Does not contain datapackage.json");

    let err = archive.verify_checksums().unwrap_err();
    assert_eq!(err.reason(), "Does not contain datapackage.json");
}

#[test]
fn test_empty_resources() {
    let temp = TempDir::new().unwrap();
    let manifest = json!({
        "profile": "data-package",
        "wacz_version": "1.1.1",
        "resources": [],
    });
    let data = build_archive(&manifest, &example_members());
    let archive = write_archive(&temp, "empty-resources.wacz", &data);

    let err = archive.validate().unwrap_err();
    assert_eq!(err.reason(), "resources must be set to an non empty array");
    assert!(matches!(
        archive.get_metadata(),
        Err(InvalidWaczError::EmptyResources)
    ));
}

#[test]
fn test_wrong_profile() {
    let temp = TempDir::new().unwrap();
    let members = example_members();
    let mut manifest = example_manifest(&members);
    manifest["profile"] = json!("tabular-data-package");
    let archive = write_archive(&temp, "profile.wacz", &build_archive(&manifest, &members));

    assert_eq!(
        archive.validate().unwrap_err().reason(),
        "profile must be set to data-package"
    );
}

#[test]
fn test_manifest_not_json() {
    let temp = TempDir::new().unwrap();
    let data = WaczTestBuilder::new()
        .add_file("datapackage.json", b"{ not json")
        .build();
    let archive = write_archive(&temp, "bad-json.wacz", &data);

    assert!(matches!(
        archive.validate(),
        Err(InvalidWaczError::MalformedManifest { .. })
    ));
}

#[test]
fn test_manifest_with_byte_order_mark() {
    let temp = TempDir::new().unwrap();
    let members = example_members();
    let mut manifest = b"\xEF\xBB\xBF".to_vec();
    manifest.extend_from_slice(example_manifest(&members).to_string().as_bytes());
    let mut builder = WaczTestBuilder::new().add_file("datapackage.json", &manifest);
    for (path, data) in &members {
        builder = builder.add_file(path, data);
    }
    let archive = write_archive(&temp, "bom.wacz", &builder.build());

    archive.validate().unwrap();
    assert_eq!(archive.get_metadata().unwrap().wacz_version, "1.1.1");
    assert!(archive.verify_checksums().unwrap().values().all(|ok| *ok));
}

#[test]
fn test_no_web_archive() {
    let temp = TempDir::new().unwrap();
    let archive = archive_without(&temp, EXAMPLE_WARC_PATH);

    let err = archive.validate().unwrap_err();
    assert_eq!(err.reason(), "Wacz must contain at least one web archive");
    assert!(err.is_structural());
}

#[test]
fn test_no_index() {
    let temp = TempDir::new().unwrap();
    let archive = archive_without(&temp, EXAMPLE_CDX_PATH);

    assert_eq!(
        archive.validate().unwrap_err().reason(),
        "Wacz must contain at least one index file"
    );
}

#[test]
fn test_missing_pages() {
    let temp = TempDir::new().unwrap();
    let archive = archive_without(&temp, PAGES_PATH);

    let err = archive.validate().unwrap_err();
    assert_eq!(err.reason(), "Does not contain pages/pages.jsonl");

    let err = archive.get_pages().unwrap_err();
    assert_eq!(err.reason(), "Does not contain pages/pages.jsonl");

    // Metadata does not depend on the page listing.
    assert!(archive.get_metadata().is_ok());
}

#[test]
fn test_page_missing_url() {
    let temp = TempDir::new().unwrap();
    let pages = format!(
        "{}\n{}\n",
        json!({"format": "json-pages-1.0", "id": "pages"}),
        json!({"id": EXAMPLE_PAGE_ID, "ts": EXAMPLE_PAGE_TS}),
    );
    let archive = archive_with_pages(&temp, &pages);

    assert_eq!(
        archive.validate().unwrap_err().reason(),
        "page does not contain url property"
    );
    assert_eq!(
        archive.get_pages().unwrap_err().reason(),
        "page does not contain url property"
    );
}

#[test]
fn test_page_missing_ts() {
    let temp = TempDir::new().unwrap();
    let pages = format!(
        "{}\n{}\n",
        json!({"format": "json-pages-1.0"}),
        json!({"url": EXAMPLE_PAGE_URL}),
    );
    let archive = archive_with_pages(&temp, &pages);

    assert!(matches!(
        archive.validate(),
        Err(InvalidWaczError::PageFieldMissing { field: "ts" })
    ));
}

#[test]
fn test_header_line_is_never_a_page() {
    let temp = TempDir::new().unwrap();
    // The header has neither url nor ts and must not be checked.
    let pages = format!("{}\n", json!({"format": "json-pages-1.0", "title": "All Pages"}));
    let archive = archive_with_pages(&temp, &pages);

    archive.validate().unwrap();
    assert!(archive.get_pages().unwrap().is_empty());
}

#[test]
fn test_metadata_values() {
    let temp = TempDir::new().unwrap();
    let archive = write_archive(&temp, "valid-example.wacz", &valid_example());
    let metadata = archive.get_metadata().unwrap();

    assert_eq!(metadata.wacz_version, "1.1.1");
    assert_eq!(metadata.title.as_deref(), Some("valid-example"));
    assert_eq!(metadata.description, None);
    assert_eq!(
        metadata.software.as_deref(),
        Some("Webrecorder ArchiveWeb.page 0.11.0, using warcio.js 2.2.0")
    );
    let created = parse_iso8601(EXAMPLE_CREATED).unwrap();
    assert_eq!(metadata.created, Some(created));
    assert_eq!(metadata.modified, Some(created));
    assert_eq!(metadata.main_page_url, None);
    assert_eq!(metadata.main_page_date, None);
}

#[test]
fn test_metadata_invalid_date() {
    let temp = TempDir::new().unwrap();
    let members = example_members();
    let mut manifest = example_manifest(&members);
    manifest["modified"] = json!("yesterday");
    let archive = write_archive(&temp, "dates.wacz", &build_archive(&manifest, &members));

    // Dates are not part of structural validation.
    archive.validate().unwrap();
    assert!(matches!(
        archive.get_metadata(),
        Err(InvalidWaczError::InvalidDateField { field: "modified" })
    ));
}

#[test]
fn test_checksums_all_match() {
    let temp = TempDir::new().unwrap();
    let archive = write_archive(&temp, "valid-example.wacz", &valid_example());
    let results = archive.verify_checksums().unwrap();

    assert_eq!(results.len(), 3);
    assert!(results.values().all(|ok| *ok), "{results:?}");
    assert_eq!(results.get(EXAMPLE_WARC_PATH), Some(&true));
    assert_eq!(results.get(EXAMPLE_CDX_PATH), Some(&true));
    assert_eq!(results.get(PAGES_PATH), Some(&true));
}

#[test]
fn test_checksums_tampered() {
    let temp = TempDir::new().unwrap();
    let archive = write_archive(&temp, "tampered-example.wacz", &tampered_example());
    let results = archive.verify_checksums().unwrap();

    let failed: Vec<&str> = results
        .iter()
        .filter(|(_, ok)| !**ok)
        .map(|(path, _)| path.as_str())
        .collect();
    assert_eq!(failed, vec![EXAMPLE_WARC_PATH]);

    // Tampering is invisible to structural validation.
    archive.validate().unwrap();
}

#[test]
fn test_checksums_skip_unhashed_resources() {
    let temp = TempDir::new().unwrap();
    let members = example_members();
    let mut manifest = example_manifest(&members);
    manifest["resources"][1]
        .as_object_mut()
        .unwrap()
        .remove("hash");
    let archive = write_archive(&temp, "unhashed.wacz", &build_archive(&manifest, &members));

    let results = archive.verify_checksums().unwrap();
    assert_eq!(results.len(), 2);
    assert!(!results.contains_key(EXAMPLE_CDX_PATH));
}

#[test]
fn test_checksums_missing_hashed_member() {
    let temp = TempDir::new().unwrap();
    let members = example_members();
    let manifest = example_manifest(&members);
    let kept: Vec<(&str, Vec<u8>)> = members
        .into_iter()
        .filter(|(name, _)| *name != EXAMPLE_CDX_PATH)
        .collect();
    let archive = write_archive(&temp, "missing.wacz", &build_archive(&manifest, &kept));

    let err = archive.verify_checksums().unwrap_err();
    assert_eq!(err.reason(), format!("Does not contain {EXAMPLE_CDX_PATH}"));
}

#[test]
fn test_checksums_unsupported_algorithm() {
    let temp = TempDir::new().unwrap();
    let members = example_members();
    let mut manifest = example_manifest(&members);
    manifest["resources"][0]["hash"] = json!("crc32:deadbeef");
    let archive = write_archive(&temp, "crc.wacz", &build_archive(&manifest, &members));

    assert!(matches!(
        archive.verify_checksums(),
        Err(InvalidWaczError::UnsupportedHashAlgorithm { name }) if name == "crc32"
    ));
}

#[test]
fn test_checksums_upper_case_digest() {
    let temp = TempDir::new().unwrap();
    let members = example_members();
    let mut manifest = example_manifest(&members);
    let hash = manifest["resources"][0]["hash"].as_str().unwrap().to_string();
    let (algorithm, digest) = hash.split_once(':').unwrap();
    manifest["resources"][0]["hash"] = json!(format!("{algorithm}:{}", digest.to_uppercase()));
    let data = build_archive(&manifest, &members);
    let path = temp.path().join("upper.wacz");
    fs::write(&path, data).unwrap();

    let strict = WaczArchive::open(&path).verify_checksums().unwrap();
    assert_eq!(strict.get(EXAMPLE_WARC_PATH), Some(&false));

    let config = InspectionConfig {
        case_insensitive_digests: true,
        ..Default::default()
    };
    let relaxed = WaczArchive::with_config(&path, config)
        .verify_checksums()
        .unwrap();
    assert_eq!(relaxed.get(EXAMPLE_WARC_PATH), Some(&true));
}

#[test]
fn test_pages_values() {
    let temp = TempDir::new().unwrap();
    let archive = write_archive(&temp, "valid-example.wacz", &valid_example());
    let pages = archive.get_pages().unwrap();

    assert_eq!(pages.len(), 1);
    let page = &pages[0];
    assert_eq!(page.id.as_deref(), Some(EXAMPLE_PAGE_ID));
    assert_eq!(page.url, EXAMPLE_PAGE_URL);
    assert_eq!(page.title.as_deref(), Some("Example Domain"));
    assert_eq!(page.timestamp, parse_iso8601(EXAMPLE_PAGE_TS).unwrap());
    assert_eq!(page.text.as_deref(), Some(EXAMPLE_PAGE_TEXT));
    assert_eq!(page.size, Some(2512));
}

#[test]
fn test_pages_keep_file_order() {
    let temp = TempDir::new().unwrap();
    let urls = ["https://example.org/c", "https://example.org/a", "https://example.org/b"];
    let mut pages = json!({"format": "json-pages-1.0"}).to_string();
    for url in urls {
        pages.push('\n');
        pages.push_str(&json!({"url": url, "ts": EXAMPLE_PAGE_TS}).to_string());
    }
    let archive = archive_with_pages(&temp, &pages);

    let parsed: Vec<String> = archive
        .get_pages()
        .unwrap()
        .into_iter()
        .map(|page| page.url)
        .collect();
    assert_eq!(parsed, urls);
}

#[test]
fn test_operations_are_idempotent() {
    let temp = TempDir::new().unwrap();
    let archive = write_archive(&temp, "valid-example.wacz", &valid_example());

    assert_eq!(
        archive.verify_checksums().unwrap(),
        archive.verify_checksums().unwrap()
    );
    assert_eq!(archive.get_metadata().unwrap(), archive.get_metadata().unwrap());
    assert_eq!(archive.get_pages().unwrap(), archive.get_pages().unwrap());
    archive.validate().unwrap();
    archive.validate().unwrap();
}

#[test]
fn test_member_size_limit() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("valid-example.wacz");
    fs::write(&path, valid_example()).unwrap();

    let config = InspectionConfig {
        max_member_size: 16,
        ..Default::default()
    };
    let err = WaczArchive::with_config(&path, config).validate().unwrap_err();
    assert!(matches!(err, InvalidWaczError::MemberTooLarge { .. }));
    assert!(!err.is_structural());
}

#[test]
fn test_not_a_zip_file() {
    let temp = TempDir::new().unwrap();
    let archive = write_archive(&temp, "plain.wacz", b"this is not a zip archive");

    assert!(matches!(
        archive.validate(),
        Err(InvalidWaczError::InvalidArchive { .. })
    ));
}

#[test]
fn test_display() {
    let archive = WaczArchive::open("test.wacz");
    assert_eq!(format!("{archive}"), "WaczArchive(path='test.wacz')");
}
