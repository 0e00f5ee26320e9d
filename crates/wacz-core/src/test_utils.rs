//! Test utilities for building WACZ archives in memory.
//!
//! This module provides a ZIP builder and a ready-made `valid-example`
//! archive, shared by unit tests, integration tests and benchmarks.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;

use serde_json::Value;
use serde_json::json;

use crate::checksum::HashAlgorithm;
use crate::checksum::digest_reader;

/// Web archive member of the example archive.
pub const EXAMPLE_WARC_PATH: &str = "archive/data.warc.gz";

/// Index member of the example archive.
pub const EXAMPLE_CDX_PATH: &str = "indexes/index.cdx";

/// Page identifier of the single example page.
pub const EXAMPLE_PAGE_ID: &str = "49jh9ns3x0sqyifk124fng";

/// URL of the single example page.
pub const EXAMPLE_PAGE_URL: &str = "https://example.org/";

/// Capture time of the single example page.
pub const EXAMPLE_PAGE_TS: &str = "2023-07-04T12:25:55.274Z";

/// Creation time recorded in the example manifest.
pub const EXAMPLE_CREATED: &str = "2023-07-04T12:25:53.900Z";

/// Extracted text of the single example page.
pub const EXAMPLE_PAGE_TEXT: &str = "Example Domain\n\
This domain is for use in illustrative examples in documents. You may use this\n    \
domain in literature without prior coordination or asking for permission.\n\
More information...";

const EXAMPLE_WARC: &[u8] = b"WARC/1.1\r\nWARC-Type: response\r\n\
WARC-Target-URI: https://example.org/\r\nContent-Length: 0\r\n\r\n";

const EXAMPLE_CDX: &[u8] =
    b"org,example)/ 20230704122555 {\"url\": \"https://example.org/\", \"offset\": 0}\n";

/// Builder for creating ZIP test archives.
///
/// # Examples
///
/// ```
/// use wacz_core::test_utils::WaczTestBuilder;
///
/// let zip_data = WaczTestBuilder::new()
///     .add_file("datapackage.json", b"{}")
///     .add_directory("archive/")
///     .build();
/// ```
pub struct WaczTestBuilder {
    zip: zip::ZipWriter<Cursor<Vec<u8>>>,
}

impl WaczTestBuilder {
    /// Creates a new, empty archive builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zip: zip::ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Adds a stored (uncompressed) file to the archive.
    #[must_use]
    pub fn add_file(mut self, path: &str, data: &[u8]) -> Self {
        use zip::write::SimpleFileOptions;

        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored)
            .unix_permissions(0o644);

        self.zip.start_file(path, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Adds a directory to the archive.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        use zip::write::SimpleFileOptions;

        let options = SimpleFileOptions::default().unix_permissions(0o755);
        self.zip.add_directory(path, options).unwrap();
        self
    }

    /// Builds and returns the ZIP archive data.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.zip.finish().unwrap().into_inner()
    }
}

impl Default for WaczTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the example page listing: a header line and one page.
#[must_use]
pub fn example_pages_jsonl() -> String {
    let header = json!({"format": "json-pages-1.0", "id": "pages", "title": "All Pages"});
    let page = json!({
        "id": EXAMPLE_PAGE_ID,
        "url": EXAMPLE_PAGE_URL,
        "title": "Example Domain",
        "ts": EXAMPLE_PAGE_TS,
        "text": EXAMPLE_PAGE_TEXT,
        "size": 2512,
    });
    format!("{header}\n{page}\n")
}

/// Returns every member of the example archive except the manifest.
#[must_use]
pub fn example_members() -> Vec<(&'static str, Vec<u8>)> {
    vec![
        (EXAMPLE_WARC_PATH, EXAMPLE_WARC.to_vec()),
        (EXAMPLE_CDX_PATH, EXAMPLE_CDX.to_vec()),
        ("pages/pages.jsonl", example_pages_jsonl().into_bytes()),
    ]
}

/// Builds an example `datapackage.json` declaring a SHA-256 hash for each
/// member.
#[must_use]
pub fn example_manifest(members: &[(&str, Vec<u8>)]) -> Value {
    let resources: Vec<Value> = members
        .iter()
        .map(|(path, data)| {
            let digest = digest_reader(&mut data.as_slice(), HashAlgorithm::Sha256).unwrap();
            json!({
                "name": path.rsplit('/').next().unwrap_or(*path),
                "path": path,
                "hash": format!("sha256:{digest}"),
                "bytes": data.len(),
            })
        })
        .collect();

    json!({
        "profile": "data-package",
        "title": "valid-example",
        "created": EXAMPLE_CREATED,
        "modified": EXAMPLE_CREATED,
        "software": "Webrecorder ArchiveWeb.page 0.11.0, using warcio.js 2.2.0",
        "wacz_version": "1.1.1",
        "resources": resources,
    })
}

/// Returns the example manifest as JSON text.
#[must_use]
pub fn valid_manifest_json() -> String {
    example_manifest(&example_members()).to_string()
}

/// Builds an archive from a manifest and a set of members.
#[must_use]
pub fn build_archive(manifest: &Value, members: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let mut builder =
        WaczTestBuilder::new().add_file("datapackage.json", manifest.to_string().as_bytes());
    for (path, data) in members {
        builder = builder.add_file(path, data);
    }
    builder.build()
}

/// Builds the conformant `valid-example` archive.
#[must_use]
pub fn valid_example() -> Vec<u8> {
    let members = example_members();
    build_archive(&example_manifest(&members), &members)
}

/// Builds the example archive with `archive/data.warc.gz` altered after its
/// hash was recorded.
#[must_use]
pub fn tampered_example() -> Vec<u8> {
    let mut members = example_members();
    let manifest = example_manifest(&members);
    for (path, data) in &mut members {
        if *path == EXAMPLE_WARC_PATH {
            data.extend_from_slice(b"tampered");
        }
    }
    build_archive(&manifest, &members)
}
