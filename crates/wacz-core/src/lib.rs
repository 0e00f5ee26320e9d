//! Validation and metadata extraction for WACZ archives.
//!
//! A WACZ (Web Archive Collection Zipped) file is a ZIP container holding
//! web archives (`archive/*.warc[.gz]`), indexes (`indexes/*.cdx[.gz]`), a
//! page listing (`pages/pages.jsonl`) and a `datapackage.json` manifest.
//! `wacz-core` checks that structure, verifies the declared resource hashes
//! and extracts typed metadata and page records.
//!
//! Member reads are bounded by [`InspectionConfig`], so hostile archives
//! cannot exhaust memory through oversized or highly compressed members.
//!
//! # Examples
//!
//! ```no_run
//! use wacz_core::WaczArchive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let archive = WaczArchive::open("collection.wacz");
//! archive.validate()?;
//!
//! for page in archive.get_pages()? {
//!     println!("{} {}", page.timestamp, page.url);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod archive;
pub mod checksum;
pub mod config;
pub mod container;
pub mod date;
pub mod error;
pub mod manifest;
pub mod metadata;
pub mod pages;
pub mod validate;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export main API types
pub use api::get_metadata;
pub use api::get_pages;
pub use api::validate;
pub use api::verify_checksums;
pub use archive::WaczArchive;
pub use checksum::ChecksumResults;
pub use checksum::HashAlgorithm;
pub use config::InspectionConfig;
pub use container::Container;
pub use container::ZipContainer;
pub use date::Timestamp;
pub use error::InvalidWaczError;
pub use error::Result;
pub use metadata::ArchiveMetadata;
pub use pages::PageRecord;
