//! Container-level API.
//!
//! These functions back the [`WaczArchive`](crate::WaczArchive) methods and
//! work on any [`Container`], which makes them usable with in-memory archives.

use crate::ArchiveMetadata;
use crate::ChecksumResults;
use crate::InspectionConfig;
use crate::PageRecord;
use crate::Result;
use crate::container::Container;

/// Checks that a container is a conformant WACZ archive.
///
/// # Errors
///
/// Returns the first violation found.
///
/// # Examples
///
/// ```no_run
/// use std::io::Cursor;
///
/// use wacz_core::InspectionConfig;
/// use wacz_core::ZipContainer;
///
/// let bytes = std::fs::read("collection.wacz")?;
/// let mut container = ZipContainer::from_reader(Cursor::new(bytes))?;
/// wacz_core::validate(&mut container, &InspectionConfig::default())?;
/// # Ok::<(), wacz_core::InvalidWaczError>(())
/// ```
pub fn validate<C: Container + ?Sized>(container: &mut C, config: &InspectionConfig) -> Result<()> {
    crate::validate::validate_container(container, config)
}

/// Verifies every declared resource hash of a container.
///
/// # Errors
///
/// Returns an error if the manifest is invalid, a hashed resource is
/// missing, or its hash cannot be interpreted.
pub fn verify_checksums<C: Container + ?Sized>(
    container: &mut C,
    config: &InspectionConfig,
) -> Result<ChecksumResults> {
    crate::checksum::verify_resources(container, config)
}

/// Extracts the manifest metadata of a container.
///
/// # Errors
///
/// Returns an error if the manifest is invalid or holds a malformed date.
pub fn get_metadata<C: Container + ?Sized>(
    container: &mut C,
    config: &InspectionConfig,
) -> Result<ArchiveMetadata> {
    crate::metadata::load_metadata(container, config)
}

/// Extracts the page records of a container in file order.
///
/// # Errors
///
/// Returns an error if the page listing is missing or a record is invalid.
pub fn get_pages<C: Container + ?Sized>(
    container: &mut C,
    config: &InspectionConfig,
) -> Result<Vec<PageRecord>> {
    crate::pages::load_pages(container, config)
}
