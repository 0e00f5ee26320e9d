//! Structural validation of a WACZ container.

use crate::InspectionConfig;
use crate::InvalidWaczError;
use crate::Result;
use crate::container::Container;
use crate::container::is_index;
use crate::container::is_web_archive;
use crate::manifest::load_manifest;
use crate::pages::PAGES_PATH;
use crate::pages::check_listing;
use crate::pages::read_listing;

/// Checks that a container is a conformant WACZ archive.
///
/// Checks run in this order and stop at the first violation:
///
/// 1. `datapackage.json` is present, parses and has the required keys
/// 2. at least one `archive/*.warc[.gz]` member
/// 3. at least one `indexes/*.cdx[.gz]` member
/// 4. `pages/pages.jsonl` is present
/// 5. every page record (header line excluded) has `url` and `ts`
///
/// # Errors
///
/// Returns the error of the first failing check.
pub fn validate_container<C: Container + ?Sized>(
    container: &mut C,
    config: &InspectionConfig,
) -> Result<()> {
    load_manifest(container, config)?;

    let names = container.member_names();
    if !names.iter().any(|name| is_web_archive(name)) {
        return Err(InvalidWaczError::NoArchiveFiles);
    }
    if !names.iter().any(|name| is_index(name)) {
        return Err(InvalidWaczError::NoIndexFiles);
    }

    if !container.contains(PAGES_PATH) {
        return Err(InvalidWaczError::missing(PAGES_PATH));
    }
    let listing = read_listing(container, config)?;
    check_listing(&listing)?;

    tracing::debug!(format = container.format_name(), "container is a valid wacz");
    Ok(())
}
