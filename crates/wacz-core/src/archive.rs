//! The WACZ archive handle.

use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use crate::ArchiveMetadata;
use crate::ChecksumResults;
use crate::InspectionConfig;
use crate::PageRecord;
use crate::Result;
use crate::container::ZipContainer;

/// A WACZ file on disk.
///
/// The handle only stores the path and configuration. Every operation opens
/// the file afresh, so results always reflect the current file contents and
/// the handle can be shared between threads.
///
/// # Examples
///
/// ```no_run
/// use wacz_core::WaczArchive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let archive = WaczArchive::open("collection.wacz");
/// archive.validate()?;
///
/// let metadata = archive.get_metadata()?;
/// println!("WACZ {} ({:?})", metadata.wacz_version, metadata.title);
///
/// for (path, ok) in archive.verify_checksums()? {
///     println!("{path}: {}", if ok { "ok" } else { "MISMATCH" });
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WaczArchive {
    path: PathBuf,
    config: InspectionConfig,
}

impl WaczArchive {
    /// Creates a handle with the default configuration.
    ///
    /// The file is not touched until an operation runs.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::with_config(path, InspectionConfig::default())
    }

    /// Creates a handle with a custom configuration.
    pub fn with_config<P: AsRef<Path>>(path: P, config: InspectionConfig) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            config,
        }
    }

    /// Returns the path to the archive file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns a reference to the inspection configuration.
    #[must_use]
    pub const fn config(&self) -> &InspectionConfig {
        &self.config
    }

    fn container(&self) -> Result<ZipContainer<std::fs::File>> {
        ZipContainer::open(&self.path)
    }

    /// Checks that the file is a conformant WACZ archive.
    ///
    /// # Errors
    ///
    /// Returns the first violation found; see
    /// [`validate_container`](crate::validate::validate_container) for the
    /// order of checks.
    pub fn validate(&self) -> Result<()> {
        crate::validate(&mut self.container()?, &self.config)
    }

    /// Verifies the declared hash of every resource that has one.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest is invalid, a hashed resource is
    /// missing, or its algorithm is unsupported. Mismatches are reported as
    /// `false` values, not errors.
    pub fn verify_checksums(&self) -> Result<ChecksumResults> {
        crate::verify_checksums(&mut self.container()?, &self.config)
    }

    /// Extracts typed metadata from the manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest is invalid or a date field is not
    /// ISO 8601.
    pub fn get_metadata(&self) -> Result<ArchiveMetadata> {
        crate::get_metadata(&mut self.container()?, &self.config)
    }

    /// Extracts the page records in file order.
    ///
    /// # Errors
    ///
    /// Returns an error if the page listing is missing or a record is
    /// invalid.
    pub fn get_pages(&self) -> Result<Vec<PageRecord>> {
        crate::get_pages(&mut self.container()?, &self.config)
    }
}

impl fmt::Display for WaczArchive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WaczArchive(path='{}')", self.path.display())
    }
}
