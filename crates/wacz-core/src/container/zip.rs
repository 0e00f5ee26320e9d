//! ZIP container handler.

use std::fs::File;
use std::io::Read;
use std::io::Seek;
use std::path::Path;

use zip::result::ZipError;

use super::traits::Container;
use super::traits::Member;
use crate::InvalidWaczError;
use crate::Result;

/// ZIP-backed container.
///
/// The underlying handle is owned by this value and released when it is
/// dropped, so every early return closes the archive.
pub struct ZipContainer<R> {
    archive: zip::ZipArchive<R>,
}

impl ZipContainer<File> {
    /// Opens a ZIP file from disk.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be opened, or `InvalidArchive` if it is
    /// not a ZIP file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "opening zip container");
        let file = File::open(path)?;
        Self::from_reader(file)
    }
}

impl<R: Read + Seek> ZipContainer<R> {
    /// Reads the central directory from any seekable reader.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArchive` if the data is not a ZIP file.
    pub fn from_reader(reader: R) -> Result<Self> {
        let archive = zip::ZipArchive::new(reader).map_err(|e| match e {
            ZipError::Io(io) => InvalidWaczError::Io(io),
            other => InvalidWaczError::InvalidArchive {
                detail: other.to_string(),
            },
        })?;
        Ok(Self { archive })
    }

    /// Returns the number of members, directories included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    /// Returns `true` if the container has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }
}

impl<R: Read + Seek> Container for ZipContainer<R> {
    fn member_names(&self) -> Vec<&str> {
        self.archive.file_names().collect()
    }

    fn open_member(&mut self, name: &str) -> Result<Member<'_>> {
        let file = match self.archive.by_name(name) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Err(InvalidWaczError::missing(name)),
            Err(e) => {
                return Err(InvalidWaczError::InvalidArchive {
                    detail: format!("failed to read {name}: {e}"),
                });
            }
        };

        let size = file.size();
        let compressed_size = file.compressed_size();
        tracing::debug!(member = name, size, compressed_size, "opened member");

        Ok(Member::new(file).with_sizes(size, compressed_size))
    }

    fn format_name(&self) -> &str {
        "zip"
    }
}

impl<R> std::fmt::Debug for ZipContainer<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZipContainer").finish_non_exhaustive()
    }
}
