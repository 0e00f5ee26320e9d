//! The container capability consumed by the inspection engine.

use std::io::Read;

use crate::Result;

/// A member opened for sequential reading.
///
/// Sizes are reported when the container format records them; they are
/// advisory and only used for limit checks before buffering.
pub struct Member<'a> {
    reader: Box<dyn Read + 'a>,
    size: Option<u64>,
    compressed_size: Option<u64>,
}

impl<'a> Member<'a> {
    /// Wraps a reader with no size information.
    #[must_use]
    pub fn new(reader: impl Read + 'a) -> Self {
        Self {
            reader: Box::new(reader),
            size: None,
            compressed_size: None,
        }
    }

    /// Attaches declared uncompressed and compressed sizes.
    #[must_use]
    pub const fn with_sizes(mut self, size: u64, compressed_size: u64) -> Self {
        self.size = Some(size);
        self.compressed_size = Some(compressed_size);
        self
    }

    /// Declared uncompressed size in bytes.
    #[must_use]
    pub const fn size(&self) -> Option<u64> {
        self.size
    }

    /// Declared compressed size in bytes.
    #[must_use]
    pub const fn compressed_size(&self) -> Option<u64> {
        self.compressed_size
    }
}

impl Read for Member<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.reader.read(buf)
    }
}

impl std::fmt::Debug for Member<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Member")
            .field("size", &self.size)
            .field("compressed_size", &self.compressed_size)
            .finish_non_exhaustive()
    }
}

/// Read access to the members of an archive container.
///
/// Implementations must report an absent member as
/// [`InvalidWaczError::MissingMember`](crate::InvalidWaczError::MissingMember).
pub trait Container {
    /// Returns the names of all members.
    fn member_names(&self) -> Vec<&str>;

    /// Opens a member for sequential reading.
    ///
    /// # Errors
    ///
    /// Returns `MissingMember` if no member has this exact name, or an
    /// archive error if the member cannot be read.
    fn open_member(&mut self, name: &str) -> Result<Member<'_>>;

    /// Returns the container format name.
    fn format_name(&self) -> &str;

    /// Returns `true` if a member with this exact name exists.
    fn contains(&self, name: &str) -> bool {
        self.member_names().contains(&name)
    }
}
