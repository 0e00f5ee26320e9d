//! Archive container access.
//!
//! The inspection engine never touches the ZIP reader directly. It consumes
//! the [`Container`] capability: list member names and open a member for
//! sequential reading. [`ZipContainer`] implements it over any seekable
//! reader.

pub mod limits;
pub mod members;
pub mod traits;
pub mod zip;

// Re-export main types for convenience
pub use limits::read_member;
pub use limits::read_member_to_string;
pub use members::is_index;
pub use members::is_web_archive;
pub use traits::Container;
pub use traits::Member;
pub use self::zip::ZipContainer;
