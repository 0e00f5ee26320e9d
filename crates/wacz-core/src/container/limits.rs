//! Bounded reads of members that are buffered in memory.

use std::io::Read;

use super::traits::Container;
use crate::InspectionConfig;
use crate::InvalidWaczError;
use crate::Result;

/// Validates a member's compression ratio to detect potential zip bombs.
///
/// # Errors
///
/// Returns `SuspiciousCompression` if the ratio exceeds the configured
/// maximum.
pub fn validate_compression_ratio(
    name: &str,
    compressed_size: u64,
    uncompressed_size: u64,
    config: &InspectionConfig,
) -> Result<()> {
    if compressed_size == 0 {
        return Ok(());
    }

    #[allow(clippy::cast_precision_loss)]
    let ratio = uncompressed_size as f64 / compressed_size as f64;

    if ratio > config.max_compression_ratio {
        return Err(InvalidWaczError::SuspiciousCompression {
            name: name.to_string(),
            ratio,
        });
    }

    Ok(())
}

/// Reads a whole member into memory, enforcing the configured limits.
///
/// Declared sizes are checked before reading; the byte count is checked
/// again while reading since declared sizes cannot be trusted.
pub fn read_member<C: Container + ?Sized>(
    container: &mut C,
    name: &str,
    config: &InspectionConfig,
) -> Result<Vec<u8>> {
    let member = container.open_member(name)?;
    let max = config.max_member_size;

    if let (Some(size), Some(compressed)) = (member.size(), member.compressed_size()) {
        validate_compression_ratio(name, compressed, size, config)?;
    }
    if let Some(size) = member.size()
        && size > max
    {
        return Err(InvalidWaczError::MemberTooLarge {
            name: name.to_string(),
            size,
            max,
        });
    }

    let mut buf = Vec::new();
    member.take(max.saturating_add(1)).read_to_end(&mut buf)?;

    let read = buf.len() as u64;
    if read > max {
        return Err(InvalidWaczError::MemberTooLarge {
            name: name.to_string(),
            size: read,
            max,
        });
    }

    Ok(buf)
}

/// Reads a whole member as UTF-8 text, enforcing the configured limits.
pub fn read_member_to_string<C: Container + ?Sized>(
    container: &mut C,
    name: &str,
    config: &InspectionConfig,
) -> Result<String> {
    let bytes = read_member(container, name, config)?;
    String::from_utf8(bytes).map_err(|_| InvalidWaczError::InvalidEncoding {
        name: name.to_string(),
    })
}
