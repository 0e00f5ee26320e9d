//! Inspection configuration for untrusted archives.

/// Limits and comparison options applied while inspecting a WACZ archive.
///
/// The manifest and the page listing are read fully into memory, so both are
/// subject to `max_member_size` and `max_compression_ratio`. Members that are
/// only hashed are streamed and are not limited.
///
/// # Examples
///
/// ```
/// use wacz_core::InspectionConfig;
///
/// // Use secure defaults
/// let config = InspectionConfig::default();
///
/// // Tolerate upper-case digests in the manifest
/// let custom = InspectionConfig {
///     case_insensitive_digests: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InspectionConfig {
    /// Maximum uncompressed size of a buffered member in bytes.
    pub max_member_size: u64,

    /// Maximum compression ratio (uncompressed / compressed) of a buffered
    /// member.
    pub max_compression_ratio: f64,

    /// Compare checksum hex digests without regard to ASCII case.
    pub case_insensitive_digests: bool,
}

impl Default for InspectionConfig {
    /// Creates an `InspectionConfig` with secure default settings.
    ///
    /// Default values:
    /// - `max_member_size`: 512 MB
    /// - `max_compression_ratio`: 250.0
    /// - `case_insensitive_digests`: false
    fn default() -> Self {
        Self {
            max_member_size: 512 * 1024 * 1024, // 512 MB
            max_compression_ratio: 250.0,
            case_insensitive_digests: false,
        }
    }
}

impl InspectionConfig {
    /// Creates a permissive configuration for trusted archives.
    ///
    /// Size and compression limits are lifted and digests compare without
    /// regard to case.
    #[must_use]
    pub fn permissive() -> Self {
        Self {
            max_member_size: u64::MAX,
            max_compression_ratio: f64::INFINITY,
            case_insensitive_digests: true,
        }
    }

    /// Compares an expected and a computed hex digest.
    #[must_use]
    pub fn digests_match(&self, expected: &str, actual: &str) -> bool {
        if self.case_insensitive_digests {
            expected.eq_ignore_ascii_case(actual)
        } else {
            expected == actual
        }
    }
}
