//! Error types for WACZ validation and extraction.

use thiserror::Error;

/// Result type alias using `InvalidWaczError`.
pub type Result<T> = std::result::Result<T, InvalidWaczError>;

/// Errors raised while inspecting a WACZ archive.
///
/// Every variant renders a stable, human-readable reason through
/// [`InvalidWaczError::reason`]. Callers that need to branch on the kind of
/// violation should match on the variant; callers that only report should use
/// the reason string.
#[derive(Error, Debug)]
pub enum InvalidWaczError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a readable ZIP container.
    #[error("not a valid zip archive: {detail}")]
    InvalidArchive {
        /// Message from the ZIP reader.
        detail: String,
    },

    /// A required or referenced member is absent from the container.
    #[error("Does not contain {name}")]
    MissingMember {
        /// Member path inside the container.
        name: String,
    },

    /// `datapackage.json` is not a JSON object.
    #[error("datapackage.json is not valid json: {detail}")]
    MalformedManifest {
        /// Message from the JSON decoder.
        detail: String,
    },

    /// `profile` is missing or not `data-package`.
    #[error("profile must be set to data-package")]
    InvalidProfile,

    /// `wacz_version` is missing or empty.
    #[error("wacz_version must be set")]
    MissingVersion,

    /// `resources` is missing, not an array, or empty.
    #[error("resources must be set to an non empty array")]
    EmptyResources,

    /// No `archive/*.warc[.gz]` member.
    #[error("Wacz must contain at least one web archive")]
    NoArchiveFiles,

    /// No `indexes/*.cdx[.gz]` member.
    #[error("Wacz must contain at least one index file")]
    NoIndexFiles,

    /// A page listing line is not valid JSON.
    #[error("page on line {line} is not valid json")]
    MalformedPage {
        /// Zero-based line number in `pages/pages.jsonl`.
        line: usize,
    },

    /// A page record lacks a required property.
    #[error("page does not contain {field} property")]
    PageFieldMissing {
        /// Name of the missing property.
        field: &'static str,
    },

    /// A resource descriptor lacks a property needed to process it.
    #[error("resource does not contain {field} property")]
    ResourceFieldMissing {
        /// Name of the missing property.
        field: &'static str,
    },

    /// A field holds a JSON value of the wrong type.
    #[error("{field} has an invalid type")]
    InvalidFieldType {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A date field could not be parsed as ISO 8601.
    #[error("{field} is not a valid ISO 8601 date")]
    InvalidDateField {
        /// Name of the offending field, as spelled in the source document.
        field: &'static str,
    },

    /// A resource hash is not `<algorithm>:<hexdigest>`.
    #[error("hash of {path} is not in algorithm:digest form")]
    MalformedHash {
        /// Resource path whose hash is malformed.
        path: String,
    },

    /// The hash algorithm named by a resource is not supported.
    #[error("unsupported hash algorithm: {name}")]
    UnsupportedHashAlgorithm {
        /// Algorithm name as written in the manifest.
        name: String,
    },

    /// A buffered member is not UTF-8 text.
    #[error("{name} is not valid UTF-8")]
    InvalidEncoding {
        /// Member path inside the container.
        name: String,
    },

    /// A buffered member exceeds the configured size limit.
    #[error("{name} is too large: {size} bytes (limit {max})")]
    MemberTooLarge {
        /// Member path inside the container.
        name: String,
        /// Declared or observed size in bytes.
        size: u64,
        /// Configured limit in bytes.
        max: u64,
    },

    /// A buffered member has an implausible compression ratio.
    #[error("{name} has a suspicious compression ratio ({ratio:.2})")]
    SuspiciousCompression {
        /// Member path inside the container.
        name: String,
        /// Uncompressed to compressed size ratio.
        ratio: f64,
    },
}

impl InvalidWaczError {
    /// Returns the human-readable reason for this error.
    ///
    /// Reason strings are stable across releases.
    ///
    /// # Examples
    ///
    /// ```
    /// use wacz_core::InvalidWaczError;
    ///
    /// let err = InvalidWaczError::MissingMember {
    ///     name: "datapackage.json".into(),
    /// };
    /// assert_eq!(err.reason(), "Does not contain datapackage.json");
    /// ```
    #[must_use]
    pub fn reason(&self) -> String {
        self.to_string()
    }

    /// Returns `true` if the archive content violates the WACZ format.
    ///
    /// Container-level failures (I/O errors, unreadable ZIP) and resource
    /// limits are not structural: the archive may still be conformant.
    ///
    /// # Examples
    ///
    /// ```
    /// use wacz_core::InvalidWaczError;
    ///
    /// assert!(InvalidWaczError::NoArchiveFiles.is_structural());
    ///
    /// let io = std::io::Error::other("disk gone");
    /// assert!(!InvalidWaczError::from(io).is_structural());
    /// ```
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        !matches!(
            self,
            Self::Io(_)
                | Self::InvalidArchive { .. }
                | Self::MemberTooLarge { .. }
                | Self::SuspiciousCompression { .. }
        )
    }

    /// Returns the container member this error refers to, if any.
    #[must_use]
    pub fn member(&self) -> Option<&str> {
        match self {
            Self::MissingMember { name }
            | Self::InvalidEncoding { name }
            | Self::MemberTooLarge { name, .. }
            | Self::SuspiciousCompression { name, .. } => Some(name),
            Self::MalformedHash { path } => Some(path),
            Self::MalformedManifest { .. } => Some(crate::manifest::MANIFEST_PATH),
            Self::MalformedPage { .. } | Self::PageFieldMissing { .. } => {
                Some(crate::pages::PAGES_PATH)
            }
            _ => None,
        }
    }

    pub(crate) fn missing(name: impl Into<String>) -> Self {
        Self::MissingMember { name: name.into() }
    }
}
