//! Typed archive metadata extracted from the manifest.

use serde::Serialize;
use serde_json::Value;

use crate::InspectionConfig;
use crate::InvalidWaczError;
use crate::Result;
use crate::container::Container;
use crate::date::Timestamp;
use crate::date::parse_date_field;
use crate::manifest::Manifest;
use crate::manifest::load_manifest;

/// Descriptive metadata of a WACZ archive.
///
/// Optional fields are `None` when the manifest omits the key (or sets it to
/// `null`); they are never defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveMetadata {
    /// WACZ format version.
    pub wacz_version: String,
    /// Collection title.
    pub title: Option<String>,
    /// Collection description.
    pub description: Option<String>,
    /// Creation time of the archive.
    pub created: Option<Timestamp>,
    /// Last modification time of the archive.
    pub modified: Option<Timestamp>,
    /// Software that produced the archive.
    pub software: Option<String>,
    /// URL of the main page, from `mainPageUrl`.
    pub main_page_url: Option<String>,
    /// Capture time of the main page, from `main_page_date`.
    pub main_page_date: Option<Timestamp>,
}

impl ArchiveMetadata {
    /// Builds metadata from a checked manifest.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateField` naming `created`, `modified` or
    /// `main_page_date` when that key is present but not ISO 8601, and
    /// `InvalidFieldType` when a string field holds another JSON type.
    pub fn from_manifest(manifest: &Manifest) -> Result<Self> {
        let string = |key: &'static str| -> Result<Option<String>> {
            Ok(manifest.optional_str(key)?.map(str::to_string))
        };
        let date = |key: &'static str| -> Result<Option<Timestamp>> {
            match manifest.get(key) {
                None => Ok(None),
                Some(Value::String(text)) => parse_date_field(text, key).map(Some),
                Some(_) => Err(InvalidWaczError::InvalidDateField { field: key }),
            }
        };

        Ok(Self {
            wacz_version: manifest.wacz_version().to_string(),
            title: string("title")?,
            description: string("description")?,
            created: date("created")?,
            modified: date("modified")?,
            software: string("software")?,
            main_page_url: string("mainPageUrl")?,
            main_page_date: date("main_page_date")?,
        })
    }
}

/// Loads the manifest of a container and extracts its metadata.
pub fn load_metadata<C: Container + ?Sized>(
    container: &mut C,
    config: &InspectionConfig,
) -> Result<ArchiveMetadata> {
    let manifest = load_manifest(container, config)?;
    ArchiveMetadata::from_manifest(&manifest)
}
