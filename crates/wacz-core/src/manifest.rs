//! Loading and structural checks of `datapackage.json`.

use serde_json::Map;
use serde_json::Value;

use crate::InspectionConfig;
use crate::InvalidWaczError;
use crate::Result;
use crate::container::Container;
use crate::container::read_member;

/// Member path of the manifest.
pub const MANIFEST_PATH: &str = "datapackage.json";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Required value of the manifest `profile` key.
pub const DATA_PACKAGE_PROFILE: &str = "data-package";

/// A `datapackage.json` document that passed the required-key checks.
///
/// The raw key/value tree is kept as-is; typed views are produced on demand
/// by the extractors.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    document: Map<String, Value>,
}

impl Manifest {
    /// Parses and checks a manifest from JSON bytes.
    ///
    /// Checks run in a fixed order and stop at the first violation:
    /// `profile`, then `wacz_version`, then `resources`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wacz_core::manifest::Manifest;
    ///
    /// let manifest = Manifest::from_slice(
    ///     br#"{"profile": "data-package", "wacz_version": "1.1.1",
    ///          "resources": [{"path": "pages/pages.jsonl"}]}"#,
    /// )?;
    /// assert_eq!(manifest.wacz_version(), "1.1.1");
    /// # Ok::<(), wacz_core::InvalidWaczError>(())
    /// ```
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| InvalidWaczError::MalformedManifest {
                detail: e.to_string(),
            })?;
        let Value::Object(document) = value else {
            return Err(InvalidWaczError::MalformedManifest {
                detail: "top level is not an object".to_string(),
            });
        };

        if document.get("profile").and_then(Value::as_str) != Some(DATA_PACKAGE_PROFILE) {
            return Err(InvalidWaczError::InvalidProfile);
        }

        if !document
            .get("wacz_version")
            .and_then(Value::as_str)
            .is_some_and(|v| !v.is_empty())
        {
            return Err(InvalidWaczError::MissingVersion);
        }

        if !document
            .get("resources")
            .and_then(Value::as_array)
            .is_some_and(|r| !r.is_empty())
        {
            return Err(InvalidWaczError::EmptyResources);
        }

        Ok(Self { document })
    }

    /// The `wacz_version` value.
    #[must_use]
    pub fn wacz_version(&self) -> &str {
        self.document
            .get("wacz_version")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Returns the raw value of a key, treating JSON `null` as absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.document.get(key).filter(|v| !v.is_null())
    }

    /// Returns an optional string field.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFieldType` if the key holds a non-string value.
    pub fn optional_str(&self, key: &'static str) -> Result<Option<&str>> {
        self.get(key)
            .map(|v| {
                v.as_str()
                    .ok_or(InvalidWaczError::InvalidFieldType { field: key })
            })
            .transpose()
    }

    /// Iterates over the resource descriptors in manifest order.
    ///
    /// # Errors
    ///
    /// Each item fails if the descriptor is not an object, or if it has a
    /// `hash` but no string `path`.
    pub fn resources(&self) -> impl Iterator<Item = Result<ResourceDescriptor<'_>>> {
        self.document
            .get("resources")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .map(ResourceDescriptor::from_value)
    }
}

/// One entry of the manifest `resources` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDescriptor<'a> {
    /// Member path inside the container, if declared.
    pub path: Option<&'a str>,
    /// Declared `<algorithm>:<hexdigest>` hash, if any.
    pub hash: Option<&'a str>,
}

impl<'a> ResourceDescriptor<'a> {
    fn from_value(value: &'a Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or(InvalidWaczError::InvalidFieldType { field: "resources" })?;
        let field = move |key: &'static str| -> Result<Option<&'a str>> {
            match object.get(key) {
                None | Some(Value::Null) => Ok(None),
                Some(Value::String(s)) => Ok(Some(s.as_str())),
                Some(_) => Err(InvalidWaczError::InvalidFieldType { field: key }),
            }
        };
        Ok(Self {
            path: field("path")?,
            hash: field("hash")?,
        })
    }

    /// Splits the declared hash into algorithm and expected hex digest.
    ///
    /// Only the first `:` separates; anything after it belongs to the digest.
    /// Returns `None` when no hash is declared.
    ///
    /// # Errors
    ///
    /// Returns `ResourceFieldMissing` if a hash is declared without a path,
    /// or `MalformedHash` if the hash has no `:`.
    pub fn split_hash(&self) -> Result<Option<(&'a str, &'a str, &'a str)>> {
        let Some(hash) = self.hash else {
            return Ok(None);
        };
        let path = self
            .path
            .ok_or(InvalidWaczError::ResourceFieldMissing { field: "path" })?;
        let (algorithm, digest) =
            hash.split_once(':')
                .ok_or_else(|| InvalidWaczError::MalformedHash {
                    path: path.to_string(),
                })?;
        Ok(Some((path, algorithm, digest)))
    }
}

/// Reads and checks the manifest of a container.
///
/// # Errors
///
/// Returns `MissingMember("datapackage.json")` if the manifest is absent,
/// `MalformedManifest` if it is not a JSON object, or the first failing
/// required-key check.
pub fn load_manifest<C: Container + ?Sized>(
    container: &mut C,
    config: &InspectionConfig,
) -> Result<Manifest> {
    let bytes = read_member(container, MANIFEST_PATH, config)?;
    let manifest = Manifest::from_slice(&bytes)?;
    tracing::debug!(
        wacz_version = manifest.wacz_version(),
        resources = manifest.resources().count(),
        "loaded manifest"
    );
    Ok(manifest)
}
