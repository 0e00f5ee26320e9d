//! Page listing (`pages/pages.jsonl`) parsing.
//!
//! The listing is JSON Lines. Line 0 is a header record describing the
//! listing itself and is never treated as a page; every following non-blank
//! line is one page record.

use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::InspectionConfig;
use crate::InvalidWaczError;
use crate::Result;
use crate::container::Container;
use crate::container::read_member_to_string;
use crate::date::Timestamp;
use crate::date::parse_date_field;

/// Member path of the page listing.
pub const PAGES_PATH: &str = "pages/pages.jsonl";

/// One page of the archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    /// Captured URL.
    pub url: String,
    /// Capture time, from the `ts` property.
    pub timestamp: Timestamp,
    /// Page title.
    pub title: Option<String>,
    /// Page identifier.
    pub id: Option<String>,
    /// Extracted text content.
    pub text: Option<String>,
    /// Size of the capture in bytes.
    pub size: Option<i64>,
}

/// Raw page objects, header skipped, with their zero-based line numbers.
fn page_objects(listing: &str) -> impl Iterator<Item = Result<(usize, Map<String, Value>)>> {
    listing
        .lines()
        .enumerate()
        .skip(1)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(line_no, line)| match serde_json::from_str(line) {
            Ok(Value::Object(object)) => Ok((line_no, object)),
            // Non-object records cannot carry the required properties.
            Ok(_) => Err(InvalidWaczError::PageFieldMissing { field: "url" }),
            Err(_) => Err(InvalidWaczError::MalformedPage { line: line_no }),
        })
}

fn check_required(object: &Map<String, Value>) -> Result<()> {
    for field in ["url", "ts"] {
        if !object.contains_key(field) {
            return Err(InvalidWaczError::PageFieldMissing { field });
        }
    }
    Ok(())
}

/// Checks every page record of a listing for `url` and `ts`.
///
/// # Errors
///
/// Returns `MalformedPage` for a line that is not JSON, or
/// `PageFieldMissing` for the first record lacking `url` (checked first) or
/// `ts`.
pub fn check_listing(listing: &str) -> Result<()> {
    for object in page_objects(listing) {
        let (_, object) = object?;
        check_required(&object)?;
    }
    Ok(())
}

/// Parses every page record of a listing, preserving file order.
///
/// A listing that holds only its header yields no pages.
///
/// # Errors
///
/// Returns the same errors as [`check_listing`], plus `InvalidDateField` for
/// an unparseable `ts` and `InvalidFieldType` for mistyped properties.
///
/// # Examples
///
/// ```
/// use wacz_core::pages::parse_listing;
///
/// let listing = concat!(
///     r#"{"format": "json-pages-1.0", "id": "pages"}"#, "\n",
///     r#"{"url": "https://example.org/", "ts": "2023-07-04T12:25:55.274Z"}"#, "\n",
/// );
/// let pages = parse_listing(listing)?;
/// assert_eq!(pages.len(), 1);
/// assert_eq!(pages[0].url, "https://example.org/");
/// # Ok::<(), wacz_core::InvalidWaczError>(())
/// ```
pub fn parse_listing(listing: &str) -> Result<Vec<PageRecord>> {
    page_objects(listing)
        .map(|object| {
            let (_, object) = object?;
            PageRecord::from_object(&object)
        })
        .collect()
}

impl PageRecord {
    fn from_object(object: &Map<String, Value>) -> Result<Self> {
        check_required(object)?;

        let url = required_str(object, "url")?.to_string();
        let timestamp = parse_date_field(required_str(object, "ts")?, "ts")?;

        Ok(Self {
            url,
            timestamp,
            title: optional_str(object, "title")?,
            id: optional_str(object, "id")?,
            text: optional_str(object, "text")?,
            size: optional_int(object, "size")?,
        })
    }
}

fn required_str<'a>(object: &'a Map<String, Value>, field: &'static str) -> Result<&'a str> {
    object
        .get(field)
        .and_then(Value::as_str)
        .ok_or(InvalidWaczError::InvalidFieldType { field })
}

fn optional_str(object: &Map<String, Value>, field: &'static str) -> Result<Option<String>> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(InvalidWaczError::InvalidFieldType { field }),
    }
}

fn optional_int(object: &Map<String, Value>, field: &'static str) -> Result<Option<i64>> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_i64()
            .map(Some)
            .ok_or(InvalidWaczError::InvalidFieldType { field }),
    }
}

/// Reads `pages/pages.jsonl` from a container.
pub(crate) fn read_listing<C: Container + ?Sized>(
    container: &mut C,
    config: &InspectionConfig,
) -> Result<String> {
    read_member_to_string(container, PAGES_PATH, config)
}

/// Reads and parses the page listing of a container.
///
/// # Errors
///
/// Returns `MissingMember("pages/pages.jsonl")` if the listing is absent, or
/// any error of [`parse_listing`].
pub fn load_pages<C: Container + ?Sized>(
    container: &mut C,
    config: &InspectionConfig,
) -> Result<Vec<PageRecord>> {
    let listing = read_listing(container, config)?;
    let pages = parse_listing(&listing)?;
    tracing::debug!(pages = pages.len(), "parsed page listing");
    Ok(pages)
}
