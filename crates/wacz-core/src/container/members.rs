//! Classification of WACZ member paths.

const ARCHIVE_DIR: &str = "archive/";
const INDEXES_DIR: &str = "indexes/";

/// Returns `true` for `archive/<anything>.warc` and `archive/<anything>.warc.gz`.
///
/// `<anything>` must be non-empty and may span several path segments.
///
/// # Examples
///
/// ```
/// use wacz_core::container::is_web_archive;
///
/// assert!(is_web_archive("archive/data.warc.gz"));
/// assert!(is_web_archive("archive/2023/07/crawl.warc"));
/// assert!(!is_web_archive("data.warc.gz"));
/// ```
#[must_use]
pub fn is_web_archive(name: &str) -> bool {
    matches_under(name, ARCHIVE_DIR, &[".warc", ".warc.gz"])
}

/// Returns `true` for `indexes/<anything>.cdx` and `indexes/<anything>.cdx.gz`.
#[must_use]
pub fn is_index(name: &str) -> bool {
    matches_under(name, INDEXES_DIR, &[".cdx", ".cdx.gz"])
}

fn matches_under(name: &str, dir: &str, suffixes: &[&str]) -> bool {
    let Some(rest) = name.strip_prefix(dir) else {
        return false;
    };
    suffixes
        .iter()
        .any(|suffix| rest.strip_suffix(suffix).is_some_and(|stem| !stem.is_empty()))
}
