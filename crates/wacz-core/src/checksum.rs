//! Verification of declared resource checksums.

use std::collections::BTreeMap;
use std::fmt;
use std::io::ErrorKind;
use std::io::Read;
use std::str::FromStr;

use sha2::digest::DynDigest;

use crate::InspectionConfig;
use crate::InvalidWaczError;
use crate::Result;
use crate::container::Container;
use crate::manifest::load_manifest;

/// Checksum outcome per resource path. `true` means the digest matched.
pub type ChecksumResults = BTreeMap<String, bool>;

/// Read buffer size for streaming digests (64KB).
const DIGEST_BUFFER_SIZE: usize = 64 * 1024;

/// Hash algorithms accepted in resource `hash` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// MD5.
    Md5,
    /// SHA-1.
    Sha1,
    /// SHA-224.
    Sha224,
    /// SHA-256.
    Sha256,
    /// SHA-384.
    Sha384,
    /// SHA-512.
    Sha512,
}

impl HashAlgorithm {
    /// Looks up an algorithm by name, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedHashAlgorithm` for unknown names.
    ///
    /// # Examples
    ///
    /// ```
    /// use wacz_core::checksum::HashAlgorithm;
    ///
    /// assert_eq!(HashAlgorithm::from_name("SHA256")?, HashAlgorithm::Sha256);
    /// assert!(HashAlgorithm::from_name("crc32").is_err());
    /// # Ok::<(), wacz_core::InvalidWaczError>(())
    /// ```
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "md5" => Ok(Self::Md5),
            "sha1" => Ok(Self::Sha1),
            "sha224" => Ok(Self::Sha224),
            "sha256" => Ok(Self::Sha256),
            "sha384" => Ok(Self::Sha384),
            "sha512" => Ok(Self::Sha512),
            _ => Err(InvalidWaczError::UnsupportedHashAlgorithm {
                name: name.to_string(),
            }),
        }
    }

    /// Canonical lower-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }

    fn hasher(self) -> Box<dyn DynDigest> {
        match self {
            Self::Md5 => Box::new(md5::Md5::default()),
            Self::Sha1 => Box::new(sha1::Sha1::default()),
            Self::Sha224 => Box::new(sha2::Sha224::default()),
            Self::Sha256 => Box::new(sha2::Sha256::default()),
            Self::Sha384 => Box::new(sha2::Sha384::default()),
            Self::Sha512 => Box::new(sha2::Sha512::default()),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = InvalidWaczError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Streams a reader through a digest and returns the lower-case hex digest.
///
/// # Errors
///
/// Returns `Io` if reading fails.
///
/// # Examples
///
/// ```
/// use wacz_core::checksum::HashAlgorithm;
/// use wacz_core::checksum::digest_reader;
///
/// let hex = digest_reader(&mut &b"abc"[..], HashAlgorithm::Md5)?;
/// assert_eq!(hex, "900150983cd24fb0d6963f7d28e17f72");
/// # Ok::<(), wacz_core::InvalidWaczError>(())
/// ```
pub fn digest_reader<R: Read + ?Sized>(reader: &mut R, algorithm: HashAlgorithm) -> Result<String> {
    let mut hasher = algorithm.hasher();
    let mut buf = vec![0u8; DIGEST_BUFFER_SIZE];

    loop {
        let bytes_read = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(InvalidWaczError::Io(e)),
        };
        hasher.update(&buf[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Verifies every declared resource hash of a container.
///
/// Resources without a `hash` are skipped and do not appear in the result.
/// A mismatch is recorded as `false`; it is not an error.
///
/// # Errors
///
/// Returns any manifest loading error, `MissingMember(path)` for a hashed
/// resource absent from the container, `MalformedHash` for a hash without
/// `:`, or `UnsupportedHashAlgorithm` for an unknown algorithm.
pub fn verify_resources<C: Container + ?Sized>(
    container: &mut C,
    config: &InspectionConfig,
) -> Result<ChecksumResults> {
    let manifest = load_manifest(container, config)?;
    let mut results = ChecksumResults::new();

    for resource in manifest.resources() {
        let Some((path, algorithm, expected)) = resource?.split_hash()? else {
            continue;
        };

        let mut member = container.open_member(path)?;
        let algorithm = HashAlgorithm::from_name(algorithm)?;
        let actual = digest_reader(&mut member, algorithm)?;

        let matched = config.digests_match(expected, &actual);
        if matched {
            tracing::debug!(path, %algorithm, "checksum matched");
        } else {
            tracing::warn!(
                path,
                %algorithm,
                expected,
                actual = actual.as_str(),
                "checksum mismatch"
            );
        }
        results.insert(path.to_string(), matched);
    }

    Ok(results)
}
