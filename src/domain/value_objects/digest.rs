//! Content Digest Value Object
//!
//! A hex-encoded SHA-256 identity of an artifact's bytes. The digest is
//! the object key in the artifact bucket, so two artifacts with the same
//! bytes always share a key.

use std::fmt;

/// Content digest value object
///
/// Always stored as lowercase hex without any algorithm prefix, because the
/// value is used verbatim as an S3 object key and a template parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentDigest(String);

impl ContentDigest {
    /// Length in hex characters of a SHA-256 digest
    pub const HEX_LEN: usize = 64;

    /// Wrap an already computed hex digest
    pub fn new(hex: &str) -> Self {
        Self(hex.trim().to_ascii_lowercase())
    }

    /// Build a digest from raw hash output bytes
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut hex = String::with_capacity(bytes.len() * 2);
        for b in bytes {
            hex.push_str(&format!("{:02x}", b));
        }
        Self(hex)
    }

    /// Get the hex string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form for progress output
    pub fn short(&self) -> &str {
        let end = self.0.len().min(12);
        &self.0[..end]
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentDigest {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for ContentDigest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_case_and_whitespace() {
        let digest = ContentDigest::new("  ABC123\n");
        assert_eq!(digest.as_str(), "abc123");
    }

    #[test]
    fn from_bytes_encodes_hex() {
        let digest = ContentDigest::from_bytes(&[0x00, 0x0f, 0xab, 0xff]);
        assert_eq!(digest.as_str(), "000fabff");
    }

    #[test]
    fn short_truncates_long_digest() {
        let digest = ContentDigest::new(&"a".repeat(ContentDigest::HEX_LEN));
        assert_eq!(digest.short(), "aaaaaaaaaaaa");
    }

    #[test]
    fn short_keeps_short_digest() {
        let digest = ContentDigest::new("abc123");
        assert_eq!(digest.short(), "abc123");
    }

    #[test]
    fn display_is_hex() {
        let digest = ContentDigest::new("abc123");
        assert_eq!(format!("{}", digest), "abc123");
    }
}
