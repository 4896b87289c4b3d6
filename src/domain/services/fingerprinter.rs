//! Content Fingerprinter
//!
//! Streams an artifact through SHA-256 in fixed-size chunks so large
//! binaries never have to be held in memory.

use std::io::Read;

use sha2::{Digest, Sha256};

use crate::domain::entities::Artifact;
use crate::domain::value_objects::ContentDigest;
use crate::error::{DeployError, DeployResult};

/// Default read size (64 KiB)
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Computes content digests of artifacts
#[derive(Debug, Clone, Copy)]
pub struct ContentFingerprinter {
    chunk_size: usize,
}

impl Default for ContentFingerprinter {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl ContentFingerprinter {
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    /// Digest of the artifact's full byte content
    pub fn fingerprint(&self, artifact: &Artifact) -> DeployResult<ContentDigest> {
        let path = artifact.path();
        let file = std::fs::File::open(path).map_err(|e| DeployError::io(path, e))?;
        self.fingerprint_reader(file)
            .map_err(|e| DeployError::io(path, e))
    }

    /// Digest of everything readable from `reader`
    pub fn fingerprint_reader<R: Read>(&self, mut reader: R) -> std::io::Result<ContentDigest> {
        let mut hasher = Sha256::new();
        let mut buf = vec![0u8; self.chunk_size];
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            hasher.update(&buf[..n]);
        }
        Ok(ContentDigest::from_bytes(&hasher.finalize()))
    }
}
