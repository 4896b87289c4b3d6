//! Artifact Entity
//!
//! A compiled application binary on local disk. Produced by `cargo build`
//! before Stackship runs; never modified here.

use std::path::{Path, PathBuf};

use crate::error::{DeployError, DeployResult};

/// A build artifact identified by its filesystem path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    path: PathBuf,
    size: u64,
}

impl Artifact {
    /// Open an artifact, failing if the path is missing or not a file
    pub fn open(path: impl Into<PathBuf>) -> DeployResult<Self> {
        let path = path.into();
        let metadata = std::fs::metadata(&path).map_err(|e| DeployError::io(&path, e))?;
        if !metadata.is_file() {
            return Err(DeployError::io(
                &path,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
            ));
        }
        Ok(Self {
            path,
            size: metadata.len(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn open_reads_size() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app");
        std::fs::write(&path, b"app-v1").unwrap();

        let artifact = Artifact::open(&path).unwrap();
        assert_eq!(artifact.size(), 6);
        assert_eq!(artifact.path(), path.as_path());
    }

    #[test]
    fn open_missing_is_io_error() {
        let dir = tempdir().unwrap();
        let err = Artifact::open(dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, DeployError::Io { .. }));
    }

    #[test]
    fn open_directory_is_io_error() {
        let dir = tempdir().unwrap();
        let err = Artifact::open(dir.path()).unwrap_err();
        assert!(matches!(err, DeployError::Io { .. }));
    }
}
