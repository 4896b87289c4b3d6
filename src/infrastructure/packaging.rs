//! Zip packaging for the Lambda custom runtime
//!
//! The runtime executes a file named `bootstrap` at the archive root, so
//! the binary is stored under that name regardless of its on-disk name.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::domain::entities::Artifact;
use crate::domain::ports::{Packager, BOOTSTRAP_ENTRY};
use crate::error::{DeployError, DeployResult};

/// Archive file name inside the staging directory
pub const ARCHIVE_NAME: &str = "code.zip";

/// Packages an artifact as `code.zip` containing `bootstrap`
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipPackager;

impl Packager for ZipPackager {
    fn package(&self, artifact: &Artifact, staging_dir: &Path) -> DeployResult<PathBuf> {
        let out = staging_dir.join(ARCHIVE_NAME);
        write_archive(artifact.path(), &out).map_err(|e| DeployError::io(&out, e))?;
        Ok(out)
    }
}

fn write_archive(source: &Path, out: &Path) -> io::Result<()> {
    let mut input = BufReader::new(File::open(source)?);
    let mut zip = ZipWriter::new(File::create(out)?);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);

    zip.start_file(BOOTSTRAP_ENTRY, options)
        .map_err(io::Error::other)?;
    io::copy(&mut input, &mut zip)?;
    zip.finish().map_err(io::Error::other)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::tempdir;

    #[test]
    fn archive_contains_bootstrap_entry() {
        let dir = tempdir().unwrap();
        let bin = dir.path().join("myapp");
        std::fs::write(&bin, b"\x7fELF app-v1").unwrap();
        let artifact = Artifact::open(&bin).unwrap();

        let staging = tempdir().unwrap();
        let archive_path = ZipPackager.package(&artifact, staging.path()).unwrap();
        assert_eq!(archive_path, staging.path().join(ARCHIVE_NAME));

        let mut archive = zip::ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
        assert_eq!(archive.len(), 1);
        let mut entry = archive.by_name(BOOTSTRAP_ENTRY).unwrap();
        let mut content = Vec::new();
        entry.read_to_end(&mut content).unwrap();
        assert_eq!(content, b"\x7fELF app-v1");
        assert_eq!(entry.unix_mode().map(|m| m & 0o777), Some(0o755));
    }
}
