//! Zip front-end: unpacks two archives side by side so they can be compared
//! as plain directory trees

use crate::errors::{DiffError, DiffResult};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;
use zip::ZipArchive;

const ZIP_SIGNATURE: [u8; 4] = *b"PK\x03\x04";

/// Whether `path` is a regular file starting with a local file header
pub fn is_zip(path: &Path) -> io::Result<bool> {
    if !path.is_file() {
        return Ok(false);
    }

    let mut signature = [0u8; 4];
    let mut file = File::open(path)?;

    match file.read_exact(&mut signature) {
        Ok(()) => Ok(signature == ZIP_SIGNATURE),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e),
    }
}

/// Extract every entry of `zip_path` below `destination`
///
/// An entry that would land outside `destination` aborts the extraction.
pub fn extract(zip_path: &Path, destination: &Path) -> DiffResult<()> {
    let archive_error = |reason: String| DiffError::Archive {
        path: zip_path.to_path_buf(),
        reason,
    };

    let file = File::open(zip_path).map_err(|e| archive_error(e.to_string()))?;
    let mut archive = ZipArchive::new(file).map_err(|e| archive_error(e.to_string()))?;

    std::fs::create_dir_all(destination).map_err(|e| archive_error(e.to_string()))?;

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| archive_error(e.to_string()))?;
        let target = entry
            .enclosed_name()
            .filter(|name| is_contained(name))
            .map(|name| destination.join(name))
            .ok_or_else(|| archive_error(format!("entry escapes extraction root: {}", entry.name())))?;

        if entry.is_dir() {
            std::fs::create_dir_all(&target).map_err(|e| archive_error(e.to_string()))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|e| archive_error(e.to_string()))?;
        }

        let mut output = File::create(&target).map_err(|e| archive_error(e.to_string()))?;
        io::copy(&mut entry, &mut output).map_err(|e| archive_error(e.to_string()))?;

        debug!(entry = %target.display(), "extracted");
    }

    Ok(())
}

fn is_contained(name: &Path) -> bool {
    name.components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}

/// Temporary directory holding the two extracted trees, removed on drop
#[derive(Debug)]
pub struct Workdir {
    dir: TempDir,
}

impl Workdir {
    pub fn new() -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("office-diff_").tempdir()?;

        Ok(Workdir { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn source(&self) -> PathBuf {
        self.dir.path().join("source")
    }

    pub fn target(&self) -> PathBuf {
        self.dir.path().join("target")
    }

    /// Unpack both archives into `source/` and `target/`
    pub fn extract_pair(&self, source_zip: &Path, target_zip: &Path) -> DiffResult<()> {
        extract(source_zip, &self.source())?;
        extract(target_zip, &self.target())
    }
}
