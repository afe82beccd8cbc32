use crate::errors::{DiffError, DiffResult};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One side of a comparison: a directory holding an extracted archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    path: Box<Path>,
}

impl Tree {
    pub fn new(path: Box<Path>) -> Self {
        Tree { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn absolute(&self, relative: &Path) -> PathBuf {
        self.path.join(relative)
    }

    /// Every regular file below the root, relative to it
    ///
    /// Traversal is depth-first with siblings visited in file name order, so the
    /// listing is stable across runs. Symlinks and directories are not listed.
    pub fn list_files(&self) -> DiffResult<Vec<PathBuf>> {
        let metadata = std::fs::metadata(&self.path).map_err(|source| DiffError::Traversal {
            path: self.path.to_path_buf(),
            source,
        })?;

        if !metadata.is_dir() {
            return Err(DiffError::Traversal {
                path: self.path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotADirectory, "tree root is not a directory"),
            });
        }

        WalkDir::new(&self.path)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) if entry.file_type().is_file() => Some(
                    entry
                        .path()
                        .strip_prefix(&self.path)
                        .map(Path::to_path_buf)
                        .map_err(|_| DiffError::Traversal {
                            path: entry.path().to_path_buf(),
                            source: io::Error::other("entry escapes tree root"),
                        }),
                ),
                Ok(_) => None,
                Err(e) => Some(Err(DiffError::traversal(&*self.path, e))),
            })
            .collect()
    }

    /// Whether `relative` names a regular file (not a directory, not a symlink)
    pub fn contains_file(&self, relative: &Path) -> DiffResult<bool> {
        let path = self.absolute(relative);

        match std::fs::symlink_metadata(&path) {
            Ok(metadata) => Ok(metadata.file_type().is_file()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            // a file standing where the other tree has a directory
            Err(e) if e.kind() == io::ErrorKind::NotADirectory => Ok(false),
            Err(source) => Err(DiffError::Traversal { path, source }),
        }
    }
}

/// Forward-slash rendering of a relative path, independent of the host separator
pub fn display_relative(relative: &Path) -> String {
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
