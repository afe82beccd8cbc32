//! Error taxonomy for tree comparisons
//!
//! Errors fall into two groups:
//!
//! - **Fatal**: the run cannot produce a trustworthy report at all (a tree could
//!   not be walked, an archive could not be unpacked).
//! - **Per-file**: one file pair could not be compared. Whether these abort the
//!   run or are skipped is decided by the caller's [`ErrorPolicy`].
//!
//! [`ErrorPolicy`]: crate::artifacts::diff::assembler::ErrorPolicy

use std::path::PathBuf;
use thiserror::Error;

/// Failure while canonicalizing a structured-text document
#[derive(Error, Debug)]
pub enum CanonicalizeError {
    /// The document declares a charset the decoder does not know
    #[error("unsupported charset: {0}")]
    UnknownCharset(String),

    /// The bytes are not valid in the declared (or detected) charset
    #[error("content is not valid {0}")]
    Undecodable(&'static str),

    /// The tokenizer rejected the markup
    #[error("malformed markup at byte {position}: {message}")]
    Syntax { position: u64, message: String },

    /// Input ended while elements were still open
    #[error("unexpected end of document: {open} unclosed element(s)")]
    Unbalanced { open: usize },
}

/// Failure while reconciling or diffing two trees
#[derive(Error, Debug)]
pub enum DiffError {
    #[error("failed to walk {}: {source}", path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    ContentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to canonicalize {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: CanonicalizeError,
    },

    /// The equality check hit an I/O error before reaching a verdict
    #[error("failed to compare {} with {}: {source}", path_a.display(), path_b.display())]
    StreamMismatch {
        path_a: PathBuf,
        path_b: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid archive {}: {reason}", path.display())]
    Archive { path: PathBuf, reason: String },

    /// A worker of the concurrent assembler panicked or was cancelled
    #[error("comparison worker failed: {0}")]
    Worker(String),
}

impl DiffError {
    /// Whether the error concerns a single file pair rather than the whole run
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            DiffError::ContentRead { .. }
                | DiffError::Malformed { .. }
                | DiffError::StreamMismatch { .. }
        )
    }

    pub(crate) fn traversal(path: impl Into<PathBuf>, source: walkdir::Error) -> Self {
        let path = source
            .path()
            .map(PathBuf::from)
            .unwrap_or_else(|| path.into());
        let source = source
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));

        DiffError::Traversal { path, source }
    }
}

pub type DiffResult<T> = Result<T, DiffError>;
