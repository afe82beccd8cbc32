//! Content normalization ahead of diffing
//!
//! Structured-text files are canonicalized; any other file is passed through
//! untouched. Opaque files that both trees contain are never loaded: they are
//! only checked for byte equality by streaming them side by side.

use crate::artifacts::compare::stream_equality::{DEFAULT_CHUNK_SIZE, StreamComparator};
use crate::artifacts::format::file_kind::{FileKind, FileKindRegistry, StructuredFormat};
use crate::artifacts::format::xml::{DEFAULT_INDENT, XmlCanonicalizer};
use crate::errors::{DiffError, DiffResult};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub indent_unit: String,
    pub chunk_size: usize,
    pub registry: FileKindRegistry,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        NormalizeOptions {
            indent_unit: DEFAULT_INDENT.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            registry: FileKindRegistry::default(),
        }
    }
}

/// Normalized file content, ready to be handed to the line differ
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonicalContent {
    Text(String),
    /// Content that is not UTF-8 text and can only be compared for equality
    Binary(Vec<u8>),
}

impl CanonicalContent {
    /// Classify raw pass-through bytes: valid UTF-8 without NUL is text
    pub fn from_raw(bytes: Vec<u8>) -> Self {
        if bytes.contains(&0) {
            return CanonicalContent::Binary(bytes);
        }

        match String::from_utf8(bytes) {
            Ok(text) => CanonicalContent::Text(text),
            Err(e) => CanonicalContent::Binary(e.into_bytes()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CanonicalContent::Text(text) => Some(text),
            CanonicalContent::Binary(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContentNormalizer {
    registry: FileKindRegistry,
    xml: XmlCanonicalizer,
    comparator: StreamComparator,
}

impl Default for ContentNormalizer {
    fn default() -> Self {
        Self::new(NormalizeOptions::default())
    }
}

impl ContentNormalizer {
    pub fn new(options: NormalizeOptions) -> Self {
        ContentNormalizer {
            registry: options.registry,
            xml: XmlCanonicalizer::new(options.indent_unit),
            comparator: StreamComparator::new(options.chunk_size),
        }
    }

    pub fn classify(&self, path: &Path) -> FileKind {
        self.registry.classify(path)
    }

    pub fn normalize(&self, path: &Path) -> DiffResult<(FileKind, CanonicalContent)> {
        let kind = self.classify(path);
        let bytes = std::fs::read(path).map_err(|source| DiffError::ContentRead {
            path: path.to_path_buf(),
            source,
        })?;

        let content = match kind {
            FileKind::Structured(StructuredFormat::Xml) => {
                let text = self
                    .xml
                    .canonicalize_bytes(&bytes)
                    .map_err(|source| DiffError::Malformed {
                        path: path.to_path_buf(),
                        source,
                    })?;
                CanonicalContent::Text(text)
            }
            FileKind::Opaque => CanonicalContent::from_raw(bytes),
        };

        debug!(path = %path.display(), ?kind, "normalized file");

        Ok((kind, content))
    }

    pub fn is_binary_identical(&self, path_a: &Path, path_b: &Path) -> DiffResult<bool> {
        self.comparator.equal_files(path_a, path_b)
    }
}
