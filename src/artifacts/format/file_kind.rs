//! File classification by name suffix
//!
//! Every structured-text variant owns a list of suffixes. A file whose name ends
//! with one of them is canonicalized before diffing; everything else is opaque
//! and only ever compared byte for byte.

use phf::phf_map;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::Path;

const XML_SUFFIXES: &[&str] = &[".xml", ".xml.rels", ".rels"];

static DEFAULT_SUFFIXES: phf::Map<&'static str, &'static [&'static str]> = phf_map! {
    "xml" => XML_SUFFIXES,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StructuredFormat {
    Xml,
}

impl StructuredFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            StructuredFormat::Xml => "xml",
        }
    }

    pub fn try_parse(name: &str) -> Option<Self> {
        match name {
            "xml" => Some(StructuredFormat::Xml),
            _ => None,
        }
    }
}

impl Display for StructuredFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Structured(StructuredFormat),
    Opaque,
}

/// Suffix table consulted by [`FileKindRegistry::classify`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileKindRegistry {
    suffixes: BTreeMap<StructuredFormat, Vec<String>>,
}

impl Default for FileKindRegistry {
    fn default() -> Self {
        let suffixes = DEFAULT_SUFFIXES
            .entries()
            .filter_map(|(name, suffixes)| {
                StructuredFormat::try_parse(name)
                    .map(|format| (format, suffixes.iter().map(|s| s.to_string()).collect()))
            })
            .collect();

        FileKindRegistry { suffixes }
    }
}

impl FileKindRegistry {
    pub fn empty() -> Self {
        FileKindRegistry {
            suffixes: BTreeMap::new(),
        }
    }

    /// Register another suffix for a variant; a missing leading dot is added
    pub fn add_suffix(&mut self, format: StructuredFormat, suffix: &str) {
        let suffix = if suffix.starts_with('.') {
            suffix.to_string()
        } else {
            format!(".{suffix}")
        };

        let entry = self.suffixes.entry(format).or_default();
        if !entry.contains(&suffix) {
            entry.push(suffix);
        }
    }

    pub fn suffixes(&self, format: StructuredFormat) -> &[String] {
        self.suffixes
            .get(&format)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn classify(&self, path: &Path) -> FileKind {
        let Some(name) = path.file_name().map(|name| name.to_string_lossy()) else {
            return FileKind::Opaque;
        };

        self.suffixes
            .iter()
            .find(|(_, suffixes)| suffixes.iter().any(|suffix| name.ends_with(suffix.as_str())))
            .map(|(format, _)| FileKind::Structured(*format))
            .unwrap_or(FileKind::Opaque)
    }
}
