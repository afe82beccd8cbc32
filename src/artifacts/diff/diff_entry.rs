use crate::areas::tree::display_relative;
use crate::artifacts::diff::classification::PathClassification;
use derive_new::new;
use std::fmt::Display;
use std::path::Path;

pub const NULL_PATH: &str = "/dev/null";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    pub source_prefix: String,
    pub destination_prefix: String,
    pub no_prefix: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        DisplayOptions {
            source_prefix: "a/".to_string(),
            destination_prefix: "b/".to_string(),
            no_prefix: false,
        }
    }
}

impl DisplayOptions {
    /// Label for the source side; `None` means the file does not exist there
    pub fn source_label(&self, relative: Option<&Path>) -> String {
        self.label(relative, &self.source_prefix)
    }

    pub fn destination_label(&self, relative: Option<&Path>) -> String {
        self.label(relative, &self.destination_prefix)
    }

    fn label(&self, relative: Option<&Path>, prefix: &str) -> String {
        match relative {
            None => NULL_PATH.to_string(),
            Some(relative) if self.no_prefix => display_relative(relative),
            Some(relative) => format!("{prefix}{}", display_relative(relative)),
        }
    }
}

/// One file's contribution to the combined report
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct DiffEntry {
    pub classification: PathClassification,
    pub source_label: String,
    pub destination_label: String,
    pub body: String,
}

impl DiffEntry {
    pub fn header(&self) -> String {
        format!("diff {} {}", self.source_label, self.destination_label)
    }

    pub fn binary_notice(source_label: &str, destination_label: &str) -> String {
        format!("Binary files {source_label} and {destination_label} differ\n")
    }
}

impl Display for DiffEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.header())?;
        write!(f, "{}", self.body)
    }
}
