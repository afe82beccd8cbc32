use bitflags::bitflags;
use std::fmt::Display;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct DiffFilter: u32 {
        const ADDED = 0b0001;
        const REMOVED = 0b0010;
        const MODIFIED = 0b0100;
    }
}

impl DiffFilter {
    /// Parse a git-style filter string such as `AM`; `D` selects removals
    pub fn try_parse(s: &str) -> Option<Self> {
        let mut filter = Self::empty();

        for c in s.chars() {
            match c {
                'A' => filter |= Self::ADDED,
                'D' => filter |= Self::REMOVED,
                'M' => filter |= Self::MODIFIED,
                _ => return None,
            }
        }

        Some(filter)
    }
}

impl Default for DiffFilter {
    fn default() -> Self {
        Self::all()
    }
}

/// Outcome of comparing one relative path across the two trees
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathClassification {
    Added,
    Removed,
    Modified,
    /// Present in both trees with equivalent content; never reported
    Unchanged,
}

impl PathClassification {
    pub fn matches_filter(&self, filter: DiffFilter) -> bool {
        match self {
            PathClassification::Added => filter.contains(DiffFilter::ADDED),
            PathClassification::Removed => filter.contains(DiffFilter::REMOVED),
            PathClassification::Modified => filter.contains(DiffFilter::MODIFIED),
            PathClassification::Unchanged => false,
        }
    }

    pub fn status_char(&self) -> char {
        match self {
            PathClassification::Added => 'A',
            PathClassification::Removed => 'D',
            PathClassification::Modified => 'M',
            PathClassification::Unchanged => ' ',
        }
    }
}

impl Display for PathClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.status_char())
    }
}
