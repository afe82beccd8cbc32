use similar::{Algorithm, TextDiff};

pub const DEFAULT_CONTEXT_RADIUS: usize = 3;

/// Turns two texts into a unified diff body
///
/// Implementations must return an empty string when the texts are equal, and
/// otherwise a body starting with the `---`/`+++` header lines.
pub trait UnifiedRenderer: Send + Sync {
    fn render(&self, label_a: &str, label_b: &str, text_a: &str, text_b: &str) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimilarRenderer {
    context_radius: usize,
}

impl SimilarRenderer {
    pub fn new(context_radius: usize) -> Self {
        SimilarRenderer { context_radius }
    }
}

impl Default for SimilarRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_CONTEXT_RADIUS)
    }
}

impl UnifiedRenderer for SimilarRenderer {
    fn render(&self, label_a: &str, label_b: &str, text_a: &str, text_b: &str) -> String {
        let diff = TextDiff::configure()
            .algorithm(Algorithm::Myers)
            .diff_lines(text_a, text_b);

        // header lines are only written ahead of the first hunk
        diff.unified_diff()
            .context_radius(self.context_radius)
            .header(label_a, label_b)
            .to_string()
    }
}
