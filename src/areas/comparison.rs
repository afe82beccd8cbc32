use crate::areas::tree::Tree;
use crate::artifacts::diff::assembler::{AssembleOptions, DiffAssembler};
use crate::artifacts::diff::renderer::{SimilarRenderer, UnifiedRenderer};
use crate::artifacts::format::normalizer::{ContentNormalizer, NormalizeOptions};
use std::cell::{RefCell, RefMut};
use std::sync::Arc;

/// Result of a command that compares two things
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Equal,
    Different,
}

impl Outcome {
    pub fn from_equal(equal: bool) -> Self {
        if equal { Outcome::Equal } else { Outcome::Different }
    }

    /// `diff(1)` convention: 0 when equal, 1 when differences were found
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Equal => 0,
            Outcome::Different => 1,
        }
    }
}

/// Settings of one comparison run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonOptions {
    pub assemble: AssembleOptions,
    pub normalize: NormalizeOptions,
    pub jobs: usize,
    pub color: bool,
}

impl Default for ComparisonOptions {
    fn default() -> Self {
        ComparisonOptions {
            assemble: AssembleOptions::default(),
            normalize: NormalizeOptions::default(),
            jobs: 1,
            color: false,
        }
    }
}

/// Shared state of the commands: where output goes and how content is compared
pub struct Comparison {
    writer: RefCell<Box<dyn std::io::Write>>,
    normalizer: Arc<ContentNormalizer>,
    renderer: Arc<dyn UnifiedRenderer>,
    options: ComparisonOptions,
}

impl Comparison {
    pub fn new(options: ComparisonOptions, writer: Box<dyn std::io::Write>) -> Self {
        Comparison {
            writer: RefCell::new(writer),
            normalizer: Arc::new(ContentNormalizer::new(options.normalize.clone())),
            renderer: Arc::new(SimilarRenderer::default()),
            options,
        }
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn normalizer(&self) -> &ContentNormalizer {
        &self.normalizer
    }

    pub fn options(&self) -> &ComparisonOptions {
        &self.options
    }

    pub fn assembler(&self, source: &Tree, destination: &Tree) -> DiffAssembler {
        DiffAssembler::new(
            source.clone(),
            destination.clone(),
            Arc::clone(&self.normalizer),
            Arc::clone(&self.renderer),
            self.options.assemble.clone(),
        )
    }
}
