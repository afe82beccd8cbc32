//! Per-file diff assembly
//!
//! The assembler walks a [`Reconciliation`] in `{added, existing, removed}`
//! order and turns every path into at most one [`DiffEntry`]. Structured-text
//! files are compared on their canonical form, opaque files that both trees hold
//! are only checked for byte equality.
//!
//! Per-file failures are either recorded and skipped or returned, depending on
//! the [`ErrorPolicy`]. Fatal errors are always returned.

use crate::areas::tree::Tree;
use crate::artifacts::diff::classification::{DiffFilter, PathClassification};
use crate::artifacts::diff::diff_entry::{DiffEntry, DisplayOptions};
use crate::artifacts::diff::reconcile::Reconciliation;
use crate::artifacts::diff::renderer::UnifiedRenderer;
use crate::artifacts::format::file_kind::FileKind;
use crate::artifacts::format::normalizer::{CanonicalContent, ContentNormalizer};
use crate::errors::{DiffError, DiffResult};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Record the failing path and keep going
    #[default]
    SkipAndContinue,
    Abort,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssembleOptions {
    pub display: DisplayOptions,
    pub policy: ErrorPolicy,
    pub filter: DiffFilter,
}

/// A path left out of the report because it could not be compared
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: DiffError,
}

#[derive(Debug, Default)]
pub struct Report {
    pub entries: Vec<DiffEntry>,
    pub skipped: Vec<SkippedFile>,
}

impl Report {
    /// No entries means the trees are equivalent (skipped paths aside)
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for entry in &self.entries {
            write!(f, "{entry}")?;
        }

        Ok(())
    }
}

/// One unit of per-file work, carrying the path relative to both roots
#[derive(Debug, Clone, PartialEq, Eq)]
enum PathJob {
    Added(PathBuf),
    Existing(PathBuf),
    Removed(PathBuf),
}

impl PathJob {
    fn classification(&self) -> PathClassification {
        match self {
            PathJob::Added(_) => PathClassification::Added,
            PathJob::Existing(_) => PathClassification::Modified,
            PathJob::Removed(_) => PathClassification::Removed,
        }
    }

    fn relative(&self) -> &Path {
        match self {
            PathJob::Added(path) | PathJob::Existing(path) | PathJob::Removed(path) => path,
        }
    }
}

#[derive(Clone)]
pub struct DiffAssembler {
    source: Tree,
    destination: Tree,
    normalizer: Arc<ContentNormalizer>,
    renderer: Arc<dyn UnifiedRenderer>,
    options: AssembleOptions,
}

impl DiffAssembler {
    pub fn new(
        source: Tree,
        destination: Tree,
        normalizer: Arc<ContentNormalizer>,
        renderer: Arc<dyn UnifiedRenderer>,
        options: AssembleOptions,
    ) -> Self {
        DiffAssembler {
            source,
            destination,
            normalizer,
            renderer,
            options,
        }
    }

    pub fn assemble(&self, reconciliation: &Reconciliation) -> DiffResult<Report> {
        let mut report = Report::default();

        for job in self.jobs(reconciliation) {
            let outcome = self.diff_path(&job);
            self.record(&mut report, &job, outcome)?;
        }

        self.summarize(&report);
        Ok(report)
    }

    /// Same report as [`assemble`](Self::assemble), with per-file work spread
    /// over at most `jobs` blocking workers
    pub async fn assemble_concurrent(
        &self,
        reconciliation: &Reconciliation,
        jobs: usize,
    ) -> DiffResult<Report> {
        let semaphore = Arc::new(Semaphore::new(jobs.max(1)));
        let assembler = Arc::new(self.clone());
        let mut handles = Vec::new();

        for job in self.jobs(reconciliation) {
            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .map_err(|e| DiffError::Worker(e.to_string()))?;
            let assembler = Arc::clone(&assembler);

            handles.push(tokio::task::spawn_blocking(move || {
                let _permit = permit;
                let outcome = assembler.diff_path(&job);
                (job, outcome)
            }));
        }

        // handles are awaited in submission order, which is the report order
        let mut report = Report::default();
        for handle in handles {
            let (job, outcome) = handle
                .await
                .map_err(|e| DiffError::Worker(e.to_string()))?;
            self.record(&mut report, &job, outcome)?;
        }

        self.summarize(&report);
        Ok(report)
    }

    fn jobs(&self, reconciliation: &Reconciliation) -> Vec<PathJob> {
        let added = reconciliation.added.iter().cloned().map(PathJob::Added);
        let existing = reconciliation.existing.iter().cloned().map(PathJob::Existing);
        let removed = reconciliation.removed.iter().cloned().map(PathJob::Removed);

        added
            .chain(existing)
            .chain(removed)
            .filter(|job| job.classification().matches_filter(self.options.filter))
            .collect()
    }

    fn record(
        &self,
        report: &mut Report,
        job: &PathJob,
        outcome: DiffResult<Option<DiffEntry>>,
    ) -> DiffResult<()> {
        match outcome {
            Ok(Some(entry)) => {
                debug!(path = %job.relative().display(), status = %entry.classification, "compared");
                report.entries.push(entry);
            }
            Ok(None) => {
                debug!(
                    path = %job.relative().display(),
                    status = %PathClassification::Unchanged,
                    "compared"
                );
            }
            Err(error) if error.is_per_file() && self.options.policy == ErrorPolicy::SkipAndContinue => {
                warn!(path = %job.relative().display(), %error, "skipping file");
                report.skipped.push(SkippedFile {
                    path: job.relative().to_path_buf(),
                    error,
                });
            }
            Err(error) => return Err(error),
        }

        Ok(())
    }

    fn summarize(&self, report: &Report) {
        info!(
            entries = report.entries.len(),
            skipped = report.skipped.len(),
            "assembled report"
        );
    }

    fn diff_path(&self, job: &PathJob) -> DiffResult<Option<DiffEntry>> {
        let display = &self.options.display;

        match job {
            PathJob::Added(relative) => {
                let label_a = display.source_label(None);
                let label_b = display.destination_label(Some(relative));
                let (_, content) = self.normalizer.normalize(&self.destination.absolute(relative))?;

                let body = match content {
                    CanonicalContent::Text(text) => self.renderer.render(&label_a, &label_b, "", &text),
                    CanonicalContent::Binary(_) => DiffEntry::binary_notice(&label_a, &label_b),
                };

                Ok(Some(DiffEntry::new(PathClassification::Added, label_a, label_b, body)))
            }
            PathJob::Removed(relative) => {
                let label_a = display.source_label(Some(relative));
                let label_b = display.destination_label(None);
                let (_, content) = self.normalizer.normalize(&self.source.absolute(relative))?;

                let body = match content {
                    CanonicalContent::Text(text) => self.renderer.render(&label_a, &label_b, &text, ""),
                    CanonicalContent::Binary(_) => DiffEntry::binary_notice(&label_a, &label_b),
                };

                Ok(Some(DiffEntry::new(PathClassification::Removed, label_a, label_b, body)))
            }
            PathJob::Existing(relative) => self.diff_pair(
                &self.source.absolute(relative),
                &self.destination.absolute(relative),
                display.source_label(Some(relative)),
                display.destination_label(Some(relative)),
            ),
        }
    }

    /// Diff two files that both exist; `None` when they are equivalent
    fn diff_pair(
        &self,
        path_a: &Path,
        path_b: &Path,
        label_a: String,
        label_b: String,
    ) -> DiffResult<Option<DiffEntry>> {
        let body = match self.normalizer.classify(path_b) {
            FileKind::Opaque => {
                if self.normalizer.is_binary_identical(path_a, path_b)? {
                    String::new()
                } else {
                    DiffEntry::binary_notice(&label_a, &label_b)
                }
            }
            FileKind::Structured(_) => {
                let (_, content_a) = self.normalizer.normalize(path_a)?;
                let (_, content_b) = self.normalizer.normalize(path_b)?;

                match (content_a.as_text(), content_b.as_text()) {
                    (Some(text_a), Some(text_b)) => {
                        self.renderer.render(&label_a, &label_b, text_a, text_b)
                    }
                    _ if content_a == content_b => String::new(),
                    _ => DiffEntry::binary_notice(&label_a, &label_b),
                }
            }
        };

        if body.is_empty() {
            return Ok(None);
        }

        Ok(Some(DiffEntry::new(PathClassification::Modified, label_a, label_b, body)))
    }

    /// Compare two explicit files outside of any tree; every error is fatal
    ///
    /// Labels are built from the file names of the two operands.
    pub fn compare_files(&self, path_a: &Path, path_b: &Path) -> DiffResult<Option<DiffEntry>> {
        let display = &self.options.display;
        let label_a = display.source_label(Some(file_label(path_a)));
        let label_b = display.destination_label(Some(file_label(path_b)));

        self.diff_pair(path_a, path_b, label_a, label_b)
    }
}

fn file_label(path: &Path) -> &Path {
    path.file_name().map(Path::new).unwrap_or(path)
}
