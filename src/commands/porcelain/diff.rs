use crate::areas::comparison::{Comparison, Outcome};
use crate::areas::tree::Tree;
use crate::artifacts::archive::{self, Workdir};
use crate::artifacts::diff::assembler::Report;
use crate::artifacts::diff::diff_entry::DiffEntry;
use crate::artifacts::diff::reconcile::TreeReconciler;
use anyhow::Context;
use colored::Colorize;
use std::path::Path;
use tracing::{info, warn};

impl Comparison {
    /// Compare two directories, two zip archives, or two plain files
    ///
    /// The report goes to `output` when given, to the writer otherwise.
    pub async fn diff(
        &self,
        source: &Path,
        destination: &Path,
        output: Option<&Path>,
    ) -> anyhow::Result<Outcome> {
        let report = if source.is_dir() && destination.is_dir() {
            self.diff_trees(source, destination).await?
        } else if archive::is_zip(source)? && archive::is_zip(destination)? {
            let workdir = Workdir::new().context("failed to create working directory")?;
            workdir.extract_pair(source, destination)?;
            info!(workdir = %workdir.path().display(), "extracted archives");

            self.diff_trees(&workdir.source(), &workdir.target()).await?
        } else {
            self.diff_files(source, destination)?
        };

        if report.is_empty() {
            if !report.skipped.is_empty() {
                warn!(
                    skipped = report.skipped.len(),
                    "no differences found, but some files could not be compared"
                );
            }
            writeln!(self.writer(), "files are equal")?;
            return Ok(Outcome::Equal);
        }

        match output {
            Some(path) => std::fs::write(path, report.to_string())
                .with_context(|| format!("failed to write {}", path.display()))?,
            None => self.print_report(&report)?,
        }

        Ok(Outcome::Different)
    }

    async fn diff_trees(&self, source: &Path, destination: &Path) -> anyhow::Result<Report> {
        let source = Tree::new(source.into());
        let destination = Tree::new(destination.into());
        let reconciliation = TreeReconciler::new(&source, &destination).reconcile()?;
        info!(
            added = reconciliation.added.len(),
            removed = reconciliation.removed.len(),
            existing = reconciliation.existing.len(),
            "reconciled trees"
        );

        let assembler = self.assembler(&source, &destination);
        let report = match self.options().jobs {
            0 | 1 => assembler.assemble(&reconciliation)?,
            jobs => assembler.assemble_concurrent(&reconciliation, jobs).await?,
        };

        Ok(report)
    }

    fn diff_files(&self, source: &Path, destination: &Path) -> anyhow::Result<Report> {
        let assembler = self.assembler(&Tree::new(source.into()), &Tree::new(destination.into()));
        let entries = assembler.compare_files(source, destination)?.into_iter().collect();

        Ok(Report {
            entries,
            skipped: Vec::new(),
        })
    }

    fn print_report(&self, report: &Report) -> anyhow::Result<()> {
        if !self.options().color {
            write!(self.writer(), "{report}")?;
            return Ok(());
        }

        for entry in &report.entries {
            self.print_entry(entry)?;
        }

        Ok(())
    }

    fn print_entry(&self, entry: &DiffEntry) -> anyhow::Result<()> {
        writeln!(self.writer(), "{}", entry.header().bold())?;

        for line in entry.body.lines() {
            let line = if line.starts_with("---") || line.starts_with("+++") {
                line.bold()
            } else if line.starts_with("@@") {
                line.cyan()
            } else if line.starts_with('+') {
                line.green()
            } else if line.starts_with('-') {
                line.red()
            } else {
                line.normal()
            };

            writeln!(self.writer(), "{line}")?;
        }

        Ok(())
    }
}
