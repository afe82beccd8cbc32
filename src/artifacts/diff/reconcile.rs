use crate::areas::tree::Tree;
use crate::errors::DiffResult;
use std::path::PathBuf;
use tracing::debug;

/// Relative paths split by which tree holds them
///
/// `removed` and `existing` follow the source tree's traversal order, `added`
/// follows the destination tree's.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub added: Vec<PathBuf>,
    pub removed: Vec<PathBuf>,
    pub existing: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy)]
pub struct TreeReconciler<'t> {
    source: &'t Tree,
    destination: &'t Tree,
}

impl<'t> TreeReconciler<'t> {
    pub fn new(source: &'t Tree, destination: &'t Tree) -> Self {
        TreeReconciler {
            source,
            destination,
        }
    }

    /// Two one-directional scans, each probing the other tree for every file
    pub fn reconcile(&self) -> DiffResult<Reconciliation> {
        let mut reconciliation = Reconciliation::default();

        for path in self.source.list_files()? {
            if self.destination.contains_file(&path)? {
                reconciliation.existing.push(path);
            } else {
                debug!(path = %path.display(), "removed");
                reconciliation.removed.push(path);
            }
        }

        for path in self.destination.list_files()? {
            if !self.source.contains_file(&path)? {
                debug!(path = %path.display(), "added");
                reconciliation.added.push(path);
            }
        }

        Ok(reconciliation)
    }
}
