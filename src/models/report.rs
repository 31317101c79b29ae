//! Rename report data model.
//!
//! A report enumerates what happened to every artifact of one item, so the
//! caller can persist the new state, retry failures, or show them.

use super::plan::OperationKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Report file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameReport {
    /// Report id.
    pub id: Uuid,
    /// Item that was renamed.
    pub item_id: Uuid,
    /// Start timestamp (RFC 3339).
    pub started_at: String,
    /// End timestamp (RFC 3339).
    pub finished_at: String,
    /// Root before renaming.
    pub old_root: PathBuf,
    /// Root after renaming.
    pub new_root: PathBuf,
    /// Artifact operations, in execution order.
    pub entries: Vec<ReportEntry>,
    /// Files removed by cleanup.
    pub deleted: Vec<PathBuf>,
    /// Delete targets skipped because they matched a protected root.
    pub protected_skips: Vec<PathBuf>,
}

impl Default for RenameReport {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            item_id: Uuid::nil(),
            started_at: String::new(),
            finished_at: String::new(),
            old_root: PathBuf::new(),
            new_root: PathBuf::new(),
            entries: Vec::new(),
            deleted: Vec::new(),
            protected_skips: Vec::new(),
        }
    }
}

impl RenameReport {
    /// Entries that failed.
    pub fn failures(&self) -> Vec<&ReportEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e.status, EntryStatus::Failed { .. }))
            .collect()
    }

    /// Whether every artifact operation succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures().is_empty()
    }

    /// Number of file system mutations performed (moves, copies, deletes).
    pub fn mutation_count(&self) -> usize {
        let moved = self
            .entries
            .iter()
            .filter(|e| e.status == EntryStatus::Relocated)
            .count();
        moved + self.deleted.len()
    }
}

/// A single artifact operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Source path.
    pub source: PathBuf,
    /// Target path.
    pub target: PathBuf,
    /// Operation that was attempted.
    pub operation: OperationKind,
    /// Outcome.
    pub status: EntryStatus,
}

/// Outcome of one artifact operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum EntryStatus {
    /// The file now lives at the target.
    Relocated,
    /// Nothing needed to change.
    LeftInPlace,
    /// The operation failed; the source is untouched.
    Failed { error: String },
}
