//! Cleanup of files a rename made obsolete.
//!
//! The candidate set is taken before any artifact is touched: every name a
//! metadata document, poster or fanart of the item could have had, plus
//! every tracked artifact. Whatever the rename did not produce or keep is
//! deleted. The datasource root and the item's old and new roots are never
//! deleted, whatever the candidate set says.

use super::artifacts;
use super::executor::Executor;
use crate::models::media::MediaItem;
use crate::models::report::RenameReport;
use crate::services::messages::{Message, MessageSink};
use crate::utils::fs;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Paths cleanup must never delete.
#[derive(Debug, Clone)]
pub struct ProtectedRoots {
    pub data_source: PathBuf,
    pub old_root: PathBuf,
    pub new_root: PathBuf,
}

impl ProtectedRoots {
    pub fn contains(&self, path: &Path) -> bool {
        path == self.data_source || path == self.old_root || path == self.new_root
    }
}

/// Snapshot the cleanup candidates of an item, evaluated against `root`.
///
/// Variant names use the item's current video basename, so leftovers of any
/// earlier naming policy are found. Duplicates are removed, order is kept.
pub fn candidate_set(item: &MediaItem, root: &Path) -> Vec<PathBuf> {
    let basename = item
        .first_video()
        .map(|v| v.basename())
        .unwrap_or_default();

    let variants = artifacts::all_variant_paths(item, &basename, root);
    let tracked = item.artifacts.iter().map(|a| a.path.clone());
    dedup(variants.into_iter().chain(tracked).collect())
}

/// Remove duplicate paths, keeping the first occurrence.
pub fn dedup(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    paths.into_iter().filter(|p| seen.insert(p.clone())).collect()
}

/// Delete every candidate that is not needed.
///
/// Protected roots are skipped with a warning and recorded in the report.
/// Deletion failures are reported to the sink and do not stop the pass.
/// Directories left empty are removed, except protected ones.
pub fn reconcile(
    candidates: &[PathBuf],
    needed: &[PathBuf],
    roots: &ProtectedRoots,
    executor: &Executor,
    sink: &dyn MessageSink,
    report: &mut RenameReport,
) {
    let needed: HashSet<&PathBuf> = needed.iter().collect();

    // reverse order: files inside subfolders go before their folders
    for candidate in candidates.iter().rev() {
        if needed.contains(candidate) {
            continue;
        }

        if roots.contains(candidate) {
            let violation = crate::Error::SafetyViolation(candidate.clone());
            tracing::warn!("{}", violation);
            report.protected_skips.push(candidate.clone());
            continue;
        }

        if candidate.is_file() {
            match executor.delete(candidate, &roots.data_source) {
                Ok(()) => report.deleted.push(candidate.clone()),
                Err(e) => {
                    let error = crate::Error::artifact(candidate, e.to_string());
                    tracing::error!("{}", error);
                    sink.push(Message::error(candidate, error.to_string()));
                }
            }
        } else if candidate.is_dir() {
            tracing::warn!("Cleanup candidate {:?} is a directory, skipping", candidate);
            continue;
        }

        remove_if_empty(candidate.parent(), roots);
    }
}

/// Remove a directory that has become empty. Best effort.
fn remove_if_empty(dir: Option<&Path>, roots: &ProtectedRoots) {
    let Some(dir) = dir else {
        return;
    };
    if roots.contains(dir) || !dir.starts_with(&roots.data_source) || !fs::is_dir_empty(dir) {
        return;
    }
    match std::fs::remove_dir(dir) {
        Ok(()) => tracing::debug!("Deleted empty directory {:?}", dir),
        Err(e) => tracing::debug!("Could not delete empty directory {:?}: {}", dir, e),
    }
}
