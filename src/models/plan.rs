//! Planning data model.

use super::media::Artifact;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What happens to a source artifact to produce one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// 1:1 relocation, the source disappears.
    Move,
    /// Source stays until cleanup decides its fate.
    Copy,
    /// Source is already where it belongs.
    Keep,
}

/// One planned target for a source artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedArtifact {
    /// Artifact as currently tracked.
    pub source: Artifact,
    /// Artifact as it will be tracked after the operation.
    pub target: Artifact,
    /// Operation to perform.
    pub op: OperationKind,
}

impl PlannedArtifact {
    /// Plan a move, downgraded to `Keep` when nothing changes.
    pub fn moved(source: &Artifact, target: Artifact) -> Self {
        let op = if source.path == target.path {
            OperationKind::Keep
        } else {
            OperationKind::Move
        };
        Self {
            source: source.clone(),
            target,
            op,
        }
    }

    /// Plan a copy, downgraded to `Keep` when nothing changes.
    pub fn copied(source: &Artifact, target: Artifact) -> Self {
        let op = if source.path == target.path {
            OperationKind::Keep
        } else {
            OperationKind::Copy
        };
        Self {
            source: source.clone(),
            target,
            op,
        }
    }

    /// Keep the source untouched.
    pub fn kept(source: &Artifact) -> Self {
        Self {
            source: source.clone(),
            target: source.clone(),
            op: OperationKind::Keep,
        }
    }
}

/// How the item's directory changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FolderTransition {
    /// Folder template empty or new root equals current root.
    Unchanged,
    /// Exclusive to exclusive: move the whole directory.
    MoveDirectory,
    /// Shared to exclusive: create a fresh directory.
    Upgrade,
    /// Anything to shared: make sure the destination exists.
    Shared,
}

/// Result of layout planning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDecision {
    /// Root before renaming.
    pub old_root: PathBuf,
    /// Root after renaming.
    pub new_root: PathBuf,
    /// Whether the new root is shared with other items.
    pub shared_dir: bool,
    /// Whether the folder template was empty (no folder action).
    pub folder_template_empty: bool,
    /// Directory action to perform.
    pub transition: FolderTransition,
}

impl LayoutDecision {
    /// Whether the item changes directory.
    pub fn changes_root(&self) -> bool {
        self.old_root != self.new_root
    }
}
