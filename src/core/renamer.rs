//! Rename orchestration.
//!
//! A rename runs in a fixed order:
//! 1. validate the item and policy
//! 2. plan the layout
//! 3. probe every video
//! 4. apply the folder transition
//! 5. snapshot cleanup candidates
//! 6. move videos, copy sidecars
//! 7. commit the new artifact list and root
//! 8. rename subtitles
//! 9. clean up
//!
//! Steps 1 to 4 can fail the whole rename; nothing has been changed on disk
//! when they do. From step 6 on, failures are reported per artifact.

use super::artifacts::{self, PlanContext};
use super::cleanup::{self, ProtectedRoots};
use super::executor::Executor;
use super::layout;
use super::subtitles;
use crate::models::media::{newest, Artifact, ArtifactType, MediaItem};
use crate::models::plan::{FolderTransition, PlannedArtifact};
use crate::models::policy::NamingPolicy;
use crate::models::report::{EntryStatus, RenameReport};
use crate::services::messages::{Message, MessageSink, TracingSink};
use crate::services::nfo::{NfoInspector, XmlRootInspector};
use crate::{Error, Result};
use chrono::Utc;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

/// Result of renaming one item.
#[derive(Debug, Clone)]
pub struct RenameOutcome {
    /// The item in its new state, to be persisted by the caller.
    pub item: MediaItem,
    /// What happened to every artifact.
    pub report: RenameReport,
    /// The item moved out of a shared directory and may now hold artwork it
    /// could not have before.
    pub download_missing_artwork: bool,
    /// The metadata document references image paths that changed.
    pub rewrite_metadata_document: bool,
}

/// Renames media items according to a naming policy.
pub struct Renamer {
    executor: Executor,
    inspector: Box<dyn NfoInspector>,
    sink: Arc<dyn MessageSink>,
}

impl Renamer {
    pub fn new() -> Self {
        Self {
            executor: Executor::new(),
            inspector: Box::new(XmlRootInspector),
            sink: Arc::new(TracingSink),
        }
    }

    pub fn with_executor(mut self, executor: Executor) -> Self {
        self.executor = executor;
        self
    }

    pub fn with_inspector(mut self, inspector: Box<dyn NfoInspector>) -> Self {
        self.inspector = inspector;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn MessageSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Rename an item.
    ///
    /// On error the item has not been changed and nothing on disk has been
    /// touched. On success the outcome carries the item's new state, even if
    /// single artifacts failed; those are listed in the report.
    pub fn rename(&self, item: &MediaItem, policy: &NamingPolicy) -> Result<RenameOutcome> {
        validate(item, policy)?;

        let started_at = Utc::now();
        tracing::info!("Renaming '{}' in {:?}", item.title, item.path);

        let decision = layout::plan_layout(item, policy)?;

        for video in item.artifacts_of(ArtifactType::PrimaryVideo) {
            if let Err(e) = self.executor.probe_video(&video.path) {
                self.sink.push(Message::error(&video.path, e.to_string()));
                return Err(e);
            }
        }

        let mut working = item.clone();
        if let Err(e) = layout::apply_layout(&mut working, &decision) {
            tracing::error!("{}", e);
            self.sink.push(Message::error(&decision.old_root, e.to_string()));
            return Err(e);
        }

        let candidates = cleanup::candidate_set(&working, &working.path);
        let old_video_basename = working.video_basename_without_stacking();

        let mut report = RenameReport {
            item_id: item.id,
            started_at: started_at.to_rfc3339(),
            old_root: decision.old_root.clone(),
            new_root: decision.new_root.clone(),
            ..Default::default()
        };

        let ctx = PlanContext {
            item: &working,
            policy,
            basename: artifacts::derive_basename(&working, policy),
            new_root: decision.new_root.clone(),
            shared_dir: decision.shared_dir,
            inspector: self.inspector.as_ref(),
        };
        tracing::debug!("New basename: '{}'", ctx.basename);

        let mut needed: Vec<Artifact> = Vec::new();

        // videos, 1:1
        for video in working.artifacts_of(ArtifactType::PrimaryVideo) {
            self.carry_out(artifacts::plan_artifact(&ctx, video), &mut needed, &mut report);
        }

        // newest poster and fanart, 1:N
        let mut artwork_written = false;
        for artwork_type in [ArtifactType::Fanart, ArtifactType::Poster] {
            if let Some(newest) = working.newest_of(artwork_type) {
                artwork_written |= self.carry_out(artifacts::plan_artifact(&ctx, newest), &mut needed, &mut report);
            }
        }

        // newest own metadata document, 1:N; foreign ones are kept or dropped
        let documents = working.artifacts_of(ArtifactType::MetadataDocument);
        let (own, foreign): (Vec<&Artifact>, Vec<&Artifact>) = documents
            .into_iter()
            .partition(|nfo| self.inspector.is_own_document(&nfo.path));
        if let Some(document) = newest(&own) {
            let planned = artifacts::plan_artifact(&ctx, document);
            if planned.is_empty() {
                tracing::debug!("No metadata document variant configured, dropping {:?}", document.path);
            }
            self.carry_out(planned, &mut needed, &mut report);
        }
        for nfo in foreign {
            self.carry_out(artifacts::plan_artifact(&ctx, nfo), &mut needed, &mut report);
        }

        // everything else
        let others = working.artifacts_except(&[
            ArtifactType::PrimaryVideo,
            ArtifactType::MetadataDocument,
            ArtifactType::Poster,
            ArtifactType::Fanart,
            ArtifactType::Subtitle,
        ]);
        for other in others {
            self.carry_out(artifacts::plan_artifact(&ctx, other), &mut needed, &mut report);
        }

        // subtitles are renamed later, keep them for now
        needed.extend(working.artifacts_of(ArtifactType::Subtitle).into_iter().cloned());

        // commit
        let mut seen = HashSet::new();
        needed.retain(|a| seen.insert(a.path.clone()));
        let mut needed_paths: Vec<PathBuf> = needed.iter().map(|a| a.path.clone()).collect();
        working.artifacts = needed;
        working.path = decision.new_root.clone();
        working.shared_dir = decision.shared_dir;

        needed_paths.extend(subtitles::rename_subtitles(
            &mut working,
            &old_video_basename,
            &self.executor,
            self.sink.as_ref(),
            &mut report,
        ));
        needed_paths.extend(working.artifacts.iter().map(|a| a.path.clone()));

        let roots = ProtectedRoots {
            data_source: working.data_source.clone(),
            old_root: decision.old_root.clone(),
            new_root: decision.new_root.clone(),
        };
        cleanup::reconcile(
            &candidates,
            &needed_paths,
            &roots,
            &self.executor,
            self.sink.as_ref(),
            &mut report,
        );

        report.finished_at = Utc::now().to_rfc3339();

        let download_missing_artwork = decision.transition == FolderTransition::Upgrade;
        let rewrite_metadata_document = policy.nfo_connector.requires_image_paths() && artwork_written;

        tracing::info!(
            "Renamed '{}': {} operations, {} failed, {} deleted",
            working.title,
            report.entries.len(),
            report.failures().len(),
            report.deleted.len()
        );

        Ok(RenameOutcome {
            item: working,
            report,
            download_missing_artwork,
            rewrite_metadata_document,
        })
    }

    /// Execute planned operations and record what the item keeps.
    ///
    /// A failed operation keeps its source. Returns whether any file was
    /// written to a new path.
    fn carry_out(&self, planned: Vec<PlannedArtifact>, needed: &mut Vec<Artifact>, report: &mut RenameReport) -> bool {
        let mut written = false;
        for p in planned {
            let entry = self.executor.execute(&p);
            match &entry.status {
                EntryStatus::Failed { error } => {
                    self.sink.push(Message::error(&p.source.path, error.clone()));
                    needed.push(p.source);
                }
                EntryStatus::Relocated => {
                    written = true;
                    needed.push(p.target);
                }
                EntryStatus::LeftInPlace => needed.push(p.target),
            }
            report.entries.push(entry);
        }
        written
    }
}

impl Default for Renamer {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject items that cannot be renamed, before any I/O.
fn validate(item: &MediaItem, policy: &NamingPolicy) -> Result<()> {
    if item.data_source.as_os_str().is_empty() {
        return Err(Error::Configuration("no datasource set".to_string()));
    }
    if !item.path.starts_with(&item.data_source) {
        return Err(Error::Configuration(format!(
            "{:?} is not inside datasource {:?}",
            item.path, item.data_source
        )));
    }
    if item.title.trim().is_empty() {
        return Err(Error::Configuration(format!("no title set for {:?}", item.path)));
    }
    if item.first_video().is_none() {
        return Err(Error::Configuration(format!("no video file known for '{}'", item.title)));
    }
    policy.validate()
}
