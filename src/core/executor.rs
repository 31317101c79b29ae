//! File operation executor.
//!
//! Carries out planned artifact operations:
//! - probe: make sure a video can be moved before anything is touched
//! - move: videos, 1:1
//! - copy: sidecar files, 1:N
//! - delete: cleanup, with optional backup

use crate::models::plan::{OperationKind, PlannedArtifact};
use crate::models::report::{EntryStatus, RenameReport, ReportEntry};
use crate::utils::fs;
use crate::utils::retry::{self, Sleeper, ThreadSleeper};
use crate::Result;
use std::path::Path;
use std::time::Duration;

/// Executor configuration.
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Whether to verify checksums after copying files.
    pub verify_checksum: bool,
    /// Whether deleted files are kept below the datasource's backup folder.
    pub backup_on_delete: bool,
    /// How often a locked video is probed before giving up.
    pub probe_attempts: u32,
    /// Pause between probes.
    pub probe_delay: Duration,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            verify_checksum: true,
            backup_on_delete: true,
            probe_attempts: 5,
            probe_delay: Duration::from_secs(1),
        }
    }
}

/// Artifact operation executor.
pub struct Executor {
    config: ExecutorConfig,
    sleeper: Box<dyn Sleeper>,
}

impl Executor {
    /// Create a new executor with default configuration.
    pub fn new() -> Self {
        Self::with_config(ExecutorConfig::default())
    }

    /// Create a new executor with custom configuration.
    pub fn with_config(config: ExecutorConfig) -> Self {
        Self {
            config,
            sleeper: Box::new(ThreadSleeper),
        }
    }

    /// Replace the sleeper used between probe attempts.
    pub fn with_sleeper(mut self, sleeper: Box<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Check that a video can be moved, retrying while it is locked.
    pub fn probe_video(&self, path: &Path) -> Result<()> {
        retry::retry(
            self.config.probe_attempts,
            self.config.probe_delay,
            self.sleeper.as_ref(),
            |attempt| {
                fs::probe_writable(path).map_err(|e| {
                    tracing::debug!("Probe {} of {:?} failed: {}", attempt, path, e);
                    e
                })
            },
        )
        .map_err(|_| {
            tracing::warn!("File {:?} is not accessible", path);
            crate::Error::Access(path.to_path_buf())
        })
    }

    /// Execute one planned operation and report its outcome. Failures are
    /// reported, never raised.
    pub fn execute(&self, planned: &PlannedArtifact) -> ReportEntry {
        let source = &planned.source.path;
        let target = &planned.target.path;

        let result = match planned.op {
            OperationKind::Keep => Ok(EntryStatus::LeftInPlace),
            OperationKind::Move => fs::move_file(source, target, self.config.verify_checksum).map(|_| {
                tracing::debug!("Moved {:?} -> {:?}", source, target);
                EntryStatus::Relocated
            }),
            OperationKind::Copy => fs::copy_file(source, target, self.config.verify_checksum).map(|transfer| match transfer {
                fs::Transfer::Unchanged => EntryStatus::LeftInPlace,
                fs::Transfer::Copied | fs::Transfer::Moved => EntryStatus::Relocated,
            }),
        };

        let status = match result {
            Ok(status) => status,
            Err(e) => {
                let error = crate::Error::artifact(source, e.to_string());
                tracing::error!("{}", error);
                EntryStatus::Failed {
                    error: error.to_string(),
                }
            }
        };

        ReportEntry {
            source: source.clone(),
            target: target.clone(),
            operation: planned.op,
            status,
        }
    }

    /// Delete a file, backing it up below the datasource when configured.
    pub fn delete(&self, path: &Path, data_source: &Path) -> Result<()> {
        fs::delete_with_backup(path, data_source, self.config.backup_on_delete)?;
        tracing::debug!("Deleted {:?}", path);
        Ok(())
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

/// Save a report to a JSON file.
pub fn save_report(report: &RenameReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)?;

    tracing::info!("Report saved to {:?}", path);
    Ok(())
}

/// Load a report from a JSON file.
pub fn load_report(path: &Path) -> Result<RenameReport> {
    let content = std::fs::read_to_string(path)?;
    let report: RenameReport = serde_json::from_str(&content)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::media::{Artifact, ArtifactType};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    #[derive(Clone, Default)]
    struct RecordingSleeper(Arc<Mutex<Vec<Duration>>>);

    impl Sleeper for RecordingSleeper {
        fn sleep(&self, duration: Duration) {
            self.0.lock().unwrap().push(duration);
        }
    }

    #[test]
    fn test_executor_config_default() {
        let config = ExecutorConfig::default();
        assert!(config.verify_checksum);
        assert!(config.backup_on_delete);
        assert_eq!(config.probe_attempts, 5);
        assert_eq!(config.probe_delay, Duration::from_secs(1));
    }

    #[test]
    fn test_probe_missing_video_retries_then_fails() {
        let dir = TempDir::new().unwrap();
        let sleeper = RecordingSleeper::default();
        let executor = Executor::new().with_sleeper(Box::new(sleeper.clone()));

        let result = executor.probe_video(&dir.path().join("gone.mkv"));
        assert!(matches!(result, Err(crate::Error::Access(_))));
        assert_eq!(sleeper.0.lock().unwrap().len(), 4);
    }

    #[test]
    fn test_probe_existing_video() {
        let dir = TempDir::new().unwrap();
        let video = dir.path().join("movie.mkv");
        std::fs::write(&video, "v").unwrap();
        let sleeper = RecordingSleeper::default();
        let executor = Executor::new().with_sleeper(Box::new(sleeper.clone()));

        executor.probe_video(&video).unwrap();
        assert!(sleeper.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_execute_copy_and_failure() {
        let dir = TempDir::new().unwrap();
        let source = Artifact::new(ArtifactType::Poster, dir.path().join("poster.jpg"));
        std::fs::write(&source.path, "img").unwrap();
        let executor = Executor::new();

        let planned = PlannedArtifact::copied(&source, source.with_path(dir.path().join("folder.jpg")));
        let entry = executor.execute(&planned);
        assert_eq!(entry.status, EntryStatus::Relocated);
        assert!(dir.path().join("folder.jpg").exists());
        assert!(source.path.exists());

        let missing = Artifact::new(ArtifactType::Poster, dir.path().join("missing.jpg"));
        let planned = PlannedArtifact::copied(&missing, missing.with_path(dir.path().join("x.jpg")));
        let entry = executor.execute(&planned);
        assert!(matches!(entry.status, EntryStatus::Failed { .. }));
    }

    #[test]
    fn test_execute_keep_touches_nothing() {
        let source = Artifact::new(ArtifactType::Subtitle, "/nowhere/movie.srt");
        let entry = Executor::new().execute(&PlannedArtifact::kept(&source));
        assert_eq!(entry.status, EntryStatus::LeftInPlace);
        assert_eq!(entry.operation, OperationKind::Keep);
    }
}
