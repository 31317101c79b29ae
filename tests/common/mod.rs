//! Shared helpers for integration tests.

#![allow(dead_code)]

use media_renamer::core::executor::{Executor, ExecutorConfig};
use media_renamer::core::scanner;
use media_renamer::models::media::{ArtifactType, MediaItem};
use media_renamer::utils::retry::Sleeper;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

static INIT: Once = Once::new();

/// Route library logs to the test output.
pub fn init_logging() {
    INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;

        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("media_renamer=debug"))
            .with_test_writer()
            .try_init();
    });
}

pub const OWN_NFO: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<movie>\n  <title>Test</title>\n</movie>\n";

pub const FOREIGN_NFO: &str = "Release info\nhttp://www.imdb.com/title/tt1375666/\n";

pub const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

pub const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00];

/// Write a file, creating parent directories.
pub fn write(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Create `files` below `<data_source>/<dir>` and build an item from a scan
/// of that directory.
pub fn movie_item(data_source: &Path, dir: &str, title: &str, year: u16, files: &[(&str, &[u8])]) -> MediaItem {
    let root = data_source.join(dir);
    fs::create_dir_all(&root).unwrap();
    for (name, content) in files {
        write(&root.join(name), content);
    }

    let mut item = MediaItem::new(data_source, &root, title);
    item.year = Some(year);
    item.disc_layout = scanner::detect_disc_layout(&root);
    item.artifacts = scanner::scan_item_directory(&root).unwrap();
    item
}

/// Paths of all artifacts of a type.
pub fn paths_of(item: &MediaItem, artifact_type: ArtifactType) -> Vec<std::path::PathBuf> {
    item.artifacts_of(artifact_type)
        .into_iter()
        .map(|a| a.path.clone())
        .collect()
}

/// Sleeper that records instead of sleeping.
#[derive(Clone, Default)]
pub struct RecordingSleeper {
    pub calls: Arc<Mutex<Vec<Duration>>>,
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.calls.lock().unwrap().push(duration);
    }
}

/// Executor that never really sleeps.
pub fn test_executor(config: ExecutorConfig) -> (Executor, RecordingSleeper) {
    let sleeper = RecordingSleeper::default();
    let executor = Executor::with_config(config).with_sleeper(Box::new(sleeper.clone()));
    (executor, sleeper)
}
