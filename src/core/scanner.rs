//! Item directory scanner.
//!
//! Builds the artifact list of a movie directory for callers that do not
//! track media files themselves. Classification works on extensions and the
//! naming conventions media centers use for sidecar files.

use crate::models::media::{Artifact, ArtifactType, DiscLayout};
use crate::utils::fs::{get_extension, BACKUP_DIR};
use crate::utils::stacking;
use crate::Result;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use walkdir::WalkDir;

/// Supported video file extensions.
const VIDEO_EXTENSIONS: &[&str] = &[
    // Common formats
    "mkv", "mp4", "avi", "mov", "wmv", // Additional formats
    "m4v", "ts", "m2ts", "flv", "webm", // Less common but supported
    "mpg", "mpeg", "vob", "ogv", "ogm", "divx", "xvid", "3gp", "mts", "rmvb", "asf", "iso",
];

const SUBTITLE_EXTENSIONS: &[&str] = &["srt", "sub", "idx", "ass", "ssa", "smi", "vtt", "sup"];

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tbn", "gif", "bmp", "webp"];

const AUDIO_EXTENSIONS: &[&str] = &["mp3", "flac", "aac", "ac3", "dts", "mka", "wav", "ogg"];

const TEXT_EXTENSIONS: &[&str] = &["txt", "md", "url", "html"];

fn has_extension(ext: &str, list: &[&str]) -> bool {
    list.contains(&ext)
}

/// Check if a file lives in a trailer folder or is named like a trailer.
fn is_trailer(path: &Path, stem: &str) -> bool {
    stem == "trailer"
        || stem.ends_with("-trailer")
        || stem.ends_with(".trailer")
        || parent_name(path).is_some_and(|p| p == "trailer" || p == "trailers")
}

/// Matches "sample" but not "sampler".
fn is_sample(path: &Path, stem: &str) -> bool {
    (stem.contains("sample") && !stem.contains("sampler"))
        || parent_name(path).is_some_and(|p| p == "sample" || p == "samples")
}

/// Lower-cased name of the containing directory.
fn parent_name(path: &Path) -> Option<String> {
    path.parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().to_lowercase())
}

/// Classify an image by its name.
fn classify_image(path: &Path, stem: &str) -> ArtifactType {
    match parent_name(path).as_deref() {
        Some("extrafanart") => return ArtifactType::ExtraFanart,
        Some("extrathumbs") | Some("extrathumb") => return ArtifactType::ExtraThumb,
        _ => {}
    }

    let last_word = stem.rsplit(['-', '.']).next().unwrap_or(stem);
    match last_word {
        "poster" | "movie" | "folder" | "cover" => ArtifactType::Poster,
        "fanart" | "backdrop" => ArtifactType::Fanart,
        "banner" => ArtifactType::Banner,
        "clearart" => ArtifactType::ClearArt,
        "disc" | "discart" | "cdart" => ArtifactType::DiscArt,
        "logo" | "clearlogo" => ArtifactType::Logo,
        "thumb" | "landscape" => ArtifactType::Thumb,
        _ => ArtifactType::Other,
    }
}

/// Classify a file by its path.
///
/// Images named after the video (`<basename>.jpg`) cannot be told apart from
/// arbitrary pictures here; [`scan_item_directory`] resolves those.
pub fn classify(path: &Path) -> ArtifactType {
    let ext = get_extension(path).unwrap_or_default();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if has_extension(&ext, VIDEO_EXTENSIONS) {
        if is_trailer(path, &stem) {
            ArtifactType::Trailer
        } else if is_sample(path, &stem) {
            ArtifactType::Sample
        } else {
            ArtifactType::PrimaryVideo
        }
    } else if has_extension(&ext, SUBTITLE_EXTENSIONS) {
        ArtifactType::Subtitle
    } else if ext == "nfo" {
        ArtifactType::MetadataDocument
    } else if has_extension(&ext, IMAGE_EXTENSIONS) {
        classify_image(path, &stem)
    } else if has_extension(&ext, AUDIO_EXTENSIONS) {
        ArtifactType::Audio
    } else if has_extension(&ext, TEXT_EXTENSIONS) {
        ArtifactType::Text
    } else {
        ArtifactType::Other
    }
}

/// Container format hint from the first bytes of an image.
fn sniff_image_format(path: &Path) -> String {
    let mut header = [0u8; 8];
    let read = File::open(path).and_then(|mut f| f.read(&mut header));
    match read {
        Ok(n) if n >= 8 && header == [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A] => "PNG".to_string(),
        Ok(n) if n >= 3 && header[..3] == [0xFF, 0xD8, 0xFF] => "JPEG".to_string(),
        _ => String::new(),
    }
}

/// Detect a DVD or Blu-ray folder structure directly below the item root.
pub fn detect_disc_layout(root: &Path) -> Option<DiscLayout> {
    if root.join("VIDEO_TS").is_dir() || root.join("VIDEO_TS.IFO").is_file() {
        Some(DiscLayout::VideoTs)
    } else if root.join("BDMV").is_dir() || root.join("index.bdmv").is_file() {
        Some(DiscLayout::Bluray)
    } else {
        None
    }
}

/// Create an artifact for a file on disk.
fn create_artifact(path: &Path) -> Result<Artifact> {
    let metadata = std::fs::metadata(path)?;
    let mut artifact = Artifact::new(classify(path), path);
    artifact.modified = metadata
        .modified()
        .ok()
        .map(chrono::DateTime::<chrono::Utc>::from);

    if artifact.artifact_type.is_graphic() {
        artifact.container_format = sniff_image_format(path);
    }

    if matches!(
        artifact.artifact_type,
        ArtifactType::PrimaryVideo | ArtifactType::Subtitle
    ) {
        if let Some((marker, index)) = stacking::detect_stacking(&artifact.filename()) {
            artifact.stacking_marker = marker;
            artifact.stacking = index;
        }
    }

    Ok(artifact)
}

/// Scan an item directory and return its artifacts, sorted by path.
///
/// The backup folder is skipped. Images named after a video are posters.
pub fn scan_item_directory(root: &Path) -> Result<Vec<Artifact>> {
    crate::utils::fs::ensure_directory(root)?;

    let mut artifacts = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.file_name() != BACKUP_DIR);

    for entry in walker.filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        match create_artifact(entry.path()) {
            Ok(artifact) => artifacts.push(artifact),
            Err(e) => tracing::warn!("Failed to read file {:?}: {}", entry.path(), e),
        }
    }

    let video_basenames: Vec<String> = artifacts
        .iter()
        .filter(|a| a.artifact_type == ArtifactType::PrimaryVideo)
        .flat_map(|a| [a.basename().to_lowercase(), a.basename_without_stacking().to_lowercase()])
        .collect();
    for artifact in artifacts.iter_mut() {
        if artifact.artifact_type == ArtifactType::Other
            && has_extension(&artifact.extension().to_lowercase(), IMAGE_EXTENSIONS)
            && video_basenames.contains(&artifact.basename().to_lowercase())
        {
            artifact.artifact_type = ArtifactType::Poster;
        }
    }

    artifacts.sort_by(|a, b| a.path.cmp(&b.path));

    tracing::info!("Scanned {:?}: {} artifacts", root, artifacts.len());
    Ok(artifacts)
}
