//! Integration tests for the scanner module.
//!
//! Tests cover:
//! - Directory scanning with videos and sidecars
//! - Disc folder structures
//! - Error handling for non-existent paths

use media_renamer::core::scanner::{detect_disc_layout, scan_item_directory};
use media_renamer::models::media::{ArtifactType, DiscLayout};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_scan_empty_directory() {
    let temp_dir = TempDir::new().unwrap();
    let result = scan_item_directory(temp_dir.path()).unwrap();

    assert!(result.is_empty());
}

#[test]
fn test_scan_movie_folder() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    fs::write(root.join("Up (2009).mkv"), "fake video").unwrap();
    fs::write(root.join("Up (2009)-trailer.mkv"), "fake trailer").unwrap();
    fs::write(root.join("Up (2009).de.srt"), "fake subtitle").unwrap();
    fs::write(root.join("movie.nfo"), "<movie/>").unwrap();
    fs::write(root.join("fanart.png"), [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]).unwrap();
    fs::create_dir(root.join("extrafanart")).unwrap();
    fs::write(root.join("extrafanart").join("fanart1.jpg"), "fake image").unwrap();

    let result = scan_item_directory(root).unwrap();
    let type_of = |name: &str| {
        result
            .iter()
            .find(|a| a.filename() == name)
            .map(|a| a.artifact_type)
    };

    assert_eq!(result.len(), 6);
    assert_eq!(type_of("Up (2009).mkv"), Some(ArtifactType::PrimaryVideo));
    assert_eq!(type_of("Up (2009)-trailer.mkv"), Some(ArtifactType::Trailer));
    assert_eq!(type_of("Up (2009).de.srt"), Some(ArtifactType::Subtitle));
    assert_eq!(type_of("movie.nfo"), Some(ArtifactType::MetadataDocument));
    assert_eq!(type_of("fanart.png"), Some(ArtifactType::Fanart));
    assert_eq!(type_of("fanart1.jpg"), Some(ArtifactType::ExtraFanart));

    let fanart = result.iter().find(|a| a.filename() == "fanart.png").unwrap();
    assert_eq!(fanart.container_format, "PNG");
}

#[test]
fn test_scan_disc_folder() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let video_ts = root.join("VIDEO_TS");
    fs::create_dir(&video_ts).unwrap();
    fs::write(video_ts.join("VIDEO_TS.VOB"), "menu").unwrap();
    fs::write(video_ts.join("VTS_01_1.VOB"), "title").unwrap();

    assert_eq!(detect_disc_layout(root), Some(DiscLayout::VideoTs));

    let result = scan_item_directory(root).unwrap();
    assert_eq!(result.len(), 2);
    assert!(result.iter().all(|a| a.is_disc_file()));
}

#[test]
fn test_scan_nonexistent_path() {
    let result = scan_item_directory(std::path::Path::new("/nonexistent/path/12345"));
    assert!(result.is_err());
}
