//! Media item and artifact data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Kind of file belonging to a media item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactType {
    PrimaryVideo,
    Trailer,
    Sample,
    Subtitle,
    MetadataDocument,
    Poster,
    Fanart,
    Banner,
    ClearArt,
    DiscArt,
    Logo,
    Thumb,
    ExtraFanart,
    ExtraThumb,
    Audio,
    Text,
    Other,
}

impl ArtifactType {
    /// Whether this artifact is an image.
    pub fn is_graphic(&self) -> bool {
        matches!(
            self,
            ArtifactType::Poster
                | ArtifactType::Fanart
                | ArtifactType::Banner
                | ArtifactType::ClearArt
                | ArtifactType::DiscArt
                | ArtifactType::Logo
                | ArtifactType::Thumb
                | ArtifactType::ExtraFanart
                | ArtifactType::ExtraThumb
        )
    }

    /// Fixed filename stem used for toggle-controlled artwork.
    ///
    /// Disc art is stored as `disc`, not `discart`.
    pub fn artwork_stem(&self) -> Option<&'static str> {
        match self {
            ArtifactType::Banner => Some("banner"),
            ArtifactType::ClearArt => Some("clearart"),
            ArtifactType::DiscArt => Some("disc"),
            ArtifactType::Logo => Some("logo"),
            ArtifactType::Thumb => Some("thumb"),
            _ => None,
        }
    }
}

impl std::fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ArtifactType::PrimaryVideo => "video",
            ArtifactType::Trailer => "trailer",
            ArtifactType::Sample => "sample",
            ArtifactType::Subtitle => "subtitle",
            ArtifactType::MetadataDocument => "nfo",
            ArtifactType::Poster => "poster",
            ArtifactType::Fanart => "fanart",
            ArtifactType::Banner => "banner",
            ArtifactType::ClearArt => "clearart",
            ArtifactType::DiscArt => "discart",
            ArtifactType::Logo => "logo",
            ArtifactType::Thumb => "thumb",
            ArtifactType::ExtraFanart => "extrafanart",
            ArtifactType::ExtraThumb => "extrathumb",
            ArtifactType::Audio => "audio",
            ArtifactType::Text => "text",
            ArtifactType::Other => "other",
        };
        write!(f, "{}", name)
    }
}

/// Language information attached to a subtitle file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubtitleInfo {
    /// ISO 639-2 language code (may be empty).
    pub language: String,
    /// Whether this is a forced subtitle track.
    pub forced: bool,
}

/// Technical stream information of a video file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    /// Resolution (e.g., "1080p").
    pub resolution: String,
    /// Video codec (e.g., "h264").
    pub video_codec: String,
    /// Video format (e.g., "1080p", "720p").
    pub video_format: String,
    /// Audio codec (e.g., "AC3").
    pub audio_codec: String,
    /// Audio channels (e.g., "6ch").
    pub audio_channels: String,
    /// 3D format (e.g., "SBS"), empty for 2D.
    pub format_3d: String,
}

/// A single file belonging to a media item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    /// Artifact type.
    pub artifact_type: ArtifactType,
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Container format hint (e.g., "JPEG", "PNG", "Matroska").
    #[serde(default)]
    pub container_format: String,
    /// Stacking index, 0 when unstacked.
    #[serde(default)]
    pub stacking: u32,
    /// Stacking marker as found in the filename (e.g., "CD1", "part2").
    #[serde(default)]
    pub stacking_marker: String,
    /// Subtitle information (subtitles only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<SubtitleInfo>,
    /// Stream information (videos only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoInfo>,
    /// Last modified time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
}

impl Artifact {
    /// Create an artifact of the given type with no extra information.
    pub fn new(artifact_type: ArtifactType, path: impl Into<PathBuf>) -> Self {
        Self {
            artifact_type,
            path: path.into(),
            container_format: String::new(),
            stacking: 0,
            stacking_marker: String::new(),
            subtitle: None,
            video: None,
            modified: None,
        }
    }

    /// File name including extension.
    pub fn filename(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// File name without extension.
    pub fn basename(&self) -> String {
        self.path
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Extension as found on disk (case preserved, without dot).
    pub fn extension(&self) -> String {
        self.path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Directory containing the file.
    pub fn parent(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Basename with any stacking marker removed.
    pub fn basename_without_stacking(&self) -> String {
        crate::utils::stacking::strip_stacking(&self.basename(), &self.stacking_marker)
    }

    /// The real image extension, resolving the generic `tbn` container.
    /// `jpeg` is reported as `jpg`.
    pub fn real_image_extension(&self) -> String {
        let ext = self.extension().to_lowercase();
        if ext == "tbn" {
            match self.container_format.to_uppercase().as_str() {
                "PNG" => return "png".to_string(),
                "JPEG" | "JPG" => return "jpg".to_string(),
                _ => {}
            }
        }
        if ext == "jpeg" {
            return "jpg".to_string();
        }
        ext
    }

    /// Whether this file is part of a DVD/Blu-ray folder structure.
    pub fn is_disc_file(&self) -> bool {
        let name = self.filename().to_uppercase();
        if name == "VIDEO_TS.IFO" || name == "VIDEO_TS.VOB" || name == "INDEX.BDMV" {
            return true;
        }
        self.path.components().any(|c| {
            let part = c.as_os_str().to_string_lossy().to_uppercase();
            part == "VIDEO_TS" || part == "BDMV" || part == "HVDVD_TS"
        })
    }

    /// Clone this artifact with a different path.
    pub fn with_path(&self, path: impl Into<PathBuf>) -> Self {
        let mut clone = self.clone();
        clone.path = path.into();
        clone
    }

    /// Clone this artifact with a different file name in the given directory.
    pub fn with_filename(&self, dir: &Path, filename: &str) -> Self {
        self.with_path(dir.join(filename))
    }

    /// Clone this artifact, moving it from `old_root` to `new_root` while
    /// keeping its relative position (subfolders are preserved).
    pub fn rebased(&self, old_root: &Path, new_root: &Path) -> Self {
        match self.path.strip_prefix(old_root) {
            Ok(relative) => self.with_path(new_root.join(relative)),
            Err(_) => self.with_path(new_root.join(self.filename())),
        }
    }
}

/// Movie set (collection) membership.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieSet {
    /// Set title.
    pub title: String,
    /// Sortable set title.
    #[serde(default)]
    pub sort_title: String,
    /// Number of items in the set.
    pub member_count: usize,
}

impl MovieSet {
    /// Sortable title, derived from the title if not set explicitly.
    pub fn sortable_title(&self) -> String {
        if self.sort_title.trim().is_empty() {
            sortable_name(&self.title)
        } else {
            self.sort_title.clone()
        }
    }
}

/// Disc folder structure of a disc-layout item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscLayout {
    /// DVD structure (`VIDEO_TS`).
    VideoTs,
    /// Blu-ray structure (`BDMV`).
    Bluray,
}

/// Physical source of the release.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaSource {
    #[default]
    Unknown,
    Bluray,
    HdDvd,
    Dvd,
    Tv,
    Vhs,
    LaserDisc,
    DVhs,
    Stream,
}

impl std::fmt::Display for MediaSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MediaSource::Unknown => "",
            MediaSource::Bluray => "BluRay",
            MediaSource::HdDvd => "HDDVD",
            MediaSource::Dvd => "DVD",
            MediaSource::Tv => "TV",
            MediaSource::Vhs => "VHS",
            MediaSource::LaserDisc => "LaserDisc",
            MediaSource::DVhs => "D-VHS",
            MediaSource::Stream => "Stream",
        };
        write!(f, "{}", name)
    }
}

/// A movie with all of its known files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Stable identifier.
    pub id: Uuid,
    /// Localized title.
    pub title: String,
    /// Sortable title (derived from the title when empty).
    #[serde(default)]
    pub sort_title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: String,
    /// Release year.
    #[serde(default)]
    pub year: Option<u16>,
    /// Set membership.
    #[serde(default)]
    pub set: Option<MovieSet>,
    /// IMDB ID.
    #[serde(default)]
    pub imdb_id: String,
    /// TMDB ID.
    #[serde(default)]
    pub tmdb_id: Option<u64>,
    /// Certification (e.g., "PG-13").
    #[serde(default)]
    pub certification: Option<String>,
    /// Genres, the first one is the primary genre.
    #[serde(default)]
    pub genres: Vec<String>,
    /// Spoken languages as displayed (e.g., "en, de").
    #[serde(default)]
    pub spoken_languages: String,
    /// Director(s).
    #[serde(default)]
    pub director: String,
    /// Media source.
    #[serde(default)]
    pub media_source: MediaSource,
    /// User rating (0-10).
    #[serde(default)]
    pub rating: f32,
    /// Flagged as 3D by the user.
    #[serde(default)]
    pub video_in_3d: bool,
    /// Datasource root this item lives in.
    pub data_source: PathBuf,
    /// Current root directory of the item.
    pub path: PathBuf,
    /// Whether the item shares its directory with other items.
    #[serde(default)]
    pub shared_dir: bool,
    /// Disc structure, if this is a disc-layout item.
    #[serde(default)]
    pub disc_layout: Option<DiscLayout>,
    /// Known files.
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}

impl MediaItem {
    /// Create an item with a fresh id and no metadata besides the title.
    pub fn new(data_source: impl Into<PathBuf>, path: impl Into<PathBuf>, title: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            sort_title: String::new(),
            original_title: String::new(),
            year: None,
            set: None,
            imdb_id: String::new(),
            tmdb_id: None,
            certification: None,
            genres: Vec::new(),
            spoken_languages: String::new(),
            director: String::new(),
            media_source: MediaSource::Unknown,
            rating: 0.0,
            video_in_3d: false,
            data_source: data_source.into(),
            path: path.into(),
            shared_dir: false,
            disc_layout: None,
            artifacts: Vec::new(),
        }
    }

    /// Whether this item is stored as a DVD/Blu-ray folder structure.
    pub fn is_disc(&self) -> bool {
        self.disc_layout.is_some()
    }

    /// All artifacts of one type, in list order.
    pub fn artifacts_of(&self, artifact_type: ArtifactType) -> Vec<&Artifact> {
        self.artifacts
            .iter()
            .filter(|a| a.artifact_type == artifact_type)
            .collect()
    }

    /// All artifacts except the given types.
    pub fn artifacts_except(&self, excluded: &[ArtifactType]) -> Vec<&Artifact> {
        self.artifacts
            .iter()
            .filter(|a| !excluded.contains(&a.artifact_type))
            .collect()
    }

    /// First primary video.
    pub fn first_video(&self) -> Option<&Artifact> {
        self.artifacts
            .iter()
            .find(|a| a.artifact_type == ArtifactType::PrimaryVideo)
    }

    /// Newest artifact of a type, see [`newest`].
    pub fn newest_of(&self, artifact_type: ArtifactType) -> Option<&Artifact> {
        newest(&self.artifacts_of(artifact_type))
    }

    /// Basename of the first video without stacking markers.
    pub fn video_basename_without_stacking(&self) -> String {
        self.first_video()
            .map(|v| v.basename_without_stacking())
            .unwrap_or_default()
    }

    /// Sortable title, derived from the title if not set explicitly.
    pub fn sortable_title(&self) -> String {
        if self.sort_title.trim().is_empty() {
            sortable_name(&self.title)
        } else {
            self.sort_title.clone()
        }
    }

    /// Rewrite every artifact path below `old_root` to live below `new_root`.
    pub fn rebase_artifacts(&mut self, old_root: &Path, new_root: &Path) {
        for artifact in &mut self.artifacts {
            if artifact.path.starts_with(old_root) {
                *artifact = artifact.rebased(old_root, new_root);
            }
        }
    }
}

/// Newest artifact by modification time; later entries win ties.
pub fn newest<'a>(artifacts: &[&'a Artifact]) -> Option<&'a Artifact> {
    let mut newest: Option<&'a Artifact> = None;
    for &artifact in artifacts {
        match newest {
            Some(current) if artifact.modified < current.modified => {}
            _ => newest = Some(artifact),
        }
    }
    newest
}

/// Leading articles moved to the end for sorting.
const SORT_ARTICLES: &[&str] = &["the", "a", "an", "der", "die", "das", "le", "la", "les", "el"];

/// Move a leading article to the end: "The Matrix" -> "Matrix, The".
pub fn sortable_name(title: &str) -> String {
    let trimmed = title.trim();
    if let Some((first, rest)) = trimmed.split_once(' ') {
        let rest = rest.trim();
        if !rest.is_empty() && SORT_ARTICLES.contains(&first.to_lowercase().as_str()) {
            return format!("{}, {}", rest, first);
        }
    }
    trimmed.to_string()
}
