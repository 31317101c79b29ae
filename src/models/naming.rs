//! Naming variants for sidecar files.
//!
//! Each variant is one filename pattern a media center looks for. A policy
//! may enable several variants of one type at once, in which case the source
//! file is copied to every variant.

use serde::{Deserialize, Serialize};

/// Metadata document (NFO) naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NfoNaming {
    /// `<basename>.nfo`
    FilenameNfo,
    /// `movie.nfo`
    MovieNfo,
    /// `VIDEO_TS/VIDEO_TS.nfo` or `BDMV/index.nfo` (disc items only).
    DiscNfo,
}

impl NfoNaming {
    /// All variants, used when enumerating possible leftovers.
    pub const ALL: [NfoNaming; 3] = [NfoNaming::FilenameNfo, NfoNaming::MovieNfo, NfoNaming::DiscNfo];
}

/// Poster naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PosterNaming {
    FilenamePosterJpg,
    FilenamePosterPng,
    FilenamePosterTbn,
    FilenameJpg,
    FilenamePng,
    FilenameTbn,
    MovieJpg,
    MoviePng,
    MovieTbn,
    PosterJpg,
    PosterPng,
    PosterTbn,
    FolderJpg,
    FolderPng,
    FolderTbn,
}

impl PosterNaming {
    pub const ALL: [PosterNaming; 15] = [
        PosterNaming::FilenamePosterJpg,
        PosterNaming::FilenamePosterPng,
        PosterNaming::FilenamePosterTbn,
        PosterNaming::FilenameJpg,
        PosterNaming::FilenamePng,
        PosterNaming::FilenameTbn,
        PosterNaming::MovieJpg,
        PosterNaming::MoviePng,
        PosterNaming::MovieTbn,
        PosterNaming::PosterJpg,
        PosterNaming::PosterPng,
        PosterNaming::PosterTbn,
        PosterNaming::FolderJpg,
        PosterNaming::FolderPng,
        PosterNaming::FolderTbn,
    ];
}

/// Fanart naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FanartNaming {
    /// `<basename>-fanart.jpg`
    FilenameFanartJpg,
    FilenameFanartPng,
    /// `<basename>.fanart.jpg`
    FilenameFanart2Jpg,
    FilenameFanart2Png,
    FanartJpg,
    FanartPng,
}

impl FanartNaming {
    pub const ALL: [FanartNaming; 6] = [
        FanartNaming::FilenameFanartJpg,
        FanartNaming::FilenameFanartPng,
        FanartNaming::FilenameFanart2Jpg,
        FanartNaming::FilenameFanart2Png,
        FanartNaming::FanartJpg,
        FanartNaming::FanartPng,
    ];
}

/// Metadata document flavour the item was last written with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NfoConnector {
    #[default]
    Kodi,
    Xbmc,
    MediaPortal,
}

impl NfoConnector {
    /// Whether the document embeds artwork file names and must be rewritten
    /// when artwork is renamed.
    pub fn requires_image_paths(&self) -> bool {
        matches!(self, NfoConnector::MediaPortal)
    }
}
