//! Sidecar file names for each naming variant.
//!
//! Filename-based variants need a basename; with an empty basename they
//! produce an empty name, which callers skip.

use crate::models::media::DiscLayout;
use crate::models::naming::{FanartNaming, NfoNaming, PosterNaming};

/// File name (possibly with a subfolder) of a metadata document variant.
pub fn nfo_filename(naming: NfoNaming, basename: &str, disc: Option<DiscLayout>) -> String {
    match naming {
        NfoNaming::FilenameNfo => with_basename(basename, ".nfo"),
        NfoNaming::MovieNfo => "movie.nfo".to_string(),
        NfoNaming::DiscNfo => match disc {
            Some(DiscLayout::VideoTs) => "VIDEO_TS/VIDEO_TS.nfo".to_string(),
            Some(DiscLayout::Bluray) => "BDMV/index.nfo".to_string(),
            None => String::new(),
        },
    }
}

/// File name of a poster variant.
pub fn poster_filename(naming: PosterNaming, basename: &str) -> String {
    match naming {
        PosterNaming::FilenamePosterJpg => with_basename(basename, "-poster.jpg"),
        PosterNaming::FilenamePosterPng => with_basename(basename, "-poster.png"),
        PosterNaming::FilenamePosterTbn => with_basename(basename, "-poster.tbn"),
        PosterNaming::FilenameJpg => with_basename(basename, ".jpg"),
        PosterNaming::FilenamePng => with_basename(basename, ".png"),
        PosterNaming::FilenameTbn => with_basename(basename, ".tbn"),
        PosterNaming::MovieJpg => "movie.jpg".to_string(),
        PosterNaming::MoviePng => "movie.png".to_string(),
        PosterNaming::MovieTbn => "movie.tbn".to_string(),
        PosterNaming::PosterJpg => "poster.jpg".to_string(),
        PosterNaming::PosterPng => "poster.png".to_string(),
        PosterNaming::PosterTbn => "poster.tbn".to_string(),
        PosterNaming::FolderJpg => "folder.jpg".to_string(),
        PosterNaming::FolderPng => "folder.png".to_string(),
        PosterNaming::FolderTbn => "folder.tbn".to_string(),
    }
}

/// File name of a fanart variant.
pub fn fanart_filename(naming: FanartNaming, basename: &str) -> String {
    match naming {
        FanartNaming::FilenameFanartJpg => with_basename(basename, "-fanart.jpg"),
        FanartNaming::FilenameFanartPng => with_basename(basename, "-fanart.png"),
        FanartNaming::FilenameFanart2Jpg => with_basename(basename, ".fanart.jpg"),
        FanartNaming::FilenameFanart2Png => with_basename(basename, ".fanart.png"),
        FanartNaming::FanartJpg => "fanart.jpg".to_string(),
        FanartNaming::FanartPng => "fanart.png".to_string(),
    }
}

/// Extension of a generated name, lowercased.
pub fn extension_of(filename: &str) -> String {
    std::path::Path::new(filename)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

fn with_basename(basename: &str, suffix: &str) -> String {
    if basename.trim().is_empty() {
        String::new()
    } else {
        format!("{}{}", basename, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nfo_variants() {
        assert_eq!(nfo_filename(NfoNaming::FilenameNfo, "Inception (2010)", None), "Inception (2010).nfo");
        assert_eq!(nfo_filename(NfoNaming::MovieNfo, "Inception (2010)", None), "movie.nfo");
        assert_eq!(nfo_filename(NfoNaming::DiscNfo, "Inception (2010)", None), "");
        assert_eq!(
            nfo_filename(NfoNaming::DiscNfo, "x", Some(DiscLayout::VideoTs)),
            "VIDEO_TS/VIDEO_TS.nfo"
        );
    }

    #[test]
    fn test_filename_variants_need_basename() {
        assert_eq!(nfo_filename(NfoNaming::FilenameNfo, "", None), "");
        assert_eq!(poster_filename(PosterNaming::FilenamePosterJpg, " "), "");
        assert_eq!(fanart_filename(FanartNaming::FilenameFanart2Png, ""), "");
        assert_eq!(poster_filename(PosterNaming::FolderJpg, ""), "folder.jpg");
    }

    #[test]
    fn test_artwork_variants() {
        assert_eq!(poster_filename(PosterNaming::FilenamePosterPng, "Up (2009)"), "Up (2009)-poster.png");
        assert_eq!(poster_filename(PosterNaming::FilenameTbn, "Up (2009)"), "Up (2009).tbn");
        assert_eq!(fanart_filename(FanartNaming::FilenameFanart2Jpg, "Up (2009)"), "Up (2009).fanart.jpg");
        assert_eq!(fanart_filename(FanartNaming::FanartPng, "Up (2009)"), "fanart.png");
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("poster.JPG"), "jpg");
        assert_eq!(extension_of(""), "");
    }
}
