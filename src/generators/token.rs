//! Template token resolution.
//!
//! A token is `$` followed by one identifier character (`$#` for the
//! rating). Tokens are case-insensitive. Absent or unknown values resolve to
//! the empty string, which optional template groups rely on.

use crate::models::media::{MediaItem, MediaSource};
use crate::models::policy::NamingPolicy;

/// A single template token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// `$T`
    Title,
    /// `$1`
    TitleFirstLetter,
    /// `$2`
    SortTitleFirstLetter,
    /// `$Y`
    Year,
    /// `$O`
    OriginalTitle,
    /// `$M`
    SetSortTitle,
    /// `$N`
    SetTitle,
    /// `$I`
    ImdbId,
    /// `$E`
    SortTitle,
    /// `$L`
    SpokenLanguages,
    /// `$C`
    Certification,
    /// `$G`
    Genre,
    /// `$D`
    Director,
    /// `$R`
    VideoResolution,
    /// `$3`
    Video3d,
    /// `$A`
    Audio,
    /// `$V`
    VideoCodecFormat,
    /// `$F`
    VideoFormat,
    /// `$S`
    MediaSource,
    /// `$#`
    Rating,
}

impl Token {
    /// Parse a `$x` token. Returns `None` for unknown tokens.
    pub fn parse(token: &str) -> Option<Token> {
        let mut chars = token.chars();
        if chars.next() != Some('$') {
            return None;
        }
        let id = chars.next()?.to_ascii_uppercase();
        if chars.next().is_some() {
            return None;
        }
        let token = match id {
            'T' => Token::Title,
            '1' => Token::TitleFirstLetter,
            '2' => Token::SortTitleFirstLetter,
            'Y' => Token::Year,
            'O' => Token::OriginalTitle,
            'M' => Token::SetSortTitle,
            'N' => Token::SetTitle,
            'I' => Token::ImdbId,
            'E' => Token::SortTitle,
            'L' => Token::SpokenLanguages,
            'C' => Token::Certification,
            'G' => Token::Genre,
            'D' => Token::Director,
            'R' => Token::VideoResolution,
            '3' => Token::Video3d,
            'A' => Token::Audio,
            'V' => Token::VideoCodecFormat,
            'F' => Token::VideoFormat,
            'S' => Token::MediaSource,
            '#' => Token::Rating,
            _ => return None,
        };
        Some(token)
    }
}

/// Resolve a `$x` token against an item. Never fails.
pub fn resolve(item: &MediaItem, token: &str, policy: &NamingPolicy) -> String {
    match Token::parse(token) {
        Some(token) => resolve_token(item, token, policy),
        None => String::new(),
    }
}

/// Resolve a parsed token against an item.
pub fn resolve_token(item: &MediaItem, token: Token, policy: &NamingPolicy) -> String {
    let video = item
        .first_video()
        .and_then(|v| v.video.clone())
        .unwrap_or_default();

    match token {
        Token::Title => item.title.clone(),
        Token::TitleFirstLetter => first_letter(&item.title),
        Token::SortTitleFirstLetter => first_letter(&item.sortable_title()),
        Token::Year => match item.year {
            Some(year) if year > 0 => year.to_string(),
            _ => String::new(),
        },
        Token::OriginalTitle => item.original_title.clone(),
        Token::SetSortTitle | Token::SetTitle => match &item.set {
            Some(set) if set.member_count > 1 || policy.set_folder_for_single_item => {
                if token == Token::SetTitle {
                    set.title.clone()
                } else {
                    set.sortable_title()
                }
            }
            _ => String::new(),
        },
        Token::ImdbId => item.imdb_id.clone(),
        Token::SortTitle => item.sortable_title(),
        Token::SpokenLanguages => item.spoken_languages.clone(),
        Token::Certification => item.certification.clone().unwrap_or_default(),
        Token::Genre => item.genres.first().cloned().unwrap_or_default(),
        Token::Director => item.director.clone(),
        Token::VideoResolution => video.resolution,
        Token::Video3d => {
            if !video.format_3d.trim().is_empty() {
                video.format_3d
            } else if item.video_in_3d {
                "3D".to_string()
            } else {
                String::new()
            }
        }
        Token::Audio => join_dash(&video.audio_codec, &video.audio_channels),
        Token::VideoCodecFormat => join_dash(&video.video_codec, &video.video_format),
        Token::VideoFormat => video.video_format,
        Token::MediaSource => match item.media_source {
            MediaSource::Unknown => String::new(),
            source => source.to_string(),
        },
        Token::Rating => format_rating(item.rating),
    }
}

fn first_letter(s: &str) -> String {
    s.trim()
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

/// `codec-detail`, or just the detail when the codec is unknown.
fn join_dash(first: &str, second: &str) -> String {
    if first.is_empty() {
        second.to_string()
    } else {
        format!("{}-{}", first, second)
    }
}

/// Ratings always carry a decimal (`8.0`, `7.5`).
fn format_rating(rating: f32) -> String {
    if rating <= 0.0 || !rating.is_finite() {
        String::new()
    } else if rating.fract() == 0.0 {
        format!("{:.1}", rating)
    } else {
        format!("{}", rating)
    }
}
