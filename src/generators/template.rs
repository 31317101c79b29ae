//! Template expansion for folder and file names.
//!
//! Templates mix literal text with `$x` tokens and optional groups:
//! `{Year $Y}` keeps its text only when `$Y` resolves to something. Groups
//! are expanded first and do not nest. The result is sanitized for use as a
//! path (folders) or a single path component (filenames).

use super::token;
use crate::models::media::MediaItem;
use crate::models::policy::NamingPolicy;

/// Matches an optional group or a bare token.
const GROUP_OR_TOKEN: &str = r"\{(.*?)\}|\$[\w#]";

/// Matches a bare token.
const TOKEN: &str = r"\$[\w#]";

/// Expand a folder template into a relative path.
pub fn expand_folder(template: &str, item: &MediaItem, policy: &NamingPolicy) -> String {
    expand(template, item, policy, false)
}

/// Expand a filename template into a basename (no extension).
pub fn expand_filename(template: &str, item: &MediaItem, policy: &NamingPolicy) -> String {
    expand(template, item, policy, true)
}

/// Expand a template. `for_filename` turns every path separator into a
/// space so the result stays a single path component.
pub fn expand(template: &str, item: &MediaItem, policy: &NamingPolicy, for_filename: bool) -> String {
    let re = match regex::Regex::new(GROUP_OR_TOKEN) {
        Ok(re) => re,
        Err(_) => return String::new(),
    };

    // Single pass: substituted values are never scanned for tokens again.
    let substituted = re.replace_all(template, |caps: &regex::Captures| match caps.get(1) {
        Some(group) => expand_group(group.as_str(), item, policy, for_filename),
        None => sanitized_value(&caps[0], item, policy),
    });

    finalize(&substituted, policy, for_filename)
}

/// Expand the inside of an optional group. The first token decides: if it
/// resolves to nothing (or there is no token), the whole group vanishes.
/// Otherwise every token of the group is substituted.
fn expand_group(group: &str, item: &MediaItem, policy: &NamingPolicy, for_filename: bool) -> String {
    let Ok(re) = regex::Regex::new(TOKEN) else {
        return String::new();
    };
    let Some(first) = re.find(group) else {
        return String::new();
    };

    let value = finalize(&sanitized_value(first.as_str(), item, policy), policy, for_filename);
    if value.is_empty() {
        return String::new();
    }
    re.replace_all(group, |caps: &regex::Captures| sanitized_value(&caps[0], item, policy))
        .into_owned()
}

/// Resolve a token and strip characters that are illegal in file names.
fn sanitized_value(token_text: &str, item: &MediaItem, policy: &NamingPolicy) -> String {
    let value = token::resolve(item, token_text, policy);
    if value.trim().is_empty() {
        return String::new();
    }
    replace_invalid_characters(&value)
}

/// Replace characters that are illegal in file names. Colons become dashes
/// (`"Alien: Covenant"` -> `"Alien - Covenant"`), the rest are dropped.
pub fn replace_invalid_characters(source: &str) -> String {
    source
        .replace(": ", " - ")
        .replace(':', "-")
        .chars()
        .filter(|c| !matches!(c, '"' | '\\' | ':' | '<' | '>' | '|' | '/' | '?' | '*'))
        .collect()
}

/// Structural cleanup applied after substitution.
fn finalize(value: &str, policy: &NamingPolicy, for_filename: bool) -> String {
    // empty brackets left behind by empty tokens
    let mut out = value.replace("()", "").replace("[]", "").replace("{}", "");

    out = collapse_separators(&out);

    if for_filename {
        out = out.replace(['/', '\\'], " ");
    }

    out = collapse_runs(&out, " ").trim().to_string();

    if policy.space_substitution {
        let replacement = policy.space_replacement.as_str();
        out = out.replace(' ', replacement);
        if !replacement.is_empty() {
            out = collapse_runs(&out, replacement);
        }
    }

    if policy.ascii_replacement {
        out = deunicode::deunicode(&out);
    }

    out.trim_end_matches([' ', '.']).trim().to_string()
}

/// Collapse runs of path separators and strip a leading one.
fn collapse_separators(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_sep = false;
    for ch in value.chars() {
        let is_sep = ch == '/' || ch == '\\';
        if is_sep {
            if prev_sep || out.is_empty() {
                prev_sep = true;
                continue;
            }
            prev_sep = true;
            out.push(std::path::MAIN_SEPARATOR);
        } else {
            prev_sep = false;
            out.push(ch);
        }
    }
    out
}

/// Replace consecutive occurrences of `unit` with a single one.
fn collapse_runs(value: &str, unit: &str) -> String {
    let doubled = format!("{}{}", unit, unit);
    let mut out = value.to_string();
    while out.contains(&doubled) {
        out = out.replace(&doubled, unit);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::media::MediaSource;
    use std::path::MAIN_SEPARATOR;

    fn item() -> MediaItem {
        let mut item = MediaItem::new("/movies", "/movies/x", "Alien: Covenant");
        item.year = Some(2017);
        item.imdb_id = "tt2316204".to_string();
        item.media_source = MediaSource::Bluray;
        item
    }

    #[test]
    fn test_title_year() {
        let policy = NamingPolicy::default();
        assert_eq!(expand_folder("$T ($Y)", &item(), &policy), "Alien - Covenant (2017)");
    }

    #[test]
    fn test_optional_group() {
        let policy = NamingPolicy::default();
        let mut item = item();
        assert_eq!(expand_filename("{Year $Y}", &item, &policy), "Year 2017");

        item.year = None;
        assert_eq!(expand_filename("{Year $Y}", &item, &policy), "");
        assert_eq!(expand_filename("$T {- $Y}", &item, &policy), "Alien - Covenant");
    }

    #[test]
    fn test_optional_group_with_several_tokens() {
        let policy = NamingPolicy::default();
        let mut item = item();
        item.title = "Up".to_string();
        item.year = Some(2009);
        assert_eq!(expand_filename("{$T ($Y)}", &item, &policy), "Up (2009)");
        assert_eq!(expand_folder("{Year $Y - $T}", &item, &policy), "Year 2009 - Up");

        item.year = None;
        assert_eq!(expand_folder("$T{ Year $Y - $T}", &item, &policy), "Up");
    }

    #[test]
    fn test_group_without_token_is_dropped() {
        let policy = NamingPolicy::default();
        assert_eq!(expand_filename("$T{literal}", &item(), &policy), "Alien - Covenant");
    }

    #[test]
    fn test_empty_brackets_removed() {
        let policy = NamingPolicy::default();
        let mut item = item();
        item.year = None;
        assert_eq!(expand_filename("$T ($Y) [$C]", &item, &policy), "Alien - Covenant");
    }

    #[test]
    fn test_literal_template_round_trip() {
        let policy = NamingPolicy::default();
        assert_eq!(expand_filename("Plain Name", &item(), &policy), "Plain Name");
        assert_eq!(expand_filename("  Plain   Name  ", &item(), &policy), "Plain Name");
    }

    #[test]
    fn test_folder_keeps_separators() {
        let policy = NamingPolicy::default();
        let expected = format!("BluRay{}Alien - Covenant (2017)", MAIN_SEPARATOR);
        assert_eq!(expand_folder("/$S//$T ($Y)", &item(), &policy), expected);
    }

    #[test]
    fn test_filename_flattens_separators() {
        let policy = NamingPolicy::default();
        assert_eq!(expand_filename("$S/$T", &item(), &policy), "BluRay Alien - Covenant");
    }

    #[test]
    fn test_space_substitution() {
        let policy = NamingPolicy {
            space_substitution: true,
            space_replacement: "-".to_string(),
            ..Default::default()
        };
        assert_eq!(expand_filename("$T", &item(), &policy), "Alien-Covenant");
    }

    #[test]
    fn test_ascii_replacement() {
        let policy = NamingPolicy {
            ascii_replacement: true,
            ..Default::default()
        };
        let mut item = item();
        item.title = "Amélie".to_string();
        assert_eq!(expand_filename("$T", &item, &policy), "Amelie");
    }

    #[test]
    fn test_trailing_dots_stripped() {
        let policy = NamingPolicy::default();
        let mut item = item();
        item.title = "Stuff...".to_string();
        assert_eq!(expand_filename("$T", &item, &policy), "Stuff");
    }

    #[test]
    fn test_token_values_not_rescanned() {
        let policy = NamingPolicy::default();
        let mut item = item();
        item.title = "Ca$Yh".to_string();
        assert_eq!(expand_filename("$T", &item, &policy), "Ca$Yh");
    }

    #[test]
    fn test_invalid_characters() {
        assert_eq!(replace_invalid_characters("What? <Now>"), "What Now");
        assert_eq!(replace_invalid_characters("a:b"), "a-b");
        assert_eq!(replace_invalid_characters("AC/DC"), "ACDC");
    }
}
