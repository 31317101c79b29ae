//! Stacking marker detection (multi-part videos such as CD1/CD2).

/// Marker words that introduce a part number.
const MARKER_WORDS: &str = "cd|dvd|part|pt|disc|disk";

/// Detect a stacking marker in a filename.
///
/// Recognizes `cd1`, `disc2`, `part1`, `pt2`, `dvd1`, `disk1`, preceded by a
/// delimiter (space, `_`, `-`, `.`) and followed by the extension or the end
/// of the name. Returns the marker as written plus its numeric index.
pub fn detect_stacking(filename: &str) -> Option<(String, u32)> {
    let pattern = format!(
        r"(?i)[_\s\-\.]((?:{})[_\s\-\.]?(\d+))(?:\.[a-z0-9]+)?$",
        MARKER_WORDS
    );
    let re = regex::Regex::new(&pattern).ok()?;
    let caps = re.captures(filename)?;
    let marker = caps.get(1)?.as_str().to_string();
    let index: u32 = caps.get(2)?.as_str().parse().ok()?;
    if index == 0 {
        return None;
    }
    Some((marker, index))
}

/// Remove a trailing stacking marker (and the delimiters before it) from a
/// basename. An explicit marker is preferred; otherwise known marker words
/// are stripped.
pub fn strip_stacking(basename: &str, marker: &str) -> String {
    if !marker.is_empty() {
        let pattern = format!(r"(?i)[_\s\-\.]*{}$", regex::escape(marker));
        if let Ok(re) = regex::Regex::new(&pattern) {
            if re.is_match(basename) {
                return re.replace(basename, "").trim().to_string();
            }
        }
    }

    let pattern = format!(r"(?i)[_\s\-\.]+(?:{})[_\s\-\.]?\d+$", MARKER_WORDS);
    match regex::Regex::new(&pattern) {
        Ok(re) => re.replace(basename, "").trim().to_string(),
        Err(_) => basename.to_string(),
    }
}

/// Suffix appended to a new basename for a stacked file: the delimiter plus
/// the explicit marker, or `CD<index>` when only the index is known.
pub fn stacking_suffix(delimiter: &str, marker: &str, index: u32) -> String {
    if !marker.is_empty() {
        format!("{}{}", delimiter, marker)
    } else if index != 0 {
        format!("{}CD{}", delimiter, index)
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_stacking() {
        assert_eq!(detect_stacking("movie-cd1.avi"), Some(("cd1".to_string(), 1)));
        assert_eq!(detect_stacking("movie CD2.avi"), Some(("CD2".to_string(), 2)));
        assert_eq!(detect_stacking("movie_part1.mkv"), Some(("part1".to_string(), 1)));
        assert_eq!(detect_stacking("movie.disc2.avi"), Some(("disc2".to_string(), 2)));
        assert_eq!(detect_stacking("movie-dvd1.mkv"), Some(("dvd1".to_string(), 1)));
        assert_eq!(detect_stacking("movie pt 2.mkv"), Some(("pt 2".to_string(), 2)));

        assert_eq!(detect_stacking("movie.mkv"), None);
        assert_eq!(detect_stacking("movie-2024.avi"), None);
        assert_eq!(detect_stacking("Escape Plan.mkv"), None);
    }

    #[test]
    fn test_strip_stacking() {
        assert_eq!(strip_stacking("Inception CD1", "CD1"), "Inception");
        assert_eq!(strip_stacking("Inception.part2", ""), "Inception");
        assert_eq!(strip_stacking("Inception", ""), "Inception");
        assert_eq!(strip_stacking("Blade Runner 2049", ""), "Blade Runner 2049");
    }

    #[test]
    fn test_stacking_suffix() {
        assert_eq!(stacking_suffix(" ", "part1", 1), " part1");
        assert_eq!(stacking_suffix("_", "", 2), "_CD2");
        assert_eq!(stacking_suffix(" ", "", 0), "");
    }
}
