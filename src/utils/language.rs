//! Language alias table for subtitle file names.

/// ISO 639-2/T code followed by every alias that identifies the language in
/// a file name: ISO 639-1, ISO 639-2/B, English and native names.
const LANGUAGES: &[(&str, &[&str])] = &[
    ("eng", &["en", "eng", "english"]),
    ("deu", &["de", "ger", "deu", "german", "deutsch"]),
    ("fra", &["fr", "fre", "fra", "french", "francais", "français"]),
    ("spa", &["es", "spa", "spanish", "espanol", "español", "castellano"]),
    ("ita", &["it", "ita", "italian", "italiano"]),
    ("por", &["pt", "por", "portuguese", "portugues", "português"]),
    ("nld", &["nl", "dut", "nld", "dutch", "nederlands"]),
    ("swe", &["sv", "swe", "swedish", "svenska"]),
    ("nor", &["no", "nor", "norwegian", "norsk"]),
    ("dan", &["da", "dan", "danish", "dansk"]),
    ("fin", &["fi", "fin", "finnish", "suomi"]),
    ("pol", &["pl", "pol", "polish", "polski"]),
    ("ces", &["cs", "cze", "ces", "czech", "cesky", "čeština"]),
    ("slk", &["sk", "slo", "slk", "slovak", "slovencina"]),
    ("hun", &["hu", "hun", "hungarian", "magyar"]),
    ("ron", &["ro", "rum", "ron", "romanian", "romana"]),
    ("bul", &["bg", "bul", "bulgarian"]),
    ("hrv", &["hr", "hrv", "croatian", "hrvatski"]),
    ("srp", &["sr", "srp", "serbian", "srpski"]),
    ("slv", &["sl", "slv", "slovenian", "slovenscina"]),
    ("ell", &["el", "gre", "ell", "greek"]),
    ("tur", &["tr", "tur", "turkish", "turkce"]),
    ("rus", &["ru", "rus", "russian"]),
    ("ukr", &["uk", "ukr", "ukrainian"]),
    ("heb", &["he", "heb", "hebrew"]),
    ("ara", &["ar", "ara", "arabic"]),
    ("fas", &["fa", "per", "fas", "persian", "farsi"]),
    ("hin", &["hi", "hin", "hindi"]),
    ("tha", &["th", "tha", "thai"]),
    ("vie", &["vi", "vie", "vietnamese"]),
    ("ind", &["id", "ind", "indonesian"]),
    ("msa", &["ms", "may", "msa", "malay"]),
    ("zho", &["zh", "chi", "zho", "chinese", "chs", "cht"]),
    ("jpn", &["ja", "jpn", "japanese"]),
    ("kor", &["ko", "kor", "korean"]),
    ("isl", &["is", "ice", "isl", "icelandic"]),
    ("est", &["et", "est", "estonian"]),
    ("lav", &["lv", "lav", "latvian"]),
    ("lit", &["lt", "lit", "lithuanian"]),
    ("cat", &["ca", "cat", "catalan"]),
];

/// Resolve a language alias to its ISO 639-2/T code.
pub fn lookup(alias: &str) -> Option<&'static str> {
    let alias = alias.trim().to_lowercase();
    LANGUAGES
        .iter()
        .find(|(_, aliases)| aliases.contains(&alias.as_str()))
        .map(|(code, _)| *code)
}

/// Find a language at the end of a (lower-cased, prefix-stripped) subtitle
/// name: either the whole remainder is an alias, or it ends with
/// `[ _.-]<alias>`.
pub fn detect_in_name(shortname: &str) -> Option<&'static str> {
    let shortname = shortname.trim().to_lowercase();
    for (code, aliases) in LANGUAGES {
        for alias in aliases.iter() {
            if shortname == *alias {
                return Some(*code);
            }
            if let Some(rest) = shortname.strip_suffix(alias) {
                if rest.ends_with([' ', '_', '.', '-']) {
                    return Some(*code);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("en"), Some("eng"));
        assert_eq!(lookup("German"), Some("deu"));
        assert_eq!(lookup("ger"), Some("deu"));
        assert_eq!(lookup("klingon"), None);
    }

    #[test]
    fn test_detect_in_name() {
        assert_eq!(detect_in_name("english"), Some("eng"));
        assert_eq!(detect_in_name(".de"), Some("deu"));
        assert_eq!(detect_in_name("_subs.french"), Some("fra"));
        assert_eq!(detect_in_name("-ITA"), Some("ita"));
        assert_eq!(detect_in_name("commentary"), None);
        assert_eq!(detect_in_name(""), None);
    }

    #[test]
    fn test_alias_must_be_delimited() {
        // "trailer" ends with "er" but not with a delimited alias
        assert_eq!(detect_in_name("trailer"), None);
    }
}
