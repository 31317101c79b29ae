//! Metadata document (NFO) recognition.

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Decides whether a metadata document was written in our own format. Only
/// those are copied to the configured NFO variants.
pub trait NfoInspector: Send + Sync {
    fn is_own_document(&self, path: &Path) -> bool;
}

/// Recognizes Kodi style movie documents by their `<movie>` root element.
#[derive(Debug, Default, Clone, Copy)]
pub struct XmlRootInspector;

/// How much of the file is inspected.
const SNIFF_BYTES: u64 = 4096;

impl NfoInspector for XmlRootInspector {
    fn is_own_document(&self, path: &Path) -> bool {
        let mut head = Vec::new();
        let read = File::open(path).and_then(|f| f.take(SNIFF_BYTES).read_to_end(&mut head));
        if let Err(e) = read {
            tracing::debug!("Cannot inspect NFO {:?}: {}", path, e);
            return false;
        }
        root_element(&head).is_some_and(|name| name.eq_ignore_ascii_case("movie"))
    }
}

/// Name of the root element. Declarations, comments and processing
/// instructions are skipped; text before the root means it is not XML.
fn root_element(xml: &[u8]) -> Option<String> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                return Some(String::from_utf8_lossy(e.name().as_ref()).to_string());
            }
            Ok(Event::Text(t)) => {
                let text = String::from_utf8_lossy(&t).to_string();
                if !text.trim_start_matches('\u{feff}').trim().is_empty() {
                    return None;
                }
            }
            Ok(Event::Eof) => return None,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!("Not an XML document: {}", e);
                return None;
            }
        }
        buf.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_root_element() {
        assert_eq!(root_element(b"<?xml version=\"1.0\"?>\n<movie>").as_deref(), Some("movie"));
        assert_eq!(root_element(b"<!-- made by x --><movie id=\"1\">").as_deref(), Some("movie"));
        assert_eq!(root_element(b"<movie/>").as_deref(), Some("movie"));
        assert_eq!(root_element(b"http://www.imdb.com/title/tt0133093/"), None);
        assert_eq!(root_element(b"Release <movie>"), None);
    }

    #[test]
    fn test_long_non_ascii_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("movie.nfo");
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<movie>\n  <plot>");
        // three byte characters, aligned so the inspected prefix ends inside one
        while (SNIFF_BYTES as usize - xml.len()) % 3 != 1 {
            xml.push(' ');
        }
        xml.push_str(&"\u{5929}".repeat(2000));
        xml.push_str("</plot>\n</movie>\n");
        assert!(xml.len() > SNIFF_BYTES as usize);
        assert!(!xml.is_char_boundary(SNIFF_BYTES as usize));
        std::fs::write(&path, xml).unwrap();

        assert!(XmlRootInspector.is_own_document(&path));
    }

    #[test]
    fn test_inspector() {
        let dir = TempDir::new().unwrap();
        let own = dir.path().join("movie.nfo");
        std::fs::write(&own, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<movie>\n</movie>\n").unwrap();
        let foreign = dir.path().join("release.nfo");
        std::fs::write(&foreign, "Release notes\nhttp://www.imdb.com/title/tt0133093/\n").unwrap();

        let inspector = XmlRootInspector;
        assert!(inspector.is_own_document(&own));
        assert!(!inspector.is_own_document(&foreign));
        assert!(!inspector.is_own_document(&dir.path().join("missing.nfo")));
    }
}
