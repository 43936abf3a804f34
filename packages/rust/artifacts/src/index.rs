//! Index page listing every bundle, newest version first.

use std::cmp::Ordering;

use docsnap_shared::{BUNDLE_EXTENSION, VERSION_PREFIX, Version, VersionParseError, parse_version};

/// Title and heading of the index page.
pub const INDEX_TITLE: &str = "Relay documentation snapshots";

/// A bundle found in the output directory, with the version read back from its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// File name relative to the output directory; used as both href and link text.
    pub filename: String,
    /// Version parsed from the file name.
    pub version: Result<Version, VersionParseError>,
}

impl IndexEntry {
    /// Build an entry from a bundle file name.
    ///
    /// Returns `None` when the name does not end in `.txt`. The `version-v`
    /// prefix is stripped when present and the remainder parsed; a remainder
    /// that is not `major.minor.patch` still yields an entry, with the parse
    /// error kept in [`IndexEntry::version`].
    pub fn from_filename(filename: &str) -> Option<Self> {
        let stem = filename
            .strip_suffix(BUNDLE_EXTENSION)
            .and_then(|s| s.strip_suffix('.'))?;
        let label = stem.strip_prefix(VERSION_PREFIX).unwrap_or(stem);

        Some(Self {
            filename: filename.to_string(),
            version: parse_version(label),
        })
    }
}

/// Sort entries by version, descending, in place.
///
/// The sort is stable: entries with equal versions keep their relative order.
/// Entries whose version did not parse go after all others, also in their
/// original relative order.
pub fn sort_newest_first(entries: &mut [IndexEntry]) {
    entries.sort_by(|a, b| match (&a.version, &b.version) {
        (Ok(va), Ok(vb)) => vb.cmp(va),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => Ordering::Equal,
    });
}

/// Render the index page for `entries`, keeping their order.
pub fn render_index(entries: &[IndexEntry]) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n");
    out.push_str("<html lang=\"en\">\n");
    out.push_str("<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{INDEX_TITLE}</title>\n"));
    out.push_str("</head>\n");
    out.push_str("<body>\n");
    out.push_str(&format!("<h1>{INDEX_TITLE}</h1>\n"));
    out.push_str("<ul>\n");
    for entry in entries {
        let name = escape_html(&entry.filename);
        out.push_str(&format!("<li><a href=\"{name}\">{name}</a></li>\n"));
    }
    out.push_str("</ul>\n");
    out.push_str("</body>\n");
    out.push_str("</html>\n");
    out
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(names: &[&str]) -> Vec<IndexEntry> {
        names
            .iter()
            .map(|n| IndexEntry::from_filename(n).expect("txt file"))
            .collect()
    }

    fn names(entries: &[IndexEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.filename.as_str()).collect()
    }

    #[test]
    fn parses_version_from_filename() {
        let entry = IndexEntry::from_filename("version-v13.0.0.txt").unwrap();
        assert_eq!(entry.version, Ok(Version::new(13, 0, 0)));

        assert!(IndexEntry::from_filename("index.html").is_none());
        assert!(IndexEntry::from_filename("notes.txt.bak").is_none());
        assert!(IndexEntry::from_filename("version-vX.Y.Z.txt").unwrap().version.is_err());
    }

    #[test]
    fn orders_by_numeric_components() {
        let mut list = entries(&[
            "version-v2.0.0.txt",
            "version-v13.0.0.txt",
            "version-v2.10.0.txt",
        ]);
        sort_newest_first(&mut list);
        assert_eq!(
            names(&list),
            vec![
                "version-v13.0.0.txt",
                "version-v2.10.0.txt",
                "version-v2.0.0.txt"
            ]
        );
    }

    #[test]
    fn unparseable_entries_sort_last_in_original_order() {
        let mut list = entries(&[
            "notes.txt",
            "version-v1.0.0.txt",
            "version-vbeta.txt",
            "version-v1.0.1.txt",
        ]);
        sort_newest_first(&mut list);
        assert_eq!(
            names(&list),
            vec![
                "version-v1.0.1.txt",
                "version-v1.0.0.txt",
                "notes.txt",
                "version-vbeta.txt"
            ]
        );
    }

    #[test]
    fn equal_versions_keep_relative_order() {
        let mut list = entries(&["version-v01.0.0.txt", "version-v1.0.0.txt"]);
        sort_newest_first(&mut list);
        assert_eq!(names(&list), vec!["version-v01.0.0.txt", "version-v1.0.0.txt"]);
    }

    #[test]
    fn renders_links_in_given_order() {
        let list = entries(&["version-v2.0.0.txt", "version-v1.0.0.txt"]);
        let html = render_index(&list);

        let first = html
            .find("<li><a href=\"version-v2.0.0.txt\">version-v2.0.0.txt</a></li>")
            .expect("first link");
        let second = html
            .find("<li><a href=\"version-v1.0.0.txt\">version-v1.0.0.txt</a></li>")
            .expect("second link");
        assert!(first < second);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(&format!("<title>{INDEX_TITLE}</title>")));
    }

    #[test]
    fn escapes_markup_in_filenames() {
        let list = entries(&["a<b>&\"c\".txt"]);
        let html = render_index(&list);
        assert!(html.contains("href=\"a&lt;b&gt;&amp;&quot;c&quot;.txt\""));
    }

    #[test]
    fn empty_index_still_renders_list() {
        let html = render_index(&[]);
        assert!(html.contains("<ul>\n</ul>"));
    }
}
