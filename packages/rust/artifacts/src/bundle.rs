//! Bundle envelope.
//!
//! A bundle is the opening tag, each document's raw content, and the closing
//! tag, joined by blank lines:
//!
//! ```text
//! <relay-docs relay-version="13.0.0">
//!
//! <content of file 1>
//!
//! <content of file 2>
//!
//! </relay-docs>
//! ```
//!
//! Downstream consumers parse the tag and attribute names, so they never change.

macro_rules! bundle_tag {
    () => {
        "relay-docs"
    };
}

/// Element name of the envelope.
pub const BUNDLE_TAG: &str = bundle_tag!();

/// Attribute on the opening tag carrying the version label.
pub const BUNDLE_VERSION_ATTR: &str = "relay-version";

/// Closing line of every bundle.
pub const BUNDLE_CLOSE_TAG: &str = concat!("</", bundle_tag!(), ">");

const SEPARATOR: &str = "\n\n";

/// `<relay-docs relay-version="<version>">`
pub fn open_tag(version: &str) -> String {
    format!("<{BUNDLE_TAG} {BUNDLE_VERSION_ATTR}=\"{version}\">")
}

/// Wrap `contents` (already in concatenation order) in the envelope for `version`.
///
/// Contents are inserted verbatim. With no contents the result is just the
/// two tags separated by a blank line.
pub fn render_bundle<S: AsRef<str>>(version: &str, contents: &[S]) -> String {
    let open = open_tag(version);
    let body_len: usize = contents
        .iter()
        .map(|c| c.as_ref().len() + SEPARATOR.len())
        .sum();

    let mut out = String::with_capacity(open.len() + body_len + SEPARATOR.len() + BUNDLE_CLOSE_TAG.len());
    out.push_str(&open);
    for content in contents {
        out.push_str(SEPARATOR);
        out.push_str(content.as_ref());
    }
    out.push_str(SEPARATOR);
    out.push_str(BUNDLE_CLOSE_TAG);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_is_exact() {
        let bundle = render_bundle("9.9.9", &["A", "B"]);
        assert_eq!(
            bundle,
            "<relay-docs relay-version=\"9.9.9\">\n\nA\n\nB\n\n</relay-docs>"
        );
    }

    #[test]
    fn close_tag_matches_element_name() {
        assert_eq!(BUNDLE_CLOSE_TAG, format!("</{BUNDLE_TAG}>"));
        assert!(open_tag("1.0.0").starts_with(&format!("<{BUNDLE_TAG} ")));
    }

    #[test]
    fn empty_bundle_keeps_both_tags() {
        let bundle = render_bundle::<&str>("1.0.0", &[]);
        assert_eq!(bundle, "<relay-docs relay-version=\"1.0.0\">\n\n</relay-docs>");
    }

    #[test]
    fn contents_are_not_trimmed() {
        let bundle = render_bundle("2.0.0", &[String::from("# Title\n"), String::new()]);
        assert_eq!(
            bundle,
            "<relay-docs relay-version=\"2.0.0\">\n\n# Title\n\n\n\n\n</relay-docs>"
        );
    }
}
