use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

const SPECIAL: [&str; 5] = ["&", "<", ">", "\"", "'"];
const ENTITIES: [&str; 5] = ["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"];

// Built once, shared by every emitter thread
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(SPECIAL)
        .expect("Failed to build XML escaper")
});

/// Escape the five standard XML entities.
///
/// Used for both text content and attribute values; nothing beyond the five
/// predefined entities is rewritten.
///
/// # Examples
///
/// ```
/// use sheetml_writer::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<t>\"x\"</t>"), "&lt;t&gt;&quot;x&quot;&lt;/t&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    XML_ESCAPER.replace_all(s, &ENTITIES)
}

/// Append `s` to `out` with the five standard XML entities escaped.
///
/// Skips the intermediate allocation when `s` has nothing to escape, which is
/// the common case for cell references and numeric text.
#[inline]
pub fn push_escaped(out: &mut String, s: &str) {
    if XML_ESCAPER.is_match(s) {
        XML_ESCAPER.replace_all_with(s, out, |mat, _, dst| {
            dst.push_str(ENTITIES[mat.pattern().as_usize()]);
            true
        });
    } else {
        out.push_str(s);
    }
}

/// Whether text content needs `xml:space="preserve"` to survive a reader that
/// trims whitespace.
#[inline]
pub fn needs_space_preserve(s: &str) -> bool {
    s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_all_five_entities() {
        assert_eq!(
            escape_xml(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&apos;s&lt;/a&gt;"
        );
    }

    #[test]
    fn push_escaped_matches_escape_xml() {
        for input in ["plain", "", "a&b", "<<>>", "'\"", "1 < 2 & 3 > 2"] {
            let mut out = String::from("prefix:");
            push_escaped(&mut out, input);
            assert_eq!(out, format!("prefix:{}", escape_xml(input)));
        }
    }

    #[test]
    fn space_preserve_detection() {
        assert!(needs_space_preserve(" lead"));
        assert!(needs_space_preserve("trail\t"));
        assert!(!needs_space_preserve("in side"));
        assert!(!needs_space_preserve(""));
    }
}
