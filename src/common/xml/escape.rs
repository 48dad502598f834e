use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

// Attribute values need quotes escaped; text content only needs markup characters.
static ATTR_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build XML attribute escaper")
});

static TEXT_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">"])
        .expect("Failed to build XML text escaper")
});

/// Escape a string for use inside a double-quoted attribute value.
///
/// # Examples
///
/// ```
/// use slidekit::common::xml::escape_attr;
/// assert_eq!(escape_attr("a & \"b\""), "a &amp; &quot;b&quot;");
/// ```
#[inline]
pub fn escape_attr(s: &str) -> String {
    ATTR_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
}

/// Escape a string for use as element text content.
///
/// # Examples
///
/// ```
/// use slidekit::common::xml::escape_text;
/// assert_eq!(escape_text("Q&A <draft> \"v2\""), "Q&amp;A &lt;draft&gt; \"v2\"");
/// ```
#[inline]
pub fn escape_text(s: &str) -> String {
    TEXT_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;"])
}

/// Resolve an entity or character reference name (the part between `&` and `;`).
pub fn resolve_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let number = name.strip_prefix('#')?;
            let code = match number.strip_prefix('x').or_else(|| number.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_escape_keeps_quotes() {
        assert_eq!(escape_text("it's \"fine\""), "it's \"fine\"");
        assert_eq!(escape_attr("it's"), "it&apos;s");
    }

    #[test]
    fn test_resolve_entity() {
        assert_eq!(resolve_entity("amp"), Some('&'));
        assert_eq!(resolve_entity("#65"), Some('A'));
        assert_eq!(resolve_entity("#x41"), Some('A'));
        assert_eq!(resolve_entity("#xD800"), None);
        assert_eq!(resolve_entity("nbsp"), None);
    }
}
