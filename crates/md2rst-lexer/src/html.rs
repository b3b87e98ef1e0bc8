//! Raw HTML recognition shared by the block and inline lexers.
//!
//! Three shapes are recognized at the start of the input: a comment
//! (`<!-- ... -->`), a paired element (`<tag attrs>...</tag>`) and a single
//! tag (`<tag attrs>` or `<tag attrs/>`).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::token::is_inline_tag;

const ATTR: &str = r#"\s*[a-zA-Z\-](?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s'">]+))?"#;

static OPEN_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^<(\w+)((?:{ATTR})*?)\s*>")).expect("valid open tag pattern")
});

static SINGLE_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^<(\w+)(?:{ATTR})*?\s*/?>")).expect("valid single tag pattern")
});

/// Text after a tag name that marks an autolink or email rather than a tag.
static NOT_A_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?::/|[^\w\s@]*@)").expect("valid tag end pattern"));

/// Which tag names a match may start with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TagFilter {
    Any,
    /// Only elements that are not inline content.
    Block,
}

impl TagFilter {
    fn accepts(self, name: &str) -> bool {
        match self {
            TagFilter::Any => true,
            TagFilter::Block => !is_inline_tag(name),
        }
    }
}

/// Every way raw HTML can match at the start of `src`, in priority order,
/// as byte lengths. Later entries are only tried when a caller rejects the
/// earlier ones.
pub(crate) fn candidates(src: &str, filter: TagFilter) -> Vec<usize> {
    let mut lengths = Vec::new();

    if src.starts_with("<!--") {
        lengths.extend(src[4..].match_indices("-->").map(|(i, _)| i + 7));
    }

    if let Some(caps) = OPEN_TAG.captures(src) {
        let name = &caps[1];
        if filter.accepts(name) && valid_tag_end(src, name) {
            let open_len = caps[0].len();
            let close = format!("</{name}>");
            lengths.extend(
                src[open_len..]
                    .match_indices(close.as_str())
                    .map(|(i, _)| open_len + i + close.len()),
            );
        }
    }

    if let Some(caps) = SINGLE_TAG.captures(src) {
        let name = &caps[1];
        if filter.accepts(name) && valid_tag_end(src, name) {
            lengths.push(caps[0].len());
        }
    }

    lengths
}

/// Match inline raw HTML: the first candidate wins.
pub(crate) fn match_inline(src: &str) -> Option<usize> {
    candidates(src, TagFilter::Any).into_iter().next()
}

/// Whether `src` opens a tag of a block-level element.
pub(crate) fn starts_block_tag(src: &str) -> bool {
    let Some(rest) = src.strip_prefix('<') else {
        return false;
    };
    let name_len = rest
        .char_indices()
        .find(|(_, c)| !(c.is_alphanumeric() || *c == '_'))
        .map_or(rest.len(), |(i, _)| i);
    name_len > 0 && !is_inline_tag(&rest[..name_len]) && valid_tag_end(src, &rest[..name_len])
}

fn valid_tag_end(src: &str, name: &str) -> bool {
    !NOT_A_TAG.is_match(&src[1 + name.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment() {
        assert_eq!(match_inline("<!-- hi -->rest"), Some(11));
    }

    #[test]
    fn test_unterminated_comment() {
        assert_eq!(match_inline("<!-- hi"), None);
    }

    #[test]
    fn test_paired_element() {
        let src = "<span class=\"x\">text</span> after";
        assert_eq!(match_inline(src), Some(src.find(" after").unwrap()));
    }

    #[test]
    fn test_single_tag() {
        assert_eq!(match_inline("<br/> x"), Some(5));
        assert_eq!(match_inline("<img src=\"a.png\"> x"), Some(17));
    }

    #[test]
    fn test_autolink_is_not_a_tag() {
        assert_eq!(match_inline("<http://example.com>"), None);
        assert_eq!(match_inline("<me@example.com>"), None);
    }

    #[test]
    fn test_block_filter_rejects_inline_tags() {
        assert!(candidates("<span>x</span>", TagFilter::Block).is_empty());
        assert_eq!(candidates("<div>x</div>", TagFilter::Block), vec![12, 5]);
    }

    #[test]
    fn test_starts_block_tag() {
        assert!(starts_block_tag("<div"));
        assert!(starts_block_tag("<table class=\"x\">"));
        assert!(!starts_block_tag("<em>x</em>"));
        assert!(!starts_block_tag("<http://example.com>"));
        assert!(!starts_block_tag("< div>"));
    }

    #[test]
    fn test_candidates_in_order() {
        let src = "<div>a</div>b</div>";
        assert_eq!(candidates(src, TagFilter::Block), vec![12, 19, 5]);
    }
}
