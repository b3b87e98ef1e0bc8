use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::block::BlockOutput;
use crate::html;
use crate::token::{keyify, InlineToken, LinkDef};

static ESCAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\\([\\`*{}\[\]()#+\-.!_>~|])").expect("valid escape"));
static AUTOLINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<([^ >]+(@|:)[^ >]+)>").expect("valid autolink"));
static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(https?://[^\s<]+[^<.,:;"')\]\s])"#).expect("valid url")
});
static FOOTNOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[\^([^\]]+)\]").expect("valid footnote reference"));
static REFLINK_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\[([^^\]]*)\]").expect("valid reference key"));

/// Characters that end a plain-text run so other rules get a chance to match.
pub const DEFAULT_TEXT_STOPS: &[char] = &['\\', '<', '!', '[', '_', '*', '`', '~'];

/// An inline match rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineRule {
    Math,
    Escape,
    InlineHtml,
    Autolink,
    Url,
    Footnote,
    Link,
    Reflink,
    Nolink,
    DoubleEmphasis,
    Emphasis,
    Code,
    Linebreak,
    Strikethrough,
    Text,
}

/// Tries to match at the start of the text, returning the consumed length
/// and the token.
type InlineHandler<'a> = fn(&mut InlineLexer<'a>, &str) -> Option<(usize, InlineToken)>;

impl InlineRule {
    fn handler<'a>(self) -> InlineHandler<'a> {
        match self {
            InlineRule::Math => InlineLexer::lex_math,
            InlineRule::Escape => InlineLexer::lex_escape,
            InlineRule::InlineHtml => InlineLexer::lex_inline_html,
            InlineRule::Autolink => InlineLexer::lex_autolink,
            InlineRule::Url => InlineLexer::lex_url,
            InlineRule::Footnote => InlineLexer::lex_footnote,
            InlineRule::Link => InlineLexer::lex_link,
            InlineRule::Reflink => InlineLexer::lex_reflink,
            InlineRule::Nolink => InlineLexer::lex_nolink,
            InlineRule::DoubleEmphasis => InlineLexer::lex_double_emphasis,
            InlineRule::Emphasis => InlineLexer::lex_emphasis,
            InlineRule::Code => InlineLexer::lex_code,
            InlineRule::Linebreak => InlineLexer::lex_linebreak,
            InlineRule::Strikethrough => InlineLexer::lex_strikethrough,
            InlineRule::Text => InlineLexer::lex_text,
        }
    }
}

/// Standard markdown inline rules in priority order.
pub const DEFAULT_INLINE_RULES: &[InlineRule] = &[
    InlineRule::Escape,
    InlineRule::InlineHtml,
    InlineRule::Autolink,
    InlineRule::Url,
    InlineRule::Footnote,
    InlineRule::Link,
    InlineRule::Reflink,
    InlineRule::Nolink,
    InlineRule::DoubleEmphasis,
    InlineRule::Emphasis,
    InlineRule::Code,
    InlineRule::Linebreak,
    InlineRule::Strikethrough,
    InlineRule::Text,
];

/// Inline rule order plus the stop set of the plain-text rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineGrammar {
    pub rules: Vec<InlineRule>,
    pub text_stops: Vec<char>,
}

impl InlineGrammar {
    /// Standard markdown, without math.
    pub fn baseline() -> Self {
        Self {
            rules: DEFAULT_INLINE_RULES.to_vec(),
            text_stops: DEFAULT_TEXT_STOPS.to_vec(),
        }
    }

    /// Baseline grammar with `$...$` tried first and `$` ending text runs.
    pub fn with_math() -> Self {
        let mut grammar = Self::baseline();
        grammar.rules.insert(0, InlineRule::Math);
        grammar.text_stops.push('$');
        grammar
    }
}

impl Default for InlineGrammar {
    fn default() -> Self {
        Self::with_math()
    }
}

/// Inline lexer.
///
/// Resolves reference links and footnote references against the definitions
/// the block lexer collected for the same document.
pub struct InlineLexer<'a> {
    handlers: Vec<InlineHandler<'a>>,
    text_stops: Vec<char>,
    links: &'a HashMap<String, LinkDef>,
    footnotes: &'a HashSet<String>,
    in_link: bool,
}

impl<'a> InlineLexer<'a> {
    pub fn new(
        grammar: InlineGrammar,
        links: &'a HashMap<String, LinkDef>,
        footnotes: &'a HashSet<String>,
    ) -> Self {
        Self {
            handlers: grammar.rules.iter().map(|rule| rule.handler()).collect(),
            text_stops: grammar.text_stops,
            links,
            footnotes,
            in_link: false,
        }
    }

    /// Lexer for the blocks of one document, using its definitions.
    pub fn for_document(output: &'a BlockOutput) -> Self {
        Self::new(InlineGrammar::default(), &output.links, &output.footnotes)
    }

    /// Lex standalone text with the default grammar and no definitions.
    pub fn tokenize(text: &str) -> Vec<InlineToken> {
        let links = HashMap::new();
        let footnotes = HashSet::new();
        InlineLexer::new(InlineGrammar::default(), &links, &footnotes).lex(text)
    }

    /// Lex the text of one block. Adjacent text runs are merged.
    pub fn lex(&mut self, text: &str) -> Vec<InlineToken> {
        let mut tokens: Vec<InlineToken> = Vec::new();
        let mut text = text.trim_end_matches('\n');

        while !text.is_empty() {
            let (len, token) = self.next_token(text);
            match (tokens.last_mut(), token) {
                (Some(InlineToken::Text(run)), InlineToken::Text(more)) => run.push_str(&more),
                (_, token) => tokens.push(token),
            }
            text = &text[len..];
        }

        tokens
    }

    fn next_token(&mut self, text: &str) -> (usize, InlineToken) {
        for i in 0..self.handlers.len() {
            let handler = self.handlers[i];
            if let Some(found) = handler(self, text) {
                return found;
            }
        }
        // Only reachable for grammars without the text rule.
        let len = text.chars().next().map_or(text.len(), char::len_utf8);
        (len, InlineToken::Text(text[..len].to_string()))
    }

    // --- Rules ---

    fn lex_math(&mut self, src: &str) -> Option<(usize, InlineToken)> {
        let rest = src.strip_prefix('$')?;
        for (i, c) in rest.char_indices() {
            match c {
                '\n' => return None,
                '$' if i > 0 => return Some((i + 2, InlineToken::Math(rest[..i].to_string()))),
                _ => {}
            }
        }
        None
    }

    fn lex_escape(&mut self, src: &str) -> Option<(usize, InlineToken)> {
        let caps = ESCAPE.captures(src)?;
        let c = caps[1].chars().next()?;
        Some((caps[0].len(), InlineToken::Escape(c)))
    }

    fn lex_inline_html(&mut self, src: &str) -> Option<(usize, InlineToken)> {
        let len = html::match_inline(src)?;
        Some((len, InlineToken::Tag(src[..len].to_string())))
    }

    fn lex_autolink(&mut self, src: &str) -> Option<(usize, InlineToken)> {
        let caps = AUTOLINK.captures(src)?;
        let token = InlineToken::Autolink {
            link: caps[1].to_string(),
            is_email: &caps[2] == "@",
        };
        Some((caps[0].len(), token))
    }

    fn lex_url(&mut self, src: &str) -> Option<(usize, InlineToken)> {
        let m = URL.find(src)?;
        let link = m.as_str().to_string();
        let token = if self.in_link {
            InlineToken::Text(link)
        } else {
            InlineToken::Autolink {
                link,
                is_email: false,
            }
        };
        Some((m.end(), token))
    }

    fn lex_footnote(&mut self, src: &str) -> Option<(usize, InlineToken)> {
        let caps = FOOTNOTE.captures(src)?;
        let key = keyify(&caps[1]);
        if !self.footnotes.contains(&key) {
            return None;
        }
        Some((caps[0].len(), InlineToken::FootnoteRef(key)))
    }

    fn lex_link(&mut self, src: &str) -> Option<(usize, InlineToken)> {
        let (is_image, open) = link_opening(src)?;
        for close in label_ends(src, open, Brackets::Link) {
            let Some(tail) = src[close + 1..].strip_prefix('(') else {
                continue;
            };
            if let Some(dest) = match_destination(tail) {
                let len = close + 2 + dest.len;
                let token = self.process_link(is_image, &src[open..close], dest.link, dest.title);
                return Some((len, token));
            }
        }
        None
    }

    fn lex_reflink(&mut self, src: &str) -> Option<(usize, InlineToken)> {
        let (is_image, open) = link_opening(src)?;
        for close in label_ends(src, open, Brackets::Link) {
            let Some(caps) = REFLINK_KEY.captures(&src[close + 1..]) else {
                continue;
            };
            let label = &src[open..close];
            let key = if caps[1].is_empty() { label } else { &caps[1] };
            let def = self.links.get(&keyify(key))?.clone();
            let len = close + 1 + caps[0].len();
            return Some((len, self.process_link(is_image, label, def.link, def.title)));
        }
        None
    }

    fn lex_nolink(&mut self, src: &str) -> Option<(usize, InlineToken)> {
        let (is_image, open) = link_opening(src)?;
        let close = label_ends(src, open, Brackets::Nolink).into_iter().next()?;
        let label = &src[open..close];
        let def = self.links.get(&keyify(label))?.clone();
        Some((close + 1, self.process_link(is_image, label, def.link, def.title)))
    }

    fn process_link(
        &mut self,
        is_image: bool,
        text: &str,
        link: String,
        title: Option<String>,
    ) -> InlineToken {
        if is_image {
            return InlineToken::Image {
                src: link,
                title,
                alt: text.to_string(),
            };
        }
        self.in_link = true;
        let children = self.lex(text);
        self.in_link = false;
        InlineToken::Link {
            link,
            title,
            children,
        }
    }

    fn lex_double_emphasis(&mut self, src: &str) -> Option<(usize, InlineToken)> {
        let marker = if src.starts_with("__") {
            "__"
        } else if src.starts_with("**") {
            "**"
        } else {
            return None;
        };
        let single = &marker[..1];
        let close = src
            .char_indices()
            .skip(3)
            .map(|(i, _)| i)
            .find(|&i| src[i..].starts_with(marker) && !src[i + 2..].starts_with(single))?;
        let children = self.lex(&src[2..close]);
        Some((close + 2, InlineToken::DoubleEmphasis(children)))
    }

    fn lex_emphasis(&mut self, src: &str) -> Option<(usize, InlineToken)> {
        let marker = src.chars().next().filter(|c| *c == '_' || *c == '*')?;
        let doubled: &str = if marker == '_' { "__" } else { "**" };
        let mut pos = 1;
        let mut units = 0;

        loop {
            let rest = &src[pos..];
            if units > 0 && rest.starts_with(marker) {
                let next = rest[1..].chars().next();
                let closes = if marker == '_' {
                    !next.is_some_and(is_word_char)
                } else {
                    next != Some('*')
                };
                if closes {
                    let children = self.lex(&src[1..pos]);
                    return Some((pos + 1, InlineToken::Emphasis(children)));
                }
            }
            if rest.starts_with(doubled) {
                pos += 2;
            } else {
                let c = rest.chars().next().filter(|c| *c != marker)?;
                pos += c.len_utf8();
            }
            units += 1;
        }
    }

    fn lex_code(&mut self, src: &str) -> Option<(usize, InlineToken)> {
        let n = src.len() - src.trim_start_matches('`').len();
        if n == 0 {
            return None;
        }

        let mut search = n;
        while let Some(offset) = src[search..].find('`') {
            let start = search + offset;
            let run = src[start..].len() - src[start..].trim_start_matches('`').len();
            search = start + run;
            if run != n {
                continue;
            }
            let inner = &src[n..start];
            let code = match inner.trim() {
                "" => match inner.chars().last() {
                    Some(c) => &inner[inner.len() - c.len_utf8()..],
                    None => continue,
                },
                trimmed => trimmed,
            };
            if code.ends_with('`') {
                continue;
            }
            return Some((start + n, InlineToken::Codespan(code.to_string())));
        }
        None
    }

    fn lex_linebreak(&mut self, src: &str) -> Option<(usize, InlineToken)> {
        let spaces = src.len() - src.trim_start_matches(' ').len();
        if spaces < 2 {
            return None;
        }
        let rest = src[spaces..].strip_prefix('\n')?;
        if rest.trim().is_empty() {
            return None;
        }
        Some((spaces + 1, InlineToken::Linebreak))
    }

    fn lex_strikethrough(&mut self, src: &str) -> Option<(usize, InlineToken)> {
        let body = src.strip_prefix("~~")?;
        if !body.chars().next().is_some_and(|c| !c.is_whitespace()) {
            return None;
        }
        let mut prev = None;
        for (i, c) in body.char_indices() {
            if i > 0 && body[i..].starts_with("~~") && prev.is_some_and(|p: char| !p.is_whitespace())
            {
                let children = self.lex(&body[..i]);
                return Some((i + 4, InlineToken::Strikethrough(children)));
            }
            prev = Some(c);
        }
        None
    }

    fn lex_text(&mut self, src: &str) -> Option<(usize, InlineToken)> {
        let mut chars = src.char_indices();
        chars.next()?;
        let end = chars
            .find(|&(i, c)| self.text_stops.contains(&c) || starts_special(&src[i..]))
            .map_or(src.len(), |(i, _)| i);
        Some((end, InlineToken::Text(src[..end].to_string())))
    }
}

// =========================================================================
// Helpers
// =========================================================================

/// URLs and hard line breaks also end a text run.
fn starts_special(rest: &str) -> bool {
    if rest.starts_with("http://") || rest.starts_with("https://") {
        return true;
    }
    let spaces = rest.len() - rest.trim_start_matches(' ').len();
    spaces >= 2 && rest[spaces..].starts_with('\n')
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `[` or `![` at the start of a link. Returns whether it is an image and
/// where the label starts.
fn link_opening(src: &str) -> Option<(bool, usize)> {
    if src.starts_with("![") {
        Some((true, 2))
    } else if src.starts_with('[') {
        Some((false, 1))
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Brackets {
    /// Inline and reference links: a `]` may appear in the label when
    /// another `]` follows before any `[`.
    Link,
    /// Shortcut references: the first unbracketed `]` ends the label.
    Nolink,
}

/// Byte offsets of every `]` that can close a label opened at `open`,
/// longest label first.
fn label_ends(src: &str, open: usize, brackets: Brackets) -> Vec<usize> {
    let mut ends = Vec::new();
    let mut i = open;

    while i < src.len() {
        let rest = &src[i..];
        if rest.starts_with('[') {
            let Some(close) = rest[1..].find(']') else {
                break;
            };
            if brackets == Brackets::Link && rest[1..1 + close].contains('^') {
                break;
            }
            i += close + 2;
        } else if rest.starts_with(']') {
            ends.push(i);
            let more = rest[1..]
                .find(['[', ']'])
                .is_some_and(|j| rest[1 + j..].starts_with(']'));
            if brackets == Brackets::Nolink || !more {
                break;
            }
            i += 1;
        } else {
            i += rest.chars().next().map_or(1, char::len_utf8);
        }
    }

    ends.reverse();
    ends
}

struct Destination {
    len: usize,
    link: String,
    title: Option<String>,
}

/// Match `url "title")` after the opening parenthesis of an inline link.
fn match_destination(tail: &str) -> Option<Destination> {
    let start = tail.len() - tail.trim_start().len();
    let angled = tail[start..].starts_with('<');
    let link_start = if angled { start + 1 } else { start };

    let boundaries = tail[link_start..]
        .char_indices()
        .map(|(i, _)| link_start + i)
        .chain(std::iter::once(tail.len()));

    for p in boundaries {
        let mut q = p;
        if angled {
            if !tail[q..].starts_with('>') {
                continue;
            }
            q += 1;
        }
        let link = tail[link_start..p].to_string();
        if let Some((len, title)) = match_title(&tail[q..]) {
            return Some(Destination {
                len: q + len,
                link,
                title: Some(title),
            });
        }
        let ws = tail[q..].len() - tail[q..].trim_start().len();
        if tail[q + ws..].starts_with(')') {
            return Some(Destination {
                len: q + ws + 1,
                link,
                title: None,
            });
        }
    }
    None
}

/// Match ` "title")`, returning the consumed length and the title.
fn match_title(rest: &str) -> Option<(usize, String)> {
    let ws = rest.len() - rest.trim_start().len();
    if ws == 0 {
        return None;
    }
    let body = rest[ws..].strip_prefix(['"', '\''])?;
    let offset = ws + 1;
    for (i, c) in body.char_indices() {
        if c != '"' && c != '\'' {
            continue;
        }
        let after = &body[i + 1..];
        let trailing = after.len() - after.trim_start().len();
        if after[trailing..].starts_with(')') {
            return Some((offset + i + 1 + trailing + 1, body[..i].to_string()));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokens(text: &str) -> Vec<InlineToken> {
        InlineLexer::tokenize(text)
    }

    fn text(s: &str) -> InlineToken {
        InlineToken::Text(s.into())
    }

    // =========================================================================
    // Math
    // =========================================================================

    #[test]
    fn test_inline_math() {
        assert_eq!(
            tokens("area $\\pi r^2$ here"),
            vec![
                text("area "),
                InlineToken::Math("\\pi r^2".into()),
                text(" here"),
            ]
        );
    }

    #[test]
    fn test_math_beats_emphasis() {
        assert_eq!(
            tokens("$a*b*c$"),
            vec![InlineToken::Math("a*b*c".into())]
        );
    }

    #[test]
    fn test_unmatched_dollar_is_text() {
        assert_eq!(tokens("costs $5"), vec![text("costs $5")]);
    }

    #[test]
    fn test_math_does_not_cross_lines() {
        assert_eq!(tokens("$a\nb$"), vec![text("$a\nb$")]);
    }

    #[test]
    fn test_dollar_stops_text_run() {
        let grammar = InlineGrammar::with_math();
        assert!(grammar.text_stops.contains(&'$'));
        assert_eq!(grammar.rules[0], InlineRule::Math);
        assert!(!InlineGrammar::baseline().text_stops.contains(&'$'));
    }

    #[test]
    fn test_baseline_grammar_keeps_dollars_as_text() {
        let links = HashMap::new();
        let footnotes = HashSet::new();
        let toks = InlineLexer::new(InlineGrammar::baseline(), &links, &footnotes).lex("$x$");
        assert_eq!(toks, vec![text("$x$")]);
    }

    // =========================================================================
    // Emphasis, code, strikethrough
    // =========================================================================

    #[test]
    fn test_emphasis_and_strong() {
        assert_eq!(
            tokens("*a* and **b**"),
            vec![
                InlineToken::Emphasis(vec![text("a")]),
                text(" and "),
                InlineToken::DoubleEmphasis(vec![text("b")]),
            ]
        );
    }

    #[test]
    fn test_underscore_emphasis() {
        assert_eq!(
            tokens("_a_ __b__"),
            vec![
                InlineToken::Emphasis(vec![text("a")]),
                text(" "),
                InlineToken::DoubleEmphasis(vec![text("b")]),
            ]
        );
    }

    #[test]
    fn test_nested_emphasis() {
        assert_eq!(
            tokens("**bold *it***"),
            vec![InlineToken::DoubleEmphasis(vec![
                text("bold "),
                InlineToken::Emphasis(vec![text("it")]),
            ])]
        );
    }

    #[test]
    fn test_lone_star_is_text() {
        assert_eq!(tokens("2 * 3"), vec![text("2 * 3")]);
    }

    #[test]
    fn test_codespan() {
        assert_eq!(
            tokens("use `let x` here"),
            vec![
                text("use "),
                InlineToken::Codespan("let x".into()),
                text(" here"),
            ]
        );
    }

    #[test]
    fn test_double_backtick_codespan() {
        assert_eq!(
            tokens("`` a ` b ``"),
            vec![InlineToken::Codespan("a ` b".into())]
        );
    }

    #[test]
    fn test_strikethrough() {
        assert_eq!(
            tokens("~~gone~~"),
            vec![InlineToken::Strikethrough(vec![text("gone")])]
        );
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            tokens("\\*not\\*"),
            vec![
                InlineToken::Escape('*'),
                text("not"),
                InlineToken::Escape('*'),
            ]
        );
    }

    #[test]
    fn test_linebreak() {
        assert_eq!(
            tokens("a  \nb"),
            vec![text("a"), InlineToken::Linebreak, text("b")]
        );
    }

    // =========================================================================
    // Links and images
    // =========================================================================

    #[test]
    fn test_inline_link() {
        assert_eq!(
            tokens("[Example](http://example.com \"Title\")"),
            vec![InlineToken::Link {
                link: "http://example.com".into(),
                title: Some("Title".into()),
                children: vec![text("Example")],
            }]
        );
    }

    #[test]
    fn test_link_text_urls_stay_text() {
        assert_eq!(
            tokens("[http://a.org](http://a.org)"),
            vec![InlineToken::Link {
                link: "http://a.org".into(),
                title: None,
                children: vec![text("http://a.org")],
            }]
        );
    }

    #[test]
    fn test_angle_bracket_destination() {
        assert_eq!(
            tokens("[x](<a b>)"),
            vec![InlineToken::Link {
                link: "a b".into(),
                title: None,
                children: vec![text("x")],
            }]
        );
    }

    #[test]
    fn test_image() {
        assert_eq!(
            tokens("![alt text](img.png)"),
            vec![InlineToken::Image {
                src: "img.png".into(),
                title: None,
                alt: "alt text".into(),
            }]
        );
    }

    #[test]
    fn test_label_with_brackets() {
        assert_eq!(
            tokens("[a [b] c](u)"),
            vec![InlineToken::Link {
                link: "u".into(),
                title: None,
                children: vec![text("a [b] c")],
            }]
        );
    }

    #[test]
    fn test_reference_links() {
        let mut links = HashMap::new();
        links.insert(
            "docs".to_string(),
            LinkDef {
                link: "http://docs.rs".into(),
                title: None,
            },
        );
        let footnotes = HashSet::new();
        let mut lexer = InlineLexer::new(InlineGrammar::default(), &links, &footnotes);
        let expected = InlineToken::Link {
            link: "http://docs.rs".into(),
            title: None,
            children: vec![text("the docs")],
        };
        assert_eq!(lexer.lex("[the docs][Docs]"), vec![expected]);

        let shortcut = lexer.lex("[Docs]");
        assert!(matches!(&shortcut[..], [InlineToken::Link { link, .. }] if link == "http://docs.rs"));
    }

    #[test]
    fn test_unresolved_reference_is_text() {
        assert_eq!(tokens("[missing]"), vec![text("[missing]")]);
    }

    #[test]
    fn test_autolinks() {
        assert_eq!(
            tokens("<http://a.org> <me@a.org>"),
            vec![
                InlineToken::Autolink {
                    link: "http://a.org".into(),
                    is_email: false
                },
                text(" "),
                InlineToken::Autolink {
                    link: "me@a.org".into(),
                    is_email: true
                },
            ]
        );
    }

    #[test]
    fn test_bare_url() {
        assert_eq!(
            tokens("see https://a.org/x."),
            vec![
                text("see "),
                InlineToken::Autolink {
                    link: "https://a.org/x".into(),
                    is_email: false
                },
                text("."),
            ]
        );
    }

    // =========================================================================
    // HTML and footnotes
    // =========================================================================

    #[test]
    fn test_inline_html() {
        assert_eq!(
            tokens("a <b>bold</b> c"),
            vec![text("a "), InlineToken::Tag("<b>bold</b>".into()), text(" c")]
        );
    }

    #[test]
    fn test_footnote_reference_needs_definition() {
        assert_eq!(tokens("x[^1]"), vec![text("x[^1]")]);

        let links = HashMap::new();
        let footnotes: HashSet<String> = ["1".to_string()].into_iter().collect();
        let toks = InlineLexer::new(InlineGrammar::default(), &links, &footnotes).lex("x[^1]");
        assert_eq!(toks, vec![text("x"), InlineToken::FootnoteRef("1".into())]);
    }
}
