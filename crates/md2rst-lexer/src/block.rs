use std::collections::{HashMap, HashSet};
use std::mem;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::html::{self, TagFilter};
use crate::token::{keyify, BlockToken, LinkDef, ListItem};

/// Block quotes and lists nested deeper than this are kept as plain text.
pub const MAX_NESTING_DEPTH: usize = 6;

static HRULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ {0,3}[-*_](?: *[-*_]){2,} *(?:\n+|$)").expect("valid hrule"));
static BLOCK_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?: {4}[^\n]+\n*)+").expect("valid block code"));
static BLOCK_CODE_LEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^ {4}").expect("valid block code indent"));
static FENCE_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ *(`{3,}|~{3,}) *(\S+)? *\n").expect("valid fence"));
static HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^ *(#{1,6}) *([^\n]+?) *#* *(?:\n+|$)").expect("valid heading")
});
static LHEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^\n]+)\n *(=|-)+ *(?:\n+|$)").expect("valid lheading"));
static BLOCK_QUOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?: *>[^\n]+(?:\n[^\n]+)*\n*)+").expect("valid block quote"));
static BLOCK_QUOTE_LEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^ *> ?").expect("valid block quote marker"));
static LIST_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^( *)([*+-]|\d+\.) ").expect("valid list start"));
static LIST_BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ *(?:[*+-]|\d+\.) +").expect("valid list bullet"));
static BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[*+-]|\d+\.) ").expect("valid bullet"));
static UNORDERED_BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[*+-] ").expect("valid unordered bullet"));
static ORDERED_BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\. ").expect("valid ordered bullet"));
static LIST_HRULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[-*_] *){3,}(?:\n|$)").expect("valid list hrule"));
static DEF_LINKS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^ *\[([^^\]]+)\]: *<?([^\s>]+)>?(?: +["(]([^\n]+)[")])? *(?:\n+|$)"#)
        .expect("valid link definition")
});
static DEF_FOOTNOTES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[\^([^\]]+)\]: *([^\n]*(?:\n+|$)(?: {1,}[^\n]*(?:\n+|$))*)")
        .expect("valid footnote definition")
});
static TABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^ *\|.+\n *\| *[-:]+[-| :]*(?:\n|$)(?: *\|.*(?:\n|$))*\n*")
        .expect("valid table")
});
static NPTABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^ *\S.*\|.*\n *[-:]+ *\|[-| :]*(?:\n|$)(?:.*\|.*(?:\n|$))*\n*")
        .expect("valid table")
});
static TEXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\n]+").expect("valid text"));

/// A block-level match rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockRule {
    BlockMath,
    Newline,
    Hrule,
    BlockCode,
    Fences,
    Heading,
    NpTable,
    LHeading,
    BlockQuote,
    ListBlock,
    BlockHtml,
    DefLinks,
    DefFootnotes,
    Table,
    Paragraph,
    Text,
}

/// Tries to match at the start of the text. On success the handler records
/// its tokens and returns how many bytes it consumed.
type BlockHandler = fn(&mut BlockLexer, &str) -> Option<usize>;

impl BlockRule {
    fn handler(self) -> BlockHandler {
        match self {
            BlockRule::BlockMath => BlockLexer::parse_block_math,
            BlockRule::Newline => BlockLexer::parse_newline,
            BlockRule::Hrule => BlockLexer::parse_hrule,
            BlockRule::BlockCode => BlockLexer::parse_block_code,
            BlockRule::Fences => BlockLexer::parse_fences,
            BlockRule::Heading => BlockLexer::parse_heading,
            BlockRule::NpTable => BlockLexer::parse_nptable,
            BlockRule::LHeading => BlockLexer::parse_lheading,
            BlockRule::BlockQuote => BlockLexer::parse_block_quote,
            BlockRule::ListBlock => BlockLexer::parse_list_block,
            BlockRule::BlockHtml => BlockLexer::parse_block_html,
            BlockRule::DefLinks => BlockLexer::parse_def_links,
            BlockRule::DefFootnotes => BlockLexer::parse_def_footnotes,
            BlockRule::Table => BlockLexer::parse_table,
            BlockRule::Paragraph => BlockLexer::parse_paragraph,
            BlockRule::Text => BlockLexer::parse_text,
        }
    }
}

/// Standard markdown block rules in priority order.
pub const DEFAULT_RULES: &[BlockRule] = &[
    BlockRule::Newline,
    BlockRule::Hrule,
    BlockRule::BlockCode,
    BlockRule::Fences,
    BlockRule::Heading,
    BlockRule::NpTable,
    BlockRule::LHeading,
    BlockRule::BlockQuote,
    BlockRule::ListBlock,
    BlockRule::BlockHtml,
    BlockRule::DefLinks,
    BlockRule::DefFootnotes,
    BlockRule::Table,
    BlockRule::Paragraph,
    BlockRule::Text,
];

/// Rules applied to the content of a list item.
pub const LIST_RULES: &[BlockRule] = &[
    BlockRule::Newline,
    BlockRule::BlockCode,
    BlockRule::Fences,
    BlockRule::LHeading,
    BlockRule::Hrule,
    BlockRule::BlockQuote,
    BlockRule::ListBlock,
    BlockRule::BlockHtml,
    BlockRule::Text,
];

/// Rules applied to the body of a footnote definition.
pub const FOOTNOTE_RULES: &[BlockRule] = &[
    BlockRule::Newline,
    BlockRule::BlockCode,
    BlockRule::Fences,
    BlockRule::Heading,
    BlockRule::NpTable,
    BlockRule::LHeading,
    BlockRule::Hrule,
    BlockRule::BlockQuote,
    BlockRule::ListBlock,
    BlockRule::BlockHtml,
    BlockRule::Table,
    BlockRule::Paragraph,
    BlockRule::Text,
];

/// Ordered rule lists for each block context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockGrammar {
    pub default_rules: Vec<BlockRule>,
    pub list_rules: Vec<BlockRule>,
    pub footnote_rules: Vec<BlockRule>,
}

impl BlockGrammar {
    /// Standard markdown, without math.
    pub fn baseline() -> Self {
        Self {
            default_rules: DEFAULT_RULES.to_vec(),
            list_rules: LIST_RULES.to_vec(),
            footnote_rules: FOOTNOTE_RULES.to_vec(),
        }
    }

    /// Baseline grammar with `$$...$$` blocks tried before every other rule.
    pub fn with_math() -> Self {
        let mut grammar = Self::baseline();
        grammar.default_rules.insert(0, BlockRule::BlockMath);
        grammar
    }
}

impl Default for BlockGrammar {
    fn default() -> Self {
        Self::with_math()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleSet {
    Default,
    List,
    Footnote,
}

/// Result of block lexing a document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockOutput {
    pub tokens: Vec<BlockToken>,
    /// Reference link definitions, by normalized key.
    pub links: HashMap<String, LinkDef>,
    /// Keys of defined footnotes.
    pub footnotes: HashSet<String>,
}

/// Block lexer.
///
/// Splits a (preprocessed) document into block tokens by trying each rule of
/// the active rule set in order at the current position. The lexer is total:
/// every input produces a token stream.
pub struct BlockLexer {
    grammar: BlockGrammar,
    tokens: Vec<BlockToken>,
    links: HashMap<String, LinkDef>,
    footnotes: HashSet<String>,
    list_depth: usize,
    quote_depth: usize,
}

impl BlockLexer {
    pub fn new(grammar: BlockGrammar) -> Self {
        Self {
            grammar,
            tokens: Vec::new(),
            links: HashMap::new(),
            footnotes: HashSet::new(),
            list_depth: 0,
            quote_depth: 0,
        }
    }

    /// Normalize and lex a document with the default (math-enabled) grammar.
    pub fn tokenize(source: &str) -> BlockOutput {
        BlockLexer::new(BlockGrammar::default()).lex(&crate::preprocess(source))
    }

    /// Lex an already normalized document, consuming the lexer.
    pub fn lex(mut self, source: &str) -> BlockOutput {
        self.parse(source, RuleSet::Default);
        BlockOutput {
            tokens: self.tokens,
            links: self.links,
            footnotes: self.footnotes,
        }
    }

    fn parse(&mut self, text: &str, set: RuleSet) {
        let rules: Vec<BlockHandler> = match set {
            RuleSet::Default => &self.grammar.default_rules,
            RuleSet::List => &self.grammar.list_rules,
            RuleSet::Footnote => &self.grammar.footnote_rules,
        }
        .iter()
        .map(|rule| rule.handler())
        .collect();

        let mut text = text.trim_end_matches('\n');
        while !text.is_empty() {
            let consumed = rules
                .iter()
                .find_map(|handler| handler(self, text))
                .unwrap_or_else(|| self.fallback_line(text));
            text = &text[consumed..];
        }
    }

    /// Lex nested content into its own token list.
    fn parse_nested(&mut self, text: &str, set: RuleSet) -> Vec<BlockToken> {
        let outer = mem::take(&mut self.tokens);
        self.parse(text, set);
        mem::replace(&mut self.tokens, outer)
    }

    /// Keeps lexing total for grammars that lack the newline or text rule.
    fn fallback_line(&mut self, text: &str) -> usize {
        let line_end = text.find('\n').map_or(text.len(), |i| i + 1);
        let line = text[..line_end].trim_end_matches('\n');
        if !line.is_empty() {
            self.tokens.push(BlockToken::Text {
                text: line.to_string(),
            });
        }
        line_end
    }

    // --- Rules ---

    fn parse_block_math(&mut self, src: &str) -> Option<usize> {
        let (len, text) = match_block_math(src)?;
        self.tokens.push(BlockToken::BlockMath {
            text: text.to_string(),
        });
        Some(len)
    }

    fn parse_newline(&mut self, src: &str) -> Option<usize> {
        let len = src.len() - src.trim_start_matches('\n').len();
        if len == 0 {
            return None;
        }
        if len > 1 {
            self.tokens.push(BlockToken::Newline);
        }
        Some(len)
    }

    fn parse_hrule(&mut self, src: &str) -> Option<usize> {
        let m = HRULE.find(src)?;
        self.tokens.push(BlockToken::Hrule);
        Some(m.end())
    }

    fn parse_block_code(&mut self, src: &str) -> Option<usize> {
        let m = BLOCK_CODE.find(src)?;
        let code = BLOCK_CODE_LEADING.replace_all(m.as_str(), "");
        self.tokens.push(BlockToken::BlockCode {
            code: code.into_owned(),
            lang: None,
        });
        Some(m.end())
    }

    fn parse_fences(&mut self, src: &str) -> Option<usize> {
        let fence = match_fences(src)?;
        self.tokens.push(BlockToken::BlockCode {
            code: fence.code.to_string(),
            lang: fence.lang.map(str::to_string),
        });
        Some(fence.len)
    }

    fn parse_heading(&mut self, src: &str) -> Option<usize> {
        let caps = HEADING.captures(src)?;
        self.tokens.push(BlockToken::Header {
            text: caps[2].to_string(),
            level: caps[1].len(),
        });
        Some(caps[0].len())
    }

    fn parse_lheading(&mut self, src: &str) -> Option<usize> {
        let caps = LHEADING.captures(src)?;
        let level = if &caps[2] == "=" { 1 } else { 2 };
        self.tokens.push(BlockToken::Header {
            text: caps[1].to_string(),
            level,
        });
        Some(caps[0].len())
    }

    fn parse_nptable(&mut self, src: &str) -> Option<usize> {
        let m = NPTABLE.find(src)?;
        self.tokens.push(BlockToken::Table);
        Some(m.end())
    }

    fn parse_table(&mut self, src: &str) -> Option<usize> {
        let m = TABLE.find(src)?;
        self.tokens.push(BlockToken::Table);
        Some(m.end())
    }

    fn parse_block_quote(&mut self, src: &str) -> Option<usize> {
        let m = BLOCK_QUOTE.find(src)?;
        self.quote_depth += 1;
        if self.quote_depth > MAX_NESTING_DEPTH {
            self.tokens.push(BlockToken::Text {
                text: m.as_str().to_string(),
            });
        } else {
            let inner = BLOCK_QUOTE_LEADING.replace_all(m.as_str(), "");
            let children = self.parse_nested(&inner, RuleSet::Default);
            self.tokens.push(BlockToken::BlockQuote { children });
        }
        self.quote_depth -= 1;
        Some(m.end())
    }

    fn parse_list_block(&mut self, src: &str) -> Option<usize> {
        let list = match_list_block(src)?;
        let cap = &src[..list.len];

        self.list_depth += 1;
        let items = if self.list_depth > MAX_NESTING_DEPTH {
            vec![ListItem {
                children: vec![BlockToken::Text {
                    text: cap.to_string(),
                }],
            }]
        } else {
            self.process_list_items(cap)
        };
        self.list_depth -= 1;

        self.tokens.push(BlockToken::List {
            ordered: list.ordered,
            items,
        });
        Some(list.len)
    }

    fn process_list_items(&mut self, cap: &str) -> Vec<ListItem> {
        split_list_items(cap)
            .iter()
            .map(|raw| {
                let item = outdent_item(raw);
                ListItem {
                    children: self.parse_nested(&item, RuleSet::List),
                }
            })
            .collect()
    }

    fn parse_block_html(&mut self, src: &str) -> Option<usize> {
        let lead = src.len() - src.trim_start_matches(' ').len();
        let rest = &src[lead..];
        html::candidates(rest, TagFilter::Block)
            .into_iter()
            .find_map(|len| block_html_tail(&rest[len..]).map(|tail| (len, tail)))
            .map(|(len, tail)| {
                self.tokens.push(BlockToken::BlockHtml {
                    html: rest[..len].to_string(),
                });
                lead + len + tail
            })
    }

    fn parse_def_links(&mut self, src: &str) -> Option<usize> {
        let caps = DEF_LINKS.captures(src)?;
        self.links.insert(
            keyify(&caps[1]),
            LinkDef {
                link: caps[2].to_string(),
                title: caps.get(3).map(|t| t.as_str().to_string()),
            },
        );
        Some(caps[0].len())
    }

    fn parse_def_footnotes(&mut self, src: &str) -> Option<usize> {
        let caps = DEF_FOOTNOTES.captures(src)?;
        let key = keyify(&caps[1]);
        if !self.footnotes.insert(key.clone()) {
            return Some(caps[0].len());
        }

        let body = outdent_footnote(&caps[2]);
        let children = self.parse_nested(&body, RuleSet::Footnote);
        self.tokens.push(BlockToken::Footnote { key, children });
        Some(caps[0].len())
    }

    fn parse_paragraph(&mut self, src: &str) -> Option<usize> {
        let mut end = 0;
        loop {
            let line_len = src[end..].find('\n').unwrap_or(src.len() - end);
            if line_len == 0 {
                break;
            }
            end += line_len;
            if end >= src.len() || interrupts_paragraph(&src[end + 1..]) {
                break;
            }
            end += 1;
        }
        if end == 0 {
            return None;
        }

        let text = src[..end].trim_end_matches('\n');
        self.tokens.push(BlockToken::Paragraph {
            text: text.to_string(),
        });
        Some(end + count_newlines(&src[end..]))
    }

    fn parse_text(&mut self, src: &str) -> Option<usize> {
        let m = TEXT.find(src)?;
        self.tokens.push(BlockToken::Text {
            text: m.as_str().to_string(),
        });
        Some(m.end())
    }
}

// =========================================================================
// Matchers
// =========================================================================

/// Match `$$...$$` at the start of the text. The body may span lines and ends
/// at the first closing `$$`.
fn match_block_math(src: &str) -> Option<(usize, &str)> {
    let body = src.strip_prefix("$$")?;
    let close = body.find("$$")?;
    Some((close + 4, &body[..close]))
}

struct Fence<'a> {
    len: usize,
    lang: Option<&'a str>,
    code: &'a str,
}

/// Match a fenced code block. The closing fence must repeat the opening one
/// exactly and be followed by end of line.
fn match_fences(src: &str) -> Option<Fence<'_>> {
    let caps = FENCE_OPEN.captures(src)?;
    let fence = caps.get(1)?.as_str();
    let lang = caps.get(2).map(|m| m.as_str());
    let open_len = caps[0].len();
    let body = &src[open_len..];

    // The code holds at least one character, which may be multibyte.
    let first_len = body.chars().next()?.len_utf8();
    let mut from = first_len;
    while let Some(offset) = body[from..].find(fence) {
        let k = from + offset;
        let tail = &body[k + fence.len()..];
        let spaces = tail.len() - tail.trim_start_matches(' ').len();
        let after = &tail[spaces..];
        let newlines = count_newlines(after);
        if after.is_empty() || newlines > 0 {
            let code_end = body[..k].trim_end().len().max(first_len);
            if body.is_char_boundary(code_end) && body[code_end..k].trim().is_empty() {
                return Some(Fence {
                    len: open_len + k + fence.len() + spaces + newlines,
                    lang,
                    code: &body[..code_end],
                });
            }
        }
        // Fence characters are ASCII.
        from = k + 1;
    }
    None
}

struct ListMatch {
    len: usize,
    ordered: bool,
}

/// Match a whole list block: from its first bullet to the blank-line run,
/// rule, definition or differently-bulleted item that ends it.
fn match_list_block(src: &str) -> Option<ListMatch> {
    let caps = LIST_START.captures(src)?;
    let indent = caps.get(1)?.as_str();
    let bullet = caps.get(2)?.as_str();
    let body_start = caps[0].len();
    let first = src[body_start..].chars().next()?;
    let other_bullet: &Regex = if bullet.ends_with('.') {
        &*UNORDERED_BULLET
    } else {
        &*ORDERED_BULLET
    };

    let trimmed_len = src.trim_end().len();
    let mut p = body_start + first.len_utf8();
    while p < src.len() {
        let newlines = count_newlines(&src[p..]);
        if newlines > 0 {
            let after = &src[p + newlines..];
            let at_indent = after.strip_prefix(indent);
            let ends = LIST_HRULE.is_match(after)
                || at_indent.is_some_and(|a| LIST_HRULE.is_match(a))
                || DEF_LINKS.is_match(after)
                || DEF_FOOTNOTES.is_match(after)
                || at_indent.is_some_and(|a| other_bullet.is_match(a))
                || newlines >= 3
                || (newlines == 2
                    && !after.starts_with(' ')
                    && !at_indent.is_some_and(|a| BULLET.is_match(a)));
            if ends {
                return Some(ListMatch {
                    len: p + newlines,
                    ordered: bullet.ends_with('.'),
                });
            }
        }
        if p >= trimmed_len {
            break;
        }
        p += src[p..].chars().next().map_or(1, char::len_utf8);
    }

    Some(ListMatch {
        len: src.len(),
        ordered: bullet.ends_with('.'),
    })
}

/// Split a list block into raw items. An item runs until the next line that
/// starts a bullet at exactly the item's own indentation.
fn split_list_items(cap: &str) -> Vec<String> {
    let mut items: Vec<Vec<&str>> = Vec::new();
    let mut indent = 0;

    for line in cap.split('\n') {
        match LIST_START.captures(line) {
            Some(caps) if items.is_empty() || caps[1].len() == indent => {
                indent = caps[1].len();
                items.push(vec![line]);
            }
            _ => match items.last_mut() {
                Some(item) => item.push(line),
                None => items.push(vec![line]),
            },
        }
    }

    items.into_iter().map(|lines| lines.join("\n")).collect()
}

/// Strip an item's bullet and shift continuation lines left by the bullet
/// width.
fn outdent_item(raw: &str) -> String {
    let item = LIST_BULLET.replace(raw, "");
    if !item.contains("\n ") {
        return item.into_owned();
    }
    let width = raw.len() - item.len();
    item.split('\n')
        .map(|line| {
            let spaces = line.len() - line.trim_start_matches(' ').len();
            &line[spaces.min(width)..]
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Remove the common indentation of a footnote body's continuation lines.
fn outdent_footnote(text: &str) -> String {
    if !text.contains('\n') {
        return text.to_string();
    }
    let mut lines = text.split('\n');
    let first = lines.next().unwrap_or_default();
    let rest: Vec<&str> = lines.collect();
    let width = rest
        .iter()
        .map(|line| line.len() - line.trim_start().len())
        .filter(|&space| space > 0)
        .min()
        .unwrap_or(0);

    std::iter::once(first)
        .chain(rest.iter().map(|line| {
            let cut = width.min(line.len());
            if line.is_char_boundary(cut) {
                &line[cut..]
            } else {
                line.trim_start()
            }
        }))
        .collect::<Vec<_>>()
        .join("\n")
}

/// What may follow block HTML: a blank line, or only whitespace to the end.
/// Returns the number of bytes to consume.
fn block_html_tail(rest: &str) -> Option<usize> {
    let spaces = rest.len() - rest.trim_start_matches(' ').len();
    let after = &rest[spaces..];
    let newlines = count_newlines(after);
    if newlines >= 2 {
        Some(spaces + newlines)
    } else if after.trim().is_empty() {
        Some(rest.len())
    } else {
        None
    }
}

/// Lines that end a paragraph when they follow one directly.
fn interrupts_paragraph(next: &str) -> bool {
    match_fences(next).is_some()
        || match_list_block(next).is_some()
        || HRULE.is_match(next)
        || HEADING.is_match(next)
        || LHEADING.is_match(next)
        || BLOCK_QUOTE.is_match(next)
        || DEF_LINKS.is_match(next)
        || DEF_FOOTNOTES.is_match(next)
        || html::starts_block_tag(next)
}

fn count_newlines(src: &str) -> usize {
    src.len() - src.trim_start_matches('\n').len()
}
