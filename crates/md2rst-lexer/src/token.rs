/// Block-level token produced by the block lexer.
///
/// Container variants (`BlockQuote`, `List`, `Footnote`) carry their nested
/// content already block-lexed. Leaf variants carry raw markdown text that
/// still has to go through the inline lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockToken {
    /// Run of two or more blank lines.
    Newline,
    Header {
        text: String,
        level: usize,
    },
    Paragraph {
        text: String,
    },
    /// Loose line of text, emitted inside list items.
    Text {
        text: String,
    },
    BlockQuote {
        children: Vec<BlockToken>,
    },
    List {
        ordered: bool,
        items: Vec<ListItem>,
    },
    BlockCode {
        code: String,
        lang: Option<String>,
    },
    BlockHtml {
        html: String,
    },
    Hrule,
    BlockMath {
        text: String,
    },
    /// A pipe or no-pipe table. Only its extent is recorded.
    Table,
    /// A `[^key]: text` footnote definition.
    Footnote {
        key: String,
        children: Vec<BlockToken>,
    },
}

impl BlockToken {
    /// Construct name, as used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            BlockToken::Newline => "newline",
            BlockToken::Header { .. } => "header",
            BlockToken::Paragraph { .. } => "paragraph",
            BlockToken::Text { .. } => "text",
            BlockToken::BlockQuote { .. } => "block_quote",
            BlockToken::List { .. } => "list",
            BlockToken::BlockCode { .. } => "block_code",
            BlockToken::BlockHtml { .. } => "block_html",
            BlockToken::Hrule => "hrule",
            BlockToken::BlockMath { .. } => "block_math",
            BlockToken::Table => "table",
            BlockToken::Footnote { .. } => "footnote_item",
        }
    }
}

/// One entry of a list block.
///
/// Blank lines inside an item show up as `Newline` tokens between its
/// children, so each paragraph of the item is its own `Text` run.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub children: Vec<BlockToken>,
}

/// Inline token produced by the inline lexer for the text of one block.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineToken {
    Text(String),
    /// Backslash-escaped punctuation character.
    Escape(char),
    Emphasis(Vec<InlineToken>),
    DoubleEmphasis(Vec<InlineToken>),
    Codespan(String),
    Linebreak,
    Strikethrough(Vec<InlineToken>),
    Autolink {
        link: String,
        is_email: bool,
    },
    Link {
        link: String,
        title: Option<String>,
        children: Vec<InlineToken>,
    },
    Image {
        src: String,
        title: Option<String>,
        alt: String,
    },
    /// Raw inline HTML tag or comment.
    Tag(String),
    Math(String),
    FootnoteRef(String),
}

impl InlineToken {
    /// Construct name, as used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            InlineToken::Text(_) => "text",
            InlineToken::Escape(_) => "escape",
            InlineToken::Emphasis(_) => "emphasis",
            InlineToken::DoubleEmphasis(_) => "double_emphasis",
            InlineToken::Codespan(_) => "codespan",
            InlineToken::Linebreak => "linebreak",
            InlineToken::Strikethrough(_) => "strikethrough",
            InlineToken::Autolink { .. } => "autolink",
            InlineToken::Link { .. } => "link",
            InlineToken::Image { .. } => "image",
            InlineToken::Tag(_) => "tag",
            InlineToken::Math(_) => "math",
            InlineToken::FootnoteRef(_) => "footnote_ref",
        }
    }
}

/// A `[key]: url "title"` reference definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkDef {
    pub link: String,
    pub title: Option<String>,
}

/// HTML elements that are inline content rather than HTML blocks.
pub const INLINE_TAGS: &[&str] = &[
    "a", "em", "strong", "small", "s", "cite", "q", "dfn", "abbr", "data", "time", "code",
    "var", "samp", "kbd", "sub", "sup", "i", "b", "u", "mark", "ruby", "rt", "rp", "bdi",
    "bdo", "span", "br", "wbr", "ins", "del", "img", "font",
];

/// Check if a tag name is an inline HTML element.
pub fn is_inline_tag(tag: &str) -> bool {
    INLINE_TAGS.contains(&tag.to_ascii_lowercase().as_str())
}

/// Normalize a reference or footnote key: lowercase, whitespace runs collapsed.
pub fn keyify(key: &str) -> String {
    key.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
