//! Conversion driver.
//!
//! Block-lexes the document, inline-lexes the text of every leaf block and
//! hands each token to the [`RstRenderer`]. Fragments are concatenated in
//! document order.

use std::iter::Peekable;
use std::slice::Iter;

use md2rst_lexer::{BlockLexer, BlockToken, InlineLexer, InlineToken, ListItem};

use crate::rst::RstRenderer;
use crate::{RenderError, RenderOptions};

pub struct Converter<'o> {
    renderer: RstRenderer<'o>,
}

impl<'o> Converter<'o> {
    pub fn new(options: &'o RenderOptions) -> Self {
        Self {
            renderer: RstRenderer::new(options),
        }
    }

    /// Convert a whole markdown document.
    pub fn convert(&self, source: &str) -> Result<String, RenderError> {
        let output = BlockLexer::tokenize(source);
        let mut inline = InlineLexer::for_document(&output);
        self.render_blocks(&output.tokens, &mut inline)
    }

    fn render_blocks(
        &self,
        tokens: &[BlockToken],
        inline: &mut InlineLexer<'_>,
    ) -> Result<String, RenderError> {
        let mut out = String::new();
        let mut tokens = tokens.iter().peekable();

        while let Some(token) = tokens.next() {
            match token {
                // Consecutive text lines form one paragraph.
                BlockToken::Text { text } => {
                    let text = take_text_run(text, &mut tokens);
                    let rendered = self.render_inline_text(&text, inline)?;
                    out.push_str(&self.renderer.paragraph(&rendered));
                }
                _ => out.push_str(&self.render_block(token, inline)?),
            }
        }

        Ok(out)
    }

    fn render_block(
        &self,
        token: &BlockToken,
        inline: &mut InlineLexer<'_>,
    ) -> Result<String, RenderError> {
        let r = &self.renderer;
        let rendered = match token {
            BlockToken::Newline => r.newline(),
            BlockToken::Header { text, level } => {
                let text = self.render_inline_text(text, inline)?;
                r.header(&text, *level)?
            }
            BlockToken::Paragraph { text } | BlockToken::Text { text } => {
                r.paragraph(&self.render_inline_text(text, inline)?)
            }
            BlockToken::BlockQuote { children } => {
                r.block_quote(&self.render_blocks(children, inline)?)
            }
            BlockToken::List { ordered, items } => {
                let mut body = String::new();
                for item in items {
                    body.push_str(&self.render_list_item(item, *ordered, inline)?);
                }
                body
            }
            BlockToken::BlockCode { code, lang } => r.block_code(code, lang.as_deref()),
            BlockToken::BlockHtml { html } => r.block_html(html),
            BlockToken::Hrule => r.hrule(),
            BlockToken::BlockMath { text } => r.block_math(text),
            BlockToken::Table | BlockToken::Footnote { .. } => {
                return Err(RenderError::Unsupported {
                    construct: token.kind(),
                })
            }
        };
        Ok(rendered)
    }

    /// The leading text of an item is wrapped beside the marker. Anything
    /// after it (nested lists, code, further paragraphs) is indented under
    /// the item.
    fn render_list_item(
        &self,
        item: &ListItem,
        ordered: bool,
        inline: &mut InlineLexer<'_>,
    ) -> Result<String, RenderError> {
        let mut lead: Option<String> = None;
        let mut body = String::new();
        let mut children = item.children.iter().peekable();

        while let Some(child) = children.next() {
            match child {
                BlockToken::Text { text } => {
                    let text = take_text_run(text, &mut children);
                    let rendered = self.render_inline_text(&text, inline)?;
                    if lead.is_none() && body.is_empty() {
                        lead = Some(rendered);
                    } else {
                        body.push_str(&self.renderer.paragraph(&rendered));
                    }
                }
                _ => body.push_str(&self.render_block(child, inline)?),
            }
        }

        let mut out = self
            .renderer
            .list_item(lead.as_deref().unwrap_or_default(), ordered);
        if !body.trim().is_empty() {
            out.push_str(&self.renderer.indented(&body));
            if !out.ends_with("\n\n") {
                out.push_str("\n\n");
            }
        }
        Ok(out)
    }

    fn render_inline_text(
        &self,
        text: &str,
        inline: &mut InlineLexer<'_>,
    ) -> Result<String, RenderError> {
        let tokens = inline.lex(text);
        self.render_inlines(&tokens)
    }

    fn render_inlines(&self, tokens: &[InlineToken]) -> Result<String, RenderError> {
        tokens.iter().map(|token| self.render_inline(token)).collect()
    }

    fn render_inline(&self, token: &InlineToken) -> Result<String, RenderError> {
        let r = &self.renderer;
        let rendered = match token {
            InlineToken::Text(text) => r.text(text),
            InlineToken::Escape(c) => r.escape(*c),
            InlineToken::Emphasis(children) => r.emphasis(&self.render_inlines(children)?),
            InlineToken::DoubleEmphasis(children) => {
                r.double_emphasis(&self.render_inlines(children)?)
            }
            InlineToken::Codespan(code) => r.codespan(code),
            InlineToken::Linebreak => r.linebreak(),
            InlineToken::Strikethrough(children) => {
                r.strikethrough(&self.render_inlines(children)?)
            }
            InlineToken::Autolink { link, is_email } => r.autolink(link, *is_email),
            InlineToken::Link { link, children, .. } => {
                r.link(link, &self.render_inlines(children)?)
            }
            InlineToken::Image { src, alt, .. } => r.image(src, alt),
            InlineToken::Tag(html) => r.tag(html),
            InlineToken::Math(text) => r.math(text),
            InlineToken::FootnoteRef(_) => {
                return Err(RenderError::Unsupported {
                    construct: token.kind(),
                })
            }
        };
        Ok(rendered)
    }
}

/// Join `first` with the text of the `Text` tokens directly after it.
fn take_text_run(first: &str, tokens: &mut Peekable<Iter<'_, BlockToken>>) -> String {
    let mut text = first.to_string();
    while let Some(BlockToken::Text { text: more }) = tokens.peek() {
        text.push('\n');
        text.push_str(more);
        tokens.next();
    }
    text
}
