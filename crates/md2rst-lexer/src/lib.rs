//! md2rst Lexer
//!
//! Tokenizes markdown extended with `$...$` and `$$...$$` math. Lexing runs in
//! two stages: the block lexer splits a whole document into block tokens, then
//! the inline lexer splits the text of each leaf block into inline tokens.
//! Both lexers are total: any input string produces a token stream.
//!
//! # Example
//!
//! ```
//! use md2rst_lexer::{BlockLexer, BlockToken, InlineLexer, InlineToken};
//!
//! let output = BlockLexer::tokenize("$$x^2$$");
//! assert_eq!(output.tokens, vec![BlockToken::BlockMath { text: "x^2".into() }]);
//!
//! let inline = InlineLexer::tokenize("area $r^2$");
//! assert_eq!(inline[1], InlineToken::Math("r^2".into()));
//! ```

pub mod block;
mod html;
pub mod inline;
pub mod token;

pub use block::{BlockGrammar, BlockLexer, BlockOutput, BlockRule, MAX_NESTING_DEPTH};
pub use inline::{InlineGrammar, InlineLexer, InlineRule};
pub use token::{keyify, BlockToken, InlineToken, LinkDef, ListItem};

const TAB_SIZE: usize = 4;

/// Normalize a document before block lexing.
///
/// Line endings become `\n`, tabs expand to 4-column tab stops, U+2424 becomes
/// a newline, non-breaking spaces become plain spaces, and lines holding only
/// spaces become empty.
pub fn preprocess(source: &str) -> String {
    let source = source.replace("\r\n", "\n").replace('\r', "\n");

    let mut expanded = String::with_capacity(source.len());
    let mut column = 0;
    for c in source.chars() {
        match c {
            '\t' => {
                let width = TAB_SIZE - column % TAB_SIZE;
                expanded.extend(std::iter::repeat(' ').take(width));
                column += width;
            }
            '\n' => {
                expanded.push('\n');
                column = 0;
            }
            _ => {
                expanded.push(c);
                column += 1;
            }
        }
    }

    expanded
        .replace('\u{2424}', "\n")
        .replace('\u{00a0}', " ")
        .split('\n')
        .map(|line| if line.bytes().all(|b| b == b' ') { "" } else { line })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    // =========================================================================
    // Preprocessing
    // =========================================================================

    #[test]
    fn test_line_endings() {
        assert_eq!(preprocess("a\r\nb\rc\n"), "a\nb\nc\n");
    }

    #[test]
    fn test_tab_stops() {
        assert_eq!(preprocess("\tx"), "    x");
        assert_eq!(preprocess("ab\tx"), "ab  x");
        assert_eq!(preprocess("a\n\tb"), "a\n    b");
    }

    #[test]
    fn test_blank_lines_emptied() {
        assert_eq!(preprocess("a\n   \nb"), "a\n\nb");
    }

    #[test]
    fn test_special_spaces() {
        assert_eq!(preprocess("a\u{00a0}b\u{2424}c"), "a b\nc");
    }

    // =========================================================================
    // Pipeline
    // =========================================================================

    #[test]
    fn test_tabbed_code_block() {
        let output = BlockLexer::tokenize("\tlet x = 1;\n");
        assert_eq!(
            output.tokens,
            vec![BlockToken::BlockCode {
                code: "let x = 1;".into(),
                lang: None,
            }]
        );
    }

    fn inline_texts(tokens: &[BlockToken], out: &mut Vec<String>) {
        for token in tokens {
            match token {
                BlockToken::Header { text, .. }
                | BlockToken::Paragraph { text }
                | BlockToken::Text { text } => out.push(text.clone()),
                BlockToken::BlockQuote { children } | BlockToken::Footnote { children, .. } => {
                    inline_texts(children, out)
                }
                BlockToken::List { items, .. } => {
                    for item in items {
                        inline_texts(&item.children, out);
                    }
                }
                _ => {}
            }
        }
    }

    proptest! {
        #[test]
        fn test_lexing_is_total(source in "[a-z #>*+_`$~=|:.\\-\\\\\\[\\]()<>!/\"'\n\té0-9]{0,160}") {
            let output = BlockLexer::tokenize(&source);
            let mut texts = Vec::new();
            inline_texts(&output.tokens, &mut texts);
            for text in texts {
                let mut lexer = InlineLexer::for_document(&output);
                let _ = lexer.lex(&text);
            }
        }
    }
}
