//! reST fragment renderer.
//!
//! One method per token kind, each returning the reST text for that token.
//! Container methods take their content already rendered.

use crate::{RenderError, RenderOptions};

/// Column limit for wrapped list items.
const WRAP_WIDTH: usize = 70;

const INDENT: &str = "   ";

pub struct RstRenderer<'o> {
    options: &'o RenderOptions,
}

impl<'o> RstRenderer<'o> {
    pub fn new(options: &'o RenderOptions) -> Self {
        Self { options }
    }

    // =====================================================================
    // Block level
    // =====================================================================

    /// Header text over an underline of the same length. The glyph for
    /// level `n` is the `n`th character of `levels`, counting from zero.
    pub fn header(&self, text: &str, level: usize) -> Result<String, RenderError> {
        let glyph = self
            .options
            .levels
            .chars()
            .nth(level)
            .ok_or(RenderError::MissingLevel { level })?;
        let underline: String = std::iter::repeat(glyph).take(text.chars().count()).collect();
        Ok(format!("{text}\n{underline}\n\n"))
    }

    pub fn paragraph(&self, text: &str) -> String {
        format!("{text}\n\n")
    }

    pub fn block_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.filter(|lang| !lang.is_empty()).unwrap_or("none");
        self.directive("code-block", code.trim_end_matches('\n'), &[lang], &[])
    }

    pub fn block_quote(&self, body: &str) -> String {
        self.indented(body)
    }

    pub fn block_html(&self, html: &str) -> String {
        if self.options.skip_html {
            return String::new();
        }
        self.directive("raw", html, &["html"], &[])
    }

    pub fn hrule(&self) -> String {
        "\n\n--------\n\n".to_string()
    }

    /// A wrapped list item with a hanging indent.
    pub fn list_item(&self, text: &str, ordered: bool) -> String {
        let marker = if ordered { "#. " } else { "-  " };
        let mut item = fill(text, marker, INDENT);
        if item.is_empty() {
            item.push_str(marker.trim_end());
        }
        item.push_str("\n\n");
        item
    }

    pub fn block_math(&self, text: &str) -> String {
        self.directive("math", text.trim_matches('\n'), &[], &[])
    }

    pub fn newline(&self) -> String {
        String::new()
    }

    // =====================================================================
    // Inline level
    // =====================================================================

    pub fn text(&self, text: &str) -> String {
        text.to_string()
    }

    pub fn escape(&self, c: char) -> String {
        format!("\\{c}")
    }

    pub fn emphasis(&self, text: &str) -> String {
        format!("*{text}*")
    }

    pub fn double_emphasis(&self, text: &str) -> String {
        format!("**{text}**")
    }

    pub fn codespan(&self, text: &str) -> String {
        format!(":code:`{text}`")
    }

    pub fn linebreak(&self) -> String {
        String::new()
    }

    /// reST has no strikethrough, so only the text is kept.
    pub fn strikethrough(&self, text: &str) -> String {
        text.to_string()
    }

    pub fn autolink(&self, link: &str, is_email: bool) -> String {
        let target = if is_email {
            format!("mailto:{link}")
        } else {
            link.to_string()
        };
        reference(link, defang(&target))
    }

    pub fn link(&self, link: &str, text: &str) -> String {
        reference(text, defang(link))
    }

    pub fn image(&self, src: &str, alt: &str) -> String {
        let alt_attribute = [("alt", alt)];
        let attributes: &[(&str, &str)] = if alt.is_empty() { &[] } else { &alt_attribute };
        self.directive("image", "", &[defang(src)], attributes)
    }

    pub fn tag(&self, html: &str) -> String {
        if self.options.skip_html {
            return String::new();
        }
        format!(":raw:`{html}`")
    }

    pub fn math(&self, text: &str) -> String {
        format!(":math:`{text}`")
    }

    // =====================================================================
    // Helpers
    // =====================================================================

    /// Dedent `content`, then indent every non-blank line by three spaces.
    pub fn indented(&self, content: &str) -> String {
        dedent(content)
            .split('\n')
            .map(|line| {
                if line.is_empty() {
                    String::new()
                } else {
                    format!("{INDENT}{line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn directive(
        &self,
        name: &str,
        content: &str,
        args: &[&str],
        attributes: &[(&str, &str)],
    ) -> String {
        let mut out = format!(".. {name}::");
        let args = args.join(", ");
        if !args.is_empty() {
            out.push(' ');
            out.push_str(&args);
        }
        out.push('\n');
        for (key, value) in attributes {
            out.push_str(&format!("    :{key}: {value}\n"));
        }
        out.push('\n');
        if !content.is_empty() {
            out.push_str(&self.indented(content));
            out.push_str("\n\n");
        }
        out
    }
}

/// `ref:` targets become cross-references; anything else is an anonymous
/// hyperlink with an inline target.
fn reference(text: &str, target: &str) -> String {
    match target.strip_prefix("ref:") {
        Some(label) => format!(":ref:`{text} <{label}>`"),
        None => format!("`{text} <{target}>`__"),
    }
}

/// Blank out `javascript:` targets.
fn defang(target: &str) -> &str {
    let scheme = target.trim_start().get(..11);
    if scheme.is_some_and(|s| s.eq_ignore_ascii_case("javascript:")) {
        ""
    } else {
        target
    }
}

/// Remove the whitespace prefix shared by every non-blank line. Blank lines
/// come back empty.
fn dedent(text: &str) -> String {
    let is_blank = |line: &str| line.trim().is_empty();
    let margin = text
        .split('\n')
        .filter(|line| !is_blank(line))
        .map(|line| &line[..line.len() - line.trim_start_matches([' ', '\t']).len()])
        .reduce(|a, b| {
            let shared = a.bytes().zip(b.bytes()).take_while(|(x, y)| x == y).count();
            &a[..shared]
        })
        .unwrap_or("");

    text.split('\n')
        .map(|line| if is_blank(line) { "" } else { &line[margin.len()..] })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Greedy word wrap to `WRAP_WIDTH` columns. Whitespace runs collapse to
/// single spaces; words longer than a line are split.
fn fill(text: &str, initial: &str, subsequent: &str) -> String {
    let fresh_width = subsequent.chars().count();
    let mut lines = Vec::new();
    let mut line = initial.to_string();
    let mut line_width = initial.chars().count();
    let mut has_words = false;

    for word in text.split_whitespace() {
        let mut rest = word;
        while !rest.is_empty() {
            let sep = usize::from(has_words);
            let width = rest.chars().count();
            if line_width + sep + width <= WRAP_WIDTH {
                if has_words {
                    line.push(' ');
                }
                line.push_str(rest);
                line_width += sep + width;
                has_words = true;
                break;
            }
            if has_words && fresh_width + width <= WRAP_WIDTH {
                lines.push(std::mem::replace(&mut line, subsequent.to_string()));
                line_width = fresh_width;
                has_words = false;
                continue;
            }

            let room = WRAP_WIDTH.saturating_sub(line_width + sep).max(1);
            let split = rest.char_indices().nth(room).map_or(rest.len(), |(i, _)| i);
            if has_words {
                line.push(' ');
            }
            line.push_str(&rest[..split]);
            lines.push(std::mem::replace(&mut line, subsequent.to_string()));
            line_width = fresh_width;
            has_words = false;
            rest = &rest[split..];
        }
    }

    if has_words {
        lines.push(line);
    }
    lines.join("\n")
}
