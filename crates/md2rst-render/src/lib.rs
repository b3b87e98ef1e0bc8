//! md2rst Renderer
//!
//! Converts math-extended markdown into reStructuredText.
//!
//! ```text
//! source → preprocess → BlockLexer → InlineLexer (per block) → RstRenderer → reST
//! ```
//!
//! # Example
//!
//! ```
//! use md2rst_render::{convert, RenderOptions};
//!
//! let rst = convert("# Title\n\nArea is $\\pi r^2$.", &RenderOptions::default()).unwrap();
//! assert_eq!(rst, "Title\n=====\n\nArea is :math:`\\pi r^2`.\n\n");
//! ```

pub mod driver;
pub mod rst;

pub use driver::Converter;
pub use rst::RstRenderer;

/// Default header underline glyphs. Level `n` uses the `n`th character.
pub const DEFAULT_LEVELS: &str = "*=-^\"+:~";

/// Rendering error. A failed conversion returns no partial output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// The document uses a construct with no reST mapping.
    #[error("Unsupported construct: {construct}")]
    Unsupported { construct: &'static str },
    /// The configured `levels` has no glyph for a header level.
    #[error("No underline glyph for header level {level}")]
    MissingLevel { level: usize },
}

/// Options read by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Drop raw HTML instead of wrapping it in `raw` directives and roles.
    pub skip_html: bool,
    /// Underline glyphs, indexed by header level.
    pub levels: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            skip_html: false,
            levels: DEFAULT_LEVELS.to_string(),
        }
    }
}

impl RenderOptions {
    pub fn with_skip_html(mut self, skip_html: bool) -> Self {
        self.skip_html = skip_html;
        self
    }

    pub fn with_levels(mut self, levels: impl Into<String>) -> Self {
        self.levels = levels.into();
        self
    }
}

/// Convert a markdown document to reST.
pub fn convert(source: &str, options: &RenderOptions) -> Result<String, RenderError> {
    Converter::new(options).convert(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    // =========================================================================
    // Options
    // =========================================================================

    #[test]
    fn test_default_options() {
        let options = RenderOptions::default();
        assert!(!options.skip_html);
        assert_eq!(options.levels, "*=-^\"+:~");
    }

    #[test]
    fn test_skip_html() {
        let source = "<div>hi</div>\n\ntext";
        assert_eq!(
            convert(source, &RenderOptions::default()).unwrap(),
            ".. raw:: html\n\n   <div>hi</div>\n\ntext\n\n"
        );
        assert_eq!(
            convert(source, &RenderOptions::default().with_skip_html(true)).unwrap(),
            "text\n\n"
        );
    }

    #[test]
    fn test_custom_levels() {
        let options = RenderOptions::default().with_levels("#*=");
        assert_eq!(
            convert("# A\n\n## B", &options).unwrap(),
            "A\n*\n\nB\n=\n\n"
        );
    }

    #[test]
    fn test_missing_level() {
        let options = RenderOptions::default().with_levels("*=");
        assert_eq!(
            convert("### Deep", &options),
            Err(RenderError::MissingLevel { level: 3 })
        );
    }

    #[test]
    fn test_error_messages() {
        let err = RenderError::Unsupported { construct: "table" };
        assert_eq!(err.to_string(), "Unsupported construct: table");
        let err = RenderError::MissingLevel { level: 7 };
        assert_eq!(err.to_string(), "No underline glyph for header level 7");
    }

    // =========================================================================
    // Document properties
    // =========================================================================

    #[test]
    fn test_table_leaves_no_partial_output() {
        let result = convert("Intro\n\n| a | b |\n|---|---|\n| 1 | 2 |", &RenderOptions::default());
        assert_eq!(result, Err(RenderError::Unsupported { construct: "table" }));
    }

    #[test]
    fn test_emphasis_round_trip_is_stable() {
        let options = RenderOptions::default();
        let source = "Some *emphasis* and **strong** text.\n\nA second paragraph.";
        let once = convert(source, &options).unwrap();
        let twice = convert(&once, &options).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_escapes_round_trip_is_stable() {
        let options = RenderOptions::default();
        let once = convert("a \\*literal\\* star", &options).unwrap();
        assert_eq!(once, "a \\*literal\\* star\n\n");
        assert_eq!(convert(&once, &options).unwrap(), once);
    }

    proptest! {
        #[test]
        fn test_underline_matches_header_length(
            text in "[A-Za-z0-9é][A-Za-z0-9é ]{0,30}[A-Za-z0-9é]",
            level in 1usize..=6,
        ) {
            let source = format!("{} {}", "#".repeat(level), text);
            let rst = convert(&source, &RenderOptions::default()).unwrap();
            let lines: Vec<&str> = rst.split('\n').collect();
            let glyph = DEFAULT_LEVELS.chars().nth(level).unwrap();
            prop_assert_eq!(lines[0], text.as_str());
            prop_assert_eq!(lines[1].chars().count(), text.chars().count());
            prop_assert!(lines[1].chars().all(|c| c == glyph));
        }

        #[test]
        fn test_renderer_underline_for_any_text(text in "\\PC{1,40}", level in 1usize..=6) {
            let options = RenderOptions::default();
            let header = RstRenderer::new(&options).header(&text, level).unwrap();
            let underline = header.trim_end_matches('\n').rsplit('\n').next().unwrap();
            prop_assert_eq!(underline.chars().count(), text.chars().count());
        }
    }
}
