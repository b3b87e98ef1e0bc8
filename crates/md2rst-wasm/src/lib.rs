//! WASM bindings for the md2rst converter.
//!
//! Exposes `convert()` to JavaScript via wasm-bindgen.
//! Returns the reST string or throws on error.

use md2rst_render::RenderOptions;
use wasm_bindgen::prelude::*;

/// Convert markdown source to reST.
///
/// `options` is an optional `{ skip_html, levels }` object; missing fields
/// take their defaults. Throws a JS error for unsupported constructs or
/// malformed options.
#[wasm_bindgen]
pub fn convert(source: &str, options: JsValue) -> Result<String, JsError> {
    let options = if options.is_undefined() || options.is_null() {
        RenderOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsError::new(&e.to_string()))?
    };

    convert_with(source, &options).map_err(|e| JsError::new(&e))
}

/// Get the converter version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn convert_with(source: &str, options: &RenderOptions) -> Result<String, String> {
    md2rst_render::convert(source, options).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // =========================================================================
    // Native tests (non-WASM)
    // =========================================================================

    fn native_convert(source: &str) -> String {
        convert_with(source, &RenderOptions::default()).unwrap()
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(native_convert(""), "");
    }

    #[test]
    fn test_document() {
        let rst = native_convert("# Guide\n\nUse `x` and $y$.\n\n- one\n- two");
        assert_eq!(
            rst,
            "Guide\n=====\n\nUse :code:`x` and :math:`y`.\n\n-  one\n\n-  two\n\n"
        );
    }

    #[test]
    fn test_unsupported_message() {
        let err = convert_with("| a |\n|---|\n| 1 |", &RenderOptions::default()).unwrap_err();
        assert_eq!(err, "Unsupported construct: table");
    }

    #[test]
    fn test_options_applied() {
        let options = RenderOptions::default().with_skip_html(true);
        assert_eq!(convert_with("<div>x</div>", &options).unwrap(), "");
    }

    #[test]
    fn test_version() {
        let v = version();
        assert!(!v.is_empty());
        assert!(v.contains('.'));
    }

    #[test]
    fn test_multiple_converts() {
        // Reference definitions do not leak between documents
        let first = native_convert("[a]\n\n[a]: http://a.org");
        let second = native_convert("[a]");
        assert_eq!(first, "`a <http://a.org>`__\n\n");
        assert_eq!(second, "[a]\n\n");
    }
}
