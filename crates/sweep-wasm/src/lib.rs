//! WASM bindings for scss-sweep.
//!
//! Exposes both rewrites to JavaScript via wasm-bindgen.
//! Each returns a JS object `{ css, changed, removals }` or throws on a parse error.

use serde::Serialize;
use sweep_rewrite::{Feature, RemovalRecord};
use wasm_bindgen::prelude::*;

/// Name recorded as `filePath` in removal records.
const SOURCE_NAME: &str = "input.scss";

/// Result handed back to JavaScript.
#[derive(Debug, Serialize)]
struct Output {
    css: String,
    changed: bool,
    removals: Vec<RemovalRecord>,
}

/// Remove empty rules and at-rules from SCSS source.
#[wasm_bindgen(js_name = cleanEmptySelectors)]
pub fn clean_empty_selectors(source: &str) -> Result<JsValue, JsError> {
    to_js(rewrite(Feature::CleanEmptySelectors, source)?)
}

/// Narrow `transition: all 0.15s` declarations in stylesheet source.
#[wasm_bindgen(js_name = refactorTransitions)]
pub fn refactor_transitions(source: &str) -> Result<JsValue, JsError> {
    to_js(rewrite(Feature::RefactorTransitions, source)?)
}

/// Get the tool version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn rewrite(feature: Feature, source: &str) -> Result<Output, JsError> {
    let rewritten = feature
        .rewrite(source, SOURCE_NAME)
        .map_err(|e| JsError::new(&e.to_string()))?;

    Ok(Output {
        css: rewritten.output,
        changed: rewritten.report.changed,
        removals: rewritten.report.removals,
    })
}

fn to_js(output: Output) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(&output).map_err(|e| JsError::new(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // =========================================================================
    // Native tests (non-WASM): exercise the same pipeline the bindings use
    // =========================================================================

    fn native(feature: Feature, source: &str) -> Output {
        let rewritten = feature.rewrite(source, SOURCE_NAME).unwrap();
        Output {
            css: rewritten.output,
            changed: rewritten.report.changed,
            removals: rewritten.report.removals,
        }
    }

    #[test]
    fn test_empty_source() {
        let output = native(Feature::CleanEmptySelectors, "");
        assert_eq!(output.css, "");
        assert!(!output.changed);
        assert!(output.removals.is_empty());
    }

    #[test]
    fn test_clean_reports_records() {
        let output = native(Feature::CleanEmptySelectors, ".a {}\n.b { x: 1 }");
        assert_eq!(output.css, "\n.b { x: 1 }");
        assert_eq!(
            output.removals,
            vec![RemovalRecord::new(SOURCE_NAME, ".a", 1)]
        );
    }

    #[test]
    fn test_transitions() {
        let output = native(
            Feature::RefactorTransitions,
            ".btn { transition: all 0.15s; &:hover { background: blue; color: red; } }",
        );
        assert!(output.changed);
        assert!(output
            .css
            .contains("transition: background-color 0.15s, color 0.15s;"));
    }

    #[test]
    fn test_parse_error() {
        let result = Feature::CleanEmptySelectors.rewrite(".a {", SOURCE_NAME);
        assert!(result.is_err());
    }

    #[test]
    fn test_multiple_rewrites_are_independent() {
        let out1 = native(Feature::CleanEmptySelectors, ".x {}");
        let out2 = native(Feature::CleanEmptySelectors, ".y {}");
        assert_eq!(out1.removals[0].selector, ".x");
        assert_eq!(out2.removals.len(), 1);
        assert_eq!(out2.removals[0].selector, ".y");
    }

    #[test]
    fn test_version() {
        let v = version();
        assert!(!v.is_empty());
        assert!(v.contains('.'));
    }
}
