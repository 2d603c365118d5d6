//! Stylesheet Rewrites
//!
//! The two rewrites `scss-sweep` can run over a parsed stylesheet:
//!
//! - [`prune_empty`] removes rules and at-rules that contain nothing.
//! - [`normalize_transitions`] narrows `transition: all 0.15s` to the
//!   properties the rule's `&:hover`-style children actually change.
//!
//! ```text
//! source → Parser::parse() → prune_empty() / normalize_transitions() → print()
//! ```

pub mod prune;
pub mod transitions;

pub use prune::prune_empty;
pub use transitions::{normalize_transitions, TRANSITION_PROPERTIES};

use serde::Serialize;
use sweep_parser::{ParseError, Parser, Stylesheet, Syntax};

/// One node a rewrite removed (or flagged), located in the original source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovalRecord {
    pub file_path: String,
    /// Rule selector, or `@name params` for at-rules.
    pub selector: String,
    /// 1-based line in the original source, 0 when unknown.
    pub line: usize,
}

impl RemovalRecord {
    pub fn new(file_path: &str, selector: impl Into<String>, line: usize) -> Self {
        Self {
            file_path: file_path.to_string(),
            selector: selector.into(),
            line,
        }
    }
}

/// What a rewrite did to one stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RewriteReport {
    pub removals: Vec<RemovalRecord>,
    /// The tree was mutated and should be written back.
    pub changed: bool,
}

/// A rewritten stylesheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Rewritten {
    pub output: String,
    pub report: RewriteReport,
}

/// The rewrites offered by the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// Remove empty rules and at-rules.
    CleanEmptySelectors,
    /// Narrow placeholder `transition: all 0.15s` declarations.
    RefactorTransitions,
}

impl Feature {
    pub const ALL: [Feature; 2] = [Feature::CleanEmptySelectors, Feature::RefactorTransitions];

    pub fn name(self) -> &'static str {
        match self {
            Feature::CleanEmptySelectors => "scss-clean-unused-selectors",
            Feature::RefactorTransitions => "scss-refactor-transitions",
        }
    }

    /// Pruning needs SCSS nesting and comments; the transition pass reads
    /// files with the plain CSS grammar.
    pub fn syntax(self) -> Syntax {
        match self {
            Feature::CleanEmptySelectors => Syntax::Scss,
            Feature::RefactorTransitions => Syntax::Css,
        }
    }

    /// Run the rewrite over an already parsed stylesheet.
    pub fn apply(self, sheet: &mut Stylesheet, file_path: &str) -> RewriteReport {
        match self {
            Feature::CleanEmptySelectors => prune_empty(sheet, file_path),
            Feature::RefactorTransitions => {
                normalize_transitions(sheet, file_path, TRANSITION_PROPERTIES)
            }
        }
    }

    /// Parse `source`, rewrite it and print the result.
    pub fn rewrite(self, source: &str, file_path: &str) -> Result<Rewritten, ParseError> {
        let mut sheet = Parser::parse(source, self.syntax())?;
        let report = self.apply(&mut sheet, file_path);
        Ok(Rewritten {
            output: sweep_parser::print(&sheet),
            report,
        })
    }

    /// Reported when a run produced no records.
    pub fn nothing_found_message(self) -> &'static str {
        match self {
            Feature::CleanEmptySelectors => "No empty selectors found!",
            Feature::RefactorTransitions => "No unused transitions were found!",
        }
    }

    /// Heading printed above the records of a run.
    pub fn removed_heading(self) -> &'static str {
        match self {
            Feature::CleanEmptySelectors => "Removed empty selectors:",
            Feature::RefactorTransitions => "Removed unused transitions:",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clean_rewrite_end_to_end() {
        let rewritten = Feature::CleanEmptySelectors
            .rewrite("// keep\n.a { color: red; }\n.b {}\n", "a.scss")
            .unwrap();
        assert_eq!(rewritten.output, "// keep\n.a { color: red; }\n");
        assert!(rewritten.report.changed);
        assert_eq!(
            rewritten.report.removals,
            vec![RemovalRecord::new("a.scss", ".b", 3)]
        );
    }

    #[test]
    fn test_transition_rewrite_end_to_end() {
        let rewritten = Feature::RefactorTransitions
            .rewrite(
                ".btn { transition: all 0.15s; &:hover { color: blue; } }",
                "btn.scss",
            )
            .unwrap();
        assert_eq!(
            rewritten.output,
            ".btn { transition: color 0.15s; &:hover { color: blue; } }"
        );
        assert!(rewritten.report.changed);
        assert!(rewritten.report.removals.is_empty());
    }

    #[test]
    fn test_byte_order_mark_survives_pruning() {
        let rewritten = Feature::CleanEmptySelectors
            .rewrite("\u{feff}.a {}\n.b { x: 1 }\n", "bom.scss")
            .unwrap();
        assert_eq!(rewritten.output, "\u{feff}\n.b { x: 1 }\n");
        assert_eq!(
            rewritten.report.removals,
            vec![RemovalRecord::new("bom.scss", ".a", 1)]
        );
    }

    #[test]
    fn test_transition_rewrite_rejects_line_comments() {
        let result = Feature::RefactorTransitions.rewrite(".a {\n  // note\n  x: 1;\n}", "a.scss");
        assert!(result.is_err());
    }

    #[test]
    fn test_unchanged_output_matches_input() {
        let source = ".a {\n  color: red;\n}\n";
        for feature in Feature::ALL {
            let rewritten = feature.rewrite(source, "a.scss").unwrap();
            assert_eq!(rewritten.output, source);
            assert!(!rewritten.report.changed);
        }
    }

    #[test]
    fn test_feature_names() {
        let names: Vec<&str> = Feature::ALL.iter().map(|f| f.name()).collect();
        assert_eq!(
            names,
            vec!["scss-clean-unused-selectors", "scss-refactor-transitions"]
        );
    }
}
