//! Transition narrowing.
//!
//! A rule carrying the placeholder `transition: all 0.15s` is rewritten to
//! transition only the properties its pseudo-class children (`&:hover`,
//! `&:focus`, ...) actually set, e.g. `transition: color 0.15s`.

use sweep_parser::ast::{Declaration, Node, Rule};
use sweep_parser::Stylesheet;

use crate::RewriteReport;

/// Properties worth transitioning when a pseudo-class changes them.
pub const TRANSITION_PROPERTIES: &[&str] = &[
    "border",
    "background",
    "background-color",
    "color",
    "outline",
    "box-shadow",
    "opacity",
    "transform",
    "padding",
    "width",
    "height",
    "margin",
    "fill",
    "fill-opacity",
];

const DURATION: &str = "0.15s";

/// Narrow every placeholder transition in `sheet` to the `allowed`
/// properties set by the owning rule's pseudo-class children.
///
/// Rules with a placeholder but no usable children are only logged; the
/// returned report never contains removals.
pub fn normalize_transitions(
    sheet: &mut Stylesheet,
    file_path: &str,
    allowed: &[&str],
) -> RewriteReport {
    let mut report = RewriteReport::default();
    walk_rules(&mut sheet.nodes, &mut |rule: &mut Rule| {
        if normalize_rule(rule, file_path, allowed) {
            report.changed = true;
        }
    });
    report
}

/// Visit every rule, parents before children, including rules inside at-rules.
fn walk_rules(nodes: &mut [Node], visit: &mut impl FnMut(&mut Rule)) {
    for node in nodes {
        match node {
            Node::Rule(rule) => {
                visit(rule);
                walk_rules(&mut rule.nodes, visit);
            }
            Node::AtRule(at_rule) => {
                if let Some(children) = &mut at_rule.nodes {
                    walk_rules(children, visit);
                }
            }
            _ => {}
        }
    }
}

/// Returns `true` when the rule's transition was rewritten.
fn normalize_rule(rule: &mut Rule, file_path: &str, allowed: &[&str]) -> bool {
    let Some(index) = rule
        .nodes
        .iter()
        .position(|node| matches!(node, Node::Declaration(decl) if is_placeholder(decl)))
    else {
        return false;
    };
    let line = rule.nodes[index].line();

    let pseudo_rules: Vec<&Rule> = rule
        .rules()
        .filter(|child| is_pseudo_selector(&child.selector))
        .collect();

    if pseudo_rules.is_empty() {
        tracing::info!(
            "{} @ \"{}\" -> {} | Action should be taken (did not find child pseudo-classes)",
            file_path,
            rule.selector,
            line
        );
        return false;
    }

    let mut modified: Vec<String> = Vec::new();
    for child in pseudo_rules {
        let mut decls = Vec::new();
        collect_declarations(&child.nodes, &mut decls);
        for decl in decls {
            if allowed.contains(&decl.prop.as_str()) && !modified.contains(&decl.prop) {
                modified.push(decl.prop.clone());
            }
        }
    }

    if modified.is_empty() {
        tracing::info!(
            "{} @ \"{}\" -> {} | Action should be taken (no allowed properties modified in pseudo-elements)",
            file_path,
            rule.selector,
            line
        );
        return false;
    }

    let value = transition_value(&modified);
    if let Node::Declaration(decl) = &mut rule.nodes[index] {
        decl.value = value.clone();
    }
    tracing::info!(
        "[UPDATED] {} @ \"{}\" transition to \"{}\"",
        file_path,
        rule.selector,
        value
    );
    true
}

/// `transition: all 0.15s`, any case, any whitespace between the two parts.
fn is_placeholder(decl: &Declaration) -> bool {
    if decl.prop != "transition" {
        return false;
    }

    let value = decl.value.trim();
    let Some(head) = value.get(..3) else {
        return false;
    };
    let rest = &value[3..];

    head.eq_ignore_ascii_case("all")
        && rest.starts_with(char::is_whitespace)
        && rest.trim_start().eq_ignore_ascii_case(DURATION)
}

/// `&:` followed by at least one word character (`&:hover`, `&:focus-within`).
fn is_pseudo_selector(selector: &str) -> bool {
    selector
        .strip_prefix("&:")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// All declarations below `nodes`, in source order.
fn collect_declarations<'a>(nodes: &'a [Node], out: &mut Vec<&'a Declaration>) {
    for node in nodes {
        match node {
            Node::Declaration(decl) => out.push(decl),
            Node::Rule(rule) => collect_declarations(&rule.nodes, out),
            Node::AtRule(at_rule) => {
                if let Some(children) = &at_rule.nodes {
                    collect_declarations(children, out);
                }
            }
            Node::Comment(_) => {}
        }
    }
}

/// Build `prop 0.15s, prop 0.15s`. `background` becomes `background-color`,
/// the part of it that can actually be animated.
fn transition_value(properties: &[String]) -> String {
    let mut names: Vec<&str> = Vec::new();
    for prop in properties {
        let name = if prop == "background" {
            "background-color"
        } else {
            prop.as_str()
        };
        if !names.contains(&name) {
            names.push(name);
        }
    }

    names
        .iter()
        .map(|name| format!("{name} {DURATION}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sweep_parser::{print, Parser, Syntax};

    fn normalize(source: &str) -> (String, RewriteReport) {
        let mut sheet = Parser::parse(source, Syntax::Css).unwrap();
        let report = normalize_transitions(&mut sheet, "test.scss", TRANSITION_PROPERTIES);
        (print(&sheet), report)
    }

    fn transition(value: &str) -> Declaration {
        Declaration::new("transition", value)
    }

    // =========================================================================
    // Placeholder matching
    // =========================================================================

    #[test]
    fn test_placeholder_accepted() {
        assert!(is_placeholder(&transition("all 0.15s")));
        assert!(is_placeholder(&transition("ALL  0.15S")));
        assert!(is_placeholder(&transition("all\t0.15s")));
        assert!(is_placeholder(&transition("  all 0.15s  ")));
    }

    #[test]
    fn test_placeholder_rejected() {
        assert!(!is_placeholder(&transition("all 0.2s")));
        assert!(!is_placeholder(&transition("opacity 0.15s")));
        assert!(!is_placeholder(&transition("all0.15s")));
        assert!(!is_placeholder(&transition("all 0.15s ease")));
        assert!(!is_placeholder(&Declaration::new("transition-duration", "all 0.15s")));
    }

    #[test]
    fn test_pseudo_selector() {
        assert!(is_pseudo_selector("&:hover"));
        assert!(is_pseudo_selector("&:focus-visible"));
        assert!(is_pseudo_selector("&:hover, &:focus"));
        assert!(!is_pseudo_selector("&::before"));
        assert!(!is_pseudo_selector("&.active"));
        assert!(!is_pseudo_selector(".a:hover"));
        assert!(!is_pseudo_selector("&:"));
    }

    // =========================================================================
    // Rewrites
    // =========================================================================

    #[test]
    fn test_single_property() {
        let (output, report) =
            normalize(".btn { transition: all 0.15s; &:hover { color: blue; } }");
        assert_eq!(
            output,
            ".btn { transition: color 0.15s; &:hover { color: blue; } }"
        );
        assert!(report.changed);
        assert!(report.removals.is_empty());
    }

    #[test]
    fn test_background_becomes_background_color_in_order() {
        let (output, _) = normalize(
            ".btn { transition: all 0.15s; &:hover { background: blue; color: red; } }",
        );
        assert_eq!(
            output,
            ".btn { transition: background-color 0.15s, color 0.15s; &:hover { background: blue; color: red; } }"
        );
    }

    #[test]
    fn test_properties_collected_across_pseudo_children() {
        let (output, _) = normalize(
            ".a {\n  transition: all 0.15s;\n  &:hover { opacity: 1; color: red; }\n  &:focus { color: blue; outline: 0; }\n}\n",
        );
        assert!(output.contains("transition: opacity 0.15s, color 0.15s, outline 0.15s;"));
    }

    #[test]
    fn test_background_and_background_color_collapse() {
        let (output, _) = normalize(
            ".a { transition: all 0.15s; &:hover { background: red; background-color: blue; } }",
        );
        assert!(output.contains("transition: background-color 0.15s;"));
    }

    #[test]
    fn test_disallowed_properties_ignored() {
        let (output, _) = normalize(
            ".a { transition: all 0.15s; &:hover { cursor: pointer; transform: scale(1.1); } }",
        );
        assert!(output.contains("transition: transform 0.15s;"));
    }

    #[test]
    fn test_nested_declarations_in_pseudo_child_count() {
        let (output, _) = normalize(
            ".a { transition: all 0.15s; &:hover { .icon { fill: red; } } }",
        );
        assert!(output.contains("transition: fill 0.15s;"));
    }

    #[test]
    fn test_important_kept_on_rewrite() {
        let (output, _) = normalize(
            ".a { transition: all 0.15s !important; &:hover { width: 2px; } }",
        );
        assert!(output.contains("transition: width 0.15s !important;"));
    }

    #[test]
    fn test_nested_and_media_rules_visited() {
        let source = "@media print {\n  .outer {\n    .inner { transition: all 0.15s; &:active { height: 0; } }\n  }\n}\n";
        let (output, report) = normalize(source);
        assert!(output.contains(".inner { transition: height 0.15s;"));
        assert!(report.changed);
    }

    #[test]
    fn test_first_placeholder_only() {
        let (output, _) = normalize(
            ".a { transition: all 0.15s; transition: all 0.15s; &:hover { color: red; } }",
        );
        assert_eq!(
            output,
            ".a { transition: color 0.15s; transition: all 0.15s; &:hover { color: red; } }"
        );
    }

    // =========================================================================
    // Log-only paths
    // =========================================================================

    #[test]
    fn test_no_pseudo_children_left_alone() {
        let source = ".a { transition: all 0.15s; .b { color: red; } }";
        let (output, report) = normalize(source);
        assert_eq!(output, source);
        assert!(!report.changed);
        assert!(report.removals.is_empty());
    }

    #[test]
    fn test_no_allowed_properties_left_alone() {
        let source = ".a { transition: all 0.15s; &:hover { cursor: pointer; } }";
        let (output, report) = normalize(source);
        assert_eq!(output, source);
        assert!(!report.changed);
    }

    #[test]
    fn test_other_transitions_untouched() {
        let source = ".a { transition: all 0.2s; &:hover { color: red; } }\n.b { transition: opacity 0.15s; &:hover { color: red; } }";
        let (output, report) = normalize(source);
        assert_eq!(output, source);
        assert!(!report.changed);
    }

    #[test]
    fn test_custom_allow_list() {
        let mut sheet = Parser::parse(
            ".a { transition: all 0.15s; &:hover { color: red; letter-spacing: 1px; } }",
            Syntax::Css,
        )
        .unwrap();
        normalize_transitions(&mut sheet, "test.scss", &["letter-spacing"]);
        assert!(print(&sheet).contains("transition: letter-spacing 0.15s;"));
    }

    #[test]
    fn test_transition_value_format() {
        let props = vec!["background".to_string(), "box-shadow".to_string()];
        assert_eq!(
            transition_value(&props),
            "background-color 0.15s, box-shadow 0.15s"
        );
    }
}
