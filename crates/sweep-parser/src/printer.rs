//! Stylesheet printer.
//!
//! Serializes a [`Stylesheet`] back to text using the raws captured by the
//! parser. Nodes built in code have empty raws and print compactly.

use crate::ast::{AtRule, Comment, Declaration, Node, Rule, Stylesheet};

/// Print a stylesheet tree to source text.
pub fn print(sheet: &Stylesheet) -> String {
    let mut out = String::new();
    if sheet.bom {
        out.push('\u{feff}');
    }
    print_nodes(&sheet.nodes, &mut out);
    out.push_str(&sheet.after);
    out
}

fn print_nodes(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Rule(rule) => print_rule(rule, out),
            Node::AtRule(at_rule) => print_at_rule(at_rule, out),
            Node::Declaration(decl) => print_declaration(decl, out),
            Node::Comment(comment) => print_comment(comment, out),
        }
    }
}

fn print_rule(rule: &Rule, out: &mut String) {
    out.push_str(&rule.raws.before);
    out.push_str(&rule.selector);
    out.push_str(&rule.raws.between);
    out.push('{');
    print_nodes(&rule.nodes, out);
    out.push_str(&rule.raws.after);
    out.push('}');
}

fn print_at_rule(at_rule: &AtRule, out: &mut String) {
    out.push_str(&at_rule.raws.before);
    out.push('@');
    out.push_str(&at_rule.name);
    out.push_str(&at_rule.raws.after_name);
    out.push_str(&at_rule.params);
    out.push_str(&at_rule.raws.between);

    match &at_rule.nodes {
        Some(nodes) => {
            out.push('{');
            print_nodes(nodes, out);
            out.push_str(&at_rule.raws.after);
            out.push('}');
        }
        None if at_rule.semicolon => out.push(';'),
        None => {}
    }
}

fn print_declaration(decl: &Declaration, out: &mut String) {
    out.push_str(&decl.raws.before);
    out.push_str(&decl.prop);
    out.push_str(&decl.raws.between);

    match &decl.raws.value {
        Some(raw) if raw.value == decl.value => out.push_str(&raw.raw),
        _ => {
            out.push_str(&decl.value);
            if decl.important {
                out.push_str(" !important");
            }
        }
    }

    if decl.semicolon {
        out.push(';');
    }
}

fn print_comment(comment: &Comment, out: &mut String) {
    out.push_str(&comment.before);
    if comment.inline {
        out.push_str("//");
        out.push_str(&comment.text);
    } else {
        out.push_str("/*");
        out.push_str(&comment.text);
        out.push_str("*/");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use pretty_assertions::assert_eq;
    use sweep_lexer::Syntax;

    #[test]
    fn test_empty_stylesheet() {
        assert_eq!(print(&Stylesheet::default()), "");
    }

    #[test]
    fn test_built_tree_prints_compactly() {
        let sheet = Stylesheet {
            nodes: vec![
                Node::AtRule(AtRule::new("use", "'a'", None)),
                Node::Rule(Rule::new(".a", vec![Node::Declaration(Declaration::new("color", "red"))])),
                Node::AtRule(AtRule::new("media", "print", Some(Vec::new()))),
            ],
            ..Stylesheet::default()
        };
        assert_eq!(print(&sheet), "@use 'a'.a{color: red;}@media print{}");
    }

    #[test]
    fn test_reassigned_value_replaces_raw() {
        let mut sheet = Parser::parse(".a {\n  transition: all   0.15s ;\n}\n", Syntax::Css).unwrap();
        if let Node::Rule(rule) = &mut sheet.nodes[0] {
            if let Node::Declaration(decl) = &mut rule.nodes[0] {
                decl.value = "color 0.15s".to_string();
            }
        }
        assert_eq!(print(&sheet), ".a {\n  transition: color 0.15s;\n}\n");
    }

    #[test]
    fn test_reassigned_important_value() {
        let mut sheet = Parser::parse(".a { opacity: 1 !important; }", Syntax::Scss).unwrap();
        if let Node::Rule(rule) = &mut sheet.nodes[0] {
            if let Node::Declaration(decl) = &mut rule.nodes[0] {
                decl.value = "0".to_string();
            }
        }
        assert_eq!(print(&sheet), ".a { opacity: 0 !important; }");
    }

    #[test]
    fn test_removed_node_takes_its_whitespace() {
        let mut sheet = Parser::parse(".a {}\n.b { x: 1 }\n.c {}\n", Syntax::Scss).unwrap();
        sheet.nodes.remove(1);
        assert_eq!(print(&sheet), ".a {}\n.c {}\n");
    }

    #[test]
    fn test_comments_round_trip() {
        let source = "/* block */\n// line\n.a { x: 1 } // trailing\n";
        let sheet = Parser::parse(source, Syntax::Scss).unwrap();
        assert_eq!(print(&sheet), source);
    }
}
