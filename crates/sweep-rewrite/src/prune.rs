//! Empty rule pruning.
//!
//! Walks the tree children-first and drops every rule that has neither a
//! non-blank declaration nor a nested block, and every at-rule without
//! children. Because a container's children are pruned before the container
//! itself is judged, nested emptiness collapses in a single pass.

use sweep_parser::ast::{AtRule, Node, Rule};
use sweep_parser::Stylesheet;

use crate::{RemovalRecord, RewriteReport};

/// Remove empty rules and at-rules from `sheet`, returning one record per
/// removed node in the order they were removed.
pub fn prune_empty(sheet: &mut Stylesheet, file_path: &str) -> RewriteReport {
    let mut removals = Vec::new();
    prune_nodes(&mut sheet.nodes, file_path, &mut removals);

    for removal in &removals {
        tracing::debug!(
            "Removing empty {} at {}:{}",
            removal.selector,
            file_path,
            removal.line
        );
    }

    RewriteReport {
        changed: !removals.is_empty(),
        removals,
    }
}

/// Prune one container's children: rules first, then at-rules. Each child
/// is recursed into before it is judged.
fn prune_nodes(nodes: &mut Vec<Node>, file_path: &str, removals: &mut Vec<RemovalRecord>) {
    nodes.retain_mut(|node| {
        let Node::Rule(rule) = node else {
            return true;
        };
        prune_nodes(&mut rule.nodes, file_path, removals);

        if is_empty_rule(rule) {
            removals.push(RemovalRecord::new(file_path, rule.selector.clone(), rule.line()));
            return false;
        }
        true
    });

    nodes.retain_mut(|node| {
        let Node::AtRule(at_rule) = node else {
            return true;
        };
        if let Some(children) = &mut at_rule.nodes {
            prune_nodes(children, file_path, removals);
        }

        if !at_rule.has_children() {
            removals.push(RemovalRecord::new(file_path, at_rule_label(at_rule), at_rule.line()));
            return false;
        }
        true
    });
}

/// A rule is empty when it has no declaration with a non-blank value and no
/// nested rule or at-rule. Comments do not count.
fn is_empty_rule(rule: &Rule) -> bool {
    let has_declarations = rule.declarations().any(|decl| !decl.value.trim().is_empty());
    let has_nested = rule.nodes.iter().any(Node::is_block);
    !has_declarations && !has_nested
}

fn at_rule_label(at_rule: &AtRule) -> String {
    format!("@{} {}", at_rule.name, at_rule.params)
}
