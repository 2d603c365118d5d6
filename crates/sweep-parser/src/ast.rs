//! Stylesheet tree.
//!
//! Every node keeps the whitespace that preceded it (`raws.before`) and the
//! span of its first token. Containers also keep the whitespace before their
//! closing brace (`raws.after`).

use sweep_lexer::Span;

/// A complete stylesheet (the root container).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stylesheet {
    /// The source started with a U+FEFF byte-order mark.
    pub bom: bool,
    pub nodes: Vec<Node>,
    /// Trailing whitespace and stray semicolons after the last node.
    pub after: String,
}

/// A child of a container.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// `selector { ... }`
    Rule(Rule),

    /// `@name params { ... }` or `@name params;`
    AtRule(AtRule),

    /// `prop: value`
    Declaration(Declaration),

    /// `/* text */`, or `// text` in SCSS.
    Comment(Comment),
}

impl Node {
    /// Where the node starts in the original source, if it was parsed.
    pub fn source(&self) -> Option<Span> {
        match self {
            Node::Rule(rule) => rule.source,
            Node::AtRule(at_rule) => at_rule.source,
            Node::Declaration(decl) => decl.source,
            Node::Comment(comment) => comment.source,
        }
    }

    /// 1-based start line, or 0 when the node was not parsed from source.
    pub fn line(&self) -> usize {
        self.source().map_or(0, |span| span.line)
    }

    pub fn is_block(&self) -> bool {
        matches!(self, Node::Rule(_) | Node::AtRule(_))
    }
}

/// A style rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Selector text exactly as written, without surrounding whitespace.
    pub selector: String,
    pub nodes: Vec<Node>,
    pub raws: BlockRaws,
    pub source: Option<Span>,
}

impl Rule {
    pub fn new(selector: impl Into<String>, nodes: Vec<Node>) -> Self {
        Self {
            selector: selector.into(),
            nodes,
            raws: BlockRaws::default(),
            source: None,
        }
    }

    /// 1-based start line, or 0 when unknown.
    pub fn line(&self) -> usize {
        self.source.map_or(0, |span| span.line)
    }

    /// Direct child declarations.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Declaration(decl) => Some(decl),
            _ => None,
        })
    }

    /// Direct child rules.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Rule(rule) => Some(rule),
            _ => None,
        })
    }
}

/// Whitespace around a rule.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockRaws {
    /// Before the selector.
    pub before: String,
    /// Between the selector and `{`.
    pub between: String,
    /// Between the last child and `}`.
    pub after: String,
}

/// An at-rule. `nodes` is `None` for statements like `@use "x";`.
#[derive(Debug, Clone, PartialEq)]
pub struct AtRule {
    pub name: String,
    pub params: String,
    pub nodes: Option<Vec<Node>>,
    pub raws: AtRuleRaws,
    /// Whether a bodiless at-rule was closed with `;`.
    pub semicolon: bool,
    pub source: Option<Span>,
}

impl AtRule {
    pub fn new(name: impl Into<String>, params: impl Into<String>, nodes: Option<Vec<Node>>) -> Self {
        let params = params.into();
        let after_name = if params.is_empty() { "" } else { " " };
        Self {
            name: name.into(),
            params,
            nodes,
            raws: AtRuleRaws {
                after_name: after_name.to_string(),
                ..AtRuleRaws::default()
            },
            semicolon: false,
            source: None,
        }
    }

    /// 1-based start line, or 0 when unknown.
    pub fn line(&self) -> usize {
        self.source.map_or(0, |span| span.line)
    }

    /// `true` when the at-rule has no body or an empty one.
    pub fn has_children(&self) -> bool {
        self.nodes.as_ref().is_some_and(|nodes| !nodes.is_empty())
    }
}

/// Whitespace around an at-rule.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AtRuleRaws {
    pub before: String,
    /// Between `@name` and the params.
    pub after_name: String,
    /// Between the params and `{` or `;`.
    pub between: String,
    pub after: String,
}

/// A declaration (`color: red`). SCSS variables (`$gap: 4px`) are declarations too.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub prop: String,
    /// Value without surrounding whitespace, comments or `!important`.
    pub value: String,
    pub important: bool,
    pub raws: DeclarationRaws,
    /// Whether the declaration was terminated with `;`.
    pub semicolon: bool,
    pub source: Option<Span>,
}

impl Declaration {
    pub fn new(prop: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            prop: prop.into(),
            value: value.into(),
            important: false,
            raws: DeclarationRaws {
                between: ": ".to_string(),
                ..DeclarationRaws::default()
            },
            semicolon: true,
            source: None,
        }
    }
}

/// Whitespace around a declaration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeclarationRaws {
    pub before: String,
    /// Everything between the property and the value, colon included.
    pub between: String,
    /// Value text as written, paired with the `value` it was parsed into.
    pub value: Option<RawValue>,
}

/// The original spelling of a declaration value.
///
/// The printer only uses `raw` while the declaration's `value` still equals
/// `value`; once the value is reassigned the new value is printed instead.
#[derive(Debug, Clone, PartialEq)]
pub struct RawValue {
    pub value: String,
    pub raw: String,
}

/// A comment.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    /// Text between the delimiters.
    pub text: String,
    /// `// text` rather than `/* text */`.
    pub inline: bool,
    pub before: String,
    pub source: Option<Span>,
}
