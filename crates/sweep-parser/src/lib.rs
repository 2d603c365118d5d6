//! Stylesheet Parser
//!
//! Parses SCSS or CSS source into a mutable [`Stylesheet`] tree and prints
//! it back out. The tree keeps every piece of whitespace and comment text it
//! was built from ("raws"), so an untouched tree prints to the exact input
//! and a rewritten tree only differs where nodes were removed or values
//! reassigned.
//!
//! ```text
//! source → Parser::parse() → Stylesheet → (mutate) → print() → source'
//! ```

pub mod ast;
pub mod parser;
pub mod printer;

pub use ast::{AtRule, Comment, Declaration, Node, Rule, Stylesheet};
pub use parser::Parser;
pub use printer::print;
pub use sweep_lexer::{Span, Syntax};

/// Parser error with position information.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Parse error at line {line}, column {column}: {message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl From<sweep_lexer::LexerError> for ParseError {
    fn from(e: sweep_lexer::LexerError) -> Self {
        Self {
            message: e.message,
            line: e.line,
            column: e.column,
        }
    }
}
