//! Stylesheet Lexer
//!
//! Tokenizes `.scss` and `.css` source into a lossless stream of tokens.
//! Whitespace and comments are kept as tokens so the parser can rebuild
//! the original text byte-for-byte around whatever it rewrites.
//!
//! # Example
//!
//! ```
//! use sweep_lexer::{Scanner, Syntax};
//!
//! let tokens = Scanner::tokenize("", Syntax::Scss).unwrap();
//! assert_eq!(tokens.len(), 1); // Just EOF
//! ```

pub mod scanner;
pub mod token;

pub use scanner::Scanner;
pub use token::{Span, Syntax, Token, TokenKind};

/// Lexer error with position information.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Lexer error at line {line}, column {column}: {message}")]
pub struct LexerError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}
