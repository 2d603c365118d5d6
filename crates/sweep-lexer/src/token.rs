/// A position in source text. `start`/`end` are byte offsets, `line` and
/// `column` are 1-based and point at the first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

/// Which dialect the scanner understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Syntax {
    /// SCSS: `//` line comments and `#{...}` interpolation.
    #[default]
    Scss,
    /// Plain CSS: only `/* */` comments, `#` and `/` are word characters.
    Css,
}

/// Token classification for stylesheet source.
///
/// Token text is not stored; slice the source with the token's span.
/// The only exception is `AtWord`, which carries the at-rule name without `@`.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Whitespace,
    Comment { inline: bool },
    Word,
    String,
    AtWord(String),

    // Punctuation
    Colon,
    Semicolon,
    LBrace,
    RBrace,
    LParen,
    RParen,

    // End of input
    Eof,
}

/// A token produced by the stylesheet lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Raw source text covered by this token.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.span.start..self.span.end]
    }
}
