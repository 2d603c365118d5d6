use crate::token::{Span, Syntax, Token, TokenKind};
use crate::LexerError;

/// Start position of the token being scanned.
#[derive(Clone, Copy)]
struct Mark {
    offset: usize,
    line: usize,
    column: usize,
}

/// Stylesheet source scanner.
///
/// Splits source into whitespace, comments, words, strings, at-keywords and
/// punctuation. Nothing is dropped: every byte of the input belongs to exactly
/// one token, which is what lets the printer reproduce untouched input.
///
/// - `Vec<char>` source for index-based navigation, byte offsets kept alongside
/// - Syntax-aware comment and interpolation handling
/// - Position tracking on every token
pub struct Scanner<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
    offset: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
    syntax: Syntax,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given source.
    pub fn new(source: &'a str, syntax: Syntax) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
            offset: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
            syntax,
        }
    }

    /// Tokenize the entire source into a vector of tokens.
    pub fn tokenize(source: &str, syntax: Syntax) -> Result<Vec<Token>, LexerError> {
        let mut scanner = Scanner::new(source, syntax);
        scanner.scan_tokens()?;
        Ok(scanner.tokens)
    }

    /// Scan all tokens from the source.
    fn scan_tokens(&mut self) -> Result<(), LexerError> {
        while !self.is_at_end() {
            self.scan_token()?;
        }

        let mark = self.mark();
        self.push(TokenKind::Eof, mark);
        Ok(())
    }

    /// Scan the next token.
    fn scan_token(&mut self) -> Result<(), LexerError> {
        let mark = self.mark();

        match self.peek() {
            c if is_space(c) => {
                while !self.is_at_end() && is_space(self.peek()) {
                    self.advance();
                }
                self.push(TokenKind::Whitespace, mark);
                Ok(())
            }

            // Comments
            '/' if self.peek_next() == '*' => self.scan_block_comment(mark),
            '/' if self.peek_next() == '/' && self.syntax == Syntax::Scss => {
                self.scan_line_comment(mark);
                Ok(())
            }

            // Strings
            '"' | '\'' => self.scan_string(mark),

            // At-keywords
            '@' if is_name_char(self.peek_next()) => {
                self.scan_at_word(mark);
                Ok(())
            }

            // Punctuation
            ':' => self.single(TokenKind::Colon, mark),
            ';' => self.single(TokenKind::Semicolon, mark),
            '{' => self.single(TokenKind::LBrace, mark),
            '}' => self.single(TokenKind::RBrace, mark),
            '(' => self.single(TokenKind::LParen, mark),
            ')' => self.single(TokenKind::RParen, mark),

            _ => self.scan_word(mark),
        }
    }

    // --- Scanners ---

    /// Scan a `/* ... */` comment.
    fn scan_block_comment(&mut self, mark: Mark) -> Result<(), LexerError> {
        self.advance(); // `/`
        self.advance(); // `*`

        while !self.is_at_end() && !(self.peek() == '*' && self.peek_next() == '/') {
            self.advance();
        }

        if self.is_at_end() {
            return Err(error_at(mark, "Unclosed comment"));
        }

        self.advance(); // `*`
        self.advance(); // `/`
        self.push(TokenKind::Comment { inline: false }, mark);
        Ok(())
    }

    /// Scan a `// ...` comment. The line break is not part of the token.
    fn scan_line_comment(&mut self, mark: Mark) {
        while !self.is_at_end() && self.peek() != '\n' && self.peek() != '\r' {
            self.advance();
        }
        self.push(TokenKind::Comment { inline: true }, mark);
    }

    /// Scan a quoted string, quotes included.
    fn scan_string(&mut self, mark: Mark) -> Result<(), LexerError> {
        let quote = self.peek();
        self.advance(); // opening quote

        while !self.is_at_end() && self.peek() != quote {
            if self.peek() == '\\' {
                self.advance();
            }
            self.advance();
        }

        if self.is_at_end() {
            return Err(error_at(mark, "Unclosed string"));
        }

        self.advance(); // closing quote
        self.push(TokenKind::String, mark);
        Ok(())
    }

    /// Scan `@name`.
    fn scan_at_word(&mut self, mark: Mark) {
        self.advance(); // `@`

        let mut name = String::new();
        while !self.is_at_end() && is_name_char(self.peek()) {
            name.push(self.peek());
            self.advance();
        }

        self.push(TokenKind::AtWord(name), mark);
    }

    /// Scan a run of word characters. In SCSS, `#{...}` interpolation is
    /// swallowed whole so braces inside it never reach the parser.
    /// An unquoted `url(...)` is also one word, so `//` inside it is not a comment.
    fn scan_word(&mut self, mark: Mark) -> Result<(), LexerError> {
        loop {
            if self.is_at_end() {
                break;
            }
            if self.syntax == Syntax::Scss && self.peek() == '#' && self.peek_next() == '{' {
                self.scan_interpolation()?;
                continue;
            }
            if self.is_word_end() {
                break;
            }
            self.advance();
        }

        if self.peek() == '(' && self.source[mark.offset..self.offset].eq_ignore_ascii_case("url")
        {
            self.scan_unquoted_url(mark)?;
        }

        self.push(TokenKind::Word, mark);
        Ok(())
    }

    /// Consume `#{ ... }`, tracking nested braces and skipping strings.
    fn scan_interpolation(&mut self) -> Result<(), LexerError> {
        let mark = self.mark();
        self.advance(); // `#`
        self.advance(); // `{`

        let mut depth = 1;
        while !self.is_at_end() && depth > 0 {
            match self.peek() {
                '{' => depth += 1,
                '}' => depth -= 1,
                quote @ ('"' | '\'') => {
                    self.advance();
                    while !self.is_at_end() && self.peek() != quote {
                        if self.peek() == '\\' {
                            self.advance();
                        }
                        self.advance();
                    }
                }
                _ => {}
            }
            self.advance();
        }

        if depth > 0 {
            return Err(error_at(mark, "Unclosed interpolation"));
        }
        Ok(())
    }

    /// Consume `( ... )` after `url` when the argument is not a string.
    fn scan_unquoted_url(&mut self, mark: Mark) -> Result<(), LexerError> {
        let first = self.chars[self.pos + 1..]
            .iter()
            .copied()
            .find(|c| !is_space(*c));
        if matches!(first, Some('"' | '\'')) {
            return Ok(());
        }

        while !self.is_at_end() && self.peek() != ')' {
            self.advance();
        }

        if self.is_at_end() {
            return Err(error_at(mark, "Unclosed url()"));
        }

        self.advance(); // `)`
        Ok(())
    }

    // --- Helpers ---

    fn is_word_end(&self) -> bool {
        match self.peek() {
            c if is_space(c) => true,
            '{' | '}' | ';' | ':' | '(' | ')' | '"' | '\'' => true,
            '/' => {
                self.peek_next() == '*'
                    || (self.syntax == Syntax::Scss && self.peek_next() == '/')
            }
            _ => false,
        }
    }

    fn single(&mut self, kind: TokenKind, mark: Mark) -> Result<(), LexerError> {
        self.advance();
        self.push(kind, mark);
        Ok(())
    }

    fn mark(&self) -> Mark {
        Mark {
            offset: self.offset,
            line: self.line,
            column: self.column,
        }
    }

    fn push(&mut self, kind: TokenKind, mark: Mark) {
        let span = Span::new(mark.offset, self.offset, mark.line, mark.column);
        self.tokens.push(Token::new(kind, span));
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.chars[self.pos]
        }
    }

    fn peek_next(&self) -> char {
        if self.pos + 1 >= self.chars.len() {
            '\0'
        } else {
            self.chars[self.pos + 1]
        }
    }

    /// Advance one character. `\n`, and a `\r` not followed by `\n`, end a line.
    fn advance(&mut self) {
        if self.is_at_end() {
            return;
        }

        let ch = self.chars[self.pos];
        self.pos += 1;
        self.offset += ch.len_utf8();

        let line_break = ch == '\n' || (ch == '\r' && self.peek() != '\n');
        if line_break {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }
}

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c')
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

fn error_at(mark: Mark, message: &str) -> LexerError {
    LexerError {
        message: message.to_string(),
        line: mark.line,
        column: mark.column,
    }
}
