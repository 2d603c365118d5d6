//! Stylesheet parser.
//!
//! Builds a [`Stylesheet`] from the lossless token stream produced by
//! `sweep-lexer`. Statements are classified by what ends them: text up to a
//! `{` is a selector (or at-rule prelude), text up to `;` or `}` is a
//! declaration (or bodiless at-rule). Whitespace between statements is
//! attached to the following node as `before`.

use std::mem;

use crate::ast::{
    AtRule, AtRuleRaws, BlockRaws, Comment, Declaration, DeclarationRaws, Node, RawValue, Rule,
    Stylesheet,
};
use crate::ParseError;
use sweep_lexer::{Scanner, Span, Syntax, Token, TokenKind};

/// Stylesheet parser.
///
/// Recursive descent over the token stream, one call to `parse_nodes` per
/// container.
pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    /// Create a parser over tokens produced from `source`.
    pub fn new(source: &'a str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
        }
    }

    /// Parse source code into a stylesheet tree.
    ///
    /// A leading byte-order mark is kept out of the tree and recorded in
    /// [`Stylesheet::bom`].
    pub fn parse(source: &str, syntax: Syntax) -> Result<Stylesheet, ParseError> {
        let (bom, source) = match source.strip_prefix('\u{feff}') {
            Some(rest) => (true, rest),
            None => (false, source),
        };
        let tokens = Scanner::tokenize(source, syntax)?;
        let mut parser = Parser::new(source, tokens);
        let mut sheet = parser.parse_stylesheet()?;
        sheet.bom = bom;
        Ok(sheet)
    }

    fn parse_stylesheet(&mut self) -> Result<Stylesheet, ParseError> {
        let (nodes, after) = self.parse_nodes(None)?;
        Ok(Stylesheet {
            bom: false,
            nodes,
            after,
        })
    }

    /// Parse children until the closing `}` of the block opened at `open`,
    /// or until EOF at the root (`open == None`).
    /// Returns the children and the whitespace before the closing brace.
    fn parse_nodes(&mut self, open: Option<Span>) -> Result<(Vec<Node>, String), ParseError> {
        let mut nodes = Vec::new();
        let mut before = String::new();

        loop {
            let kind = self.peek().kind.clone();
            match kind {
                // Stray semicolons carry no meaning, keep them as raw text
                TokenKind::Whitespace | TokenKind::Semicolon => {
                    before.push_str(self.text_at(self.pos));
                    self.advance();
                }
                TokenKind::Comment { inline } => {
                    nodes.push(self.parse_comment(inline, mem::take(&mut before)));
                }
                TokenKind::Eof => {
                    return match open {
                        Some(span) => Err(error_at(span, "Unclosed block")),
                        None => Ok((nodes, before)),
                    };
                }
                TokenKind::RBrace => {
                    if open.is_none() {
                        return Err(self.error("Unexpected }"));
                    }
                    self.advance();
                    return Ok((nodes, before));
                }
                TokenKind::AtWord(name) => {
                    nodes.push(self.parse_at_rule(name, mem::take(&mut before))?);
                }
                _ => {
                    nodes.push(self.parse_rule_or_declaration(mem::take(&mut before))?);
                }
            }
        }
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn parse_comment(&mut self, inline: bool, before: String) -> Node {
        let source = self.peek().span;
        let raw = self.text_at(self.pos);
        let text = if inline {
            &raw[2..]
        } else {
            &raw[2..raw.len() - 2]
        };
        let comment = Comment {
            text: text.to_string(),
            inline,
            before,
            source: Some(source),
        };
        self.advance();
        Node::Comment(comment)
    }

    /// Parse `@name params;` or `@name params { ... }`.
    fn parse_at_rule(&mut self, name: String, before: String) -> Result<Node, ParseError> {
        let source = self.peek().span;
        self.advance(); // consume @name

        let name_end = self.pos;
        while self.kind_at(self.pos) == &TokenKind::Whitespace {
            self.advance();
        }
        let after_name = self.text_range(name_end, self.pos).to_string();

        let params_start = self.pos;
        let end = self.statement_end();
        let params_end = self.trim_trailing(params_start, end);
        let params = self.text_range(params_start, params_end).to_string();
        let between = self.text_range(params_end, end).to_string();

        let mut at_rule = AtRule {
            name,
            params,
            nodes: None,
            raws: AtRuleRaws {
                before,
                after_name,
                between,
                after: String::new(),
            },
            semicolon: false,
            source: Some(source),
        };

        let terminator = self.kind_at(end).clone();
        match terminator {
            TokenKind::LBrace => {
                let open = self.tokens[end].span;
                self.pos = end + 1;
                let (nodes, after) = self.parse_nodes(Some(open))?;
                at_rule.nodes = Some(nodes);
                at_rule.raws.after = after;
            }
            TokenKind::Semicolon => {
                self.pos = end + 1;
                at_rule.semicolon = true;
            }
            // `}` or EOF: leave it for the enclosing container
            _ => self.pos = end,
        }

        Ok(Node::AtRule(at_rule))
    }

    /// Parse `selector { ... }` or `prop: value;`.
    fn parse_rule_or_declaration(&mut self, before: String) -> Result<Node, ParseError> {
        let start = self.pos;
        let end = self.statement_end();

        if self.kind_at(end) != &TokenKind::LBrace {
            return self.parse_declaration(before, start, end);
        }

        let source = self.tokens[start].span;
        let selector_end = self.trim_trailing(start, end);
        let selector = self.text_range(start, selector_end).to_string();
        let between = self.text_range(selector_end, end).to_string();

        let open = self.tokens[end].span;
        self.pos = end + 1;
        let (nodes, after) = self.parse_nodes(Some(open))?;

        Ok(Node::Rule(Rule {
            selector,
            nodes,
            raws: BlockRaws {
                before,
                between,
                after,
            },
            source: Some(source),
        }))
    }

    /// Parse the declaration spanning tokens `start..end`; `end` is the
    /// terminating `;`, `}` or EOF.
    fn parse_declaration(
        &mut self,
        before: String,
        start: usize,
        end: usize,
    ) -> Result<Node, ParseError> {
        let source = self.tokens[start].span;

        let colon = (start..end)
            .find(|&i| self.kind_at(i) == &TokenKind::Colon)
            .ok_or_else(|| error_at(source, "Unknown word"))?;

        // A property is a single word; anything else before the colon is junk
        let prop_end = self.trim_trailing(start, colon);
        let spaced = (start..prop_end).any(|i| self.kind_at(i) == &TokenKind::Whitespace);
        if prop_end == start || spaced {
            return Err(error_at(source, "Unknown word"));
        }
        let prop = self.text_range(start, prop_end).to_string();

        let mut value_start = colon + 1;
        while value_start < end && self.kind_at(value_start) == &TokenKind::Whitespace {
            value_start += 1;
        }
        let between = self.text_range(prop_end, value_start).to_string();
        let raw = self.text_range(value_start, end).to_string();

        let cleaned: String = (value_start..end)
            .filter(|&i| !matches!(self.kind_at(i), TokenKind::Comment { .. }))
            .map(|i| self.text_at(i))
            .collect();
        let (value, important) = split_important(cleaned.trim());

        let semicolon = self.kind_at(end) == &TokenKind::Semicolon;
        self.pos = if semicolon { end + 1 } else { end };

        Ok(Node::Declaration(Declaration {
            prop,
            value: value.to_string(),
            important,
            raws: DeclarationRaws {
                before,
                between,
                value: Some(RawValue {
                    value: value.to_string(),
                    raw,
                }),
            },
            semicolon,
            source: Some(source),
        }))
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Index of the token that ends the statement starting at `self.pos`:
    /// the first `{` or `}`, or the first `;` outside parentheses, or EOF.
    fn statement_end(&self) -> usize {
        let mut depth = 0usize;
        let mut i = self.pos;
        loop {
            match self.kind_at(i) {
                TokenKind::Eof | TokenKind::LBrace | TokenKind::RBrace => return i,
                TokenKind::Semicolon if depth == 0 => return i,
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => depth = depth.saturating_sub(1),
                _ => {}
            }
            i += 1;
        }
    }

    /// Move `end` back over trailing whitespace tokens, not past `start`.
    fn trim_trailing(&self, start: usize, mut end: usize) -> usize {
        while end > start && self.kind_at(end - 1) == &TokenKind::Whitespace {
            end -= 1;
        }
        end
    }

    /// Source text of tokens `start..end`.
    fn text_range(&self, start: usize, end: usize) -> &'a str {
        if start >= end {
            return "";
        }
        let from = self.tokens[start].span.start;
        let to = self.tokens[end - 1].span.end;
        &self.source[from..to]
    }

    fn text_at(&self, index: usize) -> &'a str {
        self.text_range(index, index + 1)
    }

    fn kind_at(&self, index: usize) -> &TokenKind {
        self.tokens
            .get(index)
            .map_or(&TokenKind::Eof, |token| &token.kind)
    }

    fn peek(&self) -> &Token {
        static EOF: std::sync::LazyLock<Token> =
            std::sync::LazyLock::new(|| Token::new(TokenKind::Eof, Span::new(0, 0, 0, 0)));
        self.tokens.get(self.pos).unwrap_or(&EOF)
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn error(&self, message: &str) -> ParseError {
        error_at(self.peek().span, message)
    }
}

/// Split a trailing `!important` off a value.
fn split_important(value: &str) -> (&str, bool) {
    const IMPORTANT: &str = "!important";
    let cut = value.len().saturating_sub(IMPORTANT.len());
    match value.get(cut..) {
        Some(tail) if tail.eq_ignore_ascii_case(IMPORTANT) => (value[..cut].trim_end(), true),
        _ => (value, false),
    }
}

fn error_at(span: Span, message: &str) -> ParseError {
    ParseError {
        message: message.to_string(),
        line: span.line,
        column: span.column,
    }
}
