//! heroc-par - Recursive-descent parser for the Hero language.
//!
//! The parser consumes the token vector produced eagerly by the lexer
//! and builds the AST bottom-up. Expressions use Pratt precedence
//! climbing; list-like constructs share one backtrackable `delimited`
//! combinator; call and definition forms are recognized speculatively,
//! restoring the cursor on a miss.
//!
//! Errors are fatal at first occurrence and carry the position of the
//! offending token. Speculative misses are not errors: `attempt_*`
//! routines return `Ok(None)` with the cursor unchanged.

pub mod ast;
mod error;
mod expr;
mod items;
mod stmt;
pub mod types;

#[cfg(test)]
mod edge_cases;

pub use error::ParseError;

use heroc_lex::{Lexer, Token, TokenKind};

use ast::{Block, Program};

/// Result alias used throughout the parser.
pub type PResult<T> = Result<T, ParseError>;

/// Token kinds that may stand alone as an atom.
pub(crate) const VALUES: &[TokenKind] = &[
    TokenKind::Identifier,
    TokenKind::Bool,
    TokenKind::Int,
    TokenKind::Float,
    TokenKind::Str,
    TokenKind::RawStr,
    TokenKind::Rune,
    TokenKind::Underscore,
];

/// Binding strength of an infix operator; `None` terminates an
/// expression.
pub(crate) fn precedence(kind: TokenKind) -> Option<u8> {
    let level = match kind {
        TokenKind::Assign
        | TokenKind::Increment
        | TokenKind::Decrement
        | TokenKind::PlusEq
        | TokenKind::MinusEq
        | TokenKind::TimesEq
        | TokenKind::DivEq
        | TokenKind::ModEq => 1,
        TokenKind::Or => 4,
        TokenKind::And => 5,
        TokenKind::LessThan
        | TokenKind::GreaterThan
        | TokenKind::LessThanOrEqual
        | TokenKind::GreaterThanOrEqual
        | TokenKind::Equal
        | TokenKind::NotEqual => 9,
        TokenKind::Plus | TokenKind::Minus => 12,
        TokenKind::Times | TokenKind::Div | TokenKind::Mod => 15,
        _ => return None,
    };
    Some(level)
}

/// Parser over an eagerly tokenized input.
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    cursor: usize,
}

impl Parser {
    /// Tokenizes `source` and builds a parser over the result.
    ///
    /// A lex error surfaces here, before any parsing happens.
    pub fn new(source: &str) -> PResult<Self> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Self::from_tokens(tokens))
    }

    /// Builds a parser over a prepared token vector.
    ///
    /// A trailing end-of-input token is accepted and stripped, so both
    /// stream conventions work.
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        while tokens
            .last()
            .is_some_and(|t| t.kind == TokenKind::EndOfInput)
        {
            tokens.pop();
        }
        Self { tokens, cursor: 0 }
    }

    /// Parses the whole input into a [`Program`].
    pub fn parse_program(&mut self) -> PResult<Program> {
        let mut statements = Vec::new();

        loop {
            self.skip_newlines();
            match self.peek() {
                None => break,
                Some(t) if matches!(t.kind, TokenKind::EndOfInput | TokenKind::Unknown) => break,
                Some(_) => statements.push(self.parse_statement()?),
            }
        }

        Ok(Program {
            body: Block { statements },
        })
    }

    // =========================================================================
    // Primitive helpers
    // =========================================================================

    /// The token at the cursor, if any.
    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    /// The token `n` positions past the cursor.
    pub(crate) fn peek_at(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.cursor + n)
    }

    /// The token right after the cursor.
    pub(crate) fn lookahead(&self) -> Option<&Token> {
        self.peek_at(1)
    }

    /// Consumes and returns the token at the cursor.
    pub(crate) fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.cursor).cloned();
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    /// Moves the cursor back one token.
    pub(crate) fn unstep(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Saves the cursor for a speculative parse.
    pub(crate) fn snapshot(&self) -> usize {
        self.cursor
    }

    /// Restores a previously saved cursor.
    pub(crate) fn restore(&mut self, cursor: usize) {
        self.cursor = cursor;
    }

    /// Skips newlines (unless asked for one), then tests the next
    /// token's kind without consuming it.
    pub(crate) fn accept(&mut self, expected: TokenKind) -> bool {
        if expected != TokenKind::NewLine {
            self.skip_newlines();
        }
        self.next_is(expected)
    }

    /// Tests the next token's kind without skipping newlines.
    pub(crate) fn next_is(&self, expected: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == expected)
    }

    /// Consumes the next token if it has the expected kind, and fails
    /// otherwise.
    pub(crate) fn expect(&mut self, expected: TokenKind) -> PResult<Token> {
        if expected != TokenKind::NewLine {
            self.skip_newlines();
        }

        let Some(token) = self.peek().cloned() else {
            return Err(self.end_of_input(expected));
        };
        if token.kind == TokenKind::EndOfInput && expected != TokenKind::EndOfInput {
            return Err(self.end_of_input(expected));
        }
        if token.kind != expected {
            return Err(ParseError::UnexpectedToken {
                line: token.line,
                column: token.column,
                expected,
                found: token.lexeme,
            });
        }
        self.cursor += 1;
        Ok(token)
    }

    /// Returns true if any of the expected kinds matches next.
    pub(crate) fn accepts_one_of(&mut self, expected: &[TokenKind]) -> bool {
        expected.iter().any(|kind| self.accept(*kind))
    }

    /// Consumes the next token if it matches one of the expected kinds,
    /// and fails otherwise.
    pub(crate) fn expects_one_of(&mut self, expected: &[TokenKind]) -> PResult<Token> {
        for kind in expected {
            if self.accept(*kind) {
                return self.expect(*kind);
            }
        }

        let listed = expected
            .iter()
            .map(|k| k.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        match self.peek() {
            Some(t) => Err(ParseError::ExpectedOneOf {
                line: t.line,
                column: t.column,
                expected: listed,
                found: t.lexeme.clone(),
            }),
            None => Err(self.end_of_input(expected[0])),
        }
    }

    /// Advances past consecutive newline tokens.
    pub(crate) fn skip_newlines(&mut self) {
        while self.next_is(TokenKind::NewLine) {
            self.next();
        }
    }

    /// Builds the end-of-file error, positioned at the last token.
    fn end_of_input(&self, expected: TokenKind) -> ParseError {
        let (line, column) = self
            .tokens
            .last()
            .map(|t| (t.line, t.column))
            .unwrap_or((1, 1));
        ParseError::UnexpectedEndOfInput {
            line,
            column,
            expected,
        }
    }
}
