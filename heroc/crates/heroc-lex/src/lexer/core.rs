//! Core lexer: dispatch and the tokenize loop.

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::{Token, TokenKind};

/// Lexer for the Hero language.
///
/// Scans tokens on demand from a rune buffer. [`Lexer::next_token`]
/// never fails by itself: unrecognized input yields a
/// [`TokenKind::Unknown`] token, which [`Lexer::tokenize`] turns into a
/// [`LexError`].
pub struct Lexer {
    /// Character cursor over the source.
    pub(crate) cursor: Cursor,
}

impl Lexer {
    /// Creates a new lexer for the given source text.
    pub fn new(source: &str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    /// Returns the next recognized token.
    ///
    /// Skips whitespace and `//` comments, then dispatches on the first
    /// remaining rune. Returns [`Token::end_of_input`] once the buffer
    /// is exhausted.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        if self.cursor.is_at_end() {
            return Token::end_of_input();
        }

        let c = self.cursor.current();
        match c {
            '\n' => {
                let token = self.make_token(TokenKind::NewLine, "\n");
                self.cursor.advance();
                token
            },
            ',' | ';' | '(' | ')' | '[' | ']' | '{' | '}' => self.consume_delimiter(),
            c if begins_literal(c) => self.recognize_literal(),
            ':' => self.consume_colon_or_declare(),
            c if is_operator_char(c) => self.recognize_operator(),
            c => {
                let token = Token::unknown(c.to_string(), self.cursor.line(), self.cursor.column());
                self.cursor.advance();
                token
            },
        }
    }

    /// Tokenizes the whole input.
    ///
    /// On success the vector contains every token up to (and excluding)
    /// end of input, newlines included. The first unknown token aborts
    /// the scan and discards everything read so far.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();
            match token.kind {
                TokenKind::EndOfInput => break,
                TokenKind::Unknown => {
                    return Err(LexError {
                        lexeme: token.lexeme,
                        line: token.line,
                        column: token.column,
                    })
                },
                _ => tokens.push(token),
            }
        }

        Ok(tokens)
    }

    /// Skips spaces, tabs and `//` line comments.
    ///
    /// Newlines are not whitespace here: they become tokens.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.cursor.current() {
                ' ' | '\t' => self.cursor.advance(),
                '/' if self.cursor.peek(1) == '/' => {
                    while !self.cursor.is_at_end() && self.cursor.current() != '\n' {
                        self.cursor.advance();
                    }
                },
                _ => break,
            }
        }
    }

    /// Builds a token positioned at the cursor.
    pub(crate) fn make_token(&self, kind: TokenKind, lexeme: impl Into<String>) -> Token {
        Token::new(kind, lexeme, self.cursor.line(), self.cursor.column())
    }

    /// Dispatches literal recognition by the first rune.
    fn recognize_literal(&mut self) -> Token {
        let c = self.cursor.current();

        if begins_identifier(c) {
            return self.consume_identifier_or_keyword();
        }

        if begins_number(c) {
            let token = self.consume_number();
            if token.kind != TokenKind::Unknown {
                return token;
            }
            if c == '.' {
                // it began with a dot, not a number
                return self.consume_dots();
            }
            return token;
        }

        if begins_string(c) {
            return self.consume_string();
        }

        // begins_rune
        self.consume_rune()
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.kind == TokenKind::EndOfInput {
            None
        } else {
            Some(token)
        }
    }
}

/// True for runes that can start an identifier.
pub(crate) fn begins_identifier(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

/// True for runes that can continue an identifier.
pub(crate) fn is_identifier_char(c: char) -> bool {
    c == '_' || c.is_alphabetic() || c.is_numeric()
}

/// True for runes that can start a number literal.
pub(crate) fn begins_number(c: char) -> bool {
    c == '.' || c.is_ascii_digit()
}

/// True for runes that open a string literal.
pub(crate) fn begins_string(c: char) -> bool {
    c == '"' || c == '`'
}

/// True for runes that begin any literal or identifier.
fn begins_literal(c: char) -> bool {
    begins_identifier(c) || begins_number(c) || begins_string(c) || c == '\''
}

/// True for runes that start an operator.
fn is_operator_char(c: char) -> bool {
    matches!(
        c,
        '+' | '-' | '*' | '/' | '%' | '~' | '&' | '|' | '^' | '!' | '<' | '>' | '='
    )
}
