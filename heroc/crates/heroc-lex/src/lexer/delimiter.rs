//! Delimiters, the colon/declare pair, and dot sequences.

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl Lexer {
    /// Consumes a single-character delimiter.
    pub(crate) fn consume_delimiter(&mut self) -> Token {
        let c = self.cursor.current();
        let kind = match c {
            ',' => TokenKind::Comma,
            ';' => TokenKind::SemiColon,
            '(' => TokenKind::LeftParenthesis,
            ')' => TokenKind::RightParenthesis,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            '{' => TokenKind::LeftBrace,
            _ => TokenKind::RightBrace,
        };

        let token = self.make_token(kind, c.to_string());
        self.cursor.advance();
        token
    }

    /// Handles: `:`, `:=`
    pub(crate) fn consume_colon_or_declare(&mut self) -> Token {
        let (line, column) = (self.cursor.line(), self.cursor.column());
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::new(TokenKind::Declare, ":=", line, column)
        } else {
            Token::new(TokenKind::Colon, ":", line, column)
        }
    }

    /// Handles: `.`, `..`, `...`
    pub(crate) fn consume_dots(&mut self) -> Token {
        let (line, column) = (self.cursor.line(), self.cursor.column());
        self.cursor.advance();

        if !self.cursor.match_char('.') {
            return Token::new(TokenKind::Dot, ".", line, column);
        }
        if !self.cursor.match_char('.') {
            return Token::new(TokenKind::TwoDots, "..", line, column);
        }
        Token::new(TokenKind::Ellipsis, "...", line, column)
    }
}
