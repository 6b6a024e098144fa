//! Identifier and keyword lexing.

use crate::lexer::core::is_identifier_char;
use crate::token::{keyword_from_ident, Token, TokenKind};
use crate::Lexer;

impl Lexer {
    /// Consumes an identifier, keyword, bool literal or underscore.
    ///
    /// Greedily reads identifier runes (letters, digits, `_`), then
    /// checks the captured word against the keyword set. A lone `_`
    /// becomes [`TokenKind::Underscore`].
    pub(crate) fn consume_identifier_or_keyword(&mut self) -> Token {
        let (line, column) = (self.cursor.line(), self.cursor.column());

        let mut word = String::new();
        while is_identifier_char(self.cursor.current()) {
            word.push(self.cursor.current());
            self.cursor.advance();
        }

        let kind = if word == "_" {
            TokenKind::Underscore
        } else {
            keyword_from_ident(&word).unwrap_or(TokenKind::Identifier)
        };

        Token::new(kind, word, line, column)
    }
}
