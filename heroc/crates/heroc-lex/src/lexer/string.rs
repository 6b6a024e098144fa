//! String, raw string and rune literal lexing.
//!
//! String literals run a DFA parameterized by the opening delimiter:
//! `"` for escapable strings, `` ` `` for raw strings. The captured
//! text keeps everything between the delimiters verbatim, newlines
//! included.

use heroc_util::fsm::{Machine, State, NULL_STATE};

use crate::token::{Token, TokenKind};
use crate::Lexer;

const STR_INITIAL: State = State::new(1, false);
const STR_BODY: State = State::new(2, false);
const STR_END: State = State::new(3, true);

/// Builds the transition function of the string DFA for a delimiter.
fn string_transition(delimiter: char) -> impl Fn(State, char) -> State {
    move |current: State, input: char| match current.value {
        v if v == STR_INITIAL.value => {
            if input == delimiter {
                STR_BODY
            } else {
                NULL_STATE
            }
        },
        v if v == STR_BODY.value => {
            if input == delimiter {
                STR_END
            } else {
                STR_BODY
            }
        },
        _ => NULL_STATE,
    }
}

impl Lexer {
    /// Consumes a string or raw string literal.
    ///
    /// The bracketing delimiters are stripped from the stored lexeme.
    /// An unterminated literal yields an unknown token at the opening
    /// delimiter.
    pub(crate) fn consume_string(&mut self) -> Token {
        let delimiter = self.cursor.current();
        let kind = if delimiter == '`' {
            TokenKind::RawStr
        } else {
            TokenKind::Str
        };

        let machine = Machine::new(STR_INITIAL, string_transition(delimiter));
        let (captured, accepted) = machine.run(self.cursor.remaining());

        if !accepted {
            return Token::unknown(
                delimiter.to_string(),
                self.cursor.line(),
                self.cursor.column(),
            );
        }

        let length = captured.chars().count();
        let value: String = captured
            .chars()
            .skip(1)
            .take(length.saturating_sub(2))
            .collect();

        let token = self.make_token(kind, value);
        self.cursor.advance_n(length);
        token
    }

    /// Consumes a rune literal: one logical character between single
    /// quotes, where `\` escapes the following rune.
    ///
    /// Any deviation yields an unknown token positioned at the
    /// offending rune.
    pub(crate) fn consume_rune(&mut self) -> Token {
        let (line, column) = (self.cursor.line(), self.cursor.column());

        // opening quote; the dispatcher guarantees it
        self.cursor.advance();

        if self.cursor.is_at_end() {
            return Token::unknown("'", line, column);
        }

        let mut value = String::new();
        let mut c = self.cursor.current();

        if c == '\\' {
            value.push('\\');
            self.cursor.advance();
            if self.cursor.is_at_end() {
                return Token::unknown("'", line, column);
            }
            c = self.cursor.current();
        }
        value.push(c);
        self.cursor.advance();

        if self.cursor.current() != '\'' {
            let token = Token::unknown(
                self.cursor.current().to_string(),
                self.cursor.line(),
                self.cursor.column(),
            );
            self.cursor.advance();
            return token;
        }
        self.cursor.advance();

        Token::new(TokenKind::Rune, value, line, column)
    }
}
