//! Number literal lexing.
//!
//! Numbers are recognized by a small DFA over the remaining input. The
//! capture is classified as a float when it contains a decimal point or
//! an exponent marker, and as an int otherwise.

use heroc_util::fsm::{Machine, State, NULL_STATE};

use crate::token::{Token, TokenKind};
use crate::Lexer;

const INITIAL: State = State::new(1, false);
const INTEGER: State = State::new(2, true);
const BEGINS_FLOAT: State = State::new(3, false);
const FLOAT: State = State::new(4, true);
const BEGIN_EXP: State = State::new(5, false);
const BEGIN_SIGNED_EXP: State = State::new(6, false);
const EXPONENT: State = State::new(7, true);

/// Transition function of the number DFA.
///
/// Accepted shapes: `12`, `1.`, `.5`, `3.14`, `1e10`, `2.5e-3`.
fn next_number_state(current: State, input: char) -> State {
    let is_digit = input.is_ascii_digit();
    let is_exp_marker = input == 'e' || input == 'E';

    match current.value {
        v if v == INITIAL.value => {
            if is_digit {
                return INTEGER;
            }
            if input == '.' {
                return BEGINS_FLOAT;
            }
        },
        v if v == INTEGER.value => {
            if is_digit {
                return INTEGER;
            }
            if input == '.' {
                return FLOAT;
            }
            if is_exp_marker {
                return BEGIN_EXP;
            }
        },
        v if v == BEGINS_FLOAT.value => {
            if is_digit {
                return FLOAT;
            }
        },
        v if v == FLOAT.value => {
            if is_digit {
                return FLOAT;
            }
            if is_exp_marker {
                return BEGIN_EXP;
            }
        },
        v if v == BEGIN_EXP.value => {
            if is_digit {
                return EXPONENT;
            }
            if input == '+' || input == '-' {
                return BEGIN_SIGNED_EXP;
            }
        },
        v if v == BEGIN_SIGNED_EXP.value || v == EXPONENT.value => {
            if is_digit {
                return EXPONENT;
            }
        },
        _ => {},
    }

    NULL_STATE
}

impl Lexer {
    /// Consumes a number literal, or reports an unknown token without
    /// moving the cursor when the DFA rejects the input.
    ///
    /// The caller falls back to dot recognition for input that began
    /// with `.`.
    pub(crate) fn consume_number(&mut self) -> Token {
        let machine = Machine::new(INITIAL, next_number_state);
        let (captured, accepted) = machine.run(self.cursor.remaining());

        if !accepted {
            return Token::unknown(
                self.cursor.current().to_string(),
                self.cursor.line(),
                self.cursor.column(),
            );
        }

        let kind = if captured.contains(['.', 'e', 'E']) {
            TokenKind::Float
        } else {
            TokenKind::Int
        };

        let token = self.make_token(kind, captured.clone());
        self.cursor.advance_n(captured.chars().count());
        token
    }
}
