//! Parse error type.
//!
//! The parser is fail-fast: the first error unwinds through `?` to the
//! caller and no partial AST is returned.

use heroc_lex::{LexError, TokenKind};
use thiserror::Error;

/// Error produced while parsing.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Tokenization failed before parsing started.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// Input ended where a specific token kind was required.
    #[error("{line}:{column}: Expected {expected} but reached end of file.")]
    UnexpectedEndOfInput {
        line: u32,
        column: u32,
        expected: TokenKind,
    },

    /// A specific token kind was required but something else was read.
    #[error("{line}:{column}: Expected {expected} but found '{found}'.")]
    UnexpectedToken {
        line: u32,
        column: u32,
        expected: TokenKind,
        found: String,
    },

    /// One of several token kinds was required.
    ///
    /// `expected` is the comma-joined kind list.
    #[error("{line}:{column}: Expected either {expected} but received {found}.")]
    ExpectedOneOf {
        line: u32,
        column: u32,
        expected: String,
        found: String,
    },

    /// A structural rule was violated (illegal prefix, assignment to a
    /// non-identifier, non-boolean condition).
    #[error("{line}:{column}: {message}")]
    Invalid {
        line: u32,
        column: u32,
        message: String,
    },
}

impl ParseError {
    /// Builds an [`ParseError::Invalid`] at the given position.
    pub(crate) fn invalid(position: (u32, u32), message: impl Into<String>) -> Self {
        ParseError::Invalid {
            line: position.0,
            column: position.1,
            message: message.into(),
        }
    }
}
