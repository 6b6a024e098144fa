//! Lexical error type.

use thiserror::Error;

/// Error produced when tokenization hits an unrecognized lexeme.
///
/// Tokenization stops at the first unknown token; everything scanned
/// before it is discarded.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("Unexpected token '{lexeme}' on line {line}, column {column}.")]
pub struct LexError {
    /// The offending lexeme.
    pub lexeme: String,
    /// Line of the first offending character (1-based).
    pub line: u32,
    /// Column of the first offending character (1-based).
    pub column: u32,
}
