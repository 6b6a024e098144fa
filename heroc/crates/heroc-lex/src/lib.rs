//! heroc-lex - Lexical analysis for the Hero language.
//!
//! The lexer turns UTF-8 source text into a vector of [`Token`]s. It is
//! cursor-based: whitespace and `//` line comments are skipped, then the
//! first rune of the remaining input selects a consumer. Number and
//! string literals are recognized by running small finite state
//! machines from `heroc-util` over the remaining input.
//!
//! Newlines are significant and produce [`TokenKind::NewLine`] tokens;
//! the parser decides where they separate statements.

pub mod cursor;
mod error;
mod lexer;
pub mod token;

#[cfg(test)]
mod edge_cases;

pub use error::LexError;
pub use lexer::Lexer;
pub use token::{keyword_from_ident, Token, TokenKind};
