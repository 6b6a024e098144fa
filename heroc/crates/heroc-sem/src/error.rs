//! Semantic error type.

use thiserror::Error;

/// Error produced by the checker.
///
/// Positions are `(line, column)` of the offending token; redeclaration
/// errors also carry the position of the first declaration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CheckError {
    #[error("{name} is already declared on line {first_line}:{first_column} ({line}, {column})")]
    AlreadyDeclared {
        name: String,
        first_line: u32,
        first_column: u32,
        line: u32,
        column: u32,
    },

    #[error(
        "{name} is already declared as a type on line {first_line}:{first_column} ({line}, {column})"
    )]
    AlreadyDeclaredAsType {
        name: String,
        first_line: u32,
        first_column: u32,
        line: u32,
        column: u32,
    },

    #[error("Cannot create type with name {name} on line {line}:{column}, {name} is a builtin type")]
    BuiltinTypeName {
        name: String,
        line: u32,
        column: u32,
    },

    #[error("{name} is already declared as a type on line {line}:{column}")]
    DuplicateTypeDefinition {
        name: String,
        line: u32,
        column: u32,
    },

    #[error("type: {name} is not defined ({line}, {column})")]
    TypeNotDefined {
        name: String,
        line: u32,
        column: u32,
    },

    #[error("Unexpected 'break' ({line}, {column})")]
    UnexpectedBreak { line: u32, column: u32 },

    #[error("Unexpected 'continue' ({line}, {column})")]
    UnexpectedContinue { line: u32, column: u32 },

    #[error("Unexpected return to non-return function ({line}, {column})")]
    UnexpectedReturn { line: u32, column: u32 },

    #[error("Expected return at end of function declared at ({line}, {column})")]
    MissingReturn { line: u32, column: u32 },

    #[error("Expected {expected} return values but got {got} ({line}, {column})")]
    ReturnArity {
        expected: usize,
        got: usize,
        line: u32,
        column: u32,
    },

    #[error("Cannot create function using signature in non-global context ({line}, {column})")]
    NonGlobalFunction { line: u32, column: u32 },
}
