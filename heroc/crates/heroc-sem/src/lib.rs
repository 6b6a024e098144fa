//! heroc-sem - Name resolution and basic type checks.
//!
//! The checker walks the parsed AST tracking a global type-definition
//! registry and a scope chain. It verifies name uniqueness, type
//! existence, function return arity, and that `break`, `continue` and
//! `return` only show up where they are legal. The AST is never
//! mutated.

mod check;
mod error;
pub mod scope;

#[cfg(test)]
mod edge_cases;

pub use check::{check, BlockOutcome, Checker};
pub use error::CheckError;

use heroc_lex::Token;
use indexmap::IndexMap;

/// Builtin type names.
pub const BUILTIN_TYPES: &[&str] = &["int", "float", "string", "rune", "bool", "generic", "func"];

/// Returns true if `name` is a builtin type name.
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_TYPES.contains(&name)
}

/// Global registry of type definitions.
///
/// Starts empty; user-defined types register here. Builtins are always
/// known and never stored.
#[derive(Debug, Default)]
pub struct Global {
    typedefs: IndexMap<String, Token>,
}

impl Global {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user-defined type.
    ///
    /// Builtins cannot be redefined, and a type name registers at most
    /// once.
    pub fn add_type(&mut self, token: &Token) -> Result<(), CheckError> {
        if is_builtin(&token.lexeme) {
            return Err(CheckError::BuiltinTypeName {
                name: token.lexeme.clone(),
                line: token.line,
                column: token.column,
            });
        }

        if let Some(first) = self.typedefs.get(&token.lexeme) {
            return Err(CheckError::DuplicateTypeDefinition {
                name: first.lexeme.clone(),
                line: token.line,
                column: token.column,
            });
        }

        self.typedefs.insert(token.lexeme.clone(), token.clone());
        Ok(())
    }

    /// Returns true if `name` names a builtin or registered type.
    pub fn has_type(&self, name: &str) -> bool {
        is_builtin(name) || self.typedefs.contains_key(name)
    }

    /// The registered definition token for a user-defined type.
    pub fn type_definition(&self, name: &str) -> Option<&Token> {
        self.typedefs.get(name)
    }

    /// Fails unless the token names an existing type.
    pub fn check_for_type(&self, token: &Token) -> Result<(), CheckError> {
        if self.has_type(&token.lexeme) {
            return Ok(());
        }
        Err(CheckError::TypeNotDefined {
            name: token.lexeme.clone(),
            line: token.line,
            column: token.column,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heroc_lex::TokenKind;

    fn token(name: &str, line: u32, column: u32) -> Token {
        Token::new(TokenKind::Identifier, name, line, column)
    }

    #[test]
    fn test_builtins_always_known() {
        let global = Global::new();
        for name in BUILTIN_TYPES {
            assert!(global.has_type(name), "{} should be builtin", name);
        }
        assert!(!global.has_type("Point"));
    }

    #[test]
    fn test_add_type() {
        let mut global = Global::new();
        global.add_type(&token("Point", 1, 6)).unwrap();
        assert!(global.has_type("Point"));
        assert_eq!(global.type_definition("Point").unwrap().line, 1);
    }

    #[test]
    fn test_add_type_rejects_builtin() {
        let mut global = Global::new();
        let err = global.add_type(&token("int", 2, 6)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot create type with name int on line 2:6, int is a builtin type"
        );
    }

    #[test]
    fn test_add_type_rejects_duplicate() {
        let mut global = Global::new();
        global.add_type(&token("Point", 1, 6)).unwrap();
        let err = global.add_type(&token("Point", 4, 6)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Point is already declared as a type on line 4:6"
        );
    }

    #[test]
    fn test_check_for_type() {
        let mut global = Global::new();
        assert!(global.check_for_type(&token("bool", 1, 1)).is_ok());

        let err = global.check_for_type(&token("Shape", 3, 9)).unwrap_err();
        assert_eq!(err.to_string(), "type: Shape is not defined (3, 9)");

        global.add_type(&token("Shape", 1, 6)).unwrap();
        assert!(global.check_for_type(&token("Shape", 3, 9)).is_ok());
    }
}
