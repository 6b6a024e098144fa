//! Edge case tests for heroc-sem

#[cfg(test)]
mod tests {
    use crate::{check, CheckError, Checker, Global};
    use heroc_lex::{Token, TokenKind};
    use heroc_par::Parser;

    fn check_source(source: &str) -> Result<(), CheckError> {
        let program = Parser::new(source)
            .expect("lexing should succeed")
            .parse_program()
            .expect("parsing should succeed");
        check(&program)
    }

    // ==================== EDGE CASES ====================

    /// EDGE CASE: Empty program
    #[test]
    fn test_edge_empty_program() {
        check_source("").unwrap();
    }

    /// EDGE CASE: Deeply nested blocks each get their own scope
    #[test]
    fn test_edge_nested_block_scopes() {
        check_source("x := 1\n{\nx := 2\n{\nx := 3\n}\n}").unwrap();
    }

    /// EDGE CASE: Redeclaration inside the same nested block
    #[test]
    fn test_edge_redeclaration_in_same_block() {
        let err = check_source("{\nx := 1\nx := 2\n}").unwrap_err();
        assert!(matches!(err, CheckError::AlreadyDeclared { .. }));
    }

    /// EDGE CASE: break buried three blocks deep still escapes
    #[test]
    fn test_edge_deep_break_escapes() {
        let err = check_source("func f() { { { break } } }").unwrap_err();
        assert!(matches!(err, CheckError::UnexpectedBreak { .. }));
    }

    /// EDGE CASE: break two levels inside a loop is absorbed
    #[test]
    fn test_edge_deep_break_inside_loop() {
        check_source("func f() { for { { { break } } } }").unwrap();
    }

    /// EDGE CASE: a loop inside an if inside a loop
    #[test]
    fn test_edge_interleaved_loops_and_ifs() {
        check_source(
            "func f() {\n\
             for i := 0; i < 3; i++ {\n\
             if ok {\n\
             for j in items {\n\
             continue\n\
             }\n\
             break\n\
             }\n\
             }\n\
             }",
        )
        .unwrap();
    }

    /// EDGE CASE: the last of several returns decides the arity
    #[test]
    fn test_edge_last_return_decides_arity() {
        let err = check_source("func f() int { return 1\nreturn 1, 2 }").unwrap_err();
        assert!(matches!(
            err,
            CheckError::ReturnArity {
                expected: 1,
                got: 2,
                ..
            }
        ));
    }

    /// EDGE CASE: function name collides with a registered type
    #[test]
    fn test_edge_function_name_collides_with_type() {
        let program = Parser::new("func Widget() {}")
            .unwrap()
            .parse_program()
            .unwrap();
        let mut global = Global::new();
        global
            .add_type(&Token::new(TokenKind::Identifier, "Widget", 1, 6))
            .unwrap();
        let err = Checker::with_global(global).check(&program).unwrap_err();
        assert!(matches!(err, CheckError::AlreadyDeclaredAsType { .. }));
    }

    /// EDGE CASE: variable name collides with a registered type
    #[test]
    fn test_edge_var_name_collides_with_type() {
        let program = Parser::new("Widget := 1").unwrap().parse_program().unwrap();
        let mut global = Global::new();
        global
            .add_type(&Token::new(TokenKind::Identifier, "Widget", 2, 6))
            .unwrap();
        let err = Checker::with_global(global).check(&program).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Widget is already declared as a type on line 2:6 (1, 1)"
        );
    }

    /// EDGE CASE: sibling functions may reuse parameter names
    #[test]
    fn test_edge_sibling_functions_reuse_params() {
        check_source("func f(x int) {}\nfunc g(x int) {}").unwrap();
    }

    /// EDGE CASE: custom return type registered after the fact
    #[test]
    fn test_edge_custom_return_type() {
        let program = Parser::new("func make() Widget { return w }")
            .unwrap()
            .parse_program()
            .unwrap();
        let mut global = Global::new();
        global
            .add_type(&Token::new(TokenKind::Identifier, "Widget", 1, 6))
            .unwrap();
        Checker::with_global(global).check(&program).unwrap();
    }

    /// EDGE CASE: the first semantic error wins
    #[test]
    fn test_edge_first_error_wins() {
        let err = check_source("func f(a Missing) { break }").unwrap_err();
        // the parameter type fails before the body is walked
        assert!(matches!(err, CheckError::TypeNotDefined { .. }));
    }
}
