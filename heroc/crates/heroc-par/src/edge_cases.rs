//! Edge case tests for heroc-par

#[cfg(test)]
mod tests {
    use crate::ast::{Expr, Program, Stmt};
    use crate::{Parser, VALUES};
    use heroc_lex::TokenKind;

    fn parse(source: &str) -> Result<Program, crate::ParseError> {
        Parser::new(source)?.parse_program()
    }

    // ==================== EDGE CASES ====================

    /// EDGE CASE: Empty source
    #[test]
    fn test_edge_empty_source() {
        assert!(parse("").unwrap().body.statements.is_empty());
    }

    /// EDGE CASE: Whitespace and newlines only
    #[test]
    fn test_edge_whitespace_only() {
        assert!(parse("  \n\t \n ").unwrap().body.statements.is_empty());
    }

    /// EDGE CASE: Comments only
    #[test]
    fn test_edge_comments_only() {
        assert!(parse("// one\n// two").unwrap().body.statements.is_empty());
    }

    /// EDGE CASE: Statements split across many blank lines
    #[test]
    fn test_edge_blank_line_separation() {
        let program = parse("x := 1\n\n\n\ny := 2").unwrap();
        assert_eq!(program.body.statements.len(), 2);
    }

    /// EDGE CASE: Deeply nested parentheses
    #[test]
    fn test_edge_nested_parens() {
        let program = parse("x := ((((1))))").unwrap();
        match &program.body.statements[0] {
            Stmt::Definition(d) => assert_eq!(d.value.as_ref().unwrap().to_string(), "1"),
            other => panic!("expected definition, got {:?}", other),
        }
    }

    /// EDGE CASE: Deeply nested blocks
    #[test]
    fn test_edge_nested_blocks() {
        let program = parse("{ { { x := 1 } } }").unwrap();
        assert_eq!(program.body.statements.len(), 1);
    }

    /// EDGE CASE: Every atom kind in expression position
    #[test]
    fn test_edge_every_value_kind() {
        for source in ["x", "true", "1", "1.5", "\"s\"", "`r`", "'c'", "_"] {
            assert!(parse(source).is_ok(), "source {:?}", source);
        }
        assert_eq!(VALUES.len(), 8);
    }

    /// EDGE CASE: An expression statement ending exactly at EOF
    #[test]
    fn test_edge_expression_at_eof() {
        let program = parse("1 + 2").unwrap();
        assert_eq!(program.body.statements.len(), 1);
    }

    /// EDGE CASE: Unknown token mid-stream surfaces as a lex error
    #[test]
    fn test_edge_lex_error_before_parse() {
        let err = parse("x := 1\ny ~= 2").unwrap_err();
        assert_eq!(err.to_string(), "Unexpected token '~' on line 2, column 3.");
    }

    /// EDGE CASE: Error position survives multi-line input
    #[test]
    fn test_edge_error_position_on_later_line() {
        let err = parse("x := 1\nif 3 {}").unwrap_err();
        assert!(err.to_string().starts_with("2:4:"), "got {}", err);
    }

    /// EDGE CASE: Exactly one error surfaces, never a cascade
    #[test]
    fn test_edge_single_error() {
        let err = parse("func f( {}\nfunc g( {}").unwrap_err();
        let message = err.to_string();
        assert_eq!(message.matches("Expected").count(), 1, "got {}", message);
    }

    /// EDGE CASE: A lambda assigned to a variable
    #[test]
    fn test_edge_lambda_as_value() {
        let program = parse("f := func(x int) int { return x }").unwrap();
        match &program.body.statements[0] {
            Stmt::Definition(d) => {
                assert!(matches!(d.value.as_ref().unwrap(), Expr::Function(_)))
            },
            other => panic!("expected definition, got {:?}", other),
        }
    }

    /// EDGE CASE: Call args spanning operators and nested calls
    #[test]
    fn test_edge_complex_call_args() {
        let program = parse("emit(a + b * c, s.size(), func() {}())").unwrap();
        match &program.body.statements[0] {
            Stmt::Expr(Expr::Call(c)) => assert_eq!(c.args.len(), 3),
            other => panic!("expected call, got {:?}", other),
        }
    }

    /// EDGE CASE: Range loop variables may both be underscores
    #[test]
    fn test_edge_double_underscore_range() {
        let program = parse("for _, _ in pairs {}").unwrap();
        match &program.body.statements[0] {
            Stmt::RangeLoop(l) => {
                assert_eq!(l.first.kind, TokenKind::Underscore);
                assert_eq!(l.second.as_ref().unwrap().kind, TokenKind::Underscore);
            },
            other => panic!("expected range loop, got {:?}", other),
        }
    }

    /// EDGE CASE: Loop over the `in` identifier boundary
    #[test]
    fn test_edge_range_loop_requires_identifier_iterable() {
        assert!(parse("for i in 3 {}").is_err());
    }

    /// EDGE CASE: Statement sequences inside a function body
    #[test]
    fn test_edge_full_function() {
        let source = "func run(n int) int {\n\
                      total := 0\n\
                      for i := 0; i < n; i++ {\n\
                      total += i\n\
                      }\n\
                      return total\n\
                      }";
        let program = parse(source).unwrap();
        match &program.body.statements[0] {
            Stmt::Function(f) => assert_eq!(f.body.statements.len(), 3),
            other => panic!("expected function, got {:?}", other),
        }
    }

    /// EDGE CASE: Program-level round trip
    #[test]
    fn test_edge_program_round_trip() {
        let source = "var a int = 1\n\
                      func add(x, y int) (int) {\n\
                      return (x + y)\n\
                      }\n\
                      if ok {\n\
                      a++\n\
                      }";
        let first = parse(source).unwrap().to_string();
        let second = parse(&first).unwrap().to_string();
        assert_eq!(first, second);
    }
}
