//! Edge case tests for heroc-lex

#[cfg(test)]
mod tests {
    use crate::{Lexer, Token, TokenKind};

    fn tokenize(source: &str) -> Vec<Token> {
        Lexer::new(source).tokenize().expect("tokenize failed")
    }

    // ==================== EDGE CASES ====================

    /// EDGE CASE: Empty source
    #[test]
    fn test_edge_empty_source() {
        assert!(tokenize("").is_empty());
    }

    /// EDGE CASE: Source of only newlines
    #[test]
    fn test_edge_newlines_only() {
        let tokens = tokenize("\n\n\n");
        assert_eq!(tokens.len(), 3);
        assert!(tokens.iter().all(|t| t.kind == TokenKind::NewLine));
        assert_eq!(tokens[2].line, 3);
    }

    /// EDGE CASE: Comment with no trailing newline
    #[test]
    fn test_edge_comment_at_eof() {
        assert!(tokenize("// nothing else").is_empty());
    }

    /// EDGE CASE: Comment as the whole line
    #[test]
    fn test_edge_full_line_comment() {
        let tokens = tokenize("// first\nx");
        assert_eq!(tokens[0].kind, TokenKind::NewLine);
        assert_eq!(tokens[1].lexeme, "x");
        assert_eq!((tokens[1].line, tokens[1].column), (2, 1));
    }

    /// EDGE CASE: Division is not a comment
    #[test]
    fn test_edge_division_not_comment() {
        let tokens = tokenize("a / b");
        assert_eq!(tokens[1].kind, TokenKind::Div);
    }

    /// EDGE CASE: Adjacent operators without spaces
    #[test]
    fn test_edge_adjacent_operators() {
        let kinds: Vec<_> = tokenize("a+=-b").iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::PlusEq,
                TokenKind::Minus,
                TokenKind::Identifier,
            ]
        );
    }

    /// EDGE CASE: Triple plus splits as increment then plus
    #[test]
    fn test_edge_triple_plus() {
        let kinds: Vec<_> = tokenize("+++").iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::Increment, TokenKind::Plus]);
    }

    /// EDGE CASE: Shift then comparison
    #[test]
    fn test_edge_shift_then_less() {
        let kinds: Vec<_> = tokenize("<<<").iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::BitLeftShift, TokenKind::LessThan]);
    }

    /// EDGE CASE: Number glued to a range
    #[test]
    fn test_edge_float_then_dots() {
        // `1...3` captures `1.` as a float, then `..`, then `3`
        let kinds: Vec<_> = tokenize("1...3").iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Float, TokenKind::TwoDots, TokenKind::Int]
        );
    }

    /// EDGE CASE: Keyword glued to punctuation
    #[test]
    fn test_edge_keyword_then_paren() {
        let kinds: Vec<_> = tokenize("return(x)").iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Return,
                TokenKind::LeftParenthesis,
                TokenKind::Identifier,
                TokenKind::RightParenthesis,
            ]
        );
    }

    /// EDGE CASE: Tabs count one column each
    #[test]
    fn test_edge_tab_columns() {
        let tokens = tokenize("\t\tx");
        assert_eq!((tokens[0].line, tokens[0].column), (1, 3));
    }

    /// EDGE CASE: Lex error reports the first unknown only
    #[test]
    fn test_edge_first_unknown_wins() {
        let err = Lexer::new("a @ #").tokenize().unwrap_err();
        assert_eq!(err.lexeme, "@");
        assert_eq!((err.line, err.column), (1, 3));
    }

    /// EDGE CASE: Unknown after newline carries the right line
    #[test]
    fn test_edge_unknown_position_after_newline() {
        let err = Lexer::new("ok\n  @").tokenize().unwrap_err();
        assert_eq!((err.line, err.column), (2, 3));
    }

    // ==================== PROPERTIES ====================

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn word() -> impl Strategy<Value = String> {
            "[a-z][a-z0-9_]{0,8}".prop_filter("keywords excluded", |w| {
                crate::keyword_from_ident(w).is_none()
            })
        }

        fn piece() -> impl Strategy<Value = String> {
            prop_oneof![
                word(),
                "[0-9]{1,6}",
                "[0-9]{1,3}\\.[0-9]{1,3}",
                Just("+".to_string()),
                Just("-=".to_string()),
                Just("<<".to_string()),
                Just("&&".to_string()),
                Just(":=".to_string()),
                Just("(".to_string()),
                Just(")".to_string()),
                Just(",".to_string()),
            ]
        }

        proptest! {
            /// Joining lexemes back together reproduces the input
            /// modulo the whitespace used to separate them.
            #[test]
            fn prop_lexemes_reconstruct_input(pieces in prop::collection::vec(piece(), 0..24)) {
                let source = pieces.join(" ");
                let tokens = Lexer::new(&source).tokenize().unwrap();
                let lexemes: Vec<_> = tokens.iter().map(|t| t.lexeme.clone()).collect();
                prop_assert_eq!(lexemes, pieces);
            }

            /// Columns strictly increase on a single line.
            #[test]
            fn prop_columns_increase(pieces in prop::collection::vec(piece(), 1..24)) {
                let source = pieces.join(" ");
                let tokens = Lexer::new(&source).tokenize().unwrap();
                for pair in tokens.windows(2) {
                    prop_assert!(pair[0].column < pair[1].column);
                }
            }

            /// The token position always points at the lexeme's first
            /// character in the source.
            #[test]
            fn prop_position_points_at_lexeme(pieces in prop::collection::vec(piece(), 1..24)) {
                let source = pieces.join(" ");
                let chars: Vec<char> = source.chars().collect();
                let tokens = Lexer::new(&source).tokenize().unwrap();
                for token in &tokens {
                    let start = token.column as usize - 1;
                    let expected: String = token.lexeme.chars().collect();
                    let got: String = chars[start..start + expected.chars().count()].iter().collect();
                    prop_assert_eq!(got, expected);
                }
            }
        }
    }
}
