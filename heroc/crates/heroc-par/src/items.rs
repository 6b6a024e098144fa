//! Function declaration parsing.

use heroc_lex::{Token, TokenKind};

use crate::ast::{Expr, Function, Value};
use crate::types::{self, Param};
use crate::{PResult, Parser};

impl Parser {
    /// Parses a function: a named declaration, or a lambda when
    /// `lambda` is set.
    ///
    /// Grammar: `func [name] ( params ) [ type | ( type, ... ) ] block`
    pub(crate) fn parse_func(&mut self, lambda: bool) -> PResult<Function> {
        self.expect(TokenKind::Func)?;

        let name = if lambda {
            None
        } else {
            Some(self.expect(TokenKind::Identifier)?)
        };

        let params = self.parse_func_params()?;

        let return_types = if self.next_is(TokenKind::LeftParenthesis) {
            self.parse_return_type_list()?
        } else if self.next_is(TokenKind::Identifier) {
            vec![self.expect(TokenKind::Identifier)?]
        } else {
            Vec::new()
        };

        let body = self.parse_block()?;

        Ok(Function {
            name,
            params,
            lambda,
            return_types,
            body,
            owner: None,
            private: false,
        })
    }

    /// Parses the parameter list.
    ///
    /// Names without a type accumulate until a type shows up, which
    /// then applies to the whole run. Supports `(x, y int)`,
    /// `(x int, y int)` and `(x, y int, z SomeType)`.
    pub(crate) fn parse_func_params(&mut self) -> PResult<Vec<Param>> {
        self.expect(TokenKind::LeftParenthesis)?;

        if self.accept(TokenKind::RightParenthesis) {
            self.expect(TokenKind::RightParenthesis)?;
            return Ok(Vec::new());
        }

        let mut pending: Vec<Token> = Vec::new();
        let mut params = Vec::new();

        loop {
            let name = self.expect(TokenKind::Identifier)?;
            pending.push(name);

            if self.next_is(TokenKind::Identifier) {
                let ty_token = self.expect(TokenKind::Identifier)?;
                let ty = types::resolve(&ty_token.lexeme);

                for name in pending.drain(..) {
                    params.push(Param {
                        name,
                        ty: ty.clone(),
                        ty_token: ty_token.clone(),
                    });
                }

                let delimiter =
                    self.expects_one_of(&[TokenKind::Comma, TokenKind::RightParenthesis])?;
                if delimiter.kind == TokenKind::RightParenthesis {
                    break;
                }
            } else {
                self.expect(TokenKind::Comma)?;
            }
        }

        Ok(params)
    }

    /// Parses the parenthesized return-type list of a function header.
    ///
    /// The listed names pass through [`Value`] markers before the
    /// tokens are collected.
    fn parse_return_type_list(&mut self) -> PResult<Vec<Token>> {
        let values = self
            .delimited(
                TokenKind::LeftParenthesis,
                TokenKind::RightParenthesis,
                TokenKind::Comma,
                false,
                |p| {
                    let token = p.expect(TokenKind::Identifier)?;
                    Ok(Expr::Value(Value { token }))
                },
            )?
            .unwrap_or_default();

        Ok(values
            .into_iter()
            .filter_map(|expr| match expr {
                Expr::Value(value) => Some(value.token),
                _ => None,
            })
            .collect())
    }
}
