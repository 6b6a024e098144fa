//! Statement parsing: definitions, blocks, conditionals, loops,
//! returns, and break/continue.

use heroc_lex::{Token, TokenKind};

use crate::ast::{Block, Definition, ForLoop, If, RangeLoop, Return, Stmt};
use crate::{PResult, Parser};

impl Parser {
    /// Parses one statement, selected by the leading token.
    pub(crate) fn parse_statement(&mut self) -> PResult<Stmt> {
        self.skip_newlines();

        if self.is_labelled_loop() {
            return self.parse_loop();
        }

        match self.peek().map(|t| t.kind) {
            Some(TokenKind::For) => self.parse_loop(),
            Some(TokenKind::Func) => Ok(Stmt::Function(Box::new(self.parse_func(false)?))),
            Some(TokenKind::If) => Ok(Stmt::If(Box::new(self.parse_if()?))),
            Some(TokenKind::LeftBrace) => Ok(Stmt::Block(self.parse_block()?)),
            Some(TokenKind::Return) => Ok(Stmt::Return(self.parse_return()?)),
            Some(TokenKind::Break) => Ok(Stmt::Break(self.expect(TokenKind::Break)?)),
            Some(TokenKind::Continue) => Ok(Stmt::Continue(self.expect(TokenKind::Continue)?)),
            _ => {
                if let Some(definition) = self.attempt_parse_definition()? {
                    return Ok(Stmt::Definition(definition));
                }
                Ok(Stmt::Expr(self.parse_expression()?))
            },
        }
    }

    /// Recognizes the loop-label pattern `identifier ':' NewLine 'for'`
    /// by lookahead, without consuming anything.
    fn is_labelled_loop(&self) -> bool {
        self.next_is(TokenKind::Identifier)
            && self.peek_at(1).is_some_and(|t| t.kind == TokenKind::Colon)
            && self.peek_at(2).is_some_and(|t| t.kind == TokenKind::NewLine)
            && self.peek_at(3).is_some_and(|t| t.kind == TokenKind::For)
    }

    /// Speculatively parses a variable definition.
    ///
    /// Recognizes the `var name [type] [= value]` form and the short
    /// `name := value` form; anything else returns `Ok(None)` with the
    /// cursor unchanged.
    pub(crate) fn attempt_parse_definition(&mut self) -> PResult<Option<Definition>> {
        if self.accept(TokenKind::Var) {
            self.expect(TokenKind::Var)?;
            let name = self.expect(TokenKind::Identifier)?;

            let ty = if self.next_is(TokenKind::Identifier) {
                Some(self.expect(TokenKind::Identifier)?)
            } else {
                None
            };

            let value = if self.next_is(TokenKind::Assign) {
                self.expect(TokenKind::Assign)?;
                Some(self.parse_expression()?)
            } else {
                None
            };

            if ty.is_none() && value.is_none() {
                // a bare `var name` declares nothing
                self.expects_one_of(&[TokenKind::Identifier, TokenKind::Assign])?;
            }

            return Ok(Some(Definition { name, ty, value }));
        }

        if self.next_is(TokenKind::Identifier)
            && self
                .lookahead()
                .is_some_and(|t| t.kind == TokenKind::Declare)
        {
            let name = self.expect(TokenKind::Identifier)?;
            self.expect(TokenKind::Declare)?;
            let value = self.parse_expression()?;
            return Ok(Some(Definition {
                name,
                ty: None,
                value: Some(value),
            }));
        }

        Ok(None)
    }

    /// Parses a brace-delimited block of statements.
    pub(crate) fn parse_block(&mut self) -> PResult<Block> {
        self.expect(TokenKind::LeftBrace)?;

        let mut statements = Vec::new();
        while !self.accept(TokenKind::RightBrace) {
            if self.peek().is_none() {
                self.expect(TokenKind::RightBrace)?;
            }
            statements.push(self.parse_statement()?);
        }
        self.expect(TokenKind::RightBrace)?;

        Ok(Block { statements })
    }

    /// Parses an `if` statement and its else chain.
    ///
    /// The condition may be parenthesized and must be a boolean
    /// expression. A terminal `else` becomes an [`If`] without a
    /// condition.
    pub(crate) fn parse_if(&mut self) -> PResult<If> {
        let if_token = self.expect(TokenKind::If)?;

        let parenthesized = self.accept(TokenKind::LeftParenthesis);
        if parenthesized {
            self.expect(TokenKind::LeftParenthesis)?;
        }
        let condition = self.parse_expression()?;
        if parenthesized {
            self.expect(TokenKind::RightParenthesis)?;
        }

        if !condition.is_boolean() {
            let position = condition
                .position()
                .unwrap_or((if_token.line, if_token.column));
            return Err(crate::ParseError::invalid(
                position,
                "only boolean expressions are allowed in `if`",
            ));
        }

        let body = self.parse_block()?;

        let else_branch = if self.accept(TokenKind::Else) {
            self.expect(TokenKind::Else)?;
            if self.accept(TokenKind::If) {
                Some(Box::new(self.parse_if()?))
            } else {
                Some(Box::new(If {
                    condition: None,
                    body: self.parse_block()?,
                    else_branch: None,
                }))
            }
        } else {
            None
        };

        Ok(If {
            condition: Some(condition),
            body,
            else_branch,
        })
    }

    /// Parses a loop statement.
    ///
    /// Tries the range form first, restoring the cursor when it is not
    /// one, then falls back to the C-style form with up to three
    /// optional clauses.
    pub(crate) fn parse_loop(&mut self) -> PResult<Stmt> {
        let name = if self.is_labelled_loop() {
            let label = self.expect(TokenKind::Identifier)?;
            self.expect(TokenKind::Colon)?;
            self.expect(TokenKind::NewLine)?;
            Some(label)
        } else {
            None
        };

        if let Some(range) = self.attempt_parse_range_loop(&name)? {
            return Ok(Stmt::RangeLoop(Box::new(range)));
        }

        self.expect(TokenKind::For)?;

        // body-only form
        if self.accept(TokenKind::LeftBrace) {
            let body = self.parse_block()?;
            return Ok(Stmt::ForLoop(Box::new(ForLoop {
                name,
                pre: None,
                condition: None,
                post: None,
                body,
            })));
        }

        // first clause: a definition or an expression, possibly empty
        let first = if self.next_is(TokenKind::SemiColon) {
            None
        } else {
            match self.attempt_parse_definition()? {
                Some(definition) => Some(Stmt::Definition(definition)),
                None => Some(Stmt::Expr(self.parse_expression()?)),
            }
        };

        // no `;` after an expression clause: it is the loop condition
        let first = if !self.next_is(TokenKind::SemiColon) {
            match first {
                Some(Stmt::Expr(condition)) => {
                    let body = self.parse_block()?;
                    return Ok(Stmt::ForLoop(Box::new(ForLoop {
                        name,
                        pre: None,
                        condition: Some(condition),
                        post: None,
                        body,
                    })));
                },
                other => other,
            }
        } else {
            first
        };
        self.expect(TokenKind::SemiColon)?;

        let condition = if self.next_is(TokenKind::SemiColon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::SemiColon)?;

        let post = if self.accept(TokenKind::LeftBrace) {
            None
        } else {
            Some(self.parse_expression()?)
        };

        let body = self.parse_block()?;

        Ok(Stmt::ForLoop(Box::new(ForLoop {
            name,
            pre: first.map(Box::new),
            condition,
            post,
            body,
        })))
    }

    /// Speculatively parses the range form
    /// `for first[, second] in iterable { ... }`.
    ///
    /// A miss before `in` restores the cursor and returns `Ok(None)`;
    /// past `in` the loop is committed and errors are fatal.
    fn attempt_parse_range_loop(&mut self, name: &Option<Token>) -> PResult<Option<RangeLoop>> {
        let start = self.snapshot();
        self.expect(TokenKind::For)?;

        if !self.accepts_one_of(&[TokenKind::Identifier, TokenKind::Underscore]) {
            self.restore(start);
            return Ok(None);
        }
        let first = self.expects_one_of(&[TokenKind::Identifier, TokenKind::Underscore])?;

        let second = if self.next_is(TokenKind::Comma) {
            self.expect(TokenKind::Comma)?;
            if !self.accepts_one_of(&[TokenKind::Identifier, TokenKind::Underscore]) {
                self.restore(start);
                return Ok(None);
            }
            Some(self.expects_one_of(&[TokenKind::Identifier, TokenKind::Underscore])?)
        } else {
            None
        };

        if !self.next_is(TokenKind::In) {
            self.restore(start);
            return Ok(None);
        }
        self.expect(TokenKind::In)?;

        let iterable = self.expect(TokenKind::Identifier)?;
        let body = self.parse_block()?;

        Ok(Some(RangeLoop {
            name: name.clone(),
            first,
            second,
            iterable,
            body,
        }))
    }

    /// Parses a `return` statement.
    ///
    /// Values are either a parenthesized list (trailing comma allowed)
    /// or a bare comma-separated list ended by the first token that
    /// cannot start an expression.
    pub(crate) fn parse_return(&mut self) -> PResult<Return> {
        let token = self.expect(TokenKind::Return)?;

        if self.next_is(TokenKind::LeftParenthesis) {
            let values = self
                .delimited(
                    TokenKind::LeftParenthesis,
                    TokenKind::RightParenthesis,
                    TokenKind::Comma,
                    true,
                    |p| p.parse_expression(),
                )?
                .unwrap_or_default();
            return Ok(Return { token, values });
        }

        let mut values = Vec::new();
        while self.starts_expression() {
            values.push(self.parse_expression()?);
            if self.next_is(TokenKind::Comma) {
                self.expect(TokenKind::Comma)?;
            } else {
                break;
            }
        }

        Ok(Return { token, values })
    }

    /// True when the next token can begin a return value.
    fn starts_expression(&self) -> bool {
        self.peek().is_some_and(|t| {
            t.kind == TokenKind::Identifier || t.kind == TokenKind::Func || t.kind.is_literal()
        })
    }
}
