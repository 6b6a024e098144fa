//! Expression parsing: Pratt precedence climbing, unary prefixes,
//! speculative call parsing and the `delimited` list combinator.

use heroc_lex::{Token, TokenKind};

use crate::ast::{Assignment, Atom, Binary, Call, Expr, Operation};
use crate::error::ParseError;
use crate::{precedence, PResult, Parser, VALUES};

impl Parser {
    /// Parses one expression.
    pub fn parse_expression(&mut self) -> PResult<Expr> {
        let atom = self.parse_atom()?;
        self.parse_binary(atom, None)
    }

    /// Parses an atom: an optional unary prefix followed by a
    /// parenthesized expression, a call, a lambda, a literal or an
    /// identifier.
    pub(crate) fn parse_atom(&mut self) -> PResult<Expr> {
        // at most one prefix; `+` is consumed but marks nothing
        let mut negated = None;
        let mut signed = None;
        if self.accept(TokenKind::Not) {
            negated = Some(self.expect(TokenKind::Not)?);
        } else if self.accept(TokenKind::Plus) {
            self.expect(TokenKind::Plus)?;
        } else if self.accept(TokenKind::Minus) {
            signed = Some(self.expect(TokenKind::Minus)?);
        }

        if self.accept(TokenKind::LeftParenthesis) {
            self.expect(TokenKind::LeftParenthesis)?;
            let inner = self.parse_expression()?;
            self.expect(TokenKind::RightParenthesis)?;
            return apply_prefix(inner, negated, signed);
        }

        if self.accept(TokenKind::Identifier) || self.accept(TokenKind::Func) {
            if let Some(call) = self.attempt_parse_call()? {
                return apply_prefix(call, negated, signed);
            }
        }

        let token = self.expects_one_of(VALUES)?;
        let atom = Expr::Atom(Atom {
            token,
            negated: false,
            signed: false,
        });
        apply_prefix(atom, negated, signed)
    }

    /// Pratt climb over `left`.
    ///
    /// Consumes operators binding tighter than `my_op`, recursing for
    /// right operands and re-entering on the result to pick up
    /// same-precedence neighbors. Postfix `++`/`--` and assignment
    /// operators divert into [`Parser::parse_assignment`].
    pub(crate) fn parse_binary(&mut self, left: Expr, my_op: Option<&Token>) -> PResult<Expr> {
        let my_precedence = match my_op {
            Some(op) => match precedence(op.kind) {
                Some(p) => Some(p),
                None => return Ok(left),
            },
            None => None,
        };

        let mut left = left;
        loop {
            let next_kind = match self.peek() {
                Some(t) => t.kind,
                None => return Ok(left),
            };

            if matches!(next_kind, TokenKind::Increment | TokenKind::Decrement) {
                return self.parse_assignment(left);
            }

            let Some(next_precedence) = precedence(next_kind) else {
                return Ok(left);
            };
            if let Some(mine) = my_precedence {
                if next_precedence <= mine {
                    return Ok(left);
                }
            }

            let operator = self.expect(next_kind)?;

            let right_atom = self.parse_atom()?;
            let right = self.parse_binary(right_atom, Some(&operator))?;

            if matches!(operator.kind, TokenKind::And | TokenKind::Or) {
                assert_boolean_operand(&left, &operator)?;
                assert_boolean_operand(&right, &operator)?;
            }

            let is_assignment = operator.kind.is_assignment_operator();
            let binary = Expr::Binary(Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
                negated: false,
                signed: false,
            });

            if is_assignment {
                return self.parse_assignment(binary);
            }

            left = binary;
        }
    }

    /// Rewrites an assignment-shaped parse into an [`Assignment`].
    ///
    /// Accepts a binary whose operator is `=` or a compound form with
    /// an identifier on the left, or a bare identifier followed by
    /// `++`/`--`. Anything else cannot be assigned to.
    pub(crate) fn parse_assignment(&mut self, target: Expr) -> PResult<Expr> {
        match target {
            Expr::Binary(binary) if binary.operator.kind.is_assignment_operator() => {
                let Binary {
                    left,
                    operator,
                    right,
                    ..
                } = binary;
                match *left {
                    Expr::Atom(atom) if atom.token.kind == TokenKind::Identifier => {
                        let value = if operator.kind == TokenKind::Assign {
                            *right
                        } else {
                            Expr::Operation(Operation {
                                operator,
                                value: Some(right),
                            })
                        };
                        Ok(Expr::Assignment(Box::new(Assignment {
                            identifier: atom.token,
                            value,
                        })))
                    },
                    other => Err(non_identifier_assignment(&other, &operator)),
                }
            },
            Expr::Atom(atom) if atom.token.kind == TokenKind::Identifier => {
                let operator =
                    self.expects_one_of(&[TokenKind::Increment, TokenKind::Decrement])?;
                Ok(Expr::Assignment(Box::new(Assignment {
                    identifier: atom.token,
                    value: Expr::Operation(Operation {
                        operator,
                        value: None,
                    }),
                })))
            },
            other => {
                let position = other.position().unwrap_or((1, 1));
                Err(ParseError::invalid(
                    position,
                    "Cannot assign value to non-identifier",
                ))
            },
        }
    }

    /// Speculatively parses a call starting at the current token.
    ///
    /// Returns `Ok(None)` with the cursor unchanged when the input
    /// turns out not to be a call.
    pub(crate) fn attempt_parse_call(&mut self) -> PResult<Option<Expr>> {
        match self.peek().map(|t| t.kind) {
            Some(TokenKind::Identifier) => self.attempt_parse_named_call(),
            Some(TokenKind::Func) => self.attempt_parse_lambda_call().map(Some),
            _ => Ok(None),
        }
    }

    /// Recognizes `name(...)` and `obj.name(...)`.
    fn attempt_parse_named_call(&mut self) -> PResult<Option<Expr>> {
        let start = self.snapshot();
        let first = self.expect(TokenKind::Identifier)?;

        let (object, name) = if self.next_is(TokenKind::Dot) {
            self.expect(TokenKind::Dot)?;
            if !self.next_is(TokenKind::Identifier) {
                self.restore(start);
                return Ok(None);
            }
            let method = self.expect(TokenKind::Identifier)?;
            (Some(first), method)
        } else {
            (None, first)
        };

        let args = self.delimited(
            TokenKind::LeftParenthesis,
            TokenKind::RightParenthesis,
            TokenKind::Comma,
            false,
            |p| p.parse_expression(),
        )?;

        match args {
            Some(args) => Ok(Some(Expr::Call(Call {
                name: Some(name),
                object,
                args,
                func: None,
                negated: false,
                signed: false,
            }))),
            None if object.is_some() => {
                // obj.name without parens: give back all three tokens
                self.restore(start);
                Ok(None)
            },
            None => {
                // a bare identifier: put it back
                self.unstep();
                Ok(None)
            },
        }
    }

    /// Parses a lambda literal and, when it is immediately invoked,
    /// wraps it in a call.
    fn attempt_parse_lambda_call(&mut self) -> PResult<Expr> {
        let func = self.parse_func(true)?;

        if !self.next_is(TokenKind::LeftParenthesis) {
            return Ok(Expr::Function(Box::new(func)));
        }

        let args = self
            .delimited(
                TokenKind::LeftParenthesis,
                TokenKind::RightParenthesis,
                TokenKind::Comma,
                false,
                |p| p.parse_expression(),
            )?
            .unwrap_or_default();

        Ok(Expr::Call(Call {
            name: None,
            object: None,
            args,
            func: Some(Box::new(func)),
            negated: false,
            signed: false,
        }))
    }

    /// Parses `start inner (sep inner)* sep? stop`.
    ///
    /// Returns `Ok(None)` without consuming anything when `start` is
    /// not next; the trailing separator is only allowed when
    /// `end_sep` is set.
    pub(crate) fn delimited<T>(
        &mut self,
        start: TokenKind,
        stop: TokenKind,
        separator: TokenKind,
        end_sep: bool,
        mut inner: impl FnMut(&mut Self) -> PResult<T>,
    ) -> PResult<Option<Vec<T>>> {
        if !self.next_is(start) {
            return Ok(None);
        }
        self.expect(start)?;

        if self.accept(stop) {
            self.expect(stop)?;
            return Ok(Some(Vec::new()));
        }

        let mut items = vec![inner(self)?];
        loop {
            if self.accept(stop) {
                self.expect(stop)?;
                break;
            }

            self.expect(separator)?;

            if end_sep && self.accept(stop) {
                self.expect(stop)?;
                break;
            }

            items.push(inner(self)?);
        }

        Ok(Some(items))
    }
}

/// Stamps prefix flags onto the parsed node, enforcing what each
/// prefix may apply to.
fn apply_prefix(expr: Expr, negated: Option<Token>, signed: Option<Token>) -> PResult<Expr> {
    let mut expr = expr;

    if let Some(token) = negated {
        expr = negate(expr, &token)?;
    }
    if let Some(token) = signed {
        expr = sign(expr, &token)?;
    }

    Ok(expr)
}

fn negate(mut expr: Expr, token: &Token) -> PResult<Expr> {
    let legal = match &mut expr {
        Expr::Atom(a) if matches!(a.token.kind, TokenKind::Bool | TokenKind::Identifier) => {
            a.negated = true;
            true
        },
        Expr::Call(c) => {
            c.negated = true;
            true
        },
        Expr::Binary(b)
            if b.operator.kind.is_comparison_operator()
                || b.operator.kind.is_boolean_operator() =>
        {
            b.negated = true;
            true
        },
        _ => false,
    };

    if legal {
        Ok(expr)
    } else {
        Err(ParseError::invalid(
            (token.line, token.column),
            "cannot negate non-boolean type",
        ))
    }
}

fn sign(mut expr: Expr, token: &Token) -> PResult<Expr> {
    let legal = match &mut expr {
        Expr::Atom(a)
            if matches!(
                a.token.kind,
                TokenKind::Int | TokenKind::Float | TokenKind::Identifier
            ) =>
        {
            a.signed = true;
            true
        },
        Expr::Call(c) => {
            c.signed = true;
            true
        },
        Expr::Binary(b) if b.operator.kind.is_arithmetic_operator() => {
            b.signed = true;
            true
        },
        _ => false,
    };

    if legal {
        Ok(expr)
    } else {
        Err(ParseError::invalid(
            (token.line, token.column),
            "cannot specify sign of non-number",
        ))
    }
}

fn assert_boolean_operand(operand: &Expr, operator: &Token) -> PResult<()> {
    if operand.is_boolean() {
        return Ok(());
    }
    let position = operand
        .position()
        .unwrap_or((operator.line, operator.column));
    Err(ParseError::invalid(
        position,
        format!("operator '{}' requires boolean operands", operator.lexeme),
    ))
}

fn non_identifier_assignment(target: &Expr, operator: &Token) -> ParseError {
    let position = target
        .position()
        .unwrap_or((operator.line, operator.column));
    ParseError::invalid(position, "Cannot assign value to non-identifier")
}
