//! AST node definitions.
//!
//! Nodes split into two closed sums: expressions produce values,
//! statements do not. A handful of nodes live in both worlds the way
//! the grammar does: a function literal is an expression, a function
//! declaration a statement, and an assignment is produced inside the
//! expression climb but usually stands alone as a statement.
//!
//! Every node implements `Display` with a printer whose output parses
//! back to a structurally equal tree (positions aside).

use std::fmt;

use heroc_lex::{Token, TokenKind};

use crate::types::Param;

/// A value-producing expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Atom(Atom),
    Binary(Binary),
    Call(Call),
    Operation(Operation),
    /// A `func` literal (lambda).
    Function(Box<Function>),
    Assignment(Box<Assignment>),
    /// Internal marker produced while parsing type lists.
    Value(Value),
}

/// A statement.
#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    Expr(Expr),
    Definition(Definition),
    If(Box<If>),
    ForLoop(Box<ForLoop>),
    RangeLoop(Box<RangeLoop>),
    Return(Return),
    /// A named `func` declaration.
    Function(Box<Function>),
    Block(Block),
    Break(Token),
    Continue(Token),
}

/// The root of a parsed source file.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    pub body: Block,
}

/// A brace-delimited statement list.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

/// A leaf expression: a literal or a bare identifier.
///
/// `negated` is only ever set on bool or identifier atoms, `signed`
/// only on int, float or identifier atoms; never both at once.
#[derive(Clone, Debug, PartialEq)]
pub struct Atom {
    pub token: Token,
    pub negated: bool,
    pub signed: bool,
}

/// A binary operation.
#[derive(Clone, Debug, PartialEq)]
pub struct Binary {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
    pub negated: bool,
    pub signed: bool,
}

/// A call expression.
///
/// Exactly one of `name` and `func` is set: a named (or method) call
/// carries `name`, an immediately-invoked lambda carries `func`.
/// `object` is present only for `obj.name(...)` method calls.
#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    pub name: Option<Token>,
    pub object: Option<Token>,
    pub args: Vec<Expr>,
    pub func: Option<Box<Function>>,
    pub negated: bool,
    pub signed: bool,
}

/// A non-binary operation: `++`, `--`, or the right-hand side of a
/// compound assignment.
#[derive(Clone, Debug, PartialEq)]
pub struct Operation {
    pub operator: Token,
    pub value: Option<Box<Expr>>,
}

/// Internal marker wrapping a type name read inside a type list.
#[derive(Clone, Debug, PartialEq)]
pub struct Value {
    pub token: Token,
}

impl Value {
    /// The type name text.
    pub fn text(&self) -> &str {
        &self.token.lexeme
    }
}

/// A function: named declaration or lambda literal.
#[derive(Clone, Debug, PartialEq)]
pub struct Function {
    /// Declaration name; absent for lambdas.
    pub name: Option<Token>,
    pub params: Vec<Param>,
    pub lambda: bool,
    /// Declared return type names, in order.
    pub return_types: Vec<Token>,
    pub body: Block,
    /// Receiver type for methods; unused until method declarations land.
    pub owner: Option<Token>,
    pub private: bool,
}

/// A variable definition: `var x int = 1`, `var x int`, `var x = 1`,
/// or `x := 1`.
#[derive(Clone, Debug, PartialEq)]
pub struct Definition {
    pub name: Token,
    pub ty: Option<Token>,
    pub value: Option<Expr>,
}

/// An assignment: plain `=`, compound `op=`, or postfix `++`/`--`.
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    pub identifier: Token,
    pub value: Expr,
}

/// An `if` statement. A terminal `else` block is an `If` with no
/// condition; chains lean right through `else_branch`.
#[derive(Clone, Debug, PartialEq)]
pub struct If {
    pub condition: Option<Expr>,
    pub body: Block,
    pub else_branch: Option<Box<If>>,
}

/// A C-style `for` loop. All three clauses are optional.
#[derive(Clone, Debug, PartialEq)]
pub struct ForLoop {
    /// Loop label, when written as `name:` on the preceding line.
    pub name: Option<Token>,
    pub pre: Option<Box<Stmt>>,
    pub condition: Option<Expr>,
    pub post: Option<Expr>,
    pub body: Block,
}

/// A range loop: `for i[, j] in iterable { ... }`.
#[derive(Clone, Debug, PartialEq)]
pub struct RangeLoop {
    pub name: Option<Token>,
    pub first: Token,
    /// Absent in the single-variable form.
    pub second: Option<Token>,
    pub iterable: Token,
    pub body: Block,
}

/// A `return` statement with zero or more values.
#[derive(Clone, Debug, PartialEq)]
pub struct Return {
    pub token: Token,
    pub values: Vec<Expr>,
}

impl Expr {
    /// The source position of a representative token, for error
    /// reporting.
    pub fn position(&self) -> Option<(u32, u32)> {
        match self {
            Expr::Atom(a) => Some((a.token.line, a.token.column)),
            Expr::Binary(b) => b
                .left
                .position()
                .or(Some((b.operator.line, b.operator.column))),
            Expr::Call(c) => c
                .object
                .as_ref()
                .or(c.name.as_ref())
                .map(|t| (t.line, t.column))
                .or_else(|| c.func.as_deref().and_then(Function::position)),
            Expr::Operation(o) => Some((o.operator.line, o.operator.column)),
            Expr::Function(f) => f.position(),
            Expr::Assignment(a) => Some((a.identifier.line, a.identifier.column)),
            Expr::Value(v) => Some((v.token.line, v.token.column)),
        }
    }

    /// Returns true for expressions the front-end treats as boolean:
    /// bool/identifier atoms, calls, and comparison or boolean
    /// binaries.
    pub fn is_boolean(&self) -> bool {
        match self {
            Expr::Atom(a) => matches!(a.token.kind, TokenKind::Bool | TokenKind::Identifier),
            Expr::Call(_) => true,
            Expr::Binary(b) => {
                b.operator.kind.is_comparison_operator() || b.operator.kind.is_boolean_operator()
            },
            _ => false,
        }
    }
}

impl Function {
    fn position(&self) -> Option<(u32, u32)> {
        self.name.as_ref().map(|t| (t.line, t.column))
    }
}

fn join<T: fmt::Display>(items: &[T], separator: &str) -> String {
    items
        .iter()
        .map(T::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Atom(a) => a.fmt(f),
            Expr::Binary(b) => b.fmt(f),
            Expr::Call(c) => c.fmt(f),
            Expr::Operation(o) => o.fmt(f),
            Expr::Function(func) => func.fmt(f),
            Expr::Assignment(a) => a.fmt(f),
            Expr::Value(v) => f.write_str(v.text()),
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str("!")?;
        }
        if self.signed {
            f.write_str("-")?;
        }
        match self.token.kind {
            TokenKind::Str => write!(f, "\"{}\"", self.token.lexeme),
            TokenKind::RawStr => write!(f, "`{}`", self.token.lexeme),
            TokenKind::Rune => write!(f, "'{}'", self.token.lexeme),
            _ => f.write_str(&self.token.lexeme),
        }
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str("!")?;
        }
        if self.signed {
            f.write_str("-")?;
        }
        write!(f, "({} {} {})", self.left, self.operator.lexeme, self.right)
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str("!")?;
        }
        if self.signed {
            f.write_str("-")?;
        }
        if let Some(name) = &self.name {
            if let Some(object) = &self.object {
                write!(f, "{}.", object.lexeme)?;
            }
            f.write_str(&name.lexeme)?;
        } else if let Some(func) = &self.func {
            func.fmt(f)?;
        }
        write!(f, "({})", join(&self.args, ", "))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} {}", self.operator.lexeme, value),
            None => f.write_str(&self.operator.lexeme),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("func")?;
        if let Some(name) = &self.name {
            write!(f, " {}", name.lexeme)?;
        }
        write!(f, "({})", join(&self.params, ", "))?;
        if !self.return_types.is_empty() {
            let names: Vec<&str> = self.return_types.iter().map(|t| t.lexeme.as_str()).collect();
            write!(f, " ({})", names.join(", "))?;
        }
        write!(f, " {}", self.body)
    }
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "var {}", self.name.lexeme)?;
        if let Some(ty) = &self.ty {
            write!(f, " {}", ty.lexeme)?;
        }
        if let Some(value) = &self.value {
            write!(f, " = {}", value)?;
        }
        Ok(())
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Expr::Operation(op) => match &op.value {
                None => write!(f, "{}{}", self.identifier.lexeme, op.operator.lexeme),
                Some(value) => write!(
                    f,
                    "{} {} {}",
                    self.identifier.lexeme, op.operator.lexeme, value
                ),
            },
            value => write!(f, "{} = {}", self.identifier.lexeme, value),
        }
    }
}

impl fmt::Display for If {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.condition {
            Some(condition) => write!(f, "if {} {}", condition, self.body)?,
            None => self.body.fmt(f)?,
        }
        if let Some(else_branch) = &self.else_branch {
            write!(f, " else {}", else_branch)?;
        }
        Ok(())
    }
}

impl fmt::Display for ForLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            writeln!(f, "{}:", name.lexeme)?;
        }
        f.write_str("for ")?;
        match (&self.pre, &self.condition, &self.post) {
            (None, None, None) => {},
            (None, Some(condition), None) => write!(f, "{} ", condition)?,
            (pre, condition, post) => {
                if let Some(pre) = pre {
                    pre.fmt(f)?;
                }
                f.write_str("; ")?;
                if let Some(condition) = condition {
                    condition.fmt(f)?;
                }
                f.write_str("; ")?;
                if let Some(post) = post {
                    post.fmt(f)?;
                }
                f.write_str(" ")?;
            },
        }
        self.body.fmt(f)
    }
}

impl fmt::Display for RangeLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            writeln!(f, "{}:", name.lexeme)?;
        }
        write!(f, "for {}", self.first.lexeme)?;
        if let Some(second) = &self.second {
            write!(f, ", {}", second.lexeme)?;
        }
        write!(f, " in {} {}", self.iterable.lexeme, self.body)
    }
}

impl fmt::Display for Return {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("return")?;
        if !self.values.is_empty() {
            write!(f, " {}", join(&self.values, ", "))?;
        }
        Ok(())
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.statements.is_empty() {
            return f.write_str("{}");
        }
        f.write_str("{\n")?;
        for statement in &self.statements {
            writeln!(f, "{}", statement)?;
        }
        f.write_str("}")
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Expr(e) => e.fmt(f),
            Stmt::Definition(d) => d.fmt(f),
            Stmt::If(i) => i.fmt(f),
            Stmt::ForLoop(l) => l.fmt(f),
            Stmt::RangeLoop(l) => l.fmt(f),
            Stmt::Return(r) => r.fmt(f),
            Stmt::Function(func) => func.fmt(f),
            Stmt::Block(b) => b.fmt(f),
            Stmt::Break(_) => f.write_str("break"),
            Stmt::Continue(_) => f.write_str("continue"),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join(&self.body.statements, "\n"))
    }
}
