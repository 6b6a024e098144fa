//! The AST walk.

use heroc_lex::{Token, TokenKind};
use heroc_par::ast::{Block, Definition, ForLoop, Function, If, Program, RangeLoop, Return, Stmt};

use crate::error::CheckError;
use crate::scope::ScopeStack;
use crate::Global;

/// What a block hands back to its enclosing construct: the last
/// `return` seen, and the first `break`/`continue` that no loop has
/// absorbed yet.
#[derive(Debug, Default)]
pub struct BlockOutcome<'p> {
    pub last_return: Option<&'p Return>,
    pub break_token: Option<&'p Token>,
    pub continue_token: Option<&'p Token>,
}

impl<'p> BlockOutcome<'p> {
    fn merge(&mut self, other: BlockOutcome<'p>) {
        if other.last_return.is_some() {
            self.last_return = other.last_return;
        }
        if self.break_token.is_none() {
            self.break_token = other.break_token;
        }
        if self.continue_token.is_none() {
            self.continue_token = other.continue_token;
        }
    }
}

/// Checks a program with a fresh checker.
pub fn check(program: &Program) -> Result<(), CheckError> {
    Checker::new().check(program)
}

/// Walks a program, tracking the global type registry and the scope
/// chain.
pub struct Checker {
    global: Global,
    scopes: ScopeStack,
}

impl Checker {
    /// Creates a checker with an empty type registry.
    pub fn new() -> Self {
        Self::with_global(Global::new())
    }

    /// Creates a checker over a pre-populated type registry.
    pub fn with_global(global: Global) -> Self {
        Self {
            global,
            scopes: ScopeStack::new(),
        }
    }

    /// Checks a whole program.
    ///
    /// The program body runs in the global scope; `break`, `continue`
    /// and `return` may not surface there.
    pub fn check(&mut self, program: &Program) -> Result<(), CheckError> {
        let outcome = self.check_block(&program.body)?;

        if let Some(ret) = outcome.last_return {
            return Err(CheckError::UnexpectedReturn {
                line: ret.token.line,
                column: ret.token.column,
            });
        }
        if let Some(token) = outcome.break_token {
            return Err(unexpected_break(token));
        }
        if let Some(token) = outcome.continue_token {
            return Err(unexpected_continue(token));
        }

        Ok(())
    }

    /// Checks the statements of a block in the current scope.
    fn check_block<'p>(&mut self, block: &'p Block) -> Result<BlockOutcome<'p>, CheckError> {
        let mut outcome = BlockOutcome::default();

        for statement in &block.statements {
            match statement {
                Stmt::Function(function) => self.check_func(function)?,
                Stmt::Block(inner) => {
                    let inner = self.check_child_block(inner)?;
                    outcome.merge(inner);
                },
                Stmt::Definition(definition) => self.check_definition(definition)?,
                Stmt::If(if_stmt) => {
                    let inner = self.check_if(if_stmt)?;
                    outcome.merge(inner);
                },
                Stmt::ForLoop(for_loop) => {
                    let inner = self.check_for_loop(for_loop)?;
                    outcome.merge(inner);
                },
                Stmt::RangeLoop(range_loop) => {
                    let inner = self.check_range_loop(range_loop)?;
                    outcome.merge(inner);
                },
                Stmt::Return(ret) => outcome.last_return = Some(ret),
                Stmt::Break(token) => {
                    if outcome.break_token.is_none() {
                        outcome.break_token = Some(token);
                    }
                },
                Stmt::Continue(token) => {
                    if outcome.continue_token.is_none() {
                        outcome.continue_token = Some(token);
                    }
                },
                // expression statements are reserved for later passes
                Stmt::Expr(_) => {},
            }
        }

        Ok(outcome)
    }

    /// Checks a nested block in a fresh child scope.
    fn check_child_block<'p>(&mut self, block: &'p Block) -> Result<BlockOutcome<'p>, CheckError> {
        self.scopes.push();
        let result = self.check_block(block);
        self.scopes.pop();
        result
    }

    /// Checks a named function declaration.
    ///
    /// Declarations are global-only. The name lands in the enclosing
    /// scope; parameters and the body get a child scope. Declared
    /// return types require a final `return` of matching arity;
    /// without them, no `return` may surface from the body.
    fn check_func(&mut self, function: &Function) -> Result<(), CheckError> {
        let name = match &function.name {
            Some(name) => name,
            None => return Ok(()),
        };

        if !self.scopes.is_global() {
            return Err(CheckError::NonGlobalFunction {
                line: name.line,
                column: name.column,
            });
        }

        self.add_func(name)?;

        self.scopes.push();
        let result = self.check_func_scope(function);
        self.scopes.pop();
        let outcome = result?;

        if let Some(token) = outcome.break_token {
            return Err(unexpected_break(token));
        }
        if let Some(token) = outcome.continue_token {
            return Err(unexpected_continue(token));
        }

        if function.return_types.is_empty() {
            if let Some(ret) = outcome.last_return {
                return Err(CheckError::UnexpectedReturn {
                    line: ret.token.line,
                    column: ret.token.column,
                });
            }
            return Ok(());
        }

        match outcome.last_return {
            None => Err(CheckError::MissingReturn {
                line: name.line,
                column: name.column,
            }),
            Some(ret) if ret.values.len() != function.return_types.len() => {
                Err(CheckError::ReturnArity {
                    expected: function.return_types.len(),
                    got: ret.values.len(),
                    line: ret.token.line,
                    column: ret.token.column,
                })
            },
            Some(_) => Ok(()),
        }
    }

    /// Parameter and return type validation plus the body walk, inside
    /// the function's scope.
    fn check_func_scope<'p>(
        &mut self,
        function: &'p Function,
    ) -> Result<BlockOutcome<'p>, CheckError> {
        for param in &function.params {
            self.global.check_for_type(&param.ty_token)?;
            self.add_var(&param.name)?;
        }

        for return_type in &function.return_types {
            self.global.check_for_type(return_type)?;
        }

        self.check_block(&function.body)
    }

    /// Checks a variable definition and registers its name.
    fn check_definition(&mut self, definition: &Definition) -> Result<(), CheckError> {
        if let Some(ty) = &definition.ty {
            self.global.check_for_type(ty)?;
        }
        self.add_var(&definition.name)
    }

    /// Checks an `if` chain; branch outcomes propagate upward.
    fn check_if<'p>(&mut self, if_stmt: &'p If) -> Result<BlockOutcome<'p>, CheckError> {
        let mut outcome = self.check_child_block(&if_stmt.body)?;
        if let Some(else_branch) = &if_stmt.else_branch {
            let inner = self.check_if(else_branch)?;
            outcome.merge(inner);
        }
        Ok(outcome)
    }

    /// Checks a C-style loop. The loop absorbs `break`/`continue`
    /// surfacing from its body.
    fn check_for_loop<'p>(&mut self, for_loop: &'p ForLoop) -> Result<BlockOutcome<'p>, CheckError> {
        self.scopes.push();
        let result = self.check_for_loop_scope(for_loop);
        self.scopes.pop();

        let mut outcome = result?;
        outcome.break_token = None;
        outcome.continue_token = None;
        Ok(outcome)
    }

    fn check_for_loop_scope<'p>(
        &mut self,
        for_loop: &'p ForLoop,
    ) -> Result<BlockOutcome<'p>, CheckError> {
        if let Some(pre) = &for_loop.pre {
            if let Stmt::Definition(definition) = pre.as_ref() {
                self.check_definition(definition)?;
            }
        }
        self.check_block(&for_loop.body)
    }

    /// Checks a range loop. Loop variables (except `_`) register in
    /// the loop scope; `break`/`continue` are absorbed.
    fn check_range_loop<'p>(
        &mut self,
        range_loop: &'p RangeLoop,
    ) -> Result<BlockOutcome<'p>, CheckError> {
        self.scopes.push();
        let result = self.check_range_loop_scope(range_loop);
        self.scopes.pop();

        let mut outcome = result?;
        outcome.break_token = None;
        outcome.continue_token = None;
        Ok(outcome)
    }

    fn check_range_loop_scope<'p>(
        &mut self,
        range_loop: &'p RangeLoop,
    ) -> Result<BlockOutcome<'p>, CheckError> {
        if range_loop.first.kind != TokenKind::Underscore {
            self.add_var(&range_loop.first)?;
        }
        if let Some(second) = &range_loop.second {
            if second.kind != TokenKind::Underscore {
                self.add_var(second)?;
            }
        }
        self.check_block(&range_loop.body)
    }

    /// Rejects a name already taken in the current scope or by a type.
    fn check_collision(&self, token: &Token) -> Result<(), CheckError> {
        if let Some(first) = self.global.type_definition(&token.lexeme) {
            return Err(CheckError::AlreadyDeclaredAsType {
                name: first.lexeme.clone(),
                first_line: first.line,
                first_column: first.column,
                line: token.line,
                column: token.column,
            });
        }

        if let Some(first) = self.scopes.current().get(&token.lexeme) {
            return Err(CheckError::AlreadyDeclared {
                name: first.lexeme.clone(),
                first_line: first.line,
                first_column: first.column,
                line: token.line,
                column: token.column,
            });
        }

        Ok(())
    }

    /// Adds a variable to the current scope.
    fn add_var(&mut self, token: &Token) -> Result<(), CheckError> {
        self.check_collision(token)?;
        self.scopes
            .current_mut()
            .vars
            .insert(token.lexeme.clone(), token.clone());
        Ok(())
    }

    /// Adds a function name to the current scope.
    fn add_func(&mut self, token: &Token) -> Result<(), CheckError> {
        self.check_collision(token)?;
        self.scopes
            .current_mut()
            .funcs
            .insert(token.lexeme.clone(), token.clone());
        Ok(())
    }

    /// True if the name is visible from the current scope.
    pub fn lookup(&self, token: &Token) -> bool {
        self.scopes.lookup(&token.lexeme).is_some()
    }
}

impl Default for Checker {
    fn default() -> Self {
        Self::new()
    }
}

fn unexpected_break(token: &Token) -> CheckError {
    CheckError::UnexpectedBreak {
        line: token.line,
        column: token.column,
    }
}

fn unexpected_continue(token: &Token) -> CheckError {
    CheckError::UnexpectedContinue {
        line: token.line,
        column: token.column,
    }
}
