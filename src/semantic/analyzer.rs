use log::{debug, info};

use crate::ast::{Assign, CmdBlock, Command, Expr, ForStmt, ProcCall, Program, VarDecl};
use crate::frontend::token::{Token, TokenKind};
use crate::semantic::symboltable::{unused_entries, Scope, ScopeEntry, SymbolKind, SymbolTable};
use crate::semantic::types::{accepts, DataType, Operand};
use crate::utils::diagnostics::{Diagnostic, Logger, Phase};

/// Walks `program` once, reporting every semantic problem through `logger`,
/// and returns it with resolved types filled in. Each call starts from an
/// empty symbol table.
pub fn analyze(mut program: Program, logger: &mut dyn Logger) -> Program {
    let mut analyzer = Analyzer::new(logger);
    analyzer.program(&mut program);
    info!("semantic analysis of '{}' finished", program.name.lexeme);
    program
}

struct Analyzer<'a> {
    table: SymbolTable,
    logger: &'a mut dyn Logger,
}

impl<'a> Analyzer<'a> {
    fn new(logger: &'a mut dyn Logger) -> Self {
        Self {
            table: SymbolTable::new(),
            logger,
        }
    }

    fn error(&mut self, token: &Token, message: impl Into<String>) {
        self.logger.report(Diagnostic::error(Phase::Semantic, token, message));
    }

    fn program(&mut self, program: &mut Program) {
        self.table
            .define(&program.name.lexeme, ScopeEntry::program(program.name.clone()));
        if let Some(locals) = &program.locals {
            self.declare_variables(locals, false);
        }
        for procedure in &mut program.procedures {
            self.procedure(procedure);
        }
        self.block(&mut program.body);

        let global = self.table.global().clone();
        self.report_unused(&global);
        debug_assert_eq!(self.table.depth(), 0, "unbalanced scope stack");
    }

    fn procedure(&mut self, procedure: &mut Program) {
        let name = procedure.name.lexeme.clone();
        if !name.is_empty() {
            let args: Vec<DataType> = procedure
                .params
                .iter()
                .flat_map(|params| params.entries())
                .filter_map(|(_, type_token)| DataType::from_token_kind(type_token.kind))
                .collect();
            if !self.table.define(&name, ScopeEntry::procedure(procedure.name.clone(), args)) {
                self.error(&procedure.name, format!("name '{}' already in use.", name));
            }
        }

        self.table.push_scope();
        if let Some(params) = &procedure.params {
            self.declare_variables(params, true);
        }
        if let Some(locals) = &procedure.locals {
            self.declare_variables(locals, false);
        }
        for nested in &mut procedure.procedures {
            self.procedure(nested);
        }
        self.block(&mut procedure.body);

        if let Ok(scope) = self.table.pop_scope() {
            self.report_unused(&scope);
        }
    }

    // Parameters are bound by the caller, so they start out initialized.
    fn declare_variables(&mut self, decl: &VarDecl, initialized: bool) {
        for (id, type_token) in decl.entries() {
            let Some(data_type) = DataType::from_token_kind(type_token.kind) else {
                continue;
            };
            let mut entry = ScopeEntry::variable(id.clone(), data_type);
            entry.was_initialized = initialized;
            if !self.table.define(&id.lexeme, entry) {
                self.error(id, format!("Variable '{}' already declared", id.lexeme));
            }
        }
    }

    fn report_unused(&mut self, scope: &Scope) {
        for (name, entry) in unused_entries(scope) {
            let message = match entry.kind {
                SymbolKind::Procedure => format!("Procedure '{}' was never called.", name),
                _ => format!("Variable '{}' was never used.", name),
            };
            self.error(&entry.token, message);
        }
    }

    fn block(&mut self, block: &mut CmdBlock) {
        for command in &mut block.commands {
            self.command(command);
        }
    }

    fn command(&mut self, command: &mut Command) {
        match command {
            Command::Assign(assign) => self.assign(assign),
            Command::ProcCall(call) => self.call_statement(call),
            Command::If(stmt) => {
                self.expression(&mut stmt.condition, Some(DataType::Boolean));
                self.command(&mut stmt.then_branch);
                if let Some(else_branch) = &mut stmt.else_branch {
                    self.command(else_branch);
                }
            }
            Command::While(stmt) => {
                self.expression(&mut stmt.condition, Some(DataType::Boolean));
                self.command(&mut stmt.body);
            }
            Command::For(stmt) => self.for_loop(stmt),
            Command::Block(block) => self.block(block),
        }
    }

    // The right-hand side is checked before the target counts as initialized,
    // so `x := x + 1` on a fresh `x` is still reported.
    fn assign(&mut self, assign: &mut Assign) {
        let name = assign.target.lexeme.clone();
        let expected = match self.table.lookup(&name).map(|entry| entry.kind) {
            Some(SymbolKind::Procedure) => {
                self.error(&assign.op, "Cannot assign to procedure.");
                None
            }
            Some(SymbolKind::Program) => {
                self.error(&assign.op, "Cannot assign to program.");
                None
            }
            Some(SymbolKind::Variable(data_type)) => Some(data_type),
            None => {
                self.error(&assign.target, format!("{} was not declared", name));
                None
            }
        };

        self.expression(&mut assign.expr, expected);

        if expected.is_some() {
            self.table.mark_initialized(&name);
            self.table.mark_used(&name);
        }
    }

    fn for_loop(&mut self, stmt: &mut ForStmt) {
        let target = stmt.init.target.clone();
        match self.table.lookup(&target.lexeme).map(|entry| entry.kind) {
            Some(kind) => {
                match kind {
                    SymbolKind::Procedure => self.error(&stmt.init.op, "Cannot assign to procedure."),
                    SymbolKind::Program => self.error(&stmt.init.op, "Cannot assign to program."),
                    SymbolKind::Variable(DataType::Integer) => {}
                    SymbolKind::Variable(_) => self.error(&target, "'for' control variable must be integer."),
                }
                if self.table.lookup_in_current(&target.lexeme).is_none() {
                    self.error(&target, "'for' control variable must be declared in the local scope.");
                }
            }
            None => self.error(&target, format!("{} was not declared", target.lexeme)),
        }

        self.expression(&mut stmt.init.expr, Some(DataType::Integer));
        if let Some(SymbolKind::Variable(_)) = self.table.lookup(&target.lexeme).map(|entry| entry.kind) {
            self.table.mark_initialized(&target.lexeme);
            self.table.mark_used(&target.lexeme);
        }

        self.expression(&mut stmt.bound, Some(DataType::Integer));
        self.command(&mut stmt.body);
    }

    fn call_statement(&mut self, call: &mut ProcCall) {
        let name = call.name.lexeme.clone();
        match self.table.lookup(&name).map(|entry| entry.kind) {
            Some(SymbolKind::Procedure) => self.procedure_call(call),
            found => {
                if found.is_none() {
                    self.error(&call.name, format!("'{}' is not declared.", name));
                } else {
                    self.error(&call.name, format!("'{}' is not a procedure.", name));
                }
                self.unconstrained_args(call);
            }
        }
    }

    fn unconstrained_args(&mut self, call: &mut ProcCall) {
        for arg in call.args.iter_mut().flatten() {
            self.expression(arg, None);
        }
    }

    // Arguments beyond the declared count are still walked, with no expected
    // type, so problems inside them surface.
    fn procedure_call(&mut self, call: &mut ProcCall) {
        let name = call.name.lexeme.clone();
        let declared = self
            .table
            .lookup(&name)
            .and_then(|entry| entry.args.clone())
            .unwrap_or_default();
        self.table.mark_used(&name);

        let supplied = call.args.as_ref().map_or(0, Vec::len);
        if supplied < declared.len() {
            self.error(
                &call.name,
                format!("Received too little arguments ({}), expected {}", supplied, declared.len()),
            );
        } else if supplied > declared.len() {
            self.error(
                &call.name,
                format!("Received too much arguments ({}), expected {}", supplied, declared.len()),
            );
        }

        for (i, arg) in call.args.iter_mut().flatten().enumerate() {
            self.expression(arg, declared.get(i).copied());
        }
    }

    fn expression(&mut self, expr: &mut Expr, expected: Option<DataType>) {
        match expr {
            Expr::ProcCall(call) => self.reference(call, expected),
            Expr::NumLit(literal) => {
                if let Some(actual) = Operand::from_literal(literal.token.kind) {
                    self.compare(expected, actual, &literal.token);
                }
            }
            Expr::Unary(unary) if unary.is_paren() => self.expression(&mut unary.child, expected),
            Expr::Unary(unary) if unary.op.is(TokenKind::Not) => {
                if let Some(data_type) = expected.filter(|data_type| *data_type != DataType::Boolean) {
                    self.error(&unary.op, format!("Expected '{}' but got 'boolean' instead.", data_type));
                }
                self.expression(&mut unary.child, Some(DataType::Boolean));
            }
            Expr::Unary(unary) => {
                let operand = match expected {
                    Some(DataType::Boolean) => {
                        self.error(&unary.op, "Expected 'boolean' but got 'number' instead.");
                        DataType::Real
                    }
                    Some(data_type) => data_type,
                    None => self.numeric_type(&unary.child),
                };
                self.expression(&mut unary.child, Some(operand));
            }
            Expr::Binary(binary) if binary.op.kind.is_relational() || binary.op.kind.is_logical() => {
                if let Some(data_type) = expected.filter(|data_type| *data_type != DataType::Boolean) {
                    self.error(&binary.op, format!("Expected '{}' but got 'boolean' instead.", data_type));
                }
                binary.resolved = Some(DataType::Boolean);
                // Comparison operands are left unconstrained
                let operands = binary.op.kind.is_logical().then_some(DataType::Boolean);
                self.expression(&mut binary.left, operands);
                self.expression(&mut binary.right, operands);
            }
            Expr::Binary(binary) => {
                let operand = match expected {
                    Some(DataType::Boolean) => {
                        self.error(&binary.op, "Expected 'boolean' but got 'number' instead.");
                        DataType::Real
                    }
                    Some(data_type) => data_type,
                    None if binary.op.is(TokenKind::Divide) => DataType::Real,
                    None if self.is_integer_typed(&binary.left) && self.is_integer_typed(&binary.right) => {
                        DataType::Integer
                    }
                    None => DataType::Real,
                };
                debug!(
                    "arithmetic '{}' at {}:{} resolved to {}",
                    binary.op.lexeme, binary.op.line, binary.op.column, operand
                );
                binary.resolved = Some(operand);
                self.expression(&mut binary.left, Some(operand));
                self.expression(&mut binary.right, Some(operand));
            }
        }
    }

    fn numeric_type(&self, expr: &Expr) -> DataType {
        if self.is_integer_typed(expr) {
            DataType::Integer
        } else {
            DataType::Real
        }
    }

    // Integer literals, integer variables, and `+ - *` over those.
    fn is_integer_typed(&self, expr: &Expr) -> bool {
        match expr {
            Expr::NumLit(literal) => literal.token.is(TokenKind::IntConst),
            Expr::ProcCall(call) => {
                call.is_variable()
                    && self
                        .table
                        .lookup(&call.name.lexeme)
                        .and_then(ScopeEntry::data_type)
                        == Some(DataType::Integer)
            }
            Expr::Unary(unary) => !unary.op.is(TokenKind::Not) && self.is_integer_typed(&unary.child),
            Expr::Binary(binary) => {
                matches!(binary.op.kind, TokenKind::Plus | TokenKind::Minus | TokenKind::Multiply)
                    && self.is_integer_typed(&binary.left)
                    && self.is_integer_typed(&binary.right)
            }
        }
    }

    // A name in expression position: normally a variable reference.
    fn reference(&mut self, call: &mut ProcCall, expected: Option<DataType>) {
        let name = call.name.lexeme.clone();
        let Some(entry) = self.table.lookup(&name).cloned() else {
            self.error(&call.name, format!("Variable '{}' never declared.", name));
            self.unconstrained_args(call);
            return;
        };

        if self.table.lookup_in_current(&name).is_some() && !entry.was_initialized {
            self.error(&call.name, format!("Variable '{}' was not initialized.", name));
        }
        self.table.mark_used(&name);

        match entry.kind {
            SymbolKind::Procedure => {
                self.error(&call.name, "Procedures do not have return value.");
                self.procedure_call(call);
            }
            SymbolKind::Program => {
                self.error(&call.name, format!("'{}' is not a variable.", name));
                self.unconstrained_args(call);
            }
            SymbolKind::Variable(_) if call.args.is_some() => {
                self.error(&call.name, format!("Variable {} is not a procedure.", name));
                self.unconstrained_args(call);
            }
            SymbolKind::Variable(data_type) => {
                call.resolved = Some(data_type);
                self.compare(expected, Operand::Typed(data_type), &call.name);
            }
        }
    }

    fn compare(&mut self, expected: Option<DataType>, actual: Operand, at: &Token) {
        let Some(expected) = expected else {
            return;
        };
        if !accepts(expected, actual) {
            self.error(at, format!("Expected {}, got {}", expected, actual.type_name()));
        }
    }
}
