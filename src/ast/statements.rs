use std::fmt;

use crate::ast::{Expr, ProcCall, Spanned};
use crate::frontend::token::Token;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Assign(Assign),
    ProcCall(ProcCall),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Block(CmdBlock),
}

impl Spanned for Command {
    fn anchor(&self) -> &Token {
        match self {
            Command::Assign(assign) => assign.anchor(),
            Command::ProcCall(call) => call.anchor(),
            Command::If(stmt) => stmt.anchor(),
            Command::While(stmt) => stmt.anchor(),
            Command::For(stmt) => stmt.anchor(),
            Command::Block(block) => block.anchor(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Assign(assign) => write!(f, "{}", assign),
            // Statement calls print their parentheses only when there are arguments
            Command::ProcCall(call) => match &call.args {
                Some(args) if !args.is_empty() => write!(f, "{}", call),
                _ => write!(f, "{}", call.name.lexeme),
            },
            Command::If(stmt) => write!(f, "{}", stmt),
            Command::While(stmt) => write!(f, "{}", stmt),
            Command::For(stmt) => write!(f, "{}", stmt),
            Command::Block(block) => write!(f, "{}", block),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CmdBlock {
    pub begin: Token,
    pub commands: Vec<Command>,
}

impl CmdBlock {
    pub fn new(begin: Token, commands: Vec<Command>) -> Self {
        Self { begin, commands }
    }
}

impl Spanned for CmdBlock {
    fn anchor(&self) -> &Token {
        &self.begin
    }
}

impl fmt::Display for CmdBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "begin")?;
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                write!(f, ";")?;
            }
            write!(f, " {}", command)?;
        }
        write!(f, " end")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub op: Token,
    pub target: Token,
    pub expr: Expr,
}

impl Assign {
    pub fn new(op: Token, target: Token, expr: Expr) -> Self {
        Self { op, target, expr }
    }
}

impl Spanned for Assign {
    fn anchor(&self) -> &Token {
        &self.op
    }
}

impl fmt::Display for Assign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} := {}", self.target.lexeme, self.expr)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub keyword: Token,
    pub condition: Expr,
    pub then_branch: Box<Command>,
    pub else_branch: Option<Box<Command>>,
}

impl IfStmt {
    pub fn new(keyword: Token, condition: Expr, then_branch: Command, else_branch: Option<Command>) -> Self {
        Self {
            keyword,
            condition,
            then_branch: Box::new(then_branch),
            else_branch: else_branch.map(Box::new),
        }
    }
}

impl Spanned for IfStmt {
    fn anchor(&self) -> &Token {
        &self.keyword
    }
}

impl fmt::Display for IfStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "if {} then {}", self.condition, self.then_branch)?;
        if let Some(else_branch) = &self.else_branch {
            write!(f, " else {}", else_branch)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub keyword: Token,
    pub condition: Expr,
    pub body: Box<Command>,
}

impl WhileStmt {
    pub fn new(keyword: Token, condition: Expr, body: Command) -> Self {
        Self {
            keyword,
            condition,
            body: Box::new(body),
        }
    }
}

impl Spanned for WhileStmt {
    fn anchor(&self) -> &Token {
        &self.keyword
    }
}

impl fmt::Display for WhileStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "while {} do {}", self.condition, self.body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    To,
    Downto,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::To => f.write_str("to"),
            Direction::Downto => f.write_str("downto"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub keyword: Token,
    pub init: Assign,
    pub direction: Direction,
    pub bound: Expr,
    pub body: Box<Command>,
}

impl ForStmt {
    pub fn new(keyword: Token, init: Assign, direction: Direction, bound: Expr, body: Command) -> Self {
        Self {
            keyword,
            init,
            direction,
            bound,
            body: Box::new(body),
        }
    }
}

impl Spanned for ForStmt {
    fn anchor(&self) -> &Token {
        &self.keyword
    }
}

impl fmt::Display for ForStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "for {} {} {} do {}", self.init, self.direction, self.bound, self.body)
    }
}
