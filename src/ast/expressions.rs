use std::fmt;

use crate::ast::Spanned;
use crate::frontend::token::{Token, TokenKind};
use crate::semantic::types::DataType;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary(Binary),
    Unary(Unary),
    ProcCall(ProcCall),
    NumLit(NumLit),
}

impl Expr {
    /// Strips any number of enclosing parentheses.
    pub fn unparenthesized(&self) -> &Expr {
        let mut expr = self;
        while let Expr::Unary(unary) = expr {
            if !unary.is_paren() {
                break;
            }
            expr = &unary.child;
        }
        expr
    }
}

impl Spanned for Expr {
    fn anchor(&self) -> &Token {
        match self {
            Expr::Binary(binary) => binary.anchor(),
            Expr::Unary(unary) => unary.anchor(),
            Expr::ProcCall(call) => call.anchor(),
            Expr::NumLit(num) => num.anchor(),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Binary(binary) => write!(f, "{}", binary),
            Expr::Unary(unary) => write!(f, "{}", unary),
            Expr::ProcCall(call) => write!(f, "{}", call),
            Expr::NumLit(num) => write!(f, "{}", num),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub op: Token,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    /// Result type, filled in by semantic analysis.
    pub resolved: Option<DataType>,
}

impl Binary {
    pub fn new(op: Token, left: Expr, right: Expr) -> Self {
        Self {
            op,
            left: Box::new(left),
            right: Box::new(right),
            resolved: None,
        }
    }
}

impl Spanned for Binary {
    fn anchor(&self) -> &Token {
        &self.op
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op.lexeme, self.right)
    }
}

/// Unary `+`/`-`, `not`, and parenthesization (operator token `(`).
#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    pub op: Token,
    pub child: Box<Expr>,
}

impl Unary {
    pub fn new(op: Token, child: Expr) -> Self {
        Self {
            op,
            child: Box::new(child),
        }
    }

    pub fn is_paren(&self) -> bool {
        self.op.is(TokenKind::LParen)
    }
}

impl Spanned for Unary {
    fn anchor(&self) -> &Token {
        &self.op
    }
}

impl fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.op.kind {
            TokenKind::LParen => write!(f, "({})", self.child),
            TokenKind::Not => write!(f, "not {}", self.child),
            _ => write!(f, "{}{}", self.op.lexeme, self.child),
        }
    }
}

/// A procedure call, or a variable reference when `args` is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcCall {
    pub name: Token,
    pub args: Option<Vec<Expr>>,
    /// Declared type of the referenced variable, filled in by semantic analysis.
    pub resolved: Option<DataType>,
}

impl ProcCall {
    pub fn new(name: Token, args: Option<Vec<Expr>>) -> Self {
        Self {
            name,
            args,
            resolved: None,
        }
    }

    pub fn is_variable(&self) -> bool {
        self.args.is_none()
    }
}

impl Spanned for ProcCall {
    fn anchor(&self) -> &Token {
        &self.name
    }
}

impl fmt::Display for ProcCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name.lexeme)?;
        if let Some(args) = &self.args {
            let args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
            write!(f, "({})", args.join(", "))?;
        }
        Ok(())
    }
}

/// Numeric and boolean literals. `true` is 1 and `false` is 0.
#[derive(Debug, Clone, PartialEq)]
pub struct NumLit {
    pub token: Token,
    pub value: f64,
}

impl NumLit {
    pub fn new(token: Token, value: f64) -> Self {
        Self { token, value }
    }

    pub fn from_token(token: Token) -> Self {
        let value = match token.kind {
            TokenKind::True => 1.0,
            TokenKind::False => 0.0,
            _ => token.lexeme.parse().unwrap_or(0.0),
        };
        Self::new(token, value)
    }
}

impl Spanned for NumLit {
    fn anchor(&self) -> &Token {
        &self.token
    }
}

impl fmt::Display for NumLit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token.lexeme)
    }
}
