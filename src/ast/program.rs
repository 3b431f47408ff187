use std::fmt;

use crate::ast::{CmdBlock, Spanned, VarDecl};
use crate::frontend::token::{Token, TokenKind};

/// The top-level program and every procedure share this shape. A procedure
/// is told apart by its `procedure` keyword; only procedures carry `params`.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub keyword: Token,
    pub name: Token,
    pub params: Option<VarDecl>,
    pub locals: Option<VarDecl>,
    pub procedures: Vec<Program>,
    pub body: CmdBlock,
}

impl Program {
    pub fn new(
        keyword: Token,
        name: Token,
        params: Option<VarDecl>,
        locals: Option<VarDecl>,
        procedures: Vec<Program>,
        body: CmdBlock,
    ) -> Self {
        Self {
            keyword,
            name,
            params,
            locals,
            procedures,
            body,
        }
    }

    pub fn is_procedure(&self) -> bool {
        self.keyword.is(TokenKind::Procedure)
    }
}

impl Spanned for Program {
    fn anchor(&self) -> &Token {
        &self.keyword
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = if self.is_procedure() { "procedure" } else { "program" };
        write!(f, "{} {}", keyword, self.name.lexeme)?;
        if let Some(params) = &self.params {
            write!(f, "(")?;
            for (i, decl) in params.decls.iter().enumerate() {
                if i > 0 {
                    write!(f, "; ")?;
                }
                write!(f, "{}", decl)?;
            }
            write!(f, ")")?;
        }
        write!(f, "; ")?;
        if let Some(locals) = &self.locals {
            write!(f, "{} ", locals)?;
        }
        for procedure in &self.procedures {
            write!(f, "{} ", procedure)?;
        }
        write!(f, "{}", self.body)?;
        if self.is_procedure() {
            write!(f, ";")
        } else {
            write!(f, ".")
        }
    }
}
