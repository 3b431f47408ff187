use std::fmt;

use crate::ast::Spanned;
use crate::frontend::token::Token;

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub keyword: Token,
    pub decls: Vec<Decl>,
}

impl VarDecl {
    pub fn new(keyword: Token, decls: Vec<Decl>) -> Self {
        Self { keyword, decls }
    }

    /// Declared identifiers in source order, each with its type token.
    pub fn entries(&self) -> impl Iterator<Item = (&Token, &Token)> {
        self.decls
            .iter()
            .flat_map(|decl| decl.ids.iter().map(move |id| (id, &decl.type_token)))
    }
}

impl Spanned for VarDecl {
    fn anchor(&self) -> &Token {
        &self.keyword
    }
}

impl fmt::Display for VarDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "var")?;
        for decl in &self.decls {
            write!(f, " {};", decl)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decl {
    pub type_token: Token,
    pub ids: Vec<Token>,
}

impl Decl {
    pub fn new(type_token: Token, ids: Vec<Token>) -> Self {
        Self { type_token, ids }
    }
}

impl Spanned for Decl {
    fn anchor(&self) -> &Token {
        &self.type_token
    }
}

impl fmt::Display for Decl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<&str> = self.ids.iter().map(|id| id.lexeme.as_str()).collect();
        write!(f, "{}: {}", ids.join(", "), self.type_token.lexeme)
    }
}
