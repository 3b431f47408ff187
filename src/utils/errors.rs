use std::io;
use thiserror::Error;

use crate::frontend::token::Token;

#[derive(Debug, Error)]
pub enum FrontendError {
    // File and I/O errors
    #[error("File read error: {0}")]
    FileRead(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // Raised inside a grammar rule to unwind to the nearest recovery point.
    // The diagnostic has already been reported when this is constructed.
    #[error("Syntax error at line {line} column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FrontendError {
    /// Create a syntax error anchored at `token`
    pub fn syntax(token: &Token, message: impl Into<String>) -> Self {
        FrontendError::Syntax {
            line: token.line,
            column: token.column,
            message: message.into(),
        }
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, FrontendError::Syntax { .. })
    }
}

pub type FrontendResult<T> = Result<T, FrontendError>;
