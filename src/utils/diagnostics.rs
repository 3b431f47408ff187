use std::fmt;

use log::debug;

use crate::frontend::token::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Lexical,
    Syntax,
    Semantic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub phase: Phase,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn error(phase: Phase, token: &Token, message: impl Into<String>) -> Self {
        Self::at(Severity::Error, phase, token.line, token.column, message)
    }

    pub fn warning(phase: Phase, token: &Token, message: impl Into<String>) -> Self {
        Self::at(Severity::Warning, phase, token.line, token.column, message)
    }

    pub fn at(severity: Severity, phase: Phase, line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            severity,
            phase,
            line,
            column,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// `path:line:column: message`
    pub fn render(&self, path: &str) -> String {
        format!("{}:{}", path, self)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}:{}: {}: {}", self.line, self.column, label, self.message)
    }
}

/// Receives positioned diagnostics from every phase. Reporting must never
/// fail or abort the pipeline.
pub trait Logger {
    fn report(&mut self, diagnostic: Diagnostic);

    fn error(&mut self, phase: Phase, token: &Token, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.report(Diagnostic::error(phase, token, message));
    }

    fn warn(&mut self, phase: Phase, token: &Token, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.report(Diagnostic::warning(phase, token, message));
    }
}

#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(|d| !d.is_error())
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Diagnostics ordered by line, then column. Reports at the same position
    /// keep their reporting order.
    pub fn sorted(&self) -> Vec<Diagnostic> {
        let mut sorted = self.entries.clone();
        sorted.sort_by_key(|d| (d.line, d.column));
        sorted
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries.iter().map(|d| d.message.clone()).collect()
    }
}

impl Logger for Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        debug!("{:?} diagnostic {}", diagnostic.phase, diagnostic);
        self.entries.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::token::TokenKind;

    #[test]
    fn sorted_orders_by_line_then_column() {
        let mut diagnostics = Diagnostics::new();
        let late = Token::new(TokenKind::Ident, "b", 4, 2, 40);
        let early = Token::new(TokenKind::Ident, "a", 2, 9, 12);
        let same_line = Token::new(TokenKind::Ident, "c", 2, 1, 4);
        diagnostics.error(Phase::Semantic, &late, "late");
        diagnostics.warn(Phase::Syntax, &early, "early");
        diagnostics.error(Phase::Semantic, &same_line, "first");

        let messages: Vec<_> = diagnostics.sorted().into_iter().map(|d| d.message).collect();
        assert_eq!(messages, vec!["first", "early", "late"]);
        assert_eq!(diagnostics.errors().count(), 2);
        assert_eq!(diagnostics.warnings().count(), 1);
    }

    #[test]
    fn render_prefixes_path() {
        let token = Token::new(TokenKind::Ident, "x", 1, 5, 4);
        let diagnostic = Diagnostic::error(Phase::Semantic, &token, "x was not declared");
        assert_eq!(diagnostic.render("a.pas"), "a.pas:1:5: error: x was not declared");
    }
}
