use crate::frontend::token::{Token, TokenKind};

/// Downstream consumer of the parser's token traffic, typically a source
/// formatter. Comments arrive in increasing offset order and never reach the
/// grammar rules.
pub trait FormatterSink {
    fn write_token(&mut self, token: &Token);
    fn add_comment(&mut self, comment: &Token);
}

/// Records everything the parser forwards.
#[derive(Debug, Default, Clone)]
pub struct TokenRecorder {
    pub tokens: Vec<Token>,
    pub comments: Vec<Token>,
}

impl TokenRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokens and comments merged back into source order. A comment is placed
    /// before the first token whose offset follows it.
    pub fn interleaved(&self) -> Vec<&Token> {
        let mut merged = Vec::with_capacity(self.tokens.len() + self.comments.len());
        let mut comments = self.comments.iter().peekable();
        for token in &self.tokens {
            while let Some(comment) = comments.next_if(|c| c.offset < token.offset) {
                merged.push(comment);
            }
            merged.push(token);
        }
        merged.extend(comments);
        merged
    }

    /// Lexemes of the consumed tokens joined by single spaces.
    pub fn source_text(&self) -> String {
        self.tokens
            .iter()
            .filter(|t| !t.is(TokenKind::Eof))
            .map(|t| t.lexeme.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl FormatterSink for TokenRecorder {
    fn write_token(&mut self, token: &Token) {
        self.tokens.push(token.clone());
    }

    fn add_comment(&mut self, comment: &Token) {
        self.comments.push(comment.clone());
    }
}
