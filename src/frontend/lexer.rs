use std::{iter::Peekable, str::CharIndices};

use log::trace;

use crate::frontend::token::{Token, TokenKind};
use crate::utils::config::scanner::{keyword, BLANKS};
use crate::utils::diagnostics::{Diagnostic, Phase, Severity};

/// Produces tokens on demand. After the input is exhausted every call
/// returns the same end-of-file token, placed right after the last token.
pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    line: usize,
    column: usize,
    // Position just past the last token produced: (line, column, offset)
    last_end: (usize, usize, usize),
    finished: bool,
    truncated: bool,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            line: 1,
            column: 1,
            last_end: (1, 1, 0),
            finished: false,
            truncated: false,
            diagnostics: Vec::new(),
        }
    }

    pub fn next_token(&mut self) -> Token {
        if self.finished {
            return self.eof_token();
        }

        if !self.skip_blanks() {
            self.finished = true;
            return self.eof_token();
        }

        let (line, column, offset) = (self.line, self.column, self.offset());
        let token = match self.peek_char() {
            Some('{') => match self.scan_comment(line, column, offset) {
                Some(token) => token,
                None => {
                    self.finished = true;
                    self.truncated = true;
                    return self.eof_token();
                }
            },
            Some(ch) if ch.is_ascii_alphabetic() => self.scan_identifier(line, column, offset),
            Some(ch) if ch.is_ascii_digit() => self.scan_number(line, column, offset),
            Some(':') => self.scan_pair(':', &[('=', TokenKind::Assign)], TokenKind::Colon),
            Some('<') => self.scan_pair(
                '<',
                &[('=', TokenKind::LessThanEqual), ('>', TokenKind::NotEqual)],
                TokenKind::LessThan,
            ),
            Some('>') => self.scan_pair('>', &[('=', TokenKind::GreaterThanEqual)], TokenKind::GreaterThan),
            Some(ch) => self.scan_single_char_token(ch, line, column, offset),
            None => {
                self.finished = true;
                return self.eof_token();
            }
        };

        self.last_end = (self.line, self.column, self.offset());
        trace!("scanned {}", token);
        token
    }

    /// True once an unterminated comment cut the token stream short.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    fn eof_token(&self) -> Token {
        let (line, column, offset) = self.last_end;
        Token::new(TokenKind::Eof, "", line, column, offset)
    }

    fn offset(&mut self) -> usize {
        self.chars.peek().map(|(i, _)| *i).unwrap_or(self.source.len())
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, ch)| *ch)
    }

    fn peek_second(&self) -> Option<char> {
        self.chars.clone().nth(1).map(|(_, ch)| ch)
    }

    fn bump(&mut self) -> Option<char> {
        let (_, ch) = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn report(&mut self, line: usize, column: usize, message: String) {
        self.diagnostics
            .push(Diagnostic::at(Severity::Error, Phase::Lexical, line, column, message));
    }

    // Skips whitespace, newlines and stray closing braces. Returns false at end of input.
    fn skip_blanks(&mut self) -> bool {
        loop {
            match self.peek_char() {
                None => return false,
                Some('\n') => {
                    self.bump();
                }
                Some(ch) if BLANKS.contains(&ch) => {
                    self.bump();
                }
                Some('}') => {
                    let (line, column) = (self.line, self.column);
                    self.report(line, column, "there is no corresponding '{'.".to_string());
                    self.bump();
                }
                Some(_) => return true,
            }
        }
    }

    fn scan_comment(&mut self, line: usize, column: usize, offset: usize) -> Option<Token> {
        let mut lexeme = String::new();
        while let Some(ch) = self.bump() {
            lexeme.push(ch);
            if ch == '}' {
                return Some(Token::new(TokenKind::Comment, lexeme, line, column, offset));
            }
        }
        self.report(line, column, "this comment wasn't closed.".to_string());
        None
    }

    fn scan_identifier(&mut self, line: usize, column: usize, offset: usize) -> Token {
        let mut identifier = String::new();
        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                identifier.push(ch);
                self.bump();
            } else {
                break;
            }
        }
        let kind = keyword(&identifier).unwrap_or(TokenKind::Ident);
        Token::new(kind, identifier, line, column, offset)
    }

    fn scan_number(&mut self, line: usize, column: usize, offset: usize) -> Token {
        let mut number = String::new();
        self.take_digits(&mut number);

        // One decimal point, and only when a digit follows it
        let is_real = self.peek_char() == Some('.') && self.peek_second().is_some_and(|ch| ch.is_ascii_digit());
        if is_real {
            number.push('.');
            self.bump();
            self.take_digits(&mut number);
        }

        let kind = if is_real { TokenKind::RealConst } else { TokenKind::IntConst };
        Token::new(kind, number, line, column, offset)
    }

    fn take_digits(&mut self, into: &mut String) {
        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_digit() {
                into.push(ch);
                self.bump();
            } else {
                break;
            }
        }
    }

    // Operators resolved with one character of lookahead: `:=`, `<=`, `<>`, `>=`
    fn scan_pair(&mut self, first: char, seconds: &[(char, TokenKind)], single: TokenKind) -> Token {
        let (line, column, offset) = (self.line, self.column, self.offset());
        self.bump(); // Consume the first character
        if let Some(next) = self.peek_char() {
            if let Some((second, kind)) = seconds.iter().find(|(second, _)| *second == next) {
                self.bump();
                return Token::new(*kind, format!("{}{}", first, second), line, column, offset);
            }
        }
        Token::new(single, first.to_string(), line, column, offset)
    }

    fn scan_single_char_token(&mut self, ch: char, line: usize, column: usize, offset: usize) -> Token {
        self.bump(); // Consume the character
        let kind = match ch {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Multiply,
            '/' => TokenKind::Divide,
            '=' => TokenKind::Equal,
            ';' => TokenKind::Semicolon,
            '.' => TokenKind::Dot,
            ',' => TokenKind::Comma,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            _ => {
                self.report(line, column, format!("Unrecognized symbol: '{}'.", ch));
                TokenKind::Other
            }
        };
        Token::new(kind, ch.to_string(), line, column, offset)
    }
}

/// Drains a source text into its full token stream, comments and the
/// trailing end-of-file token included.
pub fn scan(source: &str) -> (Vec<Token>, Vec<Diagnostic>) {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.is(TokenKind::Eof);
        tokens.push(token);
        if done {
            break;
        }
    }
    (tokens, lexer.take_diagnostics())
}
