use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Punctuation
    LParen,
    RParen,
    Dot,
    Semicolon,
    Colon,
    Comma,
    Assign,
    // Relational
    Equal,
    NotEqual,
    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,
    // Arithmetic
    Plus,
    Minus,
    Multiply,
    Divide,
    // Logical
    Or,
    And,
    Not,
    // Literals
    IntConst,
    RealConst,
    True,
    False,
    // Keywords
    Program,
    Var,
    Integer,
    Real,
    Boolean,
    Procedure,
    Begin,
    End,
    If,
    Then,
    Else,
    While,
    Do,
    For,
    To,
    Downto,
    Ident,
    Comment,
    Other,
    Eof,
}

impl TokenKind {
    pub fn is_relational(self) -> bool {
        matches!(
            self,
            TokenKind::Equal
                | TokenKind::NotEqual
                | TokenKind::LessThan
                | TokenKind::LessThanEqual
                | TokenKind::GreaterThan
                | TokenKind::GreaterThanEqual
        )
    }

    pub fn is_logical(self) -> bool {
        matches!(self, TokenKind::Or | TokenKind::And)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Dot => "'.'",
            TokenKind::Semicolon => "';'",
            TokenKind::Colon => "':'",
            TokenKind::Comma => "','",
            TokenKind::Assign => "':='",
            TokenKind::Equal => "'='",
            TokenKind::NotEqual => "'<>'",
            TokenKind::LessThan => "'<'",
            TokenKind::LessThanEqual => "'<='",
            TokenKind::GreaterThan => "'>'",
            TokenKind::GreaterThanEqual => "'>='",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Multiply => "'*'",
            TokenKind::Divide => "'/'",
            TokenKind::Or => "'or'",
            TokenKind::And => "'and'",
            TokenKind::Not => "'not'",
            TokenKind::IntConst => "integer constant",
            TokenKind::RealConst => "real constant",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::Program => "'program'",
            TokenKind::Var => "'var'",
            TokenKind::Integer => "'integer'",
            TokenKind::Real => "'real'",
            TokenKind::Boolean => "'boolean'",
            TokenKind::Procedure => "'procedure'",
            TokenKind::Begin => "'begin'",
            TokenKind::End => "'end'",
            TokenKind::If => "'if'",
            TokenKind::Then => "'then'",
            TokenKind::Else => "'else'",
            TokenKind::While => "'while'",
            TokenKind::Do => "'do'",
            TokenKind::For => "'for'",
            TokenKind::To => "'to'",
            TokenKind::Downto => "'downto'",
            TokenKind::Ident => "identifier",
            TokenKind::Comment => "comment",
            TokenKind::Other => "unrecognized symbol",
            TokenKind::Eof => "end of file",
        };
        f.write_str(name)
    }
}

/// A scanned token. `offset` is the byte offset of the first character in the
/// source buffer; formatters use it to replay comments in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, column: usize, offset: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
            offset,
        }
    }

    /// Stand-in for a token the parser expected but never received. It keeps
    /// the position of the token found instead.
    pub fn missing(at: &Token) -> Self {
        Self::new(TokenKind::Other, "", at.line, at.column, at.offset)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {:?} '{}'", self.line, self.column, self.kind, self.lexeme)
    }
}
