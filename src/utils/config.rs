// Scanner constants
pub mod scanner {
    use crate::frontend::token::TokenKind;

    // Keyword lookup is case-sensitive.
    pub const KEYWORDS: &[(&str, TokenKind)] = &[
        ("program", TokenKind::Program),
        ("var", TokenKind::Var),
        ("integer", TokenKind::Integer),
        ("real", TokenKind::Real),
        ("boolean", TokenKind::Boolean),
        ("procedure", TokenKind::Procedure),
        ("begin", TokenKind::Begin),
        ("end", TokenKind::End),
        ("if", TokenKind::If),
        ("then", TokenKind::Then),
        ("else", TokenKind::Else),
        ("while", TokenKind::While),
        ("do", TokenKind::Do),
        ("for", TokenKind::For),
        ("to", TokenKind::To),
        ("downto", TokenKind::Downto),
        ("not", TokenKind::Not),
        ("or", TokenKind::Or),
        ("and", TokenKind::And),
        ("true", TokenKind::True),
        ("false", TokenKind::False),
    ];

    // Whitespace other than newline: space, tab, vertical tab, form feed, CR
    pub const BLANKS: &[char] = &[' ', '\t', '\u{0B}', '\u{0C}', '\r'];

    pub fn keyword(lexeme: &str) -> Option<TokenKind> {
        KEYWORDS
            .iter()
            .find(|(word, _)| *word == lexeme)
            .map(|(_, kind)| *kind)
    }
}

// Panic-mode synchronization sets. Every set stops at end of file so a
// recovery loop can never run past the input.
pub mod parser {
    use crate::frontend::token::TokenKind;

    pub const PROGRAM_HEADER_SYNC: &[TokenKind] = &[
        TokenKind::Var,
        TokenKind::Procedure,
        TokenKind::Begin,
        TokenKind::Eof,
    ];
    pub const VAR_BLOCK_SYNC: &[TokenKind] = &[TokenKind::Procedure, TokenKind::Begin, TokenKind::Eof];
    pub const PROCEDURE_HEADER_SYNC: &[TokenKind] = &[
        TokenKind::Var,
        TokenKind::Procedure,
        TokenKind::Begin,
        TokenKind::Eof,
    ];
    pub const COMMAND_SYNC: &[TokenKind] = &[TokenKind::Semicolon, TokenKind::End, TokenKind::Eof];

    pub const RELATIONAL_OPERATORS: &[TokenKind] = &[
        TokenKind::LessThan,
        TokenKind::LessThanEqual,
        TokenKind::GreaterThan,
        TokenKind::GreaterThanEqual,
        TokenKind::Equal,
        TokenKind::NotEqual,
    ];
    pub const ADDITIVE_OPERATORS: &[TokenKind] = &[TokenKind::Plus, TokenKind::Minus, TokenKind::Or];
    pub const MULTIPLICATIVE_OPERATORS: &[TokenKind] =
        &[TokenKind::Multiply, TokenKind::Divide, TokenKind::And];
    pub const TYPE_NAMES: &[TokenKind] = &[TokenKind::Integer, TokenKind::Real, TokenKind::Boolean];
}

pub mod cli {
    pub const SOURCE_EXTENSION: &str = "pas";
    pub const EXIT_DIAGNOSTICS: u8 = 1;
    pub const EXIT_IO_FAILURE: u8 = 2;
}
