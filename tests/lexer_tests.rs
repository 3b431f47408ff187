use minipas::frontend::lexer::{scan, Lexer};
use minipas::frontend::token::{Token, TokenKind};
use minipas::{Phase, Severity};
use test_log::test;

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind).collect()
}

fn lexemes(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.lexeme.as_str()).collect()
}

#[test]
fn test_number_literals() {
    let (tokens, diagnostics) = scan("123 4.5 6.7.8 9.");
    assert!(diagnostics.is_empty());
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::IntConst,
            TokenKind::RealConst,
            TokenKind::RealConst,
            TokenKind::Dot,
            TokenKind::IntConst,
            TokenKind::IntConst,
            TokenKind::Dot,
            TokenKind::Eof,
        ]
    );
    assert_eq!(lexemes(&tokens), vec!["123", "4.5", "6.7", ".", "8", "9", ".", ""]);
}

#[test]
fn test_keywords_are_case_sensitive() {
    let (tokens, _) = scan("begin Begin BEGIN program downto true False");
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Begin,
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::Program,
            TokenKind::Downto,
            TokenKind::True,
            TokenKind::Ident,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_identifiers() {
    let (tokens, diagnostics) = scan("a_1 b2c x");
    assert!(diagnostics.is_empty());
    assert_eq!(lexemes(&tokens), vec!["a_1", "b2c", "x", ""]);
    assert!(tokens[..3].iter().all(|t| t.is(TokenKind::Ident)));
}

#[test]
fn test_leading_underscore_is_not_an_identifier() {
    let (tokens, diagnostics) = scan("_x");
    assert_eq!(kinds(&tokens), vec![TokenKind::Other, TokenKind::Ident, TokenKind::Eof]);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "Unrecognized symbol: '_'.");
}

#[test]
fn test_two_character_operators() {
    let (tokens, diagnostics) = scan(":= : <= <> < >= > = :<");
    assert!(diagnostics.is_empty());
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Assign,
            TokenKind::Colon,
            TokenKind::LessThanEqual,
            TokenKind::NotEqual,
            TokenKind::LessThan,
            TokenKind::GreaterThanEqual,
            TokenKind::GreaterThan,
            TokenKind::Equal,
            TokenKind::Colon,
            TokenKind::LessThan,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_single_character_tokens() {
    let (tokens, _) = scan("+-*/;.,()");
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Multiply,
            TokenKind::Divide,
            TokenKind::Semicolon,
            TokenKind::Dot,
            TokenKind::Comma,
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_positions_and_offsets() {
    let (tokens, _) = scan("x :=\n\t y");
    assert_eq!((tokens[0].line, tokens[0].column, tokens[0].offset), (1, 1, 0));
    assert_eq!((tokens[1].line, tokens[1].column, tokens[1].offset), (1, 3, 2));
    assert_eq!((tokens[2].line, tokens[2].column, tokens[2].offset), (2, 3, 7));
}

#[test]
fn test_comments() {
    let (tokens, diagnostics) = scan("{ a\n b } x");
    assert!(diagnostics.is_empty());
    assert_eq!(kinds(&tokens), vec![TokenKind::Comment, TokenKind::Ident, TokenKind::Eof]);
    assert_eq!(tokens[0].lexeme, "{ a\n b }");
    assert_eq!((tokens[0].line, tokens[0].column, tokens[0].offset), (1, 1, 0));
    assert_eq!((tokens[1].line, tokens[1].column, tokens[1].offset), (2, 6, 9));
}

#[test]
fn test_unterminated_comment_truncates_the_stream() {
    let source = "program P; { comment var x: integer; begin end.";
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
    assert!(lexer.is_truncated());
    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::Program, TokenKind::Ident, TokenKind::Semicolon, TokenKind::Eof]
    );

    let diagnostics = lexer.take_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "this comment wasn't closed.");
    assert_eq!((diagnostics[0].line, diagnostics[0].column), (1, 12));
    assert_eq!(diagnostics[0].phase, Phase::Lexical);
    assert_eq!(diagnostics[0].severity, Severity::Error);

    // Nothing after the opening brace, not even on further calls
    assert!(lexer.next_token().is(TokenKind::Eof));
    assert!(lexer.take_diagnostics().is_empty());
}

#[test]
fn test_stray_closing_brace_is_skipped() {
    let (tokens, diagnostics) = scan("a } b");
    assert_eq!(lexemes(&tokens), vec!["a", "b", ""]);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "there is no corresponding '{'.");
    assert_eq!((diagnostics[0].line, diagnostics[0].column), (1, 3));
}

#[test]
fn test_unrecognized_symbol_does_not_stop_scanning() {
    let (tokens, diagnostics) = scan("x := 1 # 2");
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Ident,
            TokenKind::Assign,
            TokenKind::IntConst,
            TokenKind::Other,
            TokenKind::IntConst,
            TokenKind::Eof,
        ]
    );
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "Unrecognized symbol: '#'.");
    assert_eq!((diagnostics[0].line, diagnostics[0].column), (1, 8));
}

#[test]
fn test_eof_is_placed_after_the_last_token() {
    let (tokens, _) = scan("begin end  \n\n");
    let eof = tokens.last().unwrap();
    assert!(eof.is(TokenKind::Eof));
    assert_eq!(eof.lexeme, "");
    assert_eq!((eof.line, eof.column, eof.offset), (1, 10, 9));
}

#[test]
fn test_empty_source() {
    let (tokens, diagnostics) = scan("");
    assert!(diagnostics.is_empty());
    assert_eq!(tokens.len(), 1);
    assert_eq!((tokens[0].kind, tokens[0].line, tokens[0].column), (TokenKind::Eof, 1, 1));
}

#[test]
fn test_repeated_calls_after_eof() {
    let mut lexer = Lexer::new("x");
    assert!(lexer.next_token().is(TokenKind::Ident));
    let first = lexer.next_token();
    let second = lexer.next_token();
    assert!(first.is(TokenKind::Eof));
    assert_eq!(first, second);
}
