use log::{info, trace};

use crate::ast::{
    Assign, Binary, CmdBlock, Command, Decl, Direction, Expr, ForStmt, IfStmt, NumLit, ProcCall, Program, Unary,
    VarDecl, WhileStmt,
};
use crate::frontend::lexer::Lexer;
use crate::frontend::sink::FormatterSink;
use crate::frontend::token::{Token, TokenKind};
use crate::utils::config::parser::{
    ADDITIVE_OPERATORS, COMMAND_SYNC, MULTIPLICATIVE_OPERATORS, PROCEDURE_HEADER_SYNC, PROGRAM_HEADER_SYNC,
    RELATIONAL_OPERATORS, TYPE_NAMES, VAR_BLOCK_SYNC,
};
use crate::utils::diagnostics::{Diagnostic, Logger, Phase};
use crate::utils::errors::{FrontendError, FrontendResult};

/// Result of a parse. The tree is always present; when `had_error` is set it
/// may be partial.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub program: Program,
    pub had_error: bool,
}

pub struct Parser<'src, 'a> {
    lexer: Lexer<'src>,
    previous: Token,
    current: Token,
    next: Token,
    had_error: bool,
    panic_mode: bool,
    logger: &'a mut dyn Logger,
    formatter: Option<&'a mut dyn FormatterSink>,
}

impl<'src, 'a> Parser<'src, 'a> {
    pub fn new(source: &'src str, logger: &'a mut dyn Logger, formatter: Option<&'a mut dyn FormatterSink>) -> Self {
        let start = Token::new(TokenKind::Eof, "", 1, 1, 0);
        let mut parser = Self {
            lexer: Lexer::new(source),
            previous: start.clone(),
            current: start.clone(),
            next: start,
            had_error: false,
            panic_mode: false,
            logger,
            formatter,
        };
        parser.current = parser.pull();
        parser.next = parser.pull();
        parser.previous = Token::missing(&parser.current);
        parser
    }

    pub fn parse(mut self) -> ParseOutcome {
        let program = self.program();
        info!(
            "parsed program '{}' ({} procedures, had_error = {})",
            program.name.lexeme,
            program.procedures.len(),
            self.had_error
        );
        ParseOutcome {
            program,
            had_error: self.had_error,
        }
    }

    // Pulls the next non-comment token. Comments go straight to the formatter.
    fn pull(&mut self) -> Token {
        loop {
            let token = self.lexer.next_token();
            for diagnostic in self.lexer.take_diagnostics() {
                self.had_error = true;
                self.logger.report(diagnostic);
            }
            if !token.is(TokenKind::Comment) {
                return token;
            }
            if let Some(formatter) = self.formatter.as_deref_mut() {
                formatter.add_comment(&token);
            }
        }
    }

    // Consumes the current token. The end-of-file token is never consumed.
    fn advance(&mut self) -> Token {
        if self.current.is(TokenKind::Eof) {
            return self.current.clone();
        }
        let following = self.pull();
        let consumed = std::mem::replace(&mut self.current, std::mem::replace(&mut self.next, following));
        trace!("consumed {}", consumed);
        if let Some(formatter) = self.formatter.as_deref_mut() {
            formatter.write_token(&consumed);
        }
        self.previous = consumed.clone();
        consumed
    }

    fn check(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.current.kind)
    }

    fn match_kind(&mut self, kind: TokenKind) -> Option<Token> {
        self.match_any(&[kind])
    }

    fn match_any(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        if self.check(kinds) {
            Some(self.advance())
        } else {
            None
        }
    }

    fn expect(&mut self, expected: TokenKind, message: &str) -> FrontendResult<Token> {
        if self.current.is(expected) {
            return Ok(self.advance());
        }
        Err(self.error_at_current(message))
    }

    fn error_at_current(&mut self, message: impl Into<String>) -> FrontendError {
        let token = self.current.clone();
        self.error(&token, message)
    }

    // Records a syntax error and enters panic mode. Errors at end of file are
    // not reported once the scanner truncated the input: they only repeat the
    // scanner's diagnostic.
    fn error(&mut self, token: &Token, message: impl Into<String>) -> FrontendError {
        let message = message.into();
        self.had_error = true;
        self.panic_mode = true;
        if !(self.lexer.is_truncated() && token.is(TokenKind::Eof)) {
            self.logger.report(Diagnostic::error(Phase::Syntax, token, message.clone()));
        }
        FrontendError::syntax(token, message)
    }

    fn warn(&mut self, token: &Token, message: &str) {
        self.logger.report(Diagnostic::warning(Phase::Syntax, token, message));
    }

    // Leaves panic mode by discarding tokens up to one of `sync`. Every sync
    // set contains end of file, so this always terminates.
    fn synchronize(&mut self, sync: &[TokenKind]) {
        self.panic_mode = false;
        while !self.check(sync) {
            self.advance();
        }
    }

    fn placeholder(&self, kind: TokenKind) -> Token {
        Token {
            kind,
            ..Token::missing(&self.current)
        }
    }

    /**
     * program = "program" ident ";" [ var_decl ] { procedure } "begin" commands "end" "." ;
     */
    fn program(&mut self) -> Program {
        let keyword = self
            .expect(TokenKind::Program, "First word should be 'program'.")
            .unwrap_or_else(|_| self.placeholder(TokenKind::Program));

        let mut name = Token::missing(&self.current);
        if !self.panic_mode {
            if let Ok(id) = self.expect(TokenKind::Ident, "Expected program identifier.") {
                name = id;
            }
        }
        if !self.panic_mode {
            self.expect(TokenKind::Semicolon, "Expected ';' after program declaration.").ok();
        }
        if self.panic_mode {
            self.synchronize(PROGRAM_HEADER_SYNC);
        }

        let locals = self.var_section();
        let procedures = self.procedures();

        let body = match self.expect(TokenKind::Begin, "Expected 'begin'.") {
            Ok(begin) => {
                let mut commands = Vec::new();
                self.command_list(&mut commands);
                if self.expect(TokenKind::End, "Expected 'end' after command list").is_ok() {
                    self.expect(TokenKind::Dot, "Expected '.' after program block.").ok();
                }
                CmdBlock::new(begin, commands)
            }
            Err(_) => CmdBlock::new(self.placeholder(TokenKind::Begin), Vec::new()),
        };

        Program::new(keyword, name, None, locals, procedures, body)
    }

    // Optional `var` block, followed by recovery to the next section.
    fn var_section(&mut self) -> Option<VarDecl> {
        let keyword = self.match_kind(TokenKind::Var)?;
        let mut decls = Vec::new();
        self.var_decl(&mut decls).ok();
        if self.panic_mode {
            self.synchronize(VAR_BLOCK_SYNC);
        }
        Some(VarDecl::new(keyword, decls))
    }

    /**
     * var_decl = "var" ident_list ":" type ";" { ident_list ":" type ";" } ;
     * Declarations parsed before an error are kept.
     */
    fn var_decl(&mut self, decls: &mut Vec<Decl>) -> FrontendResult<()> {
        if !self.check(&[TokenKind::Ident]) {
            let message = format!("Expected identifier, got '{}'", self.current.lexeme);
            return Err(self.error_at_current(message));
        }

        while let Some(first) = self.match_kind(TokenKind::Ident) {
            let mut ids = vec![first];
            while self.match_kind(TokenKind::Comma).is_some() {
                ids.push(self.expect_identifier()?);
            }
            self.expect(TokenKind::Colon, "Expected ':' after identifier list.")?;
            let type_token = self.type_name()?;
            self.expect(TokenKind::Semicolon, "Expected ';' after variable declaration")?;
            decls.push(Decl::new(type_token, ids));
        }
        Ok(())
    }

    fn expect_identifier(&mut self) -> FrontendResult<Token> {
        let message = format!("Expected identifier, got '{}'", self.current.lexeme);
        self.expect(TokenKind::Ident, &message)
    }

    fn type_name(&mut self) -> FrontendResult<Token> {
        match self.match_any(TYPE_NAMES) {
            Some(token) => Ok(token),
            None => {
                let message = format!("Expected type, got '{}'", self.current.lexeme);
                Err(self.error_at_current(message))
            }
        }
    }

    fn procedures(&mut self) -> Vec<Program> {
        let mut procedures = Vec::new();
        while let Some(keyword) = self.match_kind(TokenKind::Procedure) {
            procedures.push(self.procedure(keyword));
        }
        procedures
    }

    /**
     * procedure = "procedure" ident [ "(" params ")" ] ";" [ var_decl ] { procedure }
     *             "begin" commands "end" ";" ;
     */
    fn procedure(&mut self, keyword: Token) -> Program {
        let mut name = Token::missing(&self.current);
        if let Ok(id) = self.expect(TokenKind::Ident, "Expected procedure identifier.") {
            name = id;
        }
        // A missing name is not worth skipping the header over
        if self.panic_mode && self.check(&[TokenKind::LParen, TokenKind::Semicolon]) {
            self.panic_mode = false;
        }

        let mut params = None;
        if !self.panic_mode {
            if let Some(open) = self.match_kind(TokenKind::LParen) {
                params = self.param_list(open);
            }
        }
        if !self.panic_mode {
            self.expect(TokenKind::Semicolon, "Expected ';' after procedure declaration.")
                .ok();
        }
        if self.panic_mode {
            self.synchronize(PROCEDURE_HEADER_SYNC);
        }

        let locals = self.var_section();
        let procedures = self.procedures();

        let mut commands = Vec::new();
        let begin = match self.expect(TokenKind::Begin, "Expected 'begin'.") {
            Ok(begin) => {
                self.command_list(&mut commands);
                if self.expect(TokenKind::End, "Expected 'end' after command list").is_ok()
                    && self.match_kind(TokenKind::Semicolon).is_none()
                {
                    let at = self.current.clone();
                    self.warn(&at, "Expected ';' after procedure end.");
                }
                begin
            }
            Err(_) => self.placeholder(TokenKind::Begin),
        };
        if self.panic_mode {
            self.synchronize(VAR_BLOCK_SYNC);
        }

        Program::new(keyword, name, params, locals, procedures, CmdBlock::new(begin, commands))
    }

    /**
     * params = ident_list ":" type { ";" ident_list ":" type } ")" ;
     * An empty `()` is accepted with a warning and yields no parameter list.
     */
    fn param_list(&mut self, open: Token) -> Option<VarDecl> {
        if let Some(close) = self.match_kind(TokenKind::RParen) {
            self.warn(&close, "Procedures declared without args don't need '()'.");
            return None;
        }
        let mut decls = Vec::new();
        self.params(&mut decls).ok();
        Some(VarDecl::new(open, decls))
    }

    fn params(&mut self, decls: &mut Vec<Decl>) -> FrontendResult<()> {
        loop {
            let mut ids = vec![self.expect_identifier()?];
            while self.match_kind(TokenKind::Comma).is_some() {
                ids.push(self.expect_identifier()?);
            }
            self.expect(TokenKind::Colon, "Expected ':' after identifier list.")?;
            let type_token = self.type_name()?;
            decls.push(Decl::new(type_token, ids));
            if self.match_kind(TokenKind::Semicolon).is_none() {
                break;
            }
        }
        self.expect(TokenKind::RParen, "Expected ')' after argument list.")?;
        Ok(())
    }

    /**
     * commands = command { ";" command } ;
     * A failed command resynchronizes on `;`; reaching `end` or end of file
     * stops the list.
     */
    fn command_list(&mut self, commands: &mut Vec<Command>) {
        if self.check(&[TokenKind::End]) {
            return;
        }
        loop {
            if self.check(&[TokenKind::End]) {
                let semicolon = self.previous.clone();
                self.warn(&semicolon, "Remove the ';'.");
                break;
            }

            if let Ok(command) = self.command() {
                commands.push(command);
            }

            if self.panic_mode {
                self.synchronize(COMMAND_SYNC);
                if self.check(&[TokenKind::End, TokenKind::Eof]) {
                    break;
                }
            }

            if self.match_kind(TokenKind::Semicolon).is_none() {
                break;
            }
        }
    }

    fn composite_command(&mut self, begin: Token) -> FrontendResult<CmdBlock> {
        let mut commands = Vec::new();
        self.command_list(&mut commands);
        self.expect(TokenKind::End, "Expected 'end' after command list")?;
        Ok(CmdBlock::new(begin, commands))
    }

    /**
     * command = ident ":=" expr
     *         | ident [ "(" expr_list ")" ]
     *         | "begin" commands "end"
     *         | "if" expr "then" command [ "else" command ]
     *         | "while" expr "do" command
     *         | "for" ident ":=" expr ( "to" | "downto" ) expr "do" command ;
     */
    fn command(&mut self) -> FrontendResult<Command> {
        match self.current.kind {
            TokenKind::Ident if self.next.is(TokenKind::Assign) => {
                let target = self.advance();
                let op = self.advance();
                let expr = self.expr()?;
                Ok(Command::Assign(Assign::new(op, target, expr)))
            }
            TokenKind::Ident => {
                let name = self.advance();
                let args = self.call_args()?.unwrap_or_default();
                Ok(Command::ProcCall(ProcCall::new(name, Some(args))))
            }
            TokenKind::Begin => {
                let begin = self.advance();
                Ok(Command::Block(self.composite_command(begin)?))
            }
            TokenKind::If => {
                let keyword = self.advance();
                let condition = self.expr()?;
                self.expect(TokenKind::Then, "Expected 'then' after if condition.")?;
                let then_branch = self.command()?;
                // `else` always binds to the closest `if`
                let else_branch = match self.match_kind(TokenKind::Else) {
                    Some(_) => Some(self.command()?),
                    None => None,
                };
                Ok(Command::If(IfStmt::new(keyword, condition, then_branch, else_branch)))
            }
            TokenKind::While => {
                let keyword = self.advance();
                let condition = self.expr()?;
                self.expect(TokenKind::Do, "Expected 'do' after while condition.")?;
                let body = self.command()?;
                Ok(Command::While(WhileStmt::new(keyword, condition, body)))
            }
            TokenKind::For => self.for_command(),
            _ => {
                let message = format!("Expected command. Got '{}' instead.", self.current.lexeme);
                Err(self.error_at_current(message))
            }
        }
    }

    fn for_command(&mut self) -> FrontendResult<Command> {
        let keyword = self.advance();
        let target = self.expect(TokenKind::Ident, "Expected identifier after 'for'.")?;
        let op = self.expect(TokenKind::Assign, "Expected assign operator after identifier.")?;
        let init = Assign::new(op, target, self.expr()?);

        let direction = match self.current.kind {
            TokenKind::To => Direction::To,
            TokenKind::Downto => Direction::Downto,
            _ => return Err(self.error_at_current("Expected either 'to' or 'downto' after assignment.")),
        };
        self.advance();

        let bound = self.expr()?;
        self.expect(TokenKind::Do, "Expected 'do' after 'for' target expression.")?;
        let body = self.command()?;
        Ok(Command::For(ForStmt::new(keyword, init, direction, bound, body)))
    }

    // Parenthesized argument list after a name. `None` when no `(` follows.
    fn call_args(&mut self) -> FrontendResult<Option<Vec<Expr>>> {
        let Some(open) = self.match_kind(TokenKind::LParen) else {
            return Ok(None);
        };
        let mut args = Vec::new();
        if self.check(&[TokenKind::RParen]) {
            self.warn(&open, "Procedure calls without args are made without '()'");
        } else {
            args = self.expr_list()?;
        }
        self.expect(TokenKind::RParen, "Expected ')' after expression list.")?;
        Ok(Some(args))
    }

    fn expr_list(&mut self) -> FrontendResult<Vec<Expr>> {
        let mut list = vec![self.expr()?];
        while self.match_kind(TokenKind::Comma).is_some() {
            list.push(self.expr()?);
        }
        Ok(list)
    }

    /**
     * expr = simple_expr [ relop simple_expr ] ;
     * Relational operators do not chain.
     */
    fn expr(&mut self) -> FrontendResult<Expr> {
        let left = self.simple_expr()?;
        match self.match_any(RELATIONAL_OPERATORS) {
            Some(op) => {
                let right = self.simple_expr()?;
                Ok(Expr::Binary(Binary::new(op, left, right)))
            }
            None => Ok(left),
        }
    }

    /**
     * simple_expr = [ "+" | "-" ] term { ( "+" | "-" | "or" ) term } ;
     * The sign applies to the first term only.
     */
    fn simple_expr(&mut self) -> FrontendResult<Expr> {
        let mut node = match self.match_any(&[TokenKind::Plus, TokenKind::Minus]) {
            Some(sign) => Expr::Unary(Unary::new(sign, self.term()?)),
            None => self.term()?,
        };
        while let Some(op) = self.match_any(ADDITIVE_OPERATORS) {
            let right = self.term()?;
            node = Expr::Binary(Binary::new(op, node, right));
        }
        Ok(node)
    }

    /**
     * term = factor { ( "*" | "/" | "and" ) factor } ;
     */
    fn term(&mut self) -> FrontendResult<Expr> {
        let mut node = self.factor()?;
        while let Some(op) = self.match_any(MULTIPLICATIVE_OPERATORS) {
            let right = self.factor()?;
            node = Expr::Binary(Binary::new(op, node, right));
        }
        Ok(node)
    }

    /**
     * factor = int | real | "true" | "false" | "not" factor | "(" expr ")"
     *        | ident [ "(" expr_list ")" ] ;
     */
    fn factor(&mut self) -> FrontendResult<Expr> {
        match self.current.kind {
            TokenKind::IntConst | TokenKind::RealConst | TokenKind::True | TokenKind::False => {
                let literal = self.advance();
                Ok(Expr::NumLit(NumLit::from_token(literal)))
            }
            TokenKind::Not => {
                let op = self.advance();
                Ok(Expr::Unary(Unary::new(op, self.factor()?)))
            }
            TokenKind::LParen => {
                let open = self.advance();
                let inner = self.expr()?;
                self.expect(TokenKind::RParen, "Expected ')'.")?;
                Ok(Expr::Unary(Unary::new(open, inner)))
            }
            TokenKind::Ident => {
                let name = self.advance();
                let args = self.call_args()?;
                Ok(Expr::ProcCall(ProcCall::new(name, args)))
            }
            _ => {
                let message = format!("Expected factor, got '{}'.", self.current.lexeme);
                Err(self.error_at_current(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::diagnostics::Diagnostics;

    #[test]
    fn advance_never_moves_past_end_of_file() {
        let mut diagnostics = Diagnostics::new();
        let mut parser = Parser::new("x", &mut diagnostics, None);
        assert_eq!(parser.advance().lexeme, "x");
        assert!(parser.current.is(TokenKind::Eof));
        let eof = parser.advance();
        assert!(eof.is(TokenKind::Eof));
        assert!(parser.current.is(TokenKind::Eof));
    }

    #[test]
    fn lookahead_window_skips_comments() {
        let mut diagnostics = Diagnostics::new();
        let parser = Parser::new("{a} x {b} := 1", &mut diagnostics, None);
        assert_eq!(parser.current.lexeme, "x");
        assert!(parser.next.is(TokenKind::Assign));
    }
}
