//! The parser core.
//!
//! A recursive descent parser with one token of lookahead over a [`Lexer`].
//! Productions return `Result<Option<T>, ParseError>`: `Ok(Some)` matched,
//! `Ok(None)` did not match and left the lookahead where it found it, `Err`
//! is a hard failure. The lexer is a pure function of its byte offset, so a
//! [`Checkpoint`] is the lookahead token plus the lexer state, and restoring
//! one re-lexes from there.
//!
//! The grammar itself lives in `statements`, `declarations`, `modules`,
//! `expressions` and `types`.

use std::collections::HashSet;

use oong_ast::{Program, Stmt, TokenKind};
use oong_core::{ParseOptions, TextSpan};
use oong_diagnostics::{LiteralForm, ParseError};
use oong_scanner::{Lexer, LexerState, Token};
use tracing::{debug, instrument, trace};

/// Result of [`Parser::parse`]. `Ok(None)` means the source parsed but
/// produced no statement payload.
pub type ParseResult = Result<Option<Program>, ParseError>;

/// Tri-state result of a single production.
pub(crate) type PResult<T> = Result<Option<T>, ParseError>;

/// Saved lookahead state.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Checkpoint<'src> {
    token: Token<'src>,
    lexer: LexerState,
    prev_token_end: usize,
}

/// Open delimiters tracked while skipping a balanced region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    Paren,
    Bracket,
    Brace,
    /// `${` inside a template; closed by `}`.
    Substitution,
}

impl Delimiter {
    fn closed_by(self, kind: TokenKind) -> bool {
        match self {
            Delimiter::Paren => kind == TokenKind::CloseParenToken,
            Delimiter::Bracket => kind == TokenKind::CloseBracketToken,
            Delimiter::Brace | Delimiter::Substitution => kind == TokenKind::CloseBraceToken,
        }
    }
}

/// The parser produces a [`Program`] from source text.
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    /// The lookahead token.
    pub(crate) cur: Token<'src>,
    /// End offset of the last consumed token.
    prev_token_end: usize,
    options: ParseOptions,
    /// Token advances left.
    fuel: usize,
    /// Current nesting of statements, expressions and types.
    depth: u32,
    /// Offsets of `<` tokens known not to open a closed type argument list.
    unclosed_angles: HashSet<usize>,
}

impl<'src> Parser<'src> {
    pub fn new(src: &'src str) -> Self {
        Self::with_options(src, ParseOptions::default())
    }

    pub fn with_options(src: &'src str, options: ParseOptions) -> Self {
        let mut lexer = Lexer::with_options(src, &options);
        let cur = lexer.next_token();
        let fuel = options.fuel_for(src.len());
        Self {
            lexer,
            cur,
            prev_token_end: 0,
            options,
            fuel,
            depth: 0,
            unclosed_angles: HashSet::new(),
        }
    }

    /// Parse the whole source unit.
    #[instrument(level = "debug", skip_all)]
    pub fn parse(mut self) -> ParseResult {
        debug!(len = self.source().len(), strict = self.options.strict, "parsing");
        let result = self.parse_program();
        if let Err(err) = &result {
            debug!(code = err.code(), span = %err.span(), "parse failed: {err}");
        }
        result
    }

    fn parse_program(&mut self) -> ParseResult {
        self.parse_directive_prologue()?;
        let mut statements = Vec::new();
        while !self.cur.is_eof() {
            match self.parse_statement()? {
                Some(nodes) => statements.extend(nodes),
                None => return Err(self.statement_expected()),
            }
        }
        Ok((!statements.is_empty()).then_some(Program { statements }))
    }

    /// Leading string-literal statements. `"use strict"` switches the lexer
    /// to strict mode for the rest of the unit.
    fn parse_directive_prologue(&mut self) -> Result<(), ParseError> {
        while self.at(TokenKind::StringLiteral) {
            let cp = self.checkpoint();
            let directive = self.cur.text;
            self.advance()?;
            if !self.eos()? {
                self.restore(cp);
                return Ok(());
            }
            if matches!(directive, "\"use strict\"" | "'use strict'") && !self.lexer.is_strict_mode() {
                trace!("strict mode directive");
                self.lexer.set_strict_mode(true);
                // The lookahead was lexed before the switch. Rescan its
                // leading trivia too so its line-break flag survives.
                self.lexer.reset_to(self.prev_token_end);
                self.cur = self.lexer.next_token();
            }
        }
        Ok(())
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.cur.kind == kind
    }

    /// The lookahead is the plain identifier `text`.
    #[inline]
    pub(crate) fn at_contextual(&self, text: &str) -> bool {
        self.cur.kind == TokenKind::Identifier && self.cur.text == text
    }

    #[inline]
    pub(crate) fn source(&self) -> &'src str {
        self.lexer.source()
    }

    #[inline]
    pub(crate) fn prev_token_end(&self) -> usize {
        self.prev_token_end
    }

    pub(crate) fn is_strict_mode(&self) -> bool {
        self.lexer.is_strict_mode()
    }

    fn take_fuel(&mut self) -> Result<(), ParseError> {
        if self.fuel == 0 {
            debug!(pos = self.cur.pos, "out of fuel");
            return Err(ParseError::OutOfFuel { span: self.cur.span() });
        }
        self.fuel -= 1;
        Ok(())
    }

    /// Consume the lookahead.
    pub(crate) fn advance(&mut self) -> Result<(), ParseError> {
        self.take_fuel()?;
        self.prev_token_end = self.cur.end();
        self.cur = self.lexer.next_token();
        Ok(())
    }

    pub(crate) fn eat(&mut self, kind: TokenKind) -> Result<bool, ParseError> {
        if self.at(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.eat(kind)? {
            return Ok(());
        }
        Err(self.expected(kind.text().unwrap_or("token")))
    }

    /// The token after the lookahead, without consuming anything.
    pub(crate) fn peek(&self) -> Token<'src> {
        self.lexer.clone().next_token()
    }

    /// Whether a line terminator separates the previous token from the
    /// lookahead.
    pub(crate) fn line_break_before_current(&self) -> bool {
        self.lexer
            .contains_line_terminator_between(self.prev_token_end, self.cur.pos)
    }

    /// End of statement: consumes a `;`, or accepts `}`, end of input or a
    /// preceding line break without consuming.
    pub(crate) fn eos(&mut self) -> Result<bool, ParseError> {
        match self.cur.kind {
            TokenKind::SemicolonToken => {
                self.advance()?;
                Ok(true)
            }
            TokenKind::EndOfFileToken | TokenKind::CloseBraceToken => Ok(true),
            _ => Ok(self.line_break_before_current()),
        }
    }

    pub(crate) fn expect_eos(&mut self) -> Result<(), ParseError> {
        if self.eos()? {
            Ok(())
        } else {
            Err(self.expected(";"))
        }
    }

    /// Consume one `>` closing a type argument list. A `>>`, `>=` or longer
    /// lookahead is split: the remainder is re-lexed from the next byte.
    pub(crate) fn eat_closing_angle(&mut self) -> Result<bool, ParseError> {
        match self.cur.kind {
            TokenKind::GreaterThanToken => {
                self.advance()?;
                Ok(true)
            }
            TokenKind::GreaterThanGreaterThanToken
            | TokenKind::GreaterThanGreaterThanGreaterThanToken
            | TokenKind::GreaterThanEqualsToken
            | TokenKind::GreaterThanGreaterThanEqualsToken
            | TokenKind::GreaterThanGreaterThanGreaterThanEqualsToken => {
                self.take_fuel()?;
                let split = self.cur.pos + 1;
                trace!(pos = split, "splitting {}", self.cur.text);
                self.prev_token_end = split;
                self.lexer.reset_to(split);
                self.cur = self.lexer.next_token();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// The lookahead is the `}` closing a template substitution: return the
    /// lexer to template atoms and consume it.
    pub(crate) fn resume_template(&mut self) -> Result<(), ParseError> {
        self.lexer.process_template_close_brace();
        self.advance()
    }

    /// Span from `start` to the end of the last consumed token.
    pub(crate) fn span_from(&self, start: usize) -> TextSpan {
        TextSpan::from_bounds(start, self.prev_token_end.max(start))
    }

    /// Source text from `start` to the end of the last consumed token.
    pub(crate) fn text_from(&self, start: usize) -> &'src str {
        &self.source()[self.span_from(start).to_range()]
    }

    // ========================================================================
    // Checkpoints, depth and recovery
    // ========================================================================

    pub(crate) fn checkpoint(&self) -> Checkpoint<'src> {
        Checkpoint {
            token: self.cur,
            lexer: self.lexer.state(),
            prev_token_end: self.prev_token_end,
        }
    }

    pub(crate) fn restore(&mut self, cp: Checkpoint<'src>) {
        trace!(from = self.cur.pos, to = cp.token.pos, "restore");
        self.cur = cp.token;
        self.lexer.restore(cp.lexer);
        self.prev_token_end = cp.prev_token_end;
    }

    /// Try a production; on no match or a recoverable failure, restore the
    /// lookahead and report no match.
    pub(crate) fn speculate<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        let cp = self.checkpoint();
        match f(self) {
            Ok(Some(value)) => Ok(Some(value)),
            Ok(None) => {
                self.restore(cp);
                Ok(None)
            }
            Err(err) if err.is_fatal() => Err(err),
            Err(err) => {
                trace!(pos = cp.token.pos, "backtracking after: {err}");
                self.restore(cp);
                Ok(None)
            }
        }
    }

    pub(crate) fn record_unclosed_angles(&mut self, positions: impl IntoIterator<Item = usize>) {
        self.unclosed_angles.extend(positions);
    }

    /// The lookahead is a `<` an earlier scan already failed to close.
    pub(crate) fn is_unclosed_angle(&self) -> bool {
        self.at(TokenKind::LessThanToken) && self.unclosed_angles.contains(&self.cur.pos)
    }

    /// Run `f` one level deeper, failing once `max_depth` is exceeded.
    pub(crate) fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, ParseError>) -> Result<T, ParseError> {
        if self.depth >= self.options.max_depth {
            debug!(pos = self.cur.pos, "nesting too deep");
            return Err(ParseError::NestingTooDeep { span: self.cur.span() });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Skip one delimited group with the lookahead on its opener, or a single
    /// token otherwise. Stops without consuming at a closer that does not
    /// match the innermost open group. Returns whether the group was closed;
    /// a single skipped token counts as closed.
    pub(crate) fn skip_balanced(&mut self) -> Result<bool, ParseError> {
        let mut stack: Vec<Delimiter> = Vec::new();
        loop {
            let kind = self.cur.kind;
            match kind {
                TokenKind::EndOfFileToken => return Ok(false),
                TokenKind::OpenParenToken => stack.push(Delimiter::Paren),
                TokenKind::OpenBracketToken => stack.push(Delimiter::Bracket),
                TokenKind::OpenBraceToken => stack.push(Delimiter::Brace),
                TokenKind::TemplateStringStartExpression => stack.push(Delimiter::Substitution),
                TokenKind::CloseParenToken | TokenKind::CloseBracketToken | TokenKind::CloseBraceToken => {
                    match stack.last() {
                        Some(open) if open.closed_by(kind) => {}
                        Some(_) => return Ok(false),
                        None => {
                            self.advance()?;
                            return Ok(true);
                        }
                    }
                    if stack.pop() == Some(Delimiter::Substitution) {
                        self.resume_template()?;
                    } else {
                        self.advance()?;
                    }
                    if stack.is_empty() {
                        return Ok(true);
                    }
                    continue;
                }
                _ => {}
            }
            self.advance()?;
            if stack.is_empty() {
                return Ok(true);
            }
        }
    }

    /// Re-lex a `/` or `/=` lookahead as a regular expression literal.
    pub(crate) fn rescan_regex(&mut self) -> bool {
        let state = self.lexer.state();
        match self.lexer.rescan_regex(self.cur.pos) {
            Some(token) => {
                trace!(pos = token.pos, "slash rescanned as regex");
                self.cur = token;
                true
            }
            None => {
                self.lexer.restore(state);
                false
            }
        }
    }

    // ========================================================================
    // Errors
    // ========================================================================

    fn found_text(&self) -> String {
        if self.cur.is_eof() {
            "end of input".to_string()
        } else {
            self.cur.text.to_string()
        }
    }

    /// Error for an `InvalidToken` lookahead.
    fn invalid_token_error(&self) -> ParseError {
        let span = self.cur.span();
        if !self.cur.is_unterminated() {
            return ParseError::InvalidToken {
                text: self.cur.text.to_string(),
                span,
            };
        }
        let form = match self.cur.text.as_bytes().first() {
            Some(b'/') => LiteralForm::RegularExpression,
            Some(b'"' | b'\'') => LiteralForm::String,
            _ => LiteralForm::Template,
        };
        ParseError::Unterminated { form, span }
    }

    pub(crate) fn expected(&self, expected: &'static str) -> ParseError {
        if self.at(TokenKind::InvalidToken) {
            return self.invalid_token_error();
        }
        ParseError::Expected {
            expected,
            found: self.found_text(),
            span: self.cur.span(),
        }
    }

    pub(crate) fn expression_expected(&self) -> ParseError {
        if self.at(TokenKind::InvalidToken) {
            return self.invalid_token_error();
        }
        ParseError::ExpressionExpected {
            found: self.found_text(),
            span: self.cur.span(),
        }
    }

    pub(crate) fn statement_expected(&self) -> ParseError {
        if self.at(TokenKind::InvalidToken) {
            return self.invalid_token_error();
        }
        ParseError::StatementExpected {
            found: self.found_text(),
            span: self.cur.span(),
        }
    }

    // ========================================================================
    // Statement dispatch
    // ========================================================================

    /// Parse one statement. Returns the nodes it contributes: variable
    /// bindings and print statements carry nodes, everything else is
    /// validated and yields none.
    pub(crate) fn parse_statement(&mut self) -> PResult<Vec<Stmt>> {
        self.nested(|p| p.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> PResult<Vec<Stmt>> {
        trace!(kind = ?self.cur.kind, pos = self.cur.pos, "statement");
        match self.cur.kind {
            TokenKind::OpenBraceToken => self.parse_block().map(no_nodes),
            TokenKind::VarKeyword
            | TokenKind::ConstKeyword
            | TokenKind::StrictLetKeyword
            | TokenKind::NonStrictLetKeyword => {
                if let Some(decls) = self.parse_variable_statement()? {
                    return Ok(Some(decls));
                }
                // Non-strict `let` used as a name.
                self.parse_expression_statement().map(no_nodes)
            }
            TokenKind::ClassKeyword => self.parse_class_declaration().map(no_nodes),
            TokenKind::FunctionKeyword => self.parse_function_declaration().map(no_nodes),
            TokenKind::AsyncKeyword => match self.parse_function_declaration()? {
                Some(()) => Ok(Some(Vec::new())),
                None => self.parse_labelled_or_expression_statement(),
            },
            TokenKind::SemicolonToken => self.parse_empty_statement().map(no_nodes),
            TokenKind::ImportKeyword => match self.parse_import_statement()? {
                Some(()) => Ok(Some(Vec::new())),
                // `import(...)` and `import.meta`
                None => self.parse_expression_statement().map(no_nodes),
            },
            TokenKind::ExportKeyword => self.parse_export_statement(),
            kind if kind.is_print_family() => {
                Ok(self.parse_print_statement()?.map(|print| vec![Stmt::Print(print)]))
            }
            TokenKind::IfKeyword => self.parse_if_statement().map(no_nodes),
            TokenKind::DoKeyword | TokenKind::WhileKeyword | TokenKind::ForKeyword => {
                self.parse_iteration_statement().map(no_nodes)
            }
            TokenKind::ContinueKeyword | TokenKind::BreakKeyword => self.parse_jump_statement().map(no_nodes),
            TokenKind::ReturnKeyword => self.parse_return_statement().map(no_nodes),
            TokenKind::YieldKeyword => self.parse_yield_statement().map(no_nodes),
            TokenKind::WithKeyword => self.parse_with_statement().map(no_nodes),
            TokenKind::SwitchKeyword => self.parse_switch_statement().map(no_nodes),
            TokenKind::ThrowKeyword => self.parse_throw_statement().map(no_nodes),
            TokenKind::TryKeyword => self.parse_try_statement().map(no_nodes),
            TokenKind::DebuggerKeyword => self.parse_debugger_statement().map(no_nodes),
            _ => self.parse_labelled_or_expression_statement(),
        }
    }

    fn parse_labelled_or_expression_statement(&mut self) -> PResult<Vec<Stmt>> {
        if self.parse_labelled_statement()?.is_some() {
            return Ok(Some(Vec::new()));
        }
        self.parse_expression_statement().map(no_nodes)
    }
}

fn no_nodes(matched: Option<()>) -> Option<Vec<Stmt>> {
    matched.map(|()| Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkpoint_restore_relexes() {
        let mut parser = Parser::new("a + b");
        let cp = parser.checkpoint();
        parser.advance().unwrap();
        parser.advance().unwrap();
        assert_eq!(parser.cur.text, "b");
        parser.restore(cp);
        assert_eq!(parser.cur.text, "a");
        assert_eq!(parser.prev_token_end(), 0);
    }

    #[test]
    fn test_closing_angle_split() {
        let mut parser = Parser::new(">>= 1");
        assert!(parser.eat_closing_angle().unwrap());
        assert_eq!(parser.cur.kind, TokenKind::GreaterThanEqualsToken);
        assert_eq!(parser.prev_token_end(), 1);
        assert!(parser.eat_closing_angle().unwrap());
        assert_eq!(parser.cur.kind, TokenKind::EqualsToken);
    }

    #[test]
    fn test_skip_balanced_nested() {
        let mut parser = Parser::new("( [ { } ] ) x");
        assert!(parser.skip_balanced().unwrap());
        assert_eq!(parser.cur.text, "x");
    }

    #[test]
    fn test_skip_balanced_stops_at_mismatch() {
        let mut parser = Parser::new("( } )");
        assert!(!parser.skip_balanced().unwrap());
        assert_eq!(parser.cur.kind, TokenKind::CloseBraceToken);

        let mut stray = Parser::new(") x");
        assert!(stray.skip_balanced().unwrap());
        assert_eq!(stray.cur.text, "x");

        let mut open = Parser::new("( a");
        assert!(!open.skip_balanced().unwrap());
        assert!(open.cur.is_eof());
    }

    #[test]
    fn test_skip_balanced_through_template() {
        let mut parser = Parser::new("( `a${ (1) }b` ) x");
        assert!(parser.skip_balanced().unwrap());
        assert_eq!(parser.cur.text, "x");
    }

    #[test]
    fn test_rescan_regex_restores_on_failure() {
        let mut division = Parser::new("a / b");
        division.advance().unwrap();
        assert!(!division.rescan_regex());
        assert!(division.at(TokenKind::SlashToken));
        division.advance().unwrap();
        assert_eq!(division.cur.text, "b");
    }

    #[test]
    fn test_fuel_runs_out() {
        let options = ParseOptions {
            fuel_per_byte: 0,
            ..ParseOptions::default()
        };
        let mut parser = Parser::with_options("a b", options);
        assert!(matches!(parser.advance(), Err(ParseError::OutOfFuel { .. })));
    }

    #[test]
    fn test_eos_rules() {
        let mut parser = Parser::new("a\nb c");
        parser.advance().unwrap();
        assert!(parser.eos().unwrap());
        parser.advance().unwrap();
        assert!(!parser.eos().unwrap());
    }

    #[test]
    fn test_strict_directive_keeps_line_break_flag() {
        let mut parser = Parser::new("'use strict'\nprivate");
        parser.parse_directive_prologue().unwrap();
        assert!(parser.is_strict_mode());
        assert_eq!(parser.cur.kind, TokenKind::PrivateKeyword);
        assert!(parser.cur.has_preceding_line_break());

        let mut same_line = Parser::new("'use strict'; x");
        same_line.parse_directive_prologue().unwrap();
        assert_eq!(same_line.cur.text, "x");
        assert!(!same_line.cur.has_preceding_line_break());
    }

    #[test]
    fn test_failed_angle_scan_records_open_positions() {
        let mut parser = Parser::new("<a<b>(c)<d;");
        assert!(parser.skip_type_parameters().is_err());
        assert!(parser.unclosed_angles.contains(&0));
        // Closed by the `>` at offset 4.
        assert!(!parser.unclosed_angles.contains(&2));
        assert!(parser.unclosed_angles.contains(&8));

        let mut rescan = Parser::new("<a<b>(c)<d;");
        rescan.record_unclosed_angles([0]);
        assert!(rescan.is_unclosed_angle());
        rescan.advance().unwrap();
        rescan.advance().unwrap();
        assert!(!rescan.is_unclosed_angle());
    }
}
