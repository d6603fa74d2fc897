//! Statements.
//!
//! Only print statements carry a node; every other statement here is parsed
//! for validity and dropped, along with anything nested inside it.

use oong_ast::{PrintStmt, TokenKind, VarKind};
use oong_diagnostics::ParseError;

use crate::parser::{PResult, Parser};
use crate::utilities::is_identifier_like;

impl<'src> Parser<'src> {
    /// `print(args)` or `console.log(args)` and friends. The argument list is
    /// mandatory once the keyword is seen.
    pub(crate) fn parse_print_statement(&mut self) -> PResult<PrintStmt> {
        if !self.cur.kind.is_print_family() {
            return Ok(None);
        }
        let origin = self.cur.kind;
        self.advance()?;
        if !self.at(TokenKind::OpenParenToken) {
            return Err(self.expected("("));
        }
        let args = self.parse_arguments()?;
        self.expect_eos()?;
        let args = args.into_iter().map(|arg| self.finish_expr(arg)).collect();
        Ok(Some(PrintStmt { args, origin }))
    }

    pub(crate) fn parse_block(&mut self) -> PResult<()> {
        if !self.at(TokenKind::OpenBraceToken) {
            return Ok(None);
        }
        self.advance()?;
        self.parse_statement_list(false)?;
        self.expect(TokenKind::CloseBraceToken)?;
        Ok(Some(()))
    }

    fn require_block(&mut self) -> Result<(), ParseError> {
        match self.parse_block()? {
            Some(()) => Ok(()),
            None => Err(self.expected("{")),
        }
    }

    /// Statements up to a `}` or the end of input; inside a switch, also up
    /// to the next `case` or `default`.
    fn parse_statement_list(&mut self, in_switch: bool) -> Result<(), ParseError> {
        loop {
            match self.cur.kind {
                TokenKind::EndOfFileToken | TokenKind::CloseBraceToken => return Ok(()),
                TokenKind::CaseKeyword | TokenKind::DefaultKeyword if in_switch => return Ok(()),
                _ => self.require_statement()?,
            }
        }
    }

    fn require_statement(&mut self) -> Result<(), ParseError> {
        match self.parse_statement()? {
            Some(_) => Ok(()),
            None => Err(self.statement_expected()),
        }
    }

    pub(crate) fn parse_empty_statement(&mut self) -> PResult<()> {
        Ok(self.eat(TokenKind::SemicolonToken)?.then_some(()))
    }

    pub(crate) fn parse_expression_statement(&mut self) -> PResult<()> {
        if self.parse_expression(true)?.is_none() {
            return Ok(None);
        }
        self.expect_eos()?;
        Ok(Some(()))
    }

    /// `label: statement`
    pub(crate) fn parse_labelled_statement(&mut self) -> PResult<()> {
        if !is_identifier_like(self.cur.kind) || self.peek().kind != TokenKind::ColonToken {
            return Ok(None);
        }
        self.advance()?;
        self.advance()?;
        self.require_statement()?;
        Ok(Some(()))
    }

    /// `( expression )` after `if`, `while`, `with` and `switch`.
    fn parse_condition(&mut self) -> Result<(), ParseError> {
        self.expect(TokenKind::OpenParenToken)?;
        self.require_expression(true)?;
        self.expect(TokenKind::CloseParenToken)
    }

    /// An `else` binds to the nearest `if`.
    pub(crate) fn parse_if_statement(&mut self) -> PResult<()> {
        if !self.eat(TokenKind::IfKeyword)? {
            return Ok(None);
        }
        self.parse_condition()?;
        self.require_statement()?;
        if self.eat(TokenKind::ElseKeyword)? {
            self.require_statement()?;
        }
        Ok(Some(()))
    }

    pub(crate) fn parse_iteration_statement(&mut self) -> PResult<()> {
        match self.cur.kind {
            TokenKind::DoKeyword => {
                self.advance()?;
                self.require_statement()?;
                self.expect(TokenKind::WhileKeyword)?;
                self.parse_condition()?;
                // The `;` after do-while is optional even on the same line.
                self.eat(TokenKind::SemicolonToken)?;
            }
            TokenKind::WhileKeyword => {
                self.advance()?;
                self.parse_condition()?;
                self.require_statement()?;
            }
            TokenKind::ForKeyword => {
                self.advance()?;
                self.parse_for_head()?;
                self.require_statement()?;
            }
            _ => return Ok(None),
        }
        Ok(Some(()))
    }

    /// `[await] ( init ; test ; update )` or `[await] ( binding in|of expr )`.
    fn parse_for_head(&mut self) -> Result<(), ParseError> {
        self.eat(TokenKind::AwaitKeyword)?;
        self.expect(TokenKind::OpenParenToken)?;
        if !self.at(TokenKind::SemicolonToken) {
            match self.at_variable_declaration() {
                Some(kind) => self.parse_for_declaration(kind)?,
                None => {
                    self.require_expression(false)?;
                }
            }
        }
        if matches!(self.cur.kind, TokenKind::InKeyword | TokenKind::OfKeyword) {
            self.advance()?;
            self.require_assignment_expression(true)?;
            return self.expect(TokenKind::CloseParenToken);
        }
        self.expect(TokenKind::SemicolonToken)?;
        if !self.at(TokenKind::SemicolonToken) {
            self.require_expression(true)?;
        }
        self.expect(TokenKind::SemicolonToken)?;
        if !self.at(TokenKind::CloseParenToken) {
            self.require_expression(true)?;
        }
        self.expect(TokenKind::CloseParenToken)
    }

    fn parse_for_declaration(&mut self, kind: VarKind) -> Result<(), ParseError> {
        self.advance()?;
        self.parse_variable_declaration_list(kind, false)?;
        Ok(())
    }

    /// `continue [label]` and `break [label]`. A label must be on the same
    /// line.
    pub(crate) fn parse_jump_statement(&mut self) -> PResult<()> {
        if !matches!(self.cur.kind, TokenKind::ContinueKeyword | TokenKind::BreakKeyword) {
            return Ok(None);
        }
        self.advance()?;
        if is_identifier_like(self.cur.kind) && !self.line_break_before_current() {
            self.advance()?;
        }
        self.expect_eos()?;
        Ok(Some(()))
    }

    /// A line break after `return` ends the statement.
    pub(crate) fn parse_return_statement(&mut self) -> PResult<()> {
        if !self.eat(TokenKind::ReturnKeyword)? {
            return Ok(None);
        }
        let ends_here = self.line_break_before_current()
            || matches!(
                self.cur.kind,
                TokenKind::SemicolonToken | TokenKind::CloseBraceToken | TokenKind::EndOfFileToken
            );
        if !ends_here {
            self.require_expression(true)?;
        }
        self.expect_eos()?;
        Ok(Some(()))
    }

    pub(crate) fn parse_yield_statement(&mut self) -> PResult<()> {
        if !self.at(TokenKind::YieldKeyword) {
            return Ok(None);
        }
        self.parse_expression_statement()
    }

    pub(crate) fn parse_with_statement(&mut self) -> PResult<()> {
        if !self.eat(TokenKind::WithKeyword)? {
            return Ok(None);
        }
        self.parse_condition()?;
        self.require_statement()?;
        Ok(Some(()))
    }

    pub(crate) fn parse_switch_statement(&mut self) -> PResult<()> {
        if !self.eat(TokenKind::SwitchKeyword)? {
            return Ok(None);
        }
        self.parse_condition()?;
        self.expect(TokenKind::OpenBraceToken)?;
        loop {
            match self.cur.kind {
                TokenKind::CaseKeyword => {
                    self.advance()?;
                    self.require_expression(true)?;
                }
                TokenKind::DefaultKeyword => self.advance()?,
                _ => break,
            }
            self.expect(TokenKind::ColonToken)?;
            self.parse_statement_list(true)?;
        }
        self.expect(TokenKind::CloseBraceToken)?;
        Ok(Some(()))
    }

    /// The thrown expression must start on the same line.
    pub(crate) fn parse_throw_statement(&mut self) -> PResult<()> {
        if !self.eat(TokenKind::ThrowKeyword)? {
            return Ok(None);
        }
        if self.line_break_before_current() {
            return Err(self.expression_expected());
        }
        self.require_expression(true)?;
        self.expect_eos()?;
        Ok(Some(()))
    }

    /// `try {} catch [(binding [: type])] {} finally {}`, with at least one
    /// of the two clauses.
    pub(crate) fn parse_try_statement(&mut self) -> PResult<()> {
        if !self.eat(TokenKind::TryKeyword)? {
            return Ok(None);
        }
        self.require_block()?;
        let mut handled = false;
        if self.eat(TokenKind::CatchKeyword)? {
            handled = true;
            if self.eat(TokenKind::OpenParenToken)? {
                self.parse_binding_name()?;
                self.parse_type_annotation()?;
                self.expect(TokenKind::CloseParenToken)?;
            }
            self.require_block()?;
        }
        if self.eat(TokenKind::FinallyKeyword)? {
            handled = true;
            self.require_block()?;
        }
        if !handled {
            return Err(self.expected("catch"));
        }
        Ok(Some(()))
    }

    pub(crate) fn parse_debugger_statement(&mut self) -> PResult<()> {
        if !self.eat(TokenKind::DebuggerKeyword)? {
            return Ok(None);
        }
        self.expect_eos()?;
        Ok(Some(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oong_ast::{Expr, LiteralKind};

    fn statement_ok(src: &str) {
        let mut parser = Parser::new(src);
        let parsed = parser.parse_statement();
        assert!(matches!(parsed, Ok(Some(_))), "{src:?}: {parsed:?}");
        assert!(parser.cur.is_eof(), "stopped early in {src:?} at {}", parser.cur.pos);
    }

    #[test]
    fn test_print_statement_args() {
        let mut parser = Parser::new("console.warn('a', x, f(1), ...rest);");
        let print = parser.parse_print_statement().unwrap().unwrap();
        assert_eq!(print.origin, TokenKind::ConsoleWarn);
        assert_eq!(
            print.args,
            vec![
                Expr::literal("a", LiteralKind::String),
                Expr::identifier("x"),
                Expr::Call(oong_ast::CallExpr {
                    callee: "f".into(),
                    args: vec![Expr::literal("1", LiteralKind::Numeric)],
                }),
                Expr::literal("...rest", LiteralKind::Raw),
            ]
        );
    }

    #[test]
    fn test_print_requires_parens() {
        let mut parser = Parser::new("print 1;");
        assert!(matches!(
            parser.parse_print_statement(),
            Err(ParseError::Expected { expected: "(", .. })
        ));
        let mut unclosed = Parser::new("print(1");
        assert!(matches!(
            unclosed.parse_print_statement(),
            Err(ParseError::Expected { expected: ")", .. })
        ));
    }

    #[test]
    fn test_control_flow_statements() {
        for src in [
            "if (a) b(); else if (c) d(); else { e(); }",
            "do x++; while (x < 10)",
            "while (true) { break; }",
            "for (;;) {}",
            "for (let i = 0, j = 1; i < 10; i++) continue;",
            "for (const [k, v] of map) {}",
            "for (var key in obj) {}",
            "for (x in y) ;",
            "for await (const chunk of stream) {}",
            "outer: for (;;) { inner: while (1) { continue outer; } }",
            "switch (x) { case 1: case 2: a(); break; default: b(); }",
            "try { a(); } catch { b(); }",
            "try { a(); } catch (e: unknown) { b(); } finally { c(); }",
            "try {} finally {}",
            "with (obj) { prop; }",
            "throw new Error('x');",
            "debugger;",
            "{ ; ; }",
        ] {
            statement_ok(src);
        }
    }

    #[test]
    fn test_try_requires_a_handler() {
        let mut parser = Parser::new("try {} x();");
        assert!(matches!(
            parser.parse_statement(),
            Err(ParseError::Expected { expected: "catch", .. })
        ));
    }

    #[test]
    fn test_throw_requires_same_line() {
        let mut parser = Parser::new("throw\nx;");
        assert!(matches!(
            parser.parse_statement(),
            Err(ParseError::ExpressionExpected { .. })
        ));
    }

    #[test]
    fn test_jump_label_on_next_line_is_a_statement() {
        let mut parser = Parser::new("break\nlabel;");
        parser.parse_statement().unwrap().unwrap();
        assert_eq!(parser.cur.text, "label");
    }

    #[test]
    fn test_switch_rejects_stray_tokens() {
        let mut parser = Parser::new("switch (x) { foo(); }");
        assert!(matches!(
            parser.parse_statement(),
            Err(ParseError::Expected { expected: "}", .. })
        ));
    }
}
