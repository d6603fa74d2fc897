//! Expressions.
//!
//! The recognizer covers the whole operator grammar, but only literals,
//! identifiers and calls of a named function are modeled. Every other
//! expression is carried as the source text it spans.

use oong_ast::{CallExpr, Expr, LiteralKind, TokenKind};
use oong_core::TextSpan;
use oong_diagnostics::{LiteralForm, ParseError};
use oong_scanner::cook_string;
use tracing::trace;

use crate::parser::{PResult, Parser};
use crate::precedence::{get_binary_operator_precedence, OperatorPrecedence};
use crate::utilities::{can_start_expression, is_identifier_like, is_prefix_operator};

/// An expression as recognized: its extent, plus a node when the shape is
/// one the tree models.
#[derive(Debug)]
pub(crate) struct ParsedExpr {
    pub span: TextSpan,
    pub node: Option<Expr>,
}

impl ParsedExpr {
    fn opaque(span: TextSpan) -> Self {
        Self { span, node: None }
    }
}

impl<'src> Parser<'src> {
    /// Turn a recognized expression into a tree node, falling back to its
    /// verbatim source.
    pub(crate) fn finish_expr(&self, parsed: ParsedExpr) -> Expr {
        match parsed.node {
            Some(expr) => expr,
            None => Expr::literal(&self.source()[parsed.span.to_range()], LiteralKind::Raw),
        }
    }

    pub(crate) fn require_expression(&mut self, in_allowed: bool) -> Result<ParsedExpr, ParseError> {
        match self.parse_expression(in_allowed)? {
            Some(expr) => Ok(expr),
            None => Err(self.expression_expected()),
        }
    }

    pub(crate) fn require_assignment_expression(&mut self, in_allowed: bool) -> Result<ParsedExpr, ParseError> {
        match self.parse_assignment_expression(in_allowed)? {
            Some(expr) => Ok(expr),
            None => Err(self.expression_expected()),
        }
    }

    /// `assignment (, assignment)*`. With `in_allowed` false the `in`
    /// operator is not consumed, as in a `for` head.
    pub(crate) fn parse_expression(&mut self, in_allowed: bool) -> PResult<ParsedExpr> {
        let start = self.cur.pos;
        let Some(first) = self.parse_assignment_expression(in_allowed)? else {
            return Ok(None);
        };
        if !self.at(TokenKind::CommaToken) {
            return Ok(Some(first));
        }
        while self.eat(TokenKind::CommaToken)? {
            self.require_assignment_expression(in_allowed)?;
        }
        Ok(Some(ParsedExpr::opaque(self.span_from(start))))
    }

    pub(crate) fn parse_assignment_expression(&mut self, in_allowed: bool) -> PResult<ParsedExpr> {
        self.nested(|p| p.parse_assignment_expression_inner(in_allowed))
    }

    fn parse_assignment_expression_inner(&mut self, in_allowed: bool) -> PResult<ParsedExpr> {
        let start = self.cur.pos;
        if self.at(TokenKind::YieldKeyword) {
            return self.parse_yield_expression(in_allowed).map(Some);
        }
        if self.at_arrow_function_start() && self.speculate(|p| p.parse_arrow_head())?.is_some() {
            if self.at(TokenKind::OpenBraceToken) {
                self.parse_function_body()?;
            } else {
                self.require_assignment_expression(in_allowed)?;
            }
            return Ok(Some(ParsedExpr::opaque(self.span_from(start))));
        }
        let Some(expr) = self.parse_conditional_expression(in_allowed)? else {
            return Ok(None);
        };
        if self.cur.kind.is_assignment_operator() {
            self.advance()?;
            self.require_assignment_expression(in_allowed)?;
            return Ok(Some(ParsedExpr::opaque(self.span_from(start))));
        }
        Ok(Some(expr))
    }

    /// Cheap filter before attempting an arrow function head.
    fn at_arrow_function_start(&self) -> bool {
        match self.cur.kind {
            TokenKind::OpenParenToken | TokenKind::LessThanToken => true,
            TokenKind::AsyncKeyword => {
                let next = self.peek();
                next.kind == TokenKind::EqualsGreaterThanToken
                    || (!next.has_preceding_line_break()
                        && (is_identifier_like(next.kind) || next.kind == TokenKind::OpenParenToken))
            }
            kind if is_identifier_like(kind) => self.peek().kind == TokenKind::EqualsGreaterThanToken,
            _ => false,
        }
    }

    /// `[async] [<T>] (params) [: type] =>` or `[async] name =>`. Matches only
    /// once the arrow is consumed.
    fn parse_arrow_head(&mut self) -> PResult<()> {
        if self.at(TokenKind::AsyncKeyword) && self.peek().kind != TokenKind::EqualsGreaterThanToken {
            self.advance()?;
        }
        if self.at(TokenKind::LessThanToken) {
            self.skip_type_parameters()?;
        }
        match self.cur.kind {
            TokenKind::OpenParenToken => {
                if !self.skip_balanced()? {
                    return Ok(None);
                }
                if self.eat(TokenKind::ColonToken)? && self.parse_type()?.is_none() {
                    return Ok(None);
                }
            }
            kind if is_identifier_like(kind) => self.advance()?,
            _ => return Ok(None),
        }
        if !self.at(TokenKind::EqualsGreaterThanToken) || self.line_break_before_current() {
            return Ok(None);
        }
        self.advance()?;
        Ok(Some(()))
    }

    fn parse_yield_expression(&mut self, in_allowed: bool) -> Result<ParsedExpr, ParseError> {
        let start = self.cur.pos;
        self.advance()?;
        if !self.line_break_before_current() {
            let delegate = self.eat(TokenKind::AsteriskToken)?;
            if delegate || can_start_expression(self.cur.kind) {
                self.require_assignment_expression(in_allowed)?;
            }
        }
        Ok(ParsedExpr::opaque(self.span_from(start)))
    }

    fn parse_conditional_expression(&mut self, in_allowed: bool) -> PResult<ParsedExpr> {
        let start = self.cur.pos;
        let Some(expr) = self.parse_binary_expression(OperatorPrecedence::Lowest, in_allowed)? else {
            return Ok(None);
        };
        if !self.eat(TokenKind::QuestionToken)? {
            return Ok(Some(expr));
        }
        self.require_assignment_expression(true)?;
        self.expect(TokenKind::ColonToken)?;
        self.require_assignment_expression(in_allowed)?;
        Ok(Some(ParsedExpr::opaque(self.span_from(start))))
    }

    /// Precedence climbing over operators that bind tighter than
    /// `min_precedence`. Every operator, `**` included, takes its right
    /// operand at its own level, so a run of equal operators is consumed by
    /// this loop rather than by recursion. The result is an opaque span, so
    /// grouping direction does not show.
    fn parse_binary_expression(&mut self, min_precedence: OperatorPrecedence, in_allowed: bool) -> PResult<ParsedExpr> {
        let start = self.cur.pos;
        let Some(mut left) = self.parse_unary_expression()? else {
            return Ok(None);
        };
        loop {
            let kind = self.cur.kind;
            let precedence = get_binary_operator_precedence(kind);
            if precedence == OperatorPrecedence::Invalid
                || precedence <= min_precedence
                || (kind == TokenKind::InKeyword && !in_allowed)
            {
                break;
            }
            self.advance()?;
            if kind == TokenKind::AsKeyword {
                if !self.eat(TokenKind::ConstKeyword)? {
                    self.require_type()?;
                }
            } else if self.parse_binary_expression(precedence, in_allowed)?.is_none() {
                return Err(self.expression_expected());
            }
            left = ParsedExpr::opaque(self.span_from(start));
        }
        Ok(Some(left))
    }

    fn parse_unary_expression(&mut self) -> PResult<ParsedExpr> {
        if !is_prefix_operator(self.cur.kind) {
            return self.parse_postfix_expression();
        }
        let start = self.cur.pos;
        self.nested(|p| {
            p.advance()?;
            if p.parse_unary_expression()?.is_none() {
                return Err(p.expression_expected());
            }
            Ok(Some(ParsedExpr::opaque(p.span_from(start))))
        })
    }

    fn parse_postfix_expression(&mut self) -> PResult<ParsedExpr> {
        let start = self.cur.pos;
        let Some(expr) = self.parse_left_hand_side_expression()? else {
            return Ok(None);
        };
        if matches!(self.cur.kind, TokenKind::PlusPlusToken | TokenKind::MinusMinusToken)
            && !self.line_break_before_current()
        {
            self.advance()?;
            return Ok(Some(ParsedExpr::opaque(self.span_from(start))));
        }
        Ok(Some(expr))
    }

    pub(crate) fn parse_left_hand_side_expression(&mut self) -> PResult<ParsedExpr> {
        let start = self.cur.pos;
        let expr = if self.at(TokenKind::NewKeyword) {
            self.parse_new_expression()?
        } else {
            match self.parse_primary_expression()? {
                Some(expr) => expr,
                None => return Ok(None),
            }
        };
        self.parse_member_chain(start, expr, true).map(Some)
    }

    /// `new callee [<T>] [(args)]` or `new.target`.
    fn parse_new_expression(&mut self) -> Result<ParsedExpr, ParseError> {
        let start = self.cur.pos;
        self.nested(|p| {
            p.advance()?;
            if p.eat(TokenKind::DotToken)? {
                p.parse_member_name()?;
                return Ok(ParsedExpr::opaque(p.span_from(start)));
            }
            let callee_start = p.cur.pos;
            let callee = if p.at(TokenKind::NewKeyword) {
                p.parse_new_expression()?
            } else {
                match p.parse_primary_expression()? {
                    Some(expr) => expr,
                    None => return Err(p.expression_expected()),
                }
            };
            p.parse_member_chain(callee_start, callee, false)?;
            if p.at(TokenKind::LessThanToken) {
                p.speculate(|p| p.parse_type_arguments_before_call())?;
            }
            if p.at(TokenKind::OpenParenToken) {
                p.parse_arguments()?;
            }
            Ok(ParsedExpr::opaque(p.span_from(start)))
        })
    }

    /// Member accesses, calls, tagged templates and non-null assertions, left
    /// to right. Calls are left alone when `allow_call` is false, for the
    /// callee of `new`.
    fn parse_member_chain(&mut self, start: usize, mut expr: ParsedExpr, allow_call: bool) -> Result<ParsedExpr, ParseError> {
        loop {
            match self.cur.kind {
                TokenKind::DotToken => {
                    self.advance()?;
                    self.parse_member_name()?;
                }
                TokenKind::QuestionDotToken => {
                    self.advance()?;
                    match self.cur.kind {
                        TokenKind::OpenParenToken => {
                            self.parse_arguments()?;
                        }
                        TokenKind::OpenBracketToken => self.parse_element_access()?,
                        _ => self.parse_member_name()?,
                    }
                }
                TokenKind::OpenBracketToken => self.parse_element_access()?,
                TokenKind::OpenParenToken if allow_call => {
                    let args = self.parse_arguments()?;
                    expr = self.call_node(start, expr, args);
                    continue;
                }
                TokenKind::LessThanToken if allow_call => {
                    if self.speculate(|p| p.parse_type_arguments_before_call())?.is_none() {
                        break;
                    }
                    // The call that follows is a generic call, not modeled.
                    expr = ParsedExpr::opaque(self.span_from(start));
                    continue;
                }
                TokenKind::BacktickToken => {
                    self.parse_template_literal()?;
                }
                TokenKind::ExclamationToken if !self.line_break_before_current() => self.advance()?,
                _ => break,
            }
            expr = ParsedExpr::opaque(self.span_from(start));
        }
        Ok(expr)
    }

    fn call_node(&self, start: usize, callee: ParsedExpr, args: Vec<ParsedExpr>) -> ParsedExpr {
        let span = self.span_from(start);
        let node = match callee.node {
            Some(Expr::Identifier(id)) => Some(Expr::Call(CallExpr {
                callee: id.name,
                args: args.into_iter().map(|arg| self.finish_expr(arg)).collect(),
            })),
            _ => None,
        };
        ParsedExpr { span, node }
    }

    /// `<types>` directly followed by `(`.
    fn parse_type_arguments_before_call(&mut self) -> PResult<()> {
        if self.is_unclosed_angle() {
            return Ok(None);
        }
        self.skip_type_parameters()?;
        Ok(self.at(TokenKind::OpenParenToken).then_some(()))
    }

    /// Name after `.` or `?.`: any identifier name, optionally `#private`.
    fn parse_member_name(&mut self) -> Result<(), ParseError> {
        if self.at(TokenKind::HashToken) {
            self.advance()?;
        }
        if self.cur.kind.is_identifier_name() || self.cur.kind.is_print_family() {
            self.advance()
        } else {
            Err(self.expected("identifier"))
        }
    }

    fn parse_element_access(&mut self) -> Result<(), ParseError> {
        self.expect(TokenKind::OpenBracketToken)?;
        self.require_expression(true)?;
        self.expect(TokenKind::CloseBracketToken)
    }

    /// `( [...]arg, ... )`. A trailing comma is allowed.
    pub(crate) fn parse_arguments(&mut self) -> Result<Vec<ParsedExpr>, ParseError> {
        self.expect(TokenKind::OpenParenToken)?;
        let mut args = Vec::new();
        while !self.at(TokenKind::CloseParenToken) {
            let start = self.cur.pos;
            let spread = self.eat(TokenKind::DotDotDotToken)?;
            let arg = self.require_assignment_expression(true)?;
            args.push(if spread {
                ParsedExpr::opaque(self.span_from(start))
            } else {
                arg
            });
            if !self.eat(TokenKind::CommaToken)? {
                break;
            }
        }
        self.expect(TokenKind::CloseParenToken)?;
        Ok(args)
    }

    fn parse_primary_expression(&mut self) -> PResult<ParsedExpr> {
        let start = self.cur.pos;
        if matches!(self.cur.kind, TokenKind::SlashToken | TokenKind::SlashEqualsToken) && !self.rescan_regex() {
            return Ok(None);
        }
        let text = self.cur.text;
        let node = match self.cur.kind {
            TokenKind::StringLiteral => Some(Expr::literal(
                cook_string(&text[1..text.len() - 1]),
                LiteralKind::String,
            )),
            kind if kind.is_big_int_literal() => Some(Expr::literal(text, LiteralKind::BigInt)),
            kind if kind.is_numeric_literal() => Some(Expr::literal(text, LiteralKind::Numeric)),
            TokenKind::BooleanLiteral => Some(Expr::literal(text, LiteralKind::Boolean)),
            TokenKind::NullLiteral => Some(Expr::literal(text, LiteralKind::Null)),
            TokenKind::RegularExpressionLiteral => Some(Expr::literal(text, LiteralKind::Regex)),
            TokenKind::AsyncKeyword if self.async_function_follows() => {
                self.advance()?;
                self.parse_function()?;
                return Ok(Some(ParsedExpr::opaque(self.span_from(start))));
            }
            kind if is_identifier_like(kind) => Some(Expr::identifier(self.identifier_text())),
            TokenKind::ThisKeyword | TokenKind::SuperKeyword | TokenKind::ImportKeyword => None,
            // `console.log` and friends used as values.
            kind if kind.is_print_family() && kind != TokenKind::PrintKeyword => None,
            TokenKind::BacktickToken => return self.parse_template_literal().map(Some),
            TokenKind::OpenParenToken => return self.parse_parenthesized_expression().map(Some),
            TokenKind::OpenBracketToken => return self.parse_array_literal().map(Some),
            TokenKind::OpenBraceToken => return self.parse_object_literal().map(Some),
            TokenKind::FunctionKeyword => {
                self.parse_function()?;
                return Ok(Some(ParsedExpr::opaque(self.span_from(start))));
            }
            TokenKind::ClassKeyword => {
                self.parse_class()?;
                return Ok(Some(ParsedExpr::opaque(self.span_from(start))));
            }
            TokenKind::InvalidToken => return Err(self.expression_expected()),
            _ => return Ok(None),
        };
        self.advance()?;
        Ok(Some(ParsedExpr {
            span: self.span_from(start),
            node,
        }))
    }

    /// `async function` with no line break between the two.
    pub(crate) fn async_function_follows(&self) -> bool {
        let next = self.peek();
        next.kind == TokenKind::FunctionKeyword && !next.has_preceding_line_break()
    }

    /// `( expression )`. An empty pair is only valid as arrow parameters,
    /// which were tried first.
    fn parse_parenthesized_expression(&mut self) -> Result<ParsedExpr, ParseError> {
        let start = self.cur.pos;
        self.advance()?;
        self.require_expression(true)?;
        self.expect(TokenKind::CloseParenToken)?;
        Ok(ParsedExpr::opaque(self.span_from(start)))
    }

    /// `` `atom ${expr} atom` `` with the lookahead on the opening backtick.
    /// A template without substitutions is modeled as its cooked text.
    pub(crate) fn parse_template_literal(&mut self) -> Result<ParsedExpr, ParseError> {
        let start = self.cur.pos;
        self.advance()?;
        let mut cooked = String::new();
        let mut substitutions = false;
        loop {
            match self.cur.kind {
                TokenKind::TemplateStringAtom if self.cur.is_unterminated() => {
                    return Err(self.unterminated_template(start));
                }
                TokenKind::TemplateStringAtom => {
                    cooked.push_str(&cook_string(self.cur.text));
                    self.advance()?;
                }
                TokenKind::TemplateStringStartExpression => {
                    substitutions = true;
                    self.advance()?;
                    self.require_expression(true)?;
                    if !self.at(TokenKind::CloseBraceToken) {
                        return Err(self.expected("}"));
                    }
                    self.resume_template()?;
                }
                TokenKind::BacktickToken => {
                    self.advance()?;
                    break;
                }
                TokenKind::EndOfFileToken => return Err(self.unterminated_template(start)),
                _ => return Err(self.expected("`")),
            }
        }
        let node = (!substitutions).then(|| Expr::literal(cooked, LiteralKind::Template));
        Ok(ParsedExpr {
            span: self.span_from(start),
            node,
        })
    }

    fn unterminated_template(&self, start: usize) -> ParseError {
        ParseError::Unterminated {
            form: LiteralForm::Template,
            span: TextSpan::from_bounds(start, self.cur.end()),
        }
    }

    /// `[ a, , ...b ]`. Elements that do not parse are skipped.
    fn parse_array_literal(&mut self) -> Result<ParsedExpr, ParseError> {
        let start = self.cur.pos;
        self.advance()?;
        while !self.at(TokenKind::CloseBracketToken) && !self.cur.is_eof() {
            if self.eat(TokenKind::CommaToken)? {
                continue;
            }
            self.eat(TokenKind::DotDotDotToken)?;
            if self.parse_assignment_expression(true)?.is_none() {
                if self.at(TokenKind::CloseBracketToken) {
                    break;
                }
                trace!(pos = self.cur.pos, "skipping array element");
                self.skip_balanced()?;
                continue;
            }
            if !self.at(TokenKind::CloseBracketToken) {
                self.expect(TokenKind::CommaToken)?;
            }
        }
        self.expect(TokenKind::CloseBracketToken)?;
        Ok(ParsedExpr::opaque(self.span_from(start)))
    }

    /// `{ a, b: 1, [c]: 2, ...d, m() {}, get g() {} }`. Properties that do
    /// not parse are skipped.
    fn parse_object_literal(&mut self) -> Result<ParsedExpr, ParseError> {
        let start = self.cur.pos;
        self.advance()?;
        while !self.at(TokenKind::CloseBraceToken) && !self.cur.is_eof() {
            if self.speculate(|p| p.parse_property_definition())?.is_none() {
                trace!(pos = self.cur.pos, "skipping object property");
                self.skip_balanced()?;
                continue;
            }
            if !self.at(TokenKind::CloseBraceToken) {
                self.expect(TokenKind::CommaToken)?;
            }
        }
        self.expect(TokenKind::CloseBraceToken)?;
        Ok(ParsedExpr::opaque(self.span_from(start)))
    }

    fn parse_property_definition(&mut self) -> PResult<()> {
        if self.eat(TokenKind::DotDotDotToken)? {
            self.require_assignment_expression(true)?;
            return Ok(Some(()));
        }
        if (self.at_contextual("get") || self.at_contextual("set") || self.at(TokenKind::AsyncKeyword))
            && self.member_name_follows()
        {
            self.advance()?;
        }
        let generator = self.eat(TokenKind::AsteriskToken)?;
        let shorthand = !generator && is_identifier_like(self.cur.kind);
        if self.parse_property_name()?.is_none() {
            return Ok(None);
        }
        match self.cur.kind {
            TokenKind::ColonToken if !generator => {
                self.advance()?;
                self.require_assignment_expression(true)?;
            }
            TokenKind::OpenParenToken | TokenKind::LessThanToken => self.parse_function_rest()?,
            // Initializer in a destructuring pattern written as an object.
            TokenKind::EqualsToken if shorthand => {
                self.advance()?;
                self.require_assignment_expression(true)?;
            }
            TokenKind::CommaToken | TokenKind::CloseBraceToken if shorthand => {}
            _ => return Ok(None),
        }
        Ok(Some(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr(src: &str) -> Expr {
        let mut parser = Parser::new(src);
        let parsed = parser.require_expression(true).unwrap();
        assert!(parser.cur.is_eof(), "trailing input in {src:?}");
        parser.finish_expr(parsed)
    }

    #[test]
    fn test_literal_nodes() {
        assert_eq!(expr("'a\\tb'"), Expr::literal("a\tb", LiteralKind::String));
        assert_eq!(expr("0x1F"), Expr::literal("0x1F", LiteralKind::Numeric));
        assert_eq!(expr("10n"), Expr::literal("10n", LiteralKind::BigInt));
        assert_eq!(expr("true"), Expr::literal("true", LiteralKind::Boolean));
        assert_eq!(expr("null"), Expr::literal("null", LiteralKind::Null));
        assert_eq!(expr("`x\\ny`"), Expr::literal("x\ny", LiteralKind::Template));
        assert_eq!(expr("(/ab+c/gi)"), Expr::literal("(/ab+c/gi)", LiteralKind::Raw));
    }

    #[test]
    fn test_identifier_and_call_nodes() {
        assert_eq!(expr("foo"), Expr::identifier("foo"));
        assert_eq!(expr("\\u0061b"), Expr::identifier("ab"));
        assert_eq!(
            expr("add(1, x)"),
            Expr::Call(CallExpr {
                callee: "add".into(),
                args: vec![Expr::literal("1", LiteralKind::Numeric), Expr::identifier("x")],
            })
        );
        assert_eq!(expr("obj.add(1)"), Expr::literal("obj.add(1)", LiteralKind::Raw));
        assert_eq!(expr("f(1)(2)"), Expr::literal("f(1)(2)", LiteralKind::Raw));
    }

    #[test]
    fn test_operators_are_raw() {
        assert_eq!(expr("1 + 2 * 3"), Expr::literal("1 + 2 * 3", LiteralKind::Raw));
        assert_eq!(expr("-5"), Expr::literal("-5", LiteralKind::Raw));
        assert_eq!(expr("a ? b : c"), Expr::literal("a ? b : c", LiteralKind::Raw));
        assert_eq!(expr("x = y ??= 2"), Expr::literal("x = y ??= 2", LiteralKind::Raw));
        assert_eq!(expr("`a${b}c`"), Expr::literal("`a${b}c`", LiteralKind::Raw));
    }

    #[test]
    fn test_expression_forms() {
        for src in [
            "a ** b ** c",
            "a?.b?.[c]?.(d)",
            "new Map<string, number>()",
            "new.target",
            "new Foo",
            "x as const",
            "y as Array<number>",
            "f<T>(x)",
            "tag`a${1}b`",
            "a!.b",
            "async (a, b) => a + b",
            "async x => { return x; }",
            "(a: number): number => a",
            "<T>(x: T) => x",
            "x => y => x + y",
            "[1, , ...rest, [2]]",
            "({ a, b: 1, [c]: 2, ...d, m() {}, get g() { return 1; }, async *h() {} })",
            "function* gen() { yield* other(); }",
            "class extends Base { #x = 1; static { init(); } }",
            "import.meta.url",
            "import('mod')",
            "typeof x === 'string' && !(y instanceof Z)",
            "console.log",
            "i++",
            "--i",
            "void 0, delete a[b]",
        ] {
            let mut parser = Parser::new(src);
            let parsed = parser.require_expression(true);
            assert!(parsed.is_ok(), "{src:?}: {parsed:?}");
            assert!(parser.cur.is_eof(), "stopped early in {src:?} at {}", parser.cur.pos);
        }
    }

    #[test]
    fn test_in_excluded_when_disallowed() {
        let mut parser = Parser::new("a in b");
        parser.require_expression(false).unwrap();
        assert!(parser.at(TokenKind::InKeyword));
    }

    #[test]
    fn test_comparison_is_not_a_generic_call() {
        let mut parser = Parser::new("a < b > c");
        parser.require_expression(true).unwrap();
        assert!(parser.cur.is_eof());
    }

    #[test]
    fn test_regex_after_keyword_is_rescanned() {
        for src in ["x + /a/.source", "typeof /a/"] {
            let mut parser = Parser::new(src);
            parser.require_expression(true).unwrap();
            assert!(parser.cur.is_eof(), "{src:?}");
        }
        assert_eq!(expr("void /=/"), Expr::literal("void /=/", LiteralKind::Raw));
    }

    #[test]
    fn test_template_errors() {
        let mut unterminated = Parser::new("`abc${x}");
        assert!(matches!(
            unterminated.require_expression(true),
            Err(ParseError::Unterminated { form: LiteralForm::Template, .. })
        ));

        let mut missing_brace = Parser::new("`a${x y}`");
        assert!(matches!(
            missing_brace.require_expression(true),
            Err(ParseError::Expected { expected: "}", .. })
        ));
    }

    #[test]
    fn test_empty_parens_are_not_an_expression() {
        let mut parser = Parser::new("()");
        assert!(matches!(
            parser.require_expression(true),
            Err(ParseError::ExpressionExpected { .. })
        ));
    }
}
