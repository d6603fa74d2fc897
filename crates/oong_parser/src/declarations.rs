//! Variable, function and class declarations.

use oong_ast::{Stmt, TokenFlags, TokenKind, VarDeclStmt, VarKind};
use oong_diagnostics::ParseError;
use oong_scanner::cook_string;
use tracing::{debug, trace};

use crate::parser::{PResult, Parser};
use crate::utilities::{is_binding_start, is_class_modifier, is_identifier_like, is_property_name_start};

impl<'src> Parser<'src> {
    /// Text of the lookahead identifier with `\u` escapes decoded.
    pub(crate) fn identifier_text(&self) -> String {
        if self.cur.flags.contains(TokenFlags::UNICODE_ESCAPE) {
            cook_string(self.cur.text)
        } else {
            self.cur.text.to_string()
        }
    }

    /// The variable kind the lookahead introduces, if it starts a
    /// declaration. Non-strict `let` only does when a binding follows.
    pub(crate) fn at_variable_declaration(&self) -> Option<VarKind> {
        let kind = VarKind::from_token(self.cur.kind)?;
        if self.at(TokenKind::NonStrictLetKeyword) && !is_binding_start(self.peek().kind) {
            return None;
        }
        Some(kind)
    }

    pub(crate) fn parse_variable_statement(&mut self) -> PResult<Vec<Stmt>> {
        let Some(kind) = self.at_variable_declaration() else {
            return Ok(None);
        };
        self.advance()?;
        let decls = self.parse_variable_declaration_list(kind, true)?;
        self.expect_eos()?;
        Ok(Some(decls))
    }

    /// `binding [: type] [= init], ...` after the keyword. Produces one node
    /// per identifier binding; destructuring patterns produce none.
    pub(crate) fn parse_variable_declaration_list(&mut self, kind: VarKind, in_allowed: bool) -> Result<Vec<Stmt>, ParseError> {
        let mut decls = Vec::new();
        loop {
            let name = self.parse_binding_name()?;
            // Definite assignment: `let x!: number;`
            if name.is_some() && self.at(TokenKind::ExclamationToken) && !self.line_break_before_current() {
                self.advance()?;
            }
            let type_annotation = self.parse_type_annotation()?;
            let initializer = if self.eat(TokenKind::EqualsToken)? {
                Some(self.require_assignment_expression(in_allowed)?)
            } else {
                None
            };
            if let Some(name) = name {
                trace!(name = %name, ?kind, "variable binding");
                decls.push(Stmt::VarDecl(VarDeclStmt {
                    name,
                    kind,
                    type_annotation,
                    initializer: initializer.map(|init| self.finish_expr(init)),
                }));
            }
            if !self.eat(TokenKind::CommaToken)? {
                return Ok(decls);
            }
        }
    }

    /// An identifier, or an object or array pattern skipped as a balanced
    /// region. Returns the name for identifiers.
    pub(crate) fn parse_binding_name(&mut self) -> Result<Option<String>, ParseError> {
        if is_identifier_like(self.cur.kind) {
            let name = self.identifier_text();
            self.advance()?;
            return Ok(Some(name));
        }
        let closer = match self.cur.kind {
            TokenKind::OpenBraceToken => "}",
            TokenKind::OpenBracketToken => "]",
            _ => return Err(self.expected("identifier")),
        };
        if !self.skip_balanced()? {
            return Err(self.expected(closer));
        }
        Ok(None)
    }

    // ========================================================================
    // Functions
    // ========================================================================

    pub(crate) fn parse_function_declaration(&mut self) -> PResult<()> {
        if self.at(TokenKind::AsyncKeyword) {
            if !self.async_function_follows() {
                return Ok(None);
            }
            self.advance()?;
        }
        if !self.at(TokenKind::FunctionKeyword) {
            return Ok(None);
        }
        self.parse_function()?;
        Ok(Some(()))
    }

    /// `function [*] [name] ...` with the lookahead on `function`.
    pub(crate) fn parse_function(&mut self) -> Result<(), ParseError> {
        self.advance()?;
        self.eat(TokenKind::AsteriskToken)?;
        if is_identifier_like(self.cur.kind)
            || matches!(self.cur.kind, TokenKind::YieldKeyword | TokenKind::AwaitKeyword)
        {
            self.advance()?;
        }
        self.parse_function_rest()
    }

    /// Type parameters, parameter list, return type and body. A `;` or line
    /// break in place of the body ends an overload signature.
    pub(crate) fn parse_function_rest(&mut self) -> Result<(), ParseError> {
        if self.at(TokenKind::LessThanToken) {
            self.skip_type_parameters()?;
        }
        self.parse_parameters()?;
        self.parse_type_annotation()?;
        if self.at(TokenKind::OpenBraceToken) {
            self.parse_function_body()
        } else {
            self.expect_eos()
        }
    }

    /// `( ... )`, skipped as a balanced region.
    fn parse_parameters(&mut self) -> Result<(), ParseError> {
        if !self.at(TokenKind::OpenParenToken) {
            return Err(self.expected("("));
        }
        if self.skip_balanced()? {
            Ok(())
        } else {
            Err(self.expected(")"))
        }
    }

    /// `{ statements }`. A body that does not parse is skipped as a balanced
    /// region instead.
    pub(crate) fn parse_function_body(&mut self) -> Result<(), ParseError> {
        if !self.at(TokenKind::OpenBraceToken) {
            return Err(self.expected("{"));
        }
        if self.speculate(|p| p.parse_block())?.is_some() {
            return Ok(());
        }
        debug!(pos = self.cur.pos, "skipping function body");
        if self.skip_balanced()? {
            Ok(())
        } else {
            Err(self.expected("}"))
        }
    }

    /// `< ... >` type parameters or arguments with the lookahead on `<`,
    /// skipped by angle depth. `>>` and friends are split.
    ///
    /// On failure every `<` still open is recorded: a later scan starting at
    /// one of them sees the same tokens and cannot close either.
    pub(crate) fn skip_type_parameters(&mut self) -> Result<(), ParseError> {
        let mut open: Vec<usize> = Vec::new();
        loop {
            match self.cur.kind {
                TokenKind::LessThanToken => {
                    open.push(self.cur.pos);
                    self.advance()?;
                }
                TokenKind::GreaterThanToken
                | TokenKind::GreaterThanEqualsToken
                | TokenKind::GreaterThanGreaterThanToken
                | TokenKind::GreaterThanGreaterThanEqualsToken
                | TokenKind::GreaterThanGreaterThanGreaterThanToken
                | TokenKind::GreaterThanGreaterThanGreaterThanEqualsToken => {
                    self.eat_closing_angle()?;
                    open.pop();
                    if open.is_empty() {
                        return Ok(());
                    }
                }
                TokenKind::OpenParenToken | TokenKind::OpenBracketToken | TokenKind::OpenBraceToken => {
                    self.skip_balanced()?;
                }
                TokenKind::EndOfFileToken
                | TokenKind::SemicolonToken
                | TokenKind::CloseParenToken
                | TokenKind::CloseBracketToken
                | TokenKind::CloseBraceToken => {
                    self.record_unclosed_angles(open);
                    return Err(self.expected(">"));
                }
                _ => self.advance()?,
            }
        }
    }

    // ========================================================================
    // Classes
    // ========================================================================

    pub(crate) fn parse_class_declaration(&mut self) -> PResult<()> {
        if !self.at(TokenKind::ClassKeyword) {
            return Ok(None);
        }
        self.parse_class()?;
        Ok(Some(()))
    }

    /// `class [name] [<T>] [extends expr] [implements types] { members }` with
    /// the lookahead on `class`.
    pub(crate) fn parse_class(&mut self) -> Result<(), ParseError> {
        self.nested(|p| p.parse_class_rest())
    }

    fn parse_class_rest(&mut self) -> Result<(), ParseError> {
        self.advance()?;
        if is_identifier_like(self.cur.kind) {
            self.advance()?;
        }
        if self.at(TokenKind::LessThanToken) {
            self.skip_type_parameters()?;
        }
        if self.eat(TokenKind::ExtendsKeyword)? {
            if self.parse_left_hand_side_expression()?.is_none() {
                return Err(self.expression_expected());
            }
            if self.at(TokenKind::LessThanToken) {
                self.skip_type_parameters()?;
            }
        }
        if self.at(TokenKind::ImplementsKeyword) || self.at_contextual("implements") {
            self.advance()?;
            loop {
                self.require_type()?;
                if !self.eat(TokenKind::CommaToken)? {
                    break;
                }
            }
        }
        self.parse_class_body()
    }

    /// Members that do not parse are skipped one balanced region at a time.
    fn parse_class_body(&mut self) -> Result<(), ParseError> {
        self.expect(TokenKind::OpenBraceToken)?;
        while !self.at(TokenKind::CloseBraceToken) && !self.cur.is_eof() {
            if self.eat(TokenKind::SemicolonToken)? {
                continue;
            }
            if self.speculate(|p| p.parse_class_element())?.is_none() {
                trace!(pos = self.cur.pos, "skipping class member");
                self.skip_balanced()?;
            }
        }
        self.expect(TokenKind::CloseBraceToken)
    }

    fn parse_class_element(&mut self) -> PResult<()> {
        if (self.at(TokenKind::StaticKeyword) || self.at_contextual("static"))
            && self.peek().kind == TokenKind::OpenBraceToken
        {
            self.advance()?;
            return self.parse_block();
        }
        while is_class_modifier(self.cur.kind, self.cur.text) && self.member_name_follows() {
            self.advance()?;
        }
        let generator = self.eat(TokenKind::AsteriskToken)?;
        if !generator && (self.at_contextual("get") || self.at_contextual("set")) && self.member_name_follows() {
            self.advance()?;
        }
        if self.parse_property_name()?.is_none() {
            return Ok(None);
        }
        self.eat(TokenKind::QuestionToken)?;
        if self.at(TokenKind::ExclamationToken) {
            self.advance()?;
        }
        if matches!(self.cur.kind, TokenKind::OpenParenToken | TokenKind::LessThanToken) {
            self.parse_function_rest()?;
            return Ok(Some(()));
        }
        self.parse_type_annotation()?;
        if self.eat(TokenKind::EqualsToken)? {
            self.require_assignment_expression(true)?;
        }
        self.expect_eos()?;
        Ok(Some(()))
    }

    /// A modifier or accessor word is only a prefix when a member name
    /// follows on the same line.
    pub(crate) fn member_name_follows(&self) -> bool {
        let next = self.peek();
        !next.has_preceding_line_break()
            && (is_property_name_start(next.kind) || next.kind == TokenKind::AsteriskToken)
    }

    /// Identifier name, string, number, `[computed]` or `#private`.
    pub(crate) fn parse_property_name(&mut self) -> PResult<()> {
        match self.cur.kind {
            TokenKind::HashToken => {
                let next = self.peek();
                if next.pos != self.cur.end() || !next.kind.is_identifier_name() {
                    return Ok(None);
                }
                self.advance()?;
                self.advance()?;
            }
            TokenKind::OpenBracketToken => {
                self.advance()?;
                self.require_assignment_expression(true)?;
                self.expect(TokenKind::CloseBracketToken)?;
            }
            kind if kind.is_identifier_name() || kind.is_numeric_literal() || kind == TokenKind::StringLiteral => {
                self.advance()?;
            }
            _ => return Ok(None),
        }
        Ok(Some(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oong_ast::{Expr, LiteralKind, TypeNode};

    fn decls(src: &str) -> Vec<Stmt> {
        Parser::new(src).parse_variable_statement().unwrap().unwrap()
    }

    #[test]
    fn test_declaration_list() {
        let list = decls("let a = 1, [b, c] = pair, d: string;");
        assert_eq!(list.len(), 2);
        let Stmt::VarDecl(first) = &list[0] else { panic!("expected a declaration") };
        assert_eq!(first.name, "a");
        assert_eq!(first.kind, VarKind::Let);
        assert_eq!(first.initializer, Some(Expr::literal("1", LiteralKind::Numeric)));
        let Stmt::VarDecl(last) = &list[1] else { panic!("expected a declaration") };
        assert_eq!(last.name, "d");
        assert_eq!(last.type_annotation, Some(TypeNode::named("string")));
        assert_eq!(last.initializer, None);
    }

    #[test]
    fn test_non_strict_let_as_name() {
        let parser = Parser::new("let = 5;");
        assert_eq!(parser.at_variable_declaration(), None);
        let parser = Parser::new("let x;");
        assert_eq!(parser.at_variable_declaration(), Some(VarKind::Let));
    }

    #[test]
    fn test_definite_assignment() {
        let list = decls("var x!: number;");
        let Stmt::VarDecl(decl) = &list[0] else { panic!("expected a declaration") };
        assert_eq!(decl.type_annotation, Some(TypeNode::named("number")));
    }

    #[test]
    fn test_type_parameters_split_shift() {
        let mut parser = Parser::new("<A<B<C>>> x");
        parser.skip_type_parameters().unwrap();
        assert_eq!(parser.cur.text, "x");

        let mut unclosed = Parser::new("<A; x");
        assert!(unclosed.skip_type_parameters().is_err());
    }

    #[test]
    fn test_class_members() {
        let src = "class A<T> extends B<T> implements C, D {
            static count = 0;
            private readonly name?: string;
            #secret!: number;
            static { A.count = 1; }
            constructor(x) { this.x = x; }
            get value(): number { return 1; }
            set value(v) {}
            static async *items() {}
            [Symbol.iterator]() {}
            'quoted'() {}
            abstract run(): void;
            get = 1;
            static = 2;
        }";
        let mut parser = Parser::new(src);
        parser.parse_class_declaration().unwrap().unwrap();
        assert!(parser.cur.is_eof());
    }

    #[test]
    fn test_malformed_member_is_skipped() {
        let mut parser = Parser::new("class { ( } } rest");
        parser.parse_class_declaration().unwrap().unwrap();
        assert_eq!(parser.cur.kind, TokenKind::CloseBraceToken);
    }

    #[test]
    fn test_unparseable_body_is_skipped() {
        let mut parser = Parser::new("function f(a, { b }) { print(1 2); } x");
        parser.parse_function_declaration().unwrap().unwrap();
        assert_eq!(parser.cur.text, "x");
    }

    #[test]
    fn test_async_without_function_is_not_a_declaration() {
        let mut parser = Parser::new("async\nfunction f() {}");
        assert_eq!(parser.parse_function_declaration().unwrap(), None);
        assert!(parser.at(TokenKind::AsyncKeyword));
    }
}
