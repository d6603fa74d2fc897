//! Import and export declarations.

use oong_ast::{Stmt, TokenKind};
use oong_diagnostics::ParseError;

use crate::parser::{PResult, Parser};
use crate::utilities::is_identifier_like;

impl<'src> Parser<'src> {
    /// `import "mod";`, `import x, { a as b } from "mod";`,
    /// `import * as ns from "mod";`, `import type { T } from "mod";`.
    /// `import(...)` and `import.meta` are left to expression statements.
    pub(crate) fn parse_import_statement(&mut self) -> PResult<()> {
        if !self.at(TokenKind::ImportKeyword)
            || matches!(self.peek().kind, TokenKind::OpenParenToken | TokenKind::DotToken)
        {
            return Ok(None);
        }
        self.advance()?;
        if self.at(TokenKind::StringLiteral) {
            self.advance()?;
        } else {
            self.parse_import_clause()?;
            self.parse_from_clause()?;
        }
        self.skip_import_attributes()?;
        self.expect_eos()?;
        Ok(Some(()))
    }

    fn parse_import_clause(&mut self) -> Result<(), ParseError> {
        if self.at_contextual("type") {
            let next = self.peek().kind;
            if next != TokenKind::FromKeyword
                && (is_identifier_like(next) || matches!(next, TokenKind::OpenBraceToken | TokenKind::AsteriskToken))
            {
                self.advance()?;
            }
        }
        if is_identifier_like(self.cur.kind) {
            self.advance()?;
            if !self.eat(TokenKind::CommaToken)? {
                return Ok(());
            }
        }
        match self.cur.kind {
            TokenKind::AsteriskToken => {
                self.advance()?;
                self.expect(TokenKind::AsKeyword)?;
                if !is_identifier_like(self.cur.kind) {
                    return Err(self.expected("identifier"));
                }
                self.advance()
            }
            TokenKind::OpenBraceToken => self.parse_named_specifiers(),
            _ => Err(self.expected("{")),
        }
    }

    /// `{ name [as alias], ... }`. Names may be keywords or strings.
    fn parse_named_specifiers(&mut self) -> Result<(), ParseError> {
        self.expect(TokenKind::OpenBraceToken)?;
        while !self.at(TokenKind::CloseBraceToken) {
            if self.at_contextual("type") {
                let next = self.peek().kind;
                if (next.is_identifier_name() || next == TokenKind::StringLiteral) && next != TokenKind::AsKeyword {
                    self.advance()?;
                }
            }
            self.parse_module_export_name()?;
            if self.eat(TokenKind::AsKeyword)? {
                self.parse_module_export_name()?;
            }
            if !self.eat(TokenKind::CommaToken)? {
                break;
            }
        }
        self.expect(TokenKind::CloseBraceToken)
    }

    fn parse_module_export_name(&mut self) -> Result<(), ParseError> {
        if self.cur.kind.is_identifier_name() || self.at(TokenKind::StringLiteral) {
            self.advance()
        } else {
            Err(self.expected("identifier"))
        }
    }

    fn parse_from_clause(&mut self) -> Result<(), ParseError> {
        self.expect(TokenKind::FromKeyword)?;
        if !self.at(TokenKind::StringLiteral) {
            return Err(self.expected("string literal"));
        }
        self.advance()
    }

    /// `with { type: "json" }` or the older `assert { ... }` after a module
    /// specifier.
    fn skip_import_attributes(&mut self) -> Result<(), ParseError> {
        if (self.at(TokenKind::WithKeyword) || self.at_contextual("assert"))
            && !self.line_break_before_current()
            && self.peek().kind == TokenKind::OpenBraceToken
        {
            self.advance()?;
            self.skip_balanced()?;
        }
        Ok(())
    }

    /// Exported variable statements keep their bindings; every other export
    /// form produces no nodes.
    pub(crate) fn parse_export_statement(&mut self) -> PResult<Vec<Stmt>> {
        if !self.eat(TokenKind::ExportKeyword)? {
            return Ok(None);
        }
        match self.cur.kind {
            TokenKind::DefaultKeyword => {
                self.advance()?;
                if self.parse_function_declaration()?.is_none() && self.parse_class_declaration()?.is_none() {
                    self.require_assignment_expression(true)?;
                    self.expect_eos()?;
                }
            }
            TokenKind::AsteriskToken => {
                self.advance()?;
                if self.eat(TokenKind::AsKeyword)? {
                    self.parse_module_export_name()?;
                }
                self.parse_from_clause()?;
                self.skip_import_attributes()?;
                self.expect_eos()?;
            }
            TokenKind::OpenBraceToken => self.parse_export_list()?,
            _ if self.at_contextual("type") && self.peek().kind == TokenKind::OpenBraceToken => {
                self.advance()?;
                self.parse_export_list()?;
            }
            _ => return self.parse_exported_declaration().map(Some),
        }
        Ok(Some(Vec::new()))
    }

    /// `{ a, b as c } [from "mod"];`
    fn parse_export_list(&mut self) -> Result<(), ParseError> {
        self.parse_named_specifiers()?;
        if self.at(TokenKind::FromKeyword) {
            self.parse_from_clause()?;
            self.skip_import_attributes()?;
        }
        self.expect_eos()
    }

    fn parse_exported_declaration(&mut self) -> Result<Vec<Stmt>, ParseError> {
        if let Some(decls) = self.parse_variable_statement()? {
            return Ok(decls);
        }
        if self.parse_class_declaration()?.is_some() || self.parse_function_declaration()?.is_some() {
            return Ok(Vec::new());
        }
        Err(self.statement_expected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn import_ok(src: &str) {
        let mut parser = Parser::new(src);
        let parsed = parser.parse_import_statement();
        assert!(matches!(parsed, Ok(Some(()))), "{src:?}: {parsed:?}");
        assert!(parser.cur.is_eof(), "stopped early in {src:?}");
    }

    #[test]
    fn test_import_forms() {
        for src in [
            "import 'side-effect';",
            "import x from 'a';",
            "import x, { a, b as c, default as d } from 'a';",
            "import * as ns from 'a'",
            "import x, * as ns from 'a';",
            "import type { T } from 'a';",
            "import { type T, U } from 'a';",
            "import type from 'a';",
            "import data from './data.json' with { type: 'json' };",
            "import { 'string name' as s } from 'a';",
        ] {
            import_ok(src);
        }
    }

    #[test]
    fn test_dynamic_import_is_not_a_declaration() {
        let mut parser = Parser::new("import('a');");
        assert_eq!(parser.parse_import_statement().unwrap(), None);
        assert!(parser.at(TokenKind::ImportKeyword));
    }

    #[test]
    fn test_import_needs_from() {
        let mut parser = Parser::new("import { a } 'x';");
        assert!(matches!(
            parser.parse_import_statement(),
            Err(ParseError::Expected { expected: "from", .. })
        ));
    }

    #[test]
    fn test_export_forms() {
        for src in [
            "export default 5;",
            "export default function () {}",
            "export default async function named() {}",
            "export default class {}",
            "export * from 'a';",
            "export * as ns from 'a';",
            "export { a, b as default };",
            "export { x } from 'a';",
            "export type { T } from 'a';",
            "export function f() {}",
            "export async function g() {}",
            "export class C {}",
        ] {
            let mut parser = Parser::new(src);
            let nodes = parser.parse_export_statement().unwrap().unwrap();
            assert!(nodes.is_empty(), "{src:?}");
            assert!(parser.cur.is_eof(), "stopped early in {src:?}");
        }
    }

    #[test]
    fn test_exported_variables_keep_bindings() {
        let mut parser = Parser::new("export const a = 1, b = 2;");
        let nodes = parser.parse_export_statement().unwrap().unwrap();
        assert_eq!(nodes.len(), 2);
    }

    #[test]
    fn test_export_of_nothing() {
        let mut parser = Parser::new("export 5;");
        assert!(matches!(
            parser.parse_export_statement(),
            Err(ParseError::StatementExpected { .. })
        ));
    }
}
