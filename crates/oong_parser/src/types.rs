//! Type annotations.
//!
//! Named types, generic arguments, `[]` suffixes, unions and intersections
//! are modeled. Object and tuple types, function types, `typeof` queries and
//! type operators are kept as their source text.

use oong_ast::{TokenKind, TypeNode};
use oong_diagnostics::ParseError;

use crate::parser::{PResult, Parser};
use crate::utilities::{is_identifier_like, is_type_start};

impl<'src> Parser<'src> {
    /// `: type`, if the lookahead is a colon.
    pub(crate) fn parse_type_annotation(&mut self) -> Result<Option<TypeNode>, ParseError> {
        if !self.eat(TokenKind::ColonToken)? {
            return Ok(None);
        }
        self.require_type().map(Some)
    }

    pub(crate) fn require_type(&mut self) -> Result<TypeNode, ParseError> {
        match self.parse_type()? {
            Some(ty) => Ok(ty),
            None => Err(self.expected("type")),
        }
    }

    pub(crate) fn parse_type(&mut self) -> PResult<TypeNode> {
        self.nested(|p| p.parse_union_type())
    }

    /// `[|] A | B`. A leading bar is allowed.
    fn parse_union_type(&mut self) -> PResult<TypeNode> {
        let leading = self.eat(TokenKind::BarToken)?;
        let Some(mut ty) = self.parse_intersection_type()? else {
            return if leading { Err(self.expected("type")) } else { Ok(None) };
        };
        while self.eat(TokenKind::BarToken)? {
            let Some(right) = self.parse_intersection_type()? else {
                return Err(self.expected("type"));
            };
            ty = TypeNode::union(ty, right);
        }
        Ok(Some(ty))
    }

    fn parse_intersection_type(&mut self) -> PResult<TypeNode> {
        let leading = self.eat(TokenKind::AmpersandToken)?;
        let Some(mut ty) = self.parse_postfix_type()? else {
            return if leading { Err(self.expected("type")) } else { Ok(None) };
        };
        while self.eat(TokenKind::AmpersandToken)? {
            let Some(right) = self.parse_postfix_type()? else {
                return Err(self.expected("type"));
            };
            ty = TypeNode::intersection(ty, right);
        }
        Ok(Some(ty))
    }

    /// `T[]` and indexed access `T["key"]` on the same line.
    fn parse_postfix_type(&mut self) -> PResult<TypeNode> {
        let start = self.cur.pos;
        let Some(mut ty) = self.parse_primary_type()? else {
            return Ok(None);
        };
        while self.at(TokenKind::OpenBracketToken) && !self.line_break_before_current() {
            if self.peek().kind == TokenKind::CloseBracketToken {
                self.advance()?;
                self.advance()?;
                ty = TypeNode::array(ty);
            } else {
                if !self.skip_balanced()? {
                    return Err(self.expected("]"));
                }
                ty = TypeNode::Raw(self.text_from(start).to_string());
            }
        }
        Ok(Some(ty))
    }

    fn parse_primary_type(&mut self) -> PResult<TypeNode> {
        let start = self.cur.pos;
        match self.cur.kind {
            TokenKind::OpenParenToken => {
                if let Some(inner) = self.speculate(|p| p.parse_parenthesized_type())? {
                    return Ok(Some(inner));
                }
                self.parse_function_type(start).map(Some)
            }
            TokenKind::LessThanToken => {
                self.skip_type_parameters()?;
                self.parse_function_type(start).map(Some)
            }
            TokenKind::NewKeyword => {
                self.advance()?;
                if self.at(TokenKind::LessThanToken) {
                    self.skip_type_parameters()?;
                }
                self.parse_function_type(start).map(Some)
            }
            TokenKind::OpenBraceToken | TokenKind::OpenBracketToken => {
                let closer = if self.at(TokenKind::OpenBraceToken) { "}" } else { "]" };
                if !self.skip_balanced()? {
                    return Err(self.expected(closer));
                }
                Ok(Some(self.raw_type_from(start)))
            }
            TokenKind::TypeOfKeyword => {
                self.advance()?;
                self.parse_entity_name()?;
                Ok(Some(self.raw_type_from(start)))
            }
            TokenKind::MinusToken => {
                self.advance()?;
                if !self.cur.kind.is_numeric_literal() {
                    return Err(self.expected("number"));
                }
                self.advance()?;
                Ok(Some(TypeNode::named(self.text_from(start))))
            }
            TokenKind::StringLiteral
            | TokenKind::BooleanLiteral
            | TokenKind::NullLiteral
            | TokenKind::VoidKeyword
            | TokenKind::ThisKeyword => self.single_token_type(),
            kind if kind.is_numeric_literal() => self.single_token_type(),
            _ if self.at_type_operator() => {
                self.advance()?;
                if self.nested(|p| p.parse_postfix_type())?.is_none() {
                    return Err(self.expected("type"));
                }
                Ok(Some(self.raw_type_from(start)))
            }
            kind if is_identifier_like(kind) => self.parse_type_reference().map(Some),
            _ => Ok(None),
        }
    }

    fn single_token_type(&mut self) -> PResult<TypeNode> {
        let ty = TypeNode::named(self.cur.text);
        self.advance()?;
        Ok(Some(ty))
    }

    fn raw_type_from(&self, start: usize) -> TypeNode {
        TypeNode::Raw(self.text_from(start).to_string())
    }

    /// `keyof T`, `readonly T[]`, `unique symbol`, `infer U`.
    fn at_type_operator(&self) -> bool {
        if !matches!(self.cur.text, "keyof" | "readonly" | "unique" | "infer") || self.cur.kind != TokenKind::Identifier {
            return false;
        }
        let next = self.peek();
        !next.has_preceding_line_break() && is_type_start(next.kind)
    }

    /// `( type )`, unless an arrow follows, which makes it a function type.
    fn parse_parenthesized_type(&mut self) -> PResult<TypeNode> {
        self.advance()?;
        let Some(inner) = self.parse_type()? else {
            return Ok(None);
        };
        if !self.eat(TokenKind::CloseParenToken)? || self.at(TokenKind::EqualsGreaterThanToken) {
            return Ok(None);
        }
        Ok(Some(inner))
    }

    /// `(params) => type` with the lookahead on `(`.
    fn parse_function_type(&mut self, start: usize) -> Result<TypeNode, ParseError> {
        if !self.at(TokenKind::OpenParenToken) {
            return Err(self.expected("("));
        }
        if !self.skip_balanced()? {
            return Err(self.expected(")"));
        }
        self.expect(TokenKind::EqualsGreaterThanToken)?;
        self.require_type()?;
        Ok(self.raw_type_from(start))
    }

    /// `a.b.c`
    fn parse_entity_name(&mut self) -> Result<(), ParseError> {
        if !self.cur.kind.is_identifier_name() {
            return Err(self.expected("identifier"));
        }
        self.advance()?;
        while self.at(TokenKind::DotToken) && self.peek().kind.is_identifier_name() {
            self.advance()?;
            self.advance()?;
        }
        Ok(())
    }

    /// `Name[.Name]*[<args>]`
    fn parse_type_reference(&mut self) -> Result<TypeNode, ParseError> {
        let start = self.cur.pos;
        self.parse_entity_name()?;
        let base = TypeNode::named(self.text_from(start));
        if !self.eat(TokenKind::LessThanToken)? {
            return Ok(base);
        }
        let mut args = Vec::new();
        loop {
            args.push(self.require_type()?);
            if !self.eat(TokenKind::CommaToken)? {
                break;
            }
        }
        if !self.eat_closing_angle()? {
            return Err(self.expected(">"));
        }
        Ok(TypeNode::Generic {
            base: Box::new(base),
            args,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ty(src: &str) -> TypeNode {
        let mut parser = Parser::new(src);
        let parsed = parser.require_type().unwrap();
        assert!(parser.cur.is_eof(), "trailing input in {src:?}");
        parsed
    }

    #[test]
    fn test_named_and_generic() {
        assert_eq!(ty("string"), TypeNode::named("string"));
        assert_eq!(ty("ns.Inner"), TypeNode::named("ns.Inner"));
        assert_eq!(
            ty("Map<string, number[]>"),
            TypeNode::Generic {
                base: Box::new(TypeNode::named("Map")),
                args: vec![TypeNode::named("string"), TypeNode::array(TypeNode::named("number"))],
            }
        );
    }

    #[test]
    fn test_nested_generics_split_shift() {
        let parsed = ty("A<B<C<D>>>");
        assert_eq!(parsed.to_string(), "A<B<C<D>>>");
    }

    #[test]
    fn test_union_and_intersection() {
        assert_eq!(
            ty("| 'a' | 'b' | null"),
            TypeNode::Union(vec![
                TypeNode::named("'a'"),
                TypeNode::named("'b'"),
                TypeNode::named("null"),
            ])
        );
        assert_eq!(
            ty("A & B | C"),
            TypeNode::Union(vec![
                TypeNode::Intersection(vec![TypeNode::named("A"), TypeNode::named("B")]),
                TypeNode::named("C"),
            ])
        );
        assert_eq!(
            ty("(A | B)[]"),
            TypeNode::array(TypeNode::Union(vec![TypeNode::named("A"), TypeNode::named("B")]))
        );
    }

    #[test]
    fn test_raw_forms() {
        assert_eq!(ty("{ a: number; b?: string }"), TypeNode::Raw("{ a: number; b?: string }".into()));
        assert_eq!(ty("[number, string]"), TypeNode::Raw("[number, string]".into()));
        assert_eq!(ty("(a: number) => void"), TypeNode::Raw("(a: number) => void".into()));
        assert_eq!(ty("typeof foo.bar"), TypeNode::Raw("typeof foo.bar".into()));
        assert_eq!(ty("keyof T"), TypeNode::Raw("keyof T".into()));
        assert_eq!(ty("T['key']"), TypeNode::Raw("T['key']".into()));
        assert_eq!(ty("new () => Foo"), TypeNode::Raw("new () => Foo".into()));
        assert_eq!(ty("-1"), TypeNode::named("-1"));
    }

    #[test]
    fn test_missing_type() {
        let mut parser = Parser::new("| ;");
        assert!(matches!(parser.require_type(), Err(ParseError::Expected { expected: "type", .. })));
        let mut unclosed = Parser::new("Map<string");
        assert!(matches!(unclosed.require_type(), Err(ParseError::Expected { expected: ">", .. })));
    }
}
