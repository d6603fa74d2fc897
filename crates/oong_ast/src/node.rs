//! AST node definitions.
//!
//! Nodes are plain owned data. The parser builds them and hands the root to
//! the caller; nothing is shared and nothing is mutated after construction.

use crate::token_kind::TokenKind;
use crate::types::TypeNode;
use serde::Serialize;

// ============================================================================
// Expressions
// ============================================================================

/// What a [`LiteralExpr`] value was written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LiteralKind {
    /// Decoded string contents, quotes stripped.
    String,
    /// Decoded template without substitutions, backticks stripped.
    Template,
    /// Numeric source text, any base.
    Numeric,
    /// Numeric source text with the `n` suffix.
    BigInt,
    Boolean,
    Null,
    /// Regex source text including slashes and flags.
    Regex,
    /// Verbatim source of an expression whose shape is not modeled.
    Raw,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiteralExpr {
    pub value: String,
    pub kind: LiteralKind,
}

impl LiteralExpr {
    pub fn new(value: impl Into<String>, kind: LiteralKind) -> Self {
        Self {
            value: value.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentifierExpr {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallExpr {
    /// Name of the called identifier.
    pub callee: String,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Expr {
    Literal(LiteralExpr),
    Identifier(IdentifierExpr),
    Call(CallExpr),
}

impl Expr {
    pub fn literal(value: impl Into<String>, kind: LiteralKind) -> Self {
        Expr::Literal(LiteralExpr::new(value, kind))
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Expr::Identifier(IdentifierExpr { name: name.into() })
    }

    /// Literal value or identifier name; the callee for calls.
    pub fn text(&self) -> &str {
        match self {
            Expr::Literal(lit) => &lit.value,
            Expr::Identifier(id) => &id.name,
            Expr::Call(call) => &call.callee,
        }
    }
}

// ============================================================================
// Statements
// ============================================================================

/// The keyword that introduced a variable binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VarKind {
    Var,
    Let,
    Const,
}

impl VarKind {
    pub fn from_token(kind: TokenKind) -> Option<VarKind> {
        match kind {
            TokenKind::VarKeyword => Some(VarKind::Var),
            TokenKind::StrictLetKeyword | TokenKind::NonStrictLetKeyword => Some(VarKind::Let),
            TokenKind::ConstKeyword => Some(VarKind::Const),
            _ => None,
        }
    }
}

/// One identifier binding of a variable statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VarDeclStmt {
    pub name: String,
    pub kind: VarKind,
    pub type_annotation: Option<TypeNode>,
    pub initializer: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrintStmt {
    pub args: Vec<Expr>,
    /// `PrintKeyword` or one of the `Console*` kinds.
    pub origin: TokenKind,
}

/// The AST root. Statements are in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Iterate over the print statements, in order.
    pub fn prints(&self) -> impl Iterator<Item = &PrintStmt> {
        self.statements.iter().filter_map(|stmt| match stmt {
            Stmt::Print(print) => Some(print),
            _ => None,
        })
    }

    pub fn var_decls(&self) -> impl Iterator<Item = &VarDeclStmt> {
        self.statements.iter().filter_map(|stmt| match stmt {
            Stmt::VarDecl(decl) => Some(decl),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Stmt {
    VarDecl(VarDeclStmt),
    Print(PrintStmt),
    Program(Program),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_filters() {
        let program = Program {
            statements: vec![
                Stmt::VarDecl(VarDeclStmt {
                    name: "x".into(),
                    kind: VarKind::Const,
                    type_annotation: None,
                    initializer: Some(Expr::literal("1", LiteralKind::Numeric)),
                }),
                Stmt::Print(PrintStmt {
                    args: vec![Expr::identifier("x")],
                    origin: TokenKind::ConsoleLog,
                }),
            ],
        };
        assert_eq!(program.prints().count(), 1);
        assert_eq!(program.var_decls().next().map(|d| d.name.as_str()), Some("x"));
    }

    #[test]
    fn test_var_kind_from_token() {
        assert_eq!(VarKind::from_token(TokenKind::NonStrictLetKeyword), Some(VarKind::Let));
        assert_eq!(VarKind::from_token(TokenKind::Identifier), None);
    }

    #[test]
    fn test_expr_serializes_with_tag() {
        let json = serde_json::to_value(Expr::literal("hi", LiteralKind::String)).unwrap();
        assert_eq!(json["type"], "Literal");
        assert_eq!(json["value"], "hi");
        assert_eq!(json["kind"], "String");
    }
}
