//! AST visitor trait for read-only traversal.
//!
//! Default method bodies walk into children, so an implementor overrides
//! only the node kinds it cares about.

use crate::node::*;
use crate::types::TypeNode;

pub trait AstVisitor {
    fn visit_program(&mut self, node: &Program) {
        for stmt in &node.statements {
            self.visit_statement(stmt);
        }
    }

    fn visit_statement(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl(n) => self.visit_var_decl(n),
            Stmt::Print(n) => self.visit_print(n),
            Stmt::Program(n) => self.visit_program(n),
        }
    }

    // -- Statements --

    fn visit_var_decl(&mut self, node: &VarDeclStmt) {
        if let Some(ty) = &node.type_annotation {
            self.visit_type_node(ty);
        }
        if let Some(init) = &node.initializer {
            self.visit_expression(init);
        }
    }

    fn visit_print(&mut self, node: &PrintStmt) {
        for arg in &node.args {
            self.visit_expression(arg);
        }
    }

    // -- Expressions --

    fn visit_expression(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(n) => self.visit_literal(n),
            Expr::Identifier(n) => self.visit_identifier(n),
            Expr::Call(n) => self.visit_call(n),
        }
    }

    fn visit_literal(&mut self, _node: &LiteralExpr) {}

    fn visit_identifier(&mut self, _node: &IdentifierExpr) {}

    fn visit_call(&mut self, node: &CallExpr) {
        for arg in &node.args {
            self.visit_expression(arg);
        }
    }

    // -- Types --

    fn visit_type_node(&mut self, node: &TypeNode) {
        match node {
            TypeNode::Named(_) | TypeNode::Raw(_) => {}
            TypeNode::Generic { base, args } => {
                self.visit_type_node(base);
                for arg in args {
                    self.visit_type_node(arg);
                }
            }
            TypeNode::Array(element) => self.visit_type_node(element),
            TypeNode::Union(items) | TypeNode::Intersection(items) => {
                for item in items {
                    self.visit_type_node(item);
                }
            }
        }
    }
}

/// Call `f` for each expression directly owned by a statement.
pub fn for_each_expression<'a>(stmt: &'a Stmt, f: &mut impl FnMut(&'a Expr)) {
    match stmt {
        Stmt::VarDecl(decl) => {
            if let Some(init) = &decl.initializer {
                f(init);
            }
        }
        Stmt::Print(print) => print.args.iter().for_each(f),
        Stmt::Program(program) => {
            for inner in &program.statements {
                for_each_expression(inner, f);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token_kind::TokenKind;

    #[derive(Default)]
    struct IdentifierCollector {
        names: Vec<String>,
        named_types: usize,
    }

    impl AstVisitor for IdentifierCollector {
        fn visit_identifier(&mut self, node: &IdentifierExpr) {
            self.names.push(node.name.clone());
        }

        fn visit_type_node(&mut self, node: &TypeNode) {
            if let TypeNode::Named(_) = node {
                self.named_types += 1;
            }
            match node {
                TypeNode::Array(element) => self.visit_type_node(element),
                TypeNode::Union(items) => items.iter().for_each(|t| self.visit_type_node(t)),
                _ => {}
            }
        }
    }

    #[test]
    fn test_visitor_walks_nested_calls_and_types() {
        let program = Program {
            statements: vec![
                Stmt::VarDecl(VarDeclStmt {
                    name: "v".into(),
                    kind: VarKind::Let,
                    type_annotation: Some(TypeNode::union(
                        TypeNode::named("a"),
                        TypeNode::array(TypeNode::named("b")),
                    )),
                    initializer: None,
                }),
                Stmt::Print(PrintStmt {
                    args: vec![Expr::Call(CallExpr {
                        callee: "f".into(),
                        args: vec![Expr::identifier("x"), Expr::identifier("y")],
                    })],
                    origin: TokenKind::PrintKeyword,
                }),
            ],
        };
        let mut collector = IdentifierCollector::default();
        collector.visit_program(&program);
        assert_eq!(collector.names, vec!["x", "y"]);
        assert_eq!(collector.named_types, 2);
    }

    #[test]
    fn test_for_each_expression() {
        let stmt = Stmt::Print(PrintStmt {
            args: vec![Expr::identifier("a"), Expr::identifier("b")],
            origin: TokenKind::ConsoleInfo,
        });
        let mut seen = Vec::new();
        for_each_expression(&stmt, &mut |e| seen.push(e.text().to_string()));
        assert_eq!(seen, vec!["a", "b"]);
    }
}
