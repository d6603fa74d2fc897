//! oong_ast: Token kinds and abstract syntax tree definitions.
//!
//! The tree is intentionally small: a [`Program`] of variable declarations
//! and print statements, the expressions they carry, and the type nodes used
//! for annotations. Closed enums replace runtime type inspection.

pub mod node;
pub mod token_kind;
pub mod types;
pub mod visitor;

// Re-export key types
pub use node::*;
pub use token_kind::TokenKind;
pub use types::*;
pub use visitor::AstVisitor;
