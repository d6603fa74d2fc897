//! oong_parser: Recursive descent parser for oong source.
//!
//! Pulls tokens from the scanner one at a time and builds a [`Program`] of the
//! top-level variable declarations and print statements. Every other
//! construct of the language is recognized and validated, then dropped.
//!
//! ```
//! let program = oong_parser::parse("const x = 1;\nprint(x);").unwrap().unwrap();
//! assert_eq!(program.statements.len(), 2);
//! ```

mod declarations;
mod expressions;
mod modules;
mod parser;
mod precedence;
mod statements;
mod types;
mod utilities;

pub use oong_ast::Program;
pub use oong_core::ParseOptions;
pub use oong_diagnostics::ParseError;
pub use parser::{ParseResult, Parser};

/// Parse `src` with default options.
pub fn parse(src: &str) -> ParseResult {
    Parser::new(src).parse()
}

pub fn parse_with_options(src: &str, options: ParseOptions) -> ParseResult {
    Parser::with_options(src, options).parse()
}
