//! oong_scanner: Lexer for oong source text.
//!
//! Produces [`Token`]s on demand from a UTF-8 buffer, with support for:
//! - Maximal-munch punctuators and the full keyword table
//! - Decimal, hex, binary, octal, legacy octal and big-integer literals
//! - String literals and template atoms with escape validation
//! - Regular-expression literals, disambiguated from division
//! - Nested block, HTML and CDATA comments and a leading hash-bang

mod char_codes;
mod scanner;
mod token;

pub use scanner::{cook_string, Lexer, LexerState};
pub use token::Token;
