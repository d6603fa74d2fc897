//! oong_core: Core utilities shared by the oong front end.
//!
//! Provides byte-offset text spans, line/column mapping and the parse
//! configuration consumed by the scanner and parser.

pub mod options;
pub mod text;

// Re-export commonly used types
pub use options::ParseOptions;
pub use text::{LineAndColumn, LineMap, TextPos, TextSpan};
