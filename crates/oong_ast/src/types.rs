//! Token flags and the type-annotation tree.
//!
//! Type nodes model only what annotations need downstream: names, generic
//! applications, arrays, unions and intersections. Everything else (object
//! and tuple shapes, function types, `typeof` queries) is kept as the raw
//! source text.

use serde::Serialize;
use std::fmt;

bitflags::bitflags! {
    /// Per-token flags set by the scanner.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TokenFlags: u16 {
        const NONE                  = 0;
        /// A line terminator was skipped as trivia before this token.
        const PRECEDING_LINE_BREAK  = 1 << 0;
        /// String, template atom or regex ran into a line terminator or EOF.
        const UNTERMINATED          = 1 << 1;
        const SCIENTIFIC            = 1 << 2;
        const CONTAINS_SEPARATOR    = 1 << 3;
        const HEX_SPECIFIER         = 1 << 4;
        const BINARY_SPECIFIER      = 1 << 5;
        const OCTAL_SPECIFIER       = 1 << 6;
        /// Legacy `0`-prefixed octal.
        const OCTAL                 = 1 << 7;
        /// An identifier or regex flag sequence contained a `\u` escape.
        const UNICODE_ESCAPE        = 1 << 8;
        /// A string or template atom contained a malformed escape.
        const CONTAINS_INVALID_ESCAPE = 1 << 9;

        const NUMERIC_LITERAL_FLAGS = Self::SCIENTIFIC.bits()
            | Self::CONTAINS_SEPARATOR.bits()
            | Self::HEX_SPECIFIER.bits()
            | Self::BINARY_SPECIFIER.bits()
            | Self::OCTAL_SPECIFIER.bits()
            | Self::OCTAL.bits();
    }
}

/// A parsed type annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum TypeNode {
    /// `string`, `Foo`, `ns.Foo`, or a literal type such as `"a"` or `1`.
    Named(String),
    /// `Map<K, V>`
    Generic { base: Box<TypeNode>, args: Vec<TypeNode> },
    /// `T[]`
    Array(Box<TypeNode>),
    /// `A | B | C`, flattened.
    Union(Vec<TypeNode>),
    /// `A & B & C`, flattened.
    Intersection(Vec<TypeNode>),
    /// Verbatim source of a form that is not modeled, delimiters included.
    Raw(String),
}

impl TypeNode {
    pub fn named(name: impl Into<String>) -> Self {
        TypeNode::Named(name.into())
    }

    pub fn array(element: TypeNode) -> Self {
        TypeNode::Array(Box::new(element))
    }

    /// Combine `left | right`, splicing in the options of either side that
    /// is already a union.
    pub fn union(left: TypeNode, right: TypeNode) -> Self {
        let mut options = match left {
            TypeNode::Union(options) => options,
            other => vec![other],
        };
        match right {
            TypeNode::Union(more) => options.extend(more),
            other => options.push(other),
        }
        TypeNode::Union(options)
    }

    /// Combine `left & right`, splicing in existing intersections.
    pub fn intersection(left: TypeNode, right: TypeNode) -> Self {
        let mut parts = match left {
            TypeNode::Intersection(parts) => parts,
            other => vec![other],
        };
        match right {
            TypeNode::Intersection(more) => parts.extend(more),
            other => parts.push(other),
        }
        TypeNode::Intersection(parts)
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[TypeNode], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// Compact rendering: no spaces, `raw(...)` around opaque forms.
impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeNode::Named(name) => f.write_str(name),
            TypeNode::Generic { base, args } => {
                write!(f, "{}<", base)?;
                write_joined(f, args, ",")?;
                f.write_str(">")
            }
            TypeNode::Array(element) => write!(f, "{}[]", element),
            TypeNode::Union(options) => write_joined(f, options, "|"),
            TypeNode::Intersection(parts) => write_joined(f, parts, "&"),
            TypeNode::Raw(raw) => write!(f, "raw({})", raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_generic_array() {
        let ty = TypeNode::Generic {
            base: Box::new(TypeNode::named("Map")),
            args: vec![TypeNode::named("string"), TypeNode::array(TypeNode::named("number"))],
        };
        assert_eq!(ty.to_string(), "Map<string,number[]>");
    }

    #[test]
    fn test_union_flattens() {
        let ab = TypeNode::union(TypeNode::named("a"), TypeNode::named("b"));
        let abc = TypeNode::union(ab, TypeNode::named("c"));
        assert_eq!(
            abc,
            TypeNode::Union(vec![TypeNode::named("a"), TypeNode::named("b"), TypeNode::named("c")])
        );
        assert_eq!(abc.to_string(), "a|b|c");
    }

    #[test]
    fn test_intersection_does_not_absorb_union() {
        let ab = TypeNode::union(TypeNode::named("a"), TypeNode::named("b"));
        let both = TypeNode::intersection(ab, TypeNode::named("c"));
        assert_eq!(both.to_string(), "a|b&c");
        match both {
            TypeNode::Intersection(parts) => assert_eq!(parts.len(), 2),
            other => panic!("expected intersection, got {:?}", other),
        }
    }

    #[test]
    fn test_raw_display() {
        assert_eq!(TypeNode::Raw("{ x: number }".into()).to_string(), "raw({ x: number })");
    }

    #[test]
    fn test_numeric_flag_group() {
        assert!(TokenFlags::NUMERIC_LITERAL_FLAGS.contains(TokenFlags::HEX_SPECIFIER));
        assert!(!TokenFlags::NUMERIC_LITERAL_FLAGS.contains(TokenFlags::UNTERMINATED));
    }
}
