//! Parse options.
//!
//! Options can be built in code or read from a JSON document using the same
//! camelCase naming a project config file would use:
//!
//! ```json
//! { "strict": true, "maxDepth": 128 }
//! ```

use serde::{Deserialize, Serialize};

/// Configuration for a single lexer + parser pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    /// Start in strict mode. A `"use strict"` directive turns it on regardless.
    pub strict: bool,
    /// Maximum nesting of statements, expressions and types.
    pub max_depth: u32,
    /// Token advances the parser may spend per source byte before giving up.
    pub fuel_per_byte: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            strict: false,
            max_depth: 64,
            fuel_per_byte: 256,
        }
    }
}

impl ParseOptions {
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    /// Parse options from a JSON document. Missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Total token advances allowed for a source of `len` bytes.
    pub fn fuel_for(&self, len: usize) -> usize {
        self.fuel_per_byte.saturating_mul(len.saturating_add(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = ParseOptions::default();
        assert!(!opts.strict);
        assert_eq!(opts.max_depth, 64);
        assert_eq!(opts.fuel_for(0), 256);
    }

    #[test]
    fn test_from_json_partial() {
        let opts = ParseOptions::from_json(r#"{ "strict": true, "maxDepth": 64 }"#).unwrap();
        assert!(opts.strict);
        assert_eq!(opts.max_depth, 64);
        assert_eq!(opts.fuel_per_byte, ParseOptions::default().fuel_per_byte);
    }

    #[test]
    fn test_from_json_rejects_bad_types() {
        assert!(ParseOptions::from_json(r#"{ "strict": "yes" }"#).is_err());
    }
}
