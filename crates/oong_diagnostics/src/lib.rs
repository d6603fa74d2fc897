//! oong_diagnostics: Parse errors and diagnostic reporting.
//!
//! The scanner never fails; malformed input becomes an invalid token. The
//! parser turns the cases it cannot recover from into a [`ParseError`], which
//! carries a span and a stable numeric code. [`Diagnostic`] is the rendered,
//! category-tagged form handed to whoever reports the failure. Nothing in
//! this crate prints.

use oong_core::text::{LineAndColumn, LineMap, TextSpan};
use std::fmt;
use thiserror::Error;

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Message,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
            DiagnosticCategory::Message => write!(f, "message"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    /// The message template. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// Format a message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
    }

    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(1002, Error, "Unterminated string literal.");
    pub const _0_EXPECTED: DiagnosticMessage = diag!(1005, Error, "'{0}' expected.");
    pub const EXPRESSION_EXPECTED: DiagnosticMessage = diag!(1109, Error, "Expression expected.");
    pub const INVALID_CHARACTER: DiagnosticMessage = diag!(1127, Error, "Invalid character.");
    pub const DECLARATION_OR_STATEMENT_EXPECTED: DiagnosticMessage = diag!(1128, Error, "Declaration or statement expected.");
    pub const UNTERMINATED_TEMPLATE_LITERAL: DiagnosticMessage = diag!(1160, Error, "Unterminated template literal.");
    pub const UNTERMINATED_REGULAR_EXPRESSION_LITERAL: DiagnosticMessage = diag!(1161, Error, "Unterminated regular expression literal.");
    pub const NESTING_TOO_DEEP: DiagnosticMessage = diag!(9001, Error, "Source is nested too deeply.");
    pub const PARSER_OUT_OF_FUEL: DiagnosticMessage = diag!(9002, Error, "Parser exceeded its step budget.");
}

/// The kind of literal that ran off the end of its line or of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralForm {
    String,
    Template,
    RegularExpression,
}

impl fmt::Display for LiteralForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralForm::String => write!(f, "string literal"),
            LiteralForm::Template => write!(f, "template literal"),
            LiteralForm::RegularExpression => write!(f, "regular expression literal"),
        }
    }
}

/// A syntactic failure: a mandatory token or production was missing and no
/// alternative production remained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("'{expected}' expected, found '{found}'")]
    Expected {
        expected: &'static str,
        found: String,
        span: TextSpan,
    },

    #[error("expression expected, found '{found}'")]
    ExpressionExpected { found: String, span: TextSpan },

    #[error("declaration or statement expected, found '{found}'")]
    StatementExpected { found: String, span: TextSpan },

    #[error("invalid token '{text}'")]
    InvalidToken { text: String, span: TextSpan },

    #[error("unterminated {form}")]
    Unterminated { form: LiteralForm, span: TextSpan },

    #[error("source is nested too deeply")]
    NestingTooDeep { span: TextSpan },

    #[error("parser exceeded its step budget")]
    OutOfFuel { span: TextSpan },
}

impl ParseError {
    /// Human-readable message, suitable for showing to a user as-is.
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn span(&self) -> TextSpan {
        match self {
            ParseError::Expected { span, .. }
            | ParseError::ExpressionExpected { span, .. }
            | ParseError::StatementExpected { span, .. }
            | ParseError::InvalidToken { span, .. }
            | ParseError::Unterminated { span, .. }
            | ParseError::NestingTooDeep { span }
            | ParseError::OutOfFuel { span } => *span,
        }
    }

    /// The message template this error corresponds to.
    pub fn template(&self) -> &'static DiagnosticMessage {
        match self {
            ParseError::Expected { .. } => &messages::_0_EXPECTED,
            ParseError::ExpressionExpected { .. } => &messages::EXPRESSION_EXPECTED,
            ParseError::StatementExpected { .. } => &messages::DECLARATION_OR_STATEMENT_EXPECTED,
            ParseError::InvalidToken { .. } => &messages::INVALID_CHARACTER,
            ParseError::Unterminated { form, .. } => match form {
                LiteralForm::String => &messages::UNTERMINATED_STRING_LITERAL,
                LiteralForm::Template => &messages::UNTERMINATED_TEMPLATE_LITERAL,
                LiteralForm::RegularExpression => &messages::UNTERMINATED_REGULAR_EXPRESSION_LITERAL,
            },
            ParseError::NestingTooDeep { .. } => &messages::NESTING_TOO_DEEP,
            ParseError::OutOfFuel { .. } => &messages::PARSER_OUT_OF_FUEL,
        }
    }

    pub fn code(&self) -> u32 {
        self.template().code
    }

    /// Resource-limit failures. Backtracking never retries past these.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ParseError::NestingTooDeep { .. } | ParseError::OutOfFuel { .. })
    }
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub span: TextSpan,
    pub message_text: String,
    pub code: u32,
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    pub fn new(message: &DiagnosticMessage, args: &[&str], span: TextSpan) -> Self {
        Self {
            span,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
        }
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }

    /// Resolve the start of this diagnostic to a line and column.
    pub fn line_and_column(&self, map: &LineMap) -> LineAndColumn {
        map.line_and_column_of(self.span.start)
    }
}

impl From<&ParseError> for Diagnostic {
    fn from(err: &ParseError) -> Self {
        let template = err.template();
        match err {
            ParseError::Expected { expected, .. } => Diagnostic::new(template, &[expected], err.span()),
            _ => Diagnostic::new(template, &[], err.span()),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} OG{}: {} {}", self.category, self.code, self.message_text, self.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        assert_eq!(format_message("'{0}' expected.", &[")"]), "')' expected.");
        assert_eq!(format_message("{0} and {1}", &["a", "b"]), "a and b");
    }

    #[test]
    fn test_parse_error_message_and_code() {
        let err = ParseError::Expected {
            expected: ")",
            found: ";".to_string(),
            span: TextSpan::from_bounds(8, 9),
        };
        assert_eq!(err.message(), "')' expected, found ';'");
        assert_eq!(err.code(), 1005);
        assert_eq!(err.span(), TextSpan::from_bounds(8, 9));
    }

    #[test]
    fn test_diagnostic_rendering() {
        let err = ParseError::StatementExpected {
            found: "}".to_string(),
            span: TextSpan::from_bounds(3, 4),
        };
        let diag = Diagnostic::from(&err);
        assert!(diag.is_error());
        assert_eq!(diag.to_string(), "error OG1128: Declaration or statement expected. [3, 4)");
    }

    #[test]
    fn test_diagnostic_line_and_column() {
        let src = "print(1);\nprint(;";
        let map = LineMap::new(src);
        let err = ParseError::ExpressionExpected {
            found: ";".to_string(),
            span: TextSpan::from_bounds(16, 17),
        };
        let lc = Diagnostic::from(&err).line_and_column(&map);
        assert_eq!(lc.line, 1);
        assert_eq!(lc.column, 6);
    }

    #[test]
    fn test_unterminated_template_code() {
        let err = ParseError::Unterminated {
            form: LiteralForm::Template,
            span: TextSpan::empty(0),
        };
        assert_eq!(err.code(), 1160);
        assert_eq!(err.message(), "unterminated template literal");
        assert!(!err.is_fatal());
        assert!(ParseError::OutOfFuel { span: TextSpan::empty(0) }.is_fatal());
    }
}
