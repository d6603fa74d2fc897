//! Operator precedence for binary operators.

use oong_ast::TokenKind;

/// Binary operator precedence levels, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperatorPrecedence {
    /// Floor passed in by callers; no operator has this level.
    Lowest = 0,
    NullishCoalescing = 1,
    LogicalOr = 2,
    LogicalAnd = 3,
    BitwiseOr = 4,
    BitwiseXor = 5,
    BitwiseAnd = 6,
    Equality = 7,
    Relational = 8,
    Shift = 9,
    Additive = 10,
    Multiplicative = 11,
    Exponentiation = 12,
    Invalid = 255,
}

/// Get the binary operator precedence for a given token kind.
pub fn get_binary_operator_precedence(kind: TokenKind) -> OperatorPrecedence {
    match kind {
        TokenKind::QuestionQuestionToken => OperatorPrecedence::NullishCoalescing,
        TokenKind::BarBarToken => OperatorPrecedence::LogicalOr,
        TokenKind::AmpersandAmpersandToken => OperatorPrecedence::LogicalAnd,
        TokenKind::BarToken => OperatorPrecedence::BitwiseOr,
        TokenKind::CaretToken => OperatorPrecedence::BitwiseXor,
        TokenKind::AmpersandToken => OperatorPrecedence::BitwiseAnd,
        TokenKind::EqualsEqualsToken
        | TokenKind::ExclamationEqualsToken
        | TokenKind::EqualsEqualsEqualsToken
        | TokenKind::ExclamationEqualsEqualsToken => OperatorPrecedence::Equality,
        TokenKind::LessThanToken
        | TokenKind::GreaterThanToken
        | TokenKind::LessThanEqualsToken
        | TokenKind::GreaterThanEqualsToken
        | TokenKind::InstanceOfKeyword
        | TokenKind::InKeyword
        | TokenKind::AsKeyword => OperatorPrecedence::Relational,
        TokenKind::LessThanLessThanToken
        | TokenKind::GreaterThanGreaterThanToken
        | TokenKind::GreaterThanGreaterThanGreaterThanToken => OperatorPrecedence::Shift,
        TokenKind::PlusToken | TokenKind::MinusToken => OperatorPrecedence::Additive,
        TokenKind::AsteriskToken | TokenKind::SlashToken | TokenKind::PercentToken => {
            OperatorPrecedence::Multiplicative
        }
        TokenKind::AsteriskAsteriskToken => OperatorPrecedence::Exponentiation,
        _ => OperatorPrecedence::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(
            get_binary_operator_precedence(TokenKind::AsteriskToken)
                > get_binary_operator_precedence(TokenKind::PlusToken)
        );
        assert!(
            get_binary_operator_precedence(TokenKind::AmpersandAmpersandToken)
                > get_binary_operator_precedence(TokenKind::BarBarToken)
        );
        assert_eq!(
            get_binary_operator_precedence(TokenKind::EqualsToken),
            OperatorPrecedence::Invalid
        );
    }
}
