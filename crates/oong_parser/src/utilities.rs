//! Parser utility functions.

use oong_ast::TokenKind;

/// Check if a token kind can be used as a binding or reference name.
/// Contextual keywords are ordinary identifiers outside their context.
pub fn is_identifier_like(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Identifier
            | TokenKind::AsKeyword
            | TokenKind::FromKeyword
            | TokenKind::OfKeyword
            | TokenKind::AsyncKeyword
            | TokenKind::NonStrictLetKeyword
    )
}

/// Check if a token kind can start a binding: a name or a destructuring pattern.
pub fn is_binding_start(kind: TokenKind) -> bool {
    is_identifier_like(kind)
        || matches!(kind, TokenKind::OpenBraceToken | TokenKind::OpenBracketToken)
}

/// Check if a token kind is a left-hand-side expression start.
pub fn is_left_hand_side_expression_start(kind: TokenKind) -> bool {
    is_identifier_like(kind)
        || kind.is_literal()
        || matches!(
            kind,
            TokenKind::BacktickToken
                | TokenKind::OpenParenToken
                | TokenKind::OpenBracketToken
                | TokenKind::OpenBraceToken
                | TokenKind::FunctionKeyword
                | TokenKind::ClassKeyword
                | TokenKind::NewKeyword
                | TokenKind::ThisKeyword
                | TokenKind::SuperKeyword
                | TokenKind::ImportKeyword
                | TokenKind::ConsoleLog
                | TokenKind::ConsoleError
                | TokenKind::ConsoleWarn
                | TokenKind::ConsoleInfo
                | TokenKind::ConsoleSuccess
        )
}

/// Check if a token kind is a prefix operator of a unary expression.
pub fn is_prefix_operator(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::PlusPlusToken
            | TokenKind::MinusMinusToken
            | TokenKind::PlusToken
            | TokenKind::MinusToken
            | TokenKind::TildeToken
            | TokenKind::ExclamationToken
            | TokenKind::DeleteKeyword
            | TokenKind::VoidKeyword
            | TokenKind::TypeOfKeyword
            | TokenKind::AwaitKeyword
    )
}

/// Check if a token kind can start an expression.
pub fn can_start_expression(kind: TokenKind) -> bool {
    is_left_hand_side_expression_start(kind)
        || is_prefix_operator(kind)
        || matches!(kind, TokenKind::YieldKeyword | TokenKind::SlashToken | TokenKind::SlashEqualsToken)
}

/// Check if a token kind can name a class member or object property.
pub fn is_property_name_start(kind: TokenKind) -> bool {
    kind.is_identifier_name()
        || kind.is_numeric_literal()
        || matches!(
            kind,
            TokenKind::StringLiteral | TokenKind::OpenBracketToken | TokenKind::HashToken
        )
}

/// Words that may precede a class member name without being the name.
pub fn is_class_modifier(kind: TokenKind, text: &str) -> bool {
    match kind {
        TokenKind::StaticKeyword
        | TokenKind::PublicKeyword
        | TokenKind::PrivateKeyword
        | TokenKind::ProtectedKeyword
        | TokenKind::AsyncKeyword => true,
        TokenKind::Identifier => matches!(
            text,
            "static" | "public" | "private" | "protected" | "readonly" | "abstract" | "declare" | "override" | "accessor"
        ),
        _ => false,
    }
}

/// Check if a token kind can open a type.
pub fn is_type_start(kind: TokenKind) -> bool {
    is_identifier_like(kind)
        || matches!(
            kind,
            TokenKind::VoidKeyword
                | TokenKind::NullLiteral
                | TokenKind::BooleanLiteral
                | TokenKind::ThisKeyword
                | TokenKind::TypeOfKeyword
                | TokenKind::StringLiteral
                | TokenKind::OpenParenToken
                | TokenKind::OpenBraceToken
                | TokenKind::OpenBracketToken
                | TokenKind::BarToken
                | TokenKind::AmpersandToken
                | TokenKind::MinusToken
        )
        || kind.is_numeric_literal()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contextual_keywords_are_identifiers() {
        assert!(is_identifier_like(TokenKind::OfKeyword));
        assert!(is_identifier_like(TokenKind::NonStrictLetKeyword));
        assert!(!is_identifier_like(TokenKind::StrictLetKeyword));
        assert!(!is_identifier_like(TokenKind::VarKeyword));
    }

    #[test]
    fn test_expression_starts() {
        assert!(can_start_expression(TokenKind::IntegerLiteral));
        assert!(can_start_expression(TokenKind::TypeOfKeyword));
        assert!(can_start_expression(TokenKind::BacktickToken));
        assert!(!can_start_expression(TokenKind::PrintKeyword));
        assert!(!can_start_expression(TokenKind::SemicolonToken));
    }

    #[test]
    fn test_class_modifiers() {
        assert!(is_class_modifier(TokenKind::Identifier, "readonly"));
        assert!(is_class_modifier(TokenKind::StaticKeyword, "static"));
        assert!(!is_class_modifier(TokenKind::Identifier, "get"));
    }
}
