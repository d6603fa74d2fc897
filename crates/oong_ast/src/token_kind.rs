//! TokenKind enum - every lexical unit the scanner can produce.
//!
//! Variants are grouped in contiguous ranges (literals, punctuation,
//! assignments, keywords) so the classification helpers can test a range
//! instead of enumerating members.

use serde::Serialize;

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u8)]
pub enum TokenKind {
    // ========================================================================
    // Markers
    // ========================================================================
    EndOfFileToken,
    /// Malformed or unrecognized input. Carries the offending span.
    InvalidToken,

    // ========================================================================
    // Literals
    // ========================================================================
    /// Plain decimal integer, e.g. `42` or `1_000`.
    IntegerLiteral,
    /// Decimal with a fraction and/or exponent, e.g. `1.5e10`.
    DecimalLiteral,
    HexIntegerLiteral,
    /// `0o17`
    OctalIntegerLiteral,
    /// `017`, only outside strict mode.
    LegacyOctalIntegerLiteral,
    BinaryIntegerLiteral,
    BigDecimalIntegerLiteral,
    BigHexIntegerLiteral,
    BigOctalIntegerLiteral,
    BigBinaryIntegerLiteral,
    StringLiteral,
    RegularExpressionLiteral,
    NullLiteral,
    /// `true` or `false`.
    BooleanLiteral,

    // ========================================================================
    // Template strings
    // ========================================================================
    BacktickToken,
    /// Raw text between a backtick or `}` and the next backtick or `${`.
    TemplateStringAtom,
    /// `${` inside a template.
    TemplateStringStartExpression,

    Identifier,

    // ========================================================================
    // Punctuation
    // ========================================================================
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    DotDotDotToken,
    SemicolonToken,
    CommaToken,
    QuestionDotToken,
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,
    EqualsGreaterThanToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    AsteriskAsteriskToken,
    SlashToken,
    PercentToken,
    PlusPlusToken,
    MinusMinusToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    GreaterThanGreaterThanGreaterThanToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    ExclamationToken,
    TildeToken,
    AmpersandAmpersandToken,
    BarBarToken,
    QuestionToken,
    ColonToken,
    QuestionQuestionToken,
    HashToken,

    // Assignments
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    AsteriskAsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,
    GreaterThanGreaterThanGreaterThanEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    BarBarEqualsToken,
    AmpersandAmpersandEqualsToken,
    QuestionQuestionEqualsToken,

    // ========================================================================
    // Keywords
    // ========================================================================
    BreakKeyword,
    CaseKeyword,
    CatchKeyword,
    ClassKeyword,
    ConstKeyword,
    ContinueKeyword,
    DebuggerKeyword,
    DefaultKeyword,
    DeleteKeyword,
    DoKeyword,
    ElseKeyword,
    EnumKeyword,
    ExportKeyword,
    ExtendsKeyword,
    FinallyKeyword,
    ForKeyword,
    FunctionKeyword,
    IfKeyword,
    ImportKeyword,
    InKeyword,
    InstanceOfKeyword,
    NewKeyword,
    ReturnKeyword,
    SuperKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    TryKeyword,
    TypeOfKeyword,
    VarKeyword,
    VoidKeyword,
    WhileKeyword,
    WithKeyword,

    // Contextual: usable as identifiers where the grammar allows
    AsKeyword,
    FromKeyword,
    OfKeyword,
    YieldKeyword,
    AsyncKeyword,
    AwaitKeyword,
    /// `let` in strict mode.
    StrictLetKeyword,
    /// `let` outside strict mode.
    NonStrictLetKeyword,

    // Reserved only in strict mode
    ImplementsKeyword,
    InterfaceKeyword,
    PackageKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    PublicKeyword,
    StaticKeyword,

    // ========================================================================
    // Print family
    // ========================================================================
    PrintKeyword,
    /// `console.log`
    ConsoleLog,
    ConsoleError,
    ConsoleWarn,
    ConsoleInfo,
    ConsoleSuccess,
}

impl TokenKind {
    pub const FIRST_LITERAL: TokenKind = TokenKind::IntegerLiteral;
    pub const LAST_LITERAL: TokenKind = TokenKind::BooleanLiteral;
    pub const FIRST_NUMERIC_LITERAL: TokenKind = TokenKind::IntegerLiteral;
    pub const LAST_NUMERIC_LITERAL: TokenKind = TokenKind::BigBinaryIntegerLiteral;
    pub const FIRST_PUNCTUATION: TokenKind = TokenKind::OpenBraceToken;
    pub const LAST_PUNCTUATION: TokenKind = TokenKind::QuestionQuestionEqualsToken;
    pub const FIRST_ASSIGNMENT: TokenKind = TokenKind::EqualsToken;
    pub const LAST_ASSIGNMENT: TokenKind = TokenKind::QuestionQuestionEqualsToken;
    pub const FIRST_KEYWORD: TokenKind = TokenKind::BreakKeyword;
    pub const LAST_KEYWORD: TokenKind = TokenKind::PrintKeyword;
    pub const FIRST_CONTEXTUAL_KEYWORD: TokenKind = TokenKind::AsKeyword;
    pub const LAST_CONTEXTUAL_KEYWORD: TokenKind = TokenKind::NonStrictLetKeyword;
    pub const FIRST_STRICT_RESERVED_WORD: TokenKind = TokenKind::ImplementsKeyword;
    pub const LAST_STRICT_RESERVED_WORD: TokenKind = TokenKind::StaticKeyword;
    pub const FIRST_PRINT_FAMILY: TokenKind = TokenKind::PrintKeyword;
    pub const LAST_PRINT_FAMILY: TokenKind = TokenKind::ConsoleSuccess;

    #[inline]
    fn in_range(self, first: TokenKind, last: TokenKind) -> bool {
        let v = self as u8;
        v >= first as u8 && v <= last as u8
    }

    #[inline]
    pub fn is_literal(self) -> bool {
        self.in_range(Self::FIRST_LITERAL, Self::LAST_LITERAL)
    }

    #[inline]
    pub fn is_numeric_literal(self) -> bool {
        self.in_range(Self::FIRST_NUMERIC_LITERAL, Self::LAST_NUMERIC_LITERAL)
    }

    /// Whether this is one of the `n`-suffixed integer kinds.
    #[inline]
    pub fn is_big_int_literal(self) -> bool {
        self.in_range(TokenKind::BigDecimalIntegerLiteral, TokenKind::BigBinaryIntegerLiteral)
    }

    #[inline]
    pub fn is_punctuation(self) -> bool {
        self.in_range(Self::FIRST_PUNCTUATION, Self::LAST_PUNCTUATION)
    }

    #[inline]
    pub fn is_assignment_operator(self) -> bool {
        self.in_range(Self::FIRST_ASSIGNMENT, Self::LAST_ASSIGNMENT)
    }

    /// Whether this kind is a word of the keyword table (including `print`,
    /// contextual and strict-mode reserved words).
    #[inline]
    pub fn is_keyword(self) -> bool {
        self.in_range(Self::FIRST_KEYWORD, Self::LAST_KEYWORD)
    }

    #[inline]
    pub fn is_contextual_keyword(self) -> bool {
        self.in_range(Self::FIRST_CONTEXTUAL_KEYWORD, Self::LAST_CONTEXTUAL_KEYWORD)
    }

    #[inline]
    pub fn is_strict_reserved_word(self) -> bool {
        self.in_range(Self::FIRST_STRICT_RESERVED_WORD, Self::LAST_STRICT_RESERVED_WORD)
    }

    /// `print` or one of the `console.*` kinds.
    #[inline]
    pub fn is_print_family(self) -> bool {
        self.in_range(Self::FIRST_PRINT_FAMILY, Self::LAST_PRINT_FAMILY)
    }

    #[inline]
    pub fn is_let(self) -> bool {
        matches!(self, TokenKind::StrictLetKeyword | TokenKind::NonStrictLetKeyword)
    }

    /// Anything that can appear after `.` in a member access: identifiers,
    /// every keyword and the literal words `null`/`true`/`false`.
    #[inline]
    pub fn is_identifier_name(self) -> bool {
        self == TokenKind::Identifier
            || self.is_keyword()
            || matches!(self, TokenKind::NullLiteral | TokenKind::BooleanLiteral)
    }

    /// Whether this is a template marker token.
    #[inline]
    pub fn is_template(self) -> bool {
        matches!(
            self,
            TokenKind::BacktickToken
                | TokenKind::TemplateStringAtom
                | TokenKind::TemplateStringStartExpression
        )
    }

    /// Get the keyword text for a keyword kind, or None if not a keyword.
    pub fn keyword_text(self) -> Option<&'static str> {
        match self {
            TokenKind::BreakKeyword => Some("break"),
            TokenKind::CaseKeyword => Some("case"),
            TokenKind::CatchKeyword => Some("catch"),
            TokenKind::ClassKeyword => Some("class"),
            TokenKind::ConstKeyword => Some("const"),
            TokenKind::ContinueKeyword => Some("continue"),
            TokenKind::DebuggerKeyword => Some("debugger"),
            TokenKind::DefaultKeyword => Some("default"),
            TokenKind::DeleteKeyword => Some("delete"),
            TokenKind::DoKeyword => Some("do"),
            TokenKind::ElseKeyword => Some("else"),
            TokenKind::EnumKeyword => Some("enum"),
            TokenKind::ExportKeyword => Some("export"),
            TokenKind::ExtendsKeyword => Some("extends"),
            TokenKind::FinallyKeyword => Some("finally"),
            TokenKind::ForKeyword => Some("for"),
            TokenKind::FunctionKeyword => Some("function"),
            TokenKind::IfKeyword => Some("if"),
            TokenKind::ImportKeyword => Some("import"),
            TokenKind::InKeyword => Some("in"),
            TokenKind::InstanceOfKeyword => Some("instanceof"),
            TokenKind::NewKeyword => Some("new"),
            TokenKind::ReturnKeyword => Some("return"),
            TokenKind::SuperKeyword => Some("super"),
            TokenKind::SwitchKeyword => Some("switch"),
            TokenKind::ThisKeyword => Some("this"),
            TokenKind::ThrowKeyword => Some("throw"),
            TokenKind::TryKeyword => Some("try"),
            TokenKind::TypeOfKeyword => Some("typeof"),
            TokenKind::VarKeyword => Some("var"),
            TokenKind::VoidKeyword => Some("void"),
            TokenKind::WhileKeyword => Some("while"),
            TokenKind::WithKeyword => Some("with"),
            TokenKind::AsKeyword => Some("as"),
            TokenKind::FromKeyword => Some("from"),
            TokenKind::OfKeyword => Some("of"),
            TokenKind::YieldKeyword => Some("yield"),
            TokenKind::AsyncKeyword => Some("async"),
            TokenKind::AwaitKeyword => Some("await"),
            TokenKind::StrictLetKeyword | TokenKind::NonStrictLetKeyword => Some("let"),
            TokenKind::ImplementsKeyword => Some("implements"),
            TokenKind::InterfaceKeyword => Some("interface"),
            TokenKind::PackageKeyword => Some("package"),
            TokenKind::PrivateKeyword => Some("private"),
            TokenKind::ProtectedKeyword => Some("protected"),
            TokenKind::PublicKeyword => Some("public"),
            TokenKind::StaticKeyword => Some("static"),
            TokenKind::PrintKeyword => Some("print"),
            TokenKind::NullLiteral => Some("null"),
            _ => None,
        }
    }

    /// Look up a keyword from identifier text. Strict-mode reserved words
    /// are only recognized when `strict` is set, and `let` resolves to the
    /// kind matching the mode.
    pub fn from_keyword(text: &str, strict: bool) -> Option<TokenKind> {
        let kind = match text {
            "break" => TokenKind::BreakKeyword,
            "case" => TokenKind::CaseKeyword,
            "catch" => TokenKind::CatchKeyword,
            "class" => TokenKind::ClassKeyword,
            "const" => TokenKind::ConstKeyword,
            "continue" => TokenKind::ContinueKeyword,
            "debugger" => TokenKind::DebuggerKeyword,
            "default" => TokenKind::DefaultKeyword,
            "delete" => TokenKind::DeleteKeyword,
            "do" => TokenKind::DoKeyword,
            "else" => TokenKind::ElseKeyword,
            "enum" => TokenKind::EnumKeyword,
            "export" => TokenKind::ExportKeyword,
            "extends" => TokenKind::ExtendsKeyword,
            "finally" => TokenKind::FinallyKeyword,
            "for" => TokenKind::ForKeyword,
            "function" => TokenKind::FunctionKeyword,
            "if" => TokenKind::IfKeyword,
            "import" => TokenKind::ImportKeyword,
            "in" => TokenKind::InKeyword,
            "instanceof" => TokenKind::InstanceOfKeyword,
            "new" => TokenKind::NewKeyword,
            "return" => TokenKind::ReturnKeyword,
            "super" => TokenKind::SuperKeyword,
            "switch" => TokenKind::SwitchKeyword,
            "this" => TokenKind::ThisKeyword,
            "throw" => TokenKind::ThrowKeyword,
            "try" => TokenKind::TryKeyword,
            "typeof" => TokenKind::TypeOfKeyword,
            "var" => TokenKind::VarKeyword,
            "void" => TokenKind::VoidKeyword,
            "while" => TokenKind::WhileKeyword,
            "with" => TokenKind::WithKeyword,
            "as" => TokenKind::AsKeyword,
            "from" => TokenKind::FromKeyword,
            "of" => TokenKind::OfKeyword,
            "yield" => TokenKind::YieldKeyword,
            "async" => TokenKind::AsyncKeyword,
            "await" => TokenKind::AwaitKeyword,
            "print" => TokenKind::PrintKeyword,
            "null" => TokenKind::NullLiteral,
            "true" | "false" => TokenKind::BooleanLiteral,
            "let" if strict => TokenKind::StrictLetKeyword,
            "let" => TokenKind::NonStrictLetKeyword,
            "implements" if strict => TokenKind::ImplementsKeyword,
            "interface" if strict => TokenKind::InterfaceKeyword,
            "package" if strict => TokenKind::PackageKeyword,
            "private" if strict => TokenKind::PrivateKeyword,
            "protected" if strict => TokenKind::ProtectedKeyword,
            "public" if strict => TokenKind::PublicKeyword,
            "static" if strict => TokenKind::StaticKeyword,
            _ => return None,
        };
        Some(kind)
    }

    /// Get the punctuation text for a punctuation kind, or None.
    pub fn punctuation_text(self) -> Option<&'static str> {
        match self {
            TokenKind::OpenBraceToken => Some("{"),
            TokenKind::CloseBraceToken => Some("}"),
            TokenKind::OpenParenToken => Some("("),
            TokenKind::CloseParenToken => Some(")"),
            TokenKind::OpenBracketToken => Some("["),
            TokenKind::CloseBracketToken => Some("]"),
            TokenKind::DotToken => Some("."),
            TokenKind::DotDotDotToken => Some("..."),
            TokenKind::SemicolonToken => Some(";"),
            TokenKind::CommaToken => Some(","),
            TokenKind::QuestionDotToken => Some("?."),
            TokenKind::LessThanToken => Some("<"),
            TokenKind::GreaterThanToken => Some(">"),
            TokenKind::LessThanEqualsToken => Some("<="),
            TokenKind::GreaterThanEqualsToken => Some(">="),
            TokenKind::EqualsEqualsToken => Some("=="),
            TokenKind::ExclamationEqualsToken => Some("!="),
            TokenKind::EqualsEqualsEqualsToken => Some("==="),
            TokenKind::ExclamationEqualsEqualsToken => Some("!=="),
            TokenKind::EqualsGreaterThanToken => Some("=>"),
            TokenKind::PlusToken => Some("+"),
            TokenKind::MinusToken => Some("-"),
            TokenKind::AsteriskToken => Some("*"),
            TokenKind::AsteriskAsteriskToken => Some("**"),
            TokenKind::SlashToken => Some("/"),
            TokenKind::PercentToken => Some("%"),
            TokenKind::PlusPlusToken => Some("++"),
            TokenKind::MinusMinusToken => Some("--"),
            TokenKind::LessThanLessThanToken => Some("<<"),
            TokenKind::GreaterThanGreaterThanToken => Some(">>"),
            TokenKind::GreaterThanGreaterThanGreaterThanToken => Some(">>>"),
            TokenKind::AmpersandToken => Some("&"),
            TokenKind::BarToken => Some("|"),
            TokenKind::CaretToken => Some("^"),
            TokenKind::ExclamationToken => Some("!"),
            TokenKind::TildeToken => Some("~"),
            TokenKind::AmpersandAmpersandToken => Some("&&"),
            TokenKind::BarBarToken => Some("||"),
            TokenKind::QuestionToken => Some("?"),
            TokenKind::ColonToken => Some(":"),
            TokenKind::QuestionQuestionToken => Some("??"),
            TokenKind::HashToken => Some("#"),
            TokenKind::BacktickToken => Some("`"),
            TokenKind::TemplateStringStartExpression => Some("${"),
            TokenKind::EqualsToken => Some("="),
            TokenKind::PlusEqualsToken => Some("+="),
            TokenKind::MinusEqualsToken => Some("-="),
            TokenKind::AsteriskEqualsToken => Some("*="),
            TokenKind::AsteriskAsteriskEqualsToken => Some("**="),
            TokenKind::SlashEqualsToken => Some("/="),
            TokenKind::PercentEqualsToken => Some("%="),
            TokenKind::LessThanLessThanEqualsToken => Some("<<="),
            TokenKind::GreaterThanGreaterThanEqualsToken => Some(">>="),
            TokenKind::GreaterThanGreaterThanGreaterThanEqualsToken => Some(">>>="),
            TokenKind::AmpersandEqualsToken => Some("&="),
            TokenKind::BarEqualsToken => Some("|="),
            TokenKind::CaretEqualsToken => Some("^="),
            TokenKind::BarBarEqualsToken => Some("||="),
            TokenKind::AmpersandAmpersandEqualsToken => Some("&&="),
            TokenKind::QuestionQuestionEqualsToken => Some("??="),
            _ => None,
        }
    }

    /// Fixed source text of this kind, if it has one.
    pub fn text(self) -> Option<&'static str> {
        self.punctuation_text().or_else(|| self.keyword_text())
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup_respects_strict_mode() {
        assert_eq!(TokenKind::from_keyword("static", false), None);
        assert_eq!(TokenKind::from_keyword("static", true), Some(TokenKind::StaticKeyword));
        assert_eq!(TokenKind::from_keyword("let", false), Some(TokenKind::NonStrictLetKeyword));
        assert_eq!(TokenKind::from_keyword("let", true), Some(TokenKind::StrictLetKeyword));
        assert_eq!(TokenKind::from_keyword("Print", false), None);
    }

    #[test]
    fn test_keyword_text_round_trips() {
        for word in ["break", "instanceof", "typeof", "yield", "print", "with", "debugger"] {
            let kind = TokenKind::from_keyword(word, false).unwrap();
            assert!(kind.is_keyword(), "{word}");
            assert_eq!(kind.keyword_text(), Some(word));
        }
    }

    #[test]
    fn test_classification_ranges() {
        assert!(TokenKind::BigHexIntegerLiteral.is_numeric_literal());
        assert!(TokenKind::BigHexIntegerLiteral.is_big_int_literal());
        assert!(!TokenKind::StringLiteral.is_numeric_literal());
        assert!(TokenKind::QuestionQuestionEqualsToken.is_assignment_operator());
        assert!(TokenKind::EqualsToken.is_punctuation());
        assert!(!TokenKind::EqualsGreaterThanToken.is_assignment_operator());
        assert!(TokenKind::ConsoleWarn.is_print_family());
        assert!(TokenKind::PrintKeyword.is_print_family());
        assert!(!TokenKind::ConsoleWarn.is_keyword());
        assert!(TokenKind::OfKeyword.is_contextual_keyword());
        assert!(TokenKind::PackageKeyword.is_strict_reserved_word());
        assert!(TokenKind::BooleanLiteral.is_identifier_name());
    }
}
