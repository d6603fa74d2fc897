//! Token values produced by the lexer.

use oong_ast::token_kind::TokenKind;
use oong_ast::types::TokenFlags;
use oong_core::text::TextSpan;

/// One lexical unit. Borrows its text from the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    /// Raw source slice of the token.
    pub text: &'src str,
    /// Byte offset of the token start.
    pub pos: usize,
    /// Value of a plain decimal `IntegerLiteral`, when it fits.
    pub int_value: Option<i64>,
    pub flags: TokenFlags,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, text: &'src str, pos: usize) -> Self {
        Self {
            kind,
            text,
            pos,
            int_value: None,
            flags: TokenFlags::NONE,
        }
    }

    /// End offset (exclusive).
    #[inline]
    pub fn end(&self) -> usize {
        self.pos + self.text.len()
    }

    #[inline]
    pub fn span(&self) -> TextSpan {
        TextSpan::new(self.pos, self.text.len())
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EndOfFileToken
    }

    /// Whether there was a line break before this token.
    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    #[inline]
    pub fn is_unterminated(&self) -> bool {
        self.flags.contains(TokenFlags::UNTERMINATED)
    }
}
