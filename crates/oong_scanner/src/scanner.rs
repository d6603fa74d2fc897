//! The lexer.
//!
//! A pull-based scanner over an immutable UTF-8 buffer. Each call to
//! [`Lexer::next_token`] skips trivia and returns exactly one token. The
//! lexer never fails: malformed input comes back as `InvalidToken` with the
//! offending span.
//!
//! Scanning is a pure function of the byte offset, the template flag and the
//! strict flag, so the parser can checkpoint with [`Lexer::state`] and resume
//! anywhere with [`Lexer::restore`] or [`Lexer::reset_to`].

use crate::char_codes::*;
use crate::token::Token;
use memchr::{memchr2_iter, memchr3_iter, memmem};
use oong_ast::token_kind::TokenKind;
use oong_ast::types::TokenFlags;
use oong_core::options::ParseOptions;
use tracing::trace;

/// Resumable lexer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerState {
    pub pos: usize,
    pub in_template: bool,
}

#[derive(Clone)]
pub struct Lexer<'src> {
    src: &'src str,
    bytes: &'src [u8],
    pos: usize,
    /// Scanning template atoms rather than ordinary tokens.
    in_template: bool,
    strict: bool,
    token_flags: TokenFlags,
    token_int: Option<i64>,
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            in_template: false,
            strict: false,
            token_flags: TokenFlags::NONE,
            token_int: None,
        }
    }

    pub fn with_options(src: &'src str, options: &ParseOptions) -> Self {
        let mut lexer = Self::new(src);
        lexer.strict = options.strict;
        lexer
    }

    pub fn source(&self) -> &'src str {
        self.src
    }

    /// Current cursor offset.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn set_strict_mode(&mut self, strict: bool) {
        self.strict = strict;
    }

    pub fn is_strict_mode(&self) -> bool {
        self.strict
    }

    pub fn is_in_template(&self) -> bool {
        self.in_template
    }

    pub fn state(&self) -> LexerState {
        LexerState {
            pos: self.pos,
            in_template: self.in_template,
        }
    }

    pub fn restore(&mut self, state: LexerState) {
        self.pos = state.pos.min(self.bytes.len());
        self.in_template = state.in_template;
    }

    /// Resume ordinary scanning at `offset`.
    pub fn reset_to(&mut self, offset: usize) {
        self.restore(LexerState {
            pos: offset,
            in_template: false,
        });
    }

    /// The parser is entering the expression of a `${`.
    pub fn process_template_open_brace(&mut self) {
        self.in_template = false;
    }

    /// The parser has consumed the `}` closing a `${`; resume atom scanning.
    pub fn process_template_close_brace(&mut self) {
        self.in_template = true;
    }

    /// Whether any line terminator lies in `from..to`.
    pub fn contains_line_terminator_between(&self, from: usize, to: usize) -> bool {
        let to = to.min(self.bytes.len());
        if from >= to {
            return false;
        }
        let hay = &self.bytes[from..to];
        memchr3_iter(b'\n', b'\r', 0xE2, hay).any(|i| hay[i] != 0xE2 || is_unicode_line_separator(hay, i))
    }

    /// Re-scan the `/` or `/=` token at `start` as a regular expression,
    /// for positions where the parser knows only an expression can follow.
    /// Only a complete literal is accepted. On failure the cursor is left
    /// inside the token and callers restore a saved state.
    pub fn rescan_regex(&mut self, start: usize) -> Option<Token<'src>> {
        if self.byte_at(start) != Some(b'/') {
            return None;
        }
        self.pos = start;
        self.in_template = false;
        self.token_flags = TokenFlags::NONE;
        self.token_int = None;
        match self.scan_regular_expression()? {
            TokenKind::RegularExpressionLiteral => {
                Some(self.make_token(TokenKind::RegularExpressionLiteral, start))
            }
            _ => None,
        }
    }

    /// Whether a `/` at the cursor should start a regular expression.
    pub fn is_regex_possible(&self) -> bool {
        self.regex_possible_before(self.pos)
    }

    /// Judge by the nearest preceding byte that is not whitespace or a line
    /// terminator.
    fn regex_possible_before(&self, pos: usize) -> bool {
        let b = self.bytes;
        let mut p = pos;
        while p > 0 {
            let ch = b[p - 1];
            match ch {
                b' ' | b'\t' | 0x0B | 0x0C | b'\n' | b'\r' => p -= 1,
                0xA0 if p >= 2 && b[p - 2] == 0xC2 => p -= 2,
                0xA8 | 0xA9 if p >= 3 && is_unicode_line_separator(b, p - 3) => p -= 3,
                b'(' | b',' | b'=' | b':' | b'[' | b'!' | b'?' | b'{' | b'}' => return true,
                _ => return false,
            }
        }
        true
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    #[inline]
    fn byte_at(&self, pos: usize) -> Option<u8> {
        self.bytes.get(pos).copied()
    }

    #[inline]
    fn peek(&self, offset: usize) -> Option<u8> {
        self.byte_at(self.pos + offset)
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn make_token(&self, kind: TokenKind, start: usize) -> Token<'src> {
        Token {
            kind,
            text: &self.src[start..self.pos],
            pos: start,
            int_value: self.token_int,
            flags: self.token_flags,
        }
    }

    /// Scan the next token. At end of input, returns EOF forever.
    pub fn next_token(&mut self) -> Token<'src> {
        self.token_flags = TokenFlags::NONE;
        self.token_int = None;

        if self.in_template {
            let start = self.pos;
            if self.is_eof() {
                return self.make_token(TokenKind::EndOfFileToken, start);
            }
            let kind = self.scan_template_atom();
            return self.make_token(kind, start);
        }

        self.skip_trivia();
        let start = self.pos;
        if self.is_eof() {
            return self.make_token(TokenKind::EndOfFileToken, start);
        }

        let ch = self.bytes[self.pos];
        let kind = match ch {
            b'(' => self.single(TokenKind::OpenParenToken),
            b')' => self.single(TokenKind::CloseParenToken),
            b'{' => self.single(TokenKind::OpenBraceToken),
            b'}' => self.single(TokenKind::CloseBraceToken),
            b'[' => self.single(TokenKind::OpenBracketToken),
            b']' => self.single(TokenKind::CloseBracketToken),
            b';' => self.single(TokenKind::SemicolonToken),
            b',' => self.single(TokenKind::CommaToken),
            b':' => self.single(TokenKind::ColonToken),
            b'~' => self.single(TokenKind::TildeToken),
            b'#' => self.single(TokenKind::HashToken),
            b'`' => {
                self.pos += 1;
                self.in_template = true;
                TokenKind::BacktickToken
            }

            b'.' => self.scan_dot(),
            b'?' => self.scan_question(),
            b'<' => self.scan_less_than(),
            b'>' => self.scan_greater_than(),
            b'=' => self.scan_equals(),
            b'!' => self.scan_exclamation(),
            b'+' => self.scan_doubled_or_assign(b'+', TokenKind::PlusToken, TokenKind::PlusPlusToken, TokenKind::PlusEqualsToken),
            b'-' => self.scan_doubled_or_assign(b'-', TokenKind::MinusToken, TokenKind::MinusMinusToken, TokenKind::MinusEqualsToken),
            b'*' => self.scan_asterisk(),
            b'/' => self.scan_slash(start),
            b'%' => self.scan_with_assign(TokenKind::PercentToken, TokenKind::PercentEqualsToken),
            b'^' => self.scan_with_assign(TokenKind::CaretToken, TokenKind::CaretEqualsToken),
            b'&' => self.scan_logical(b'&', TokenKind::AmpersandToken, TokenKind::AmpersandEqualsToken, TokenKind::AmpersandAmpersandToken, TokenKind::AmpersandAmpersandEqualsToken),
            b'|' => self.scan_logical(b'|', TokenKind::BarToken, TokenKind::BarEqualsToken, TokenKind::BarBarToken, TokenKind::BarBarEqualsToken),

            b'\'' | b'"' => self.scan_string_literal(ch),

            b'0'..=b'9' => self.scan_number(),

            _ if is_ascii_identifier_start(ch) || ch >= 0x80 => self.scan_identifier(start),
            b'\\' if unicode_escape_len(self.bytes, self.pos) > 0 => self.scan_identifier(start),

            _ => {
                self.pos += 1;
                TokenKind::InvalidToken
            }
        };

        if kind == TokenKind::InvalidToken {
            trace!(pos = start, end = self.pos, "invalid token");
        }
        self.make_token(kind, start)
    }

    // ========================================================================
    // Trivia
    // ========================================================================

    /// Skip whitespace, line terminators, comments and a leading hash-bang.
    fn skip_trivia(&mut self) {
        if self.pos == 0 && self.bytes.starts_with(BOM) {
            self.pos = BOM.len();
        }
        let bom_len = if self.bytes.starts_with(BOM) { BOM.len() } else { 0 };
        if self.pos == bom_len && self.bytes[self.pos..].starts_with(b"#!") {
            self.skip_to_line_end();
        }

        loop {
            let ws = white_space_len(self.bytes, self.pos);
            if ws > 0 {
                self.pos += ws;
                continue;
            }
            let lt = line_terminator_len(self.bytes, self.pos);
            if lt > 0 {
                self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                self.pos += lt;
                continue;
            }
            let rest = &self.bytes[self.pos..];
            if rest.starts_with(b"//") {
                self.skip_to_line_end();
            } else if rest.starts_with(b"/*") {
                self.skip_block_comment();
            } else if rest.starts_with(b"<!--") {
                self.skip_delimited_comment(4, b"-->");
            } else if rest.starts_with(b"<![CDATA[") {
                self.skip_delimited_comment(9, b"]]>");
            } else {
                return;
            }
        }
    }

    fn skip_to_line_end(&mut self) {
        while !self.is_eof() && line_terminator_len(self.bytes, self.pos) == 0 {
            self.pos += 1;
        }
    }

    fn note_line_breaks(&mut self, from: usize) {
        if self.contains_line_terminator_between(from, self.pos) {
            self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
        }
    }

    /// `/* ... */`, nestable. Unterminated runs to EOF.
    fn skip_block_comment(&mut self) {
        let start = self.pos;
        let body = start + 2;
        let mut depth = 1usize;
        let mut end = self.bytes.len();
        let mut skip_until = body;
        for i in memchr2_iter(b'/', b'*', &self.bytes[body..]).map(|i| body + i) {
            if i < skip_until {
                continue;
            }
            match (self.bytes[i], self.byte_at(i + 1)) {
                (b'/', Some(b'*')) => {
                    depth += 1;
                    skip_until = i + 2;
                }
                (b'*', Some(b'/')) => {
                    depth -= 1;
                    skip_until = i + 2;
                    if depth == 0 {
                        end = i + 2;
                        break;
                    }
                }
                _ => {}
            }
        }
        self.pos = end;
        self.note_line_breaks(start);
    }

    /// HTML `<!-- -->` and `<![CDATA[ ]]>` comments. Unterminated runs to EOF.
    fn skip_delimited_comment(&mut self, open_len: usize, close: &[u8]) {
        let start = self.pos;
        let body = start + open_len;
        self.pos = match memmem::find(&self.bytes[body..], close) {
            Some(i) => body + i + close.len(),
            None => self.bytes.len(),
        };
        self.note_line_breaks(start);
    }

    // ========================================================================
    // Punctuators
    // ========================================================================

    #[inline]
    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.pos += 1;
        kind
    }

    #[inline]
    fn take(&mut self, len: usize, kind: TokenKind) -> TokenKind {
        self.pos += len;
        kind
    }

    fn scan_dot(&mut self) -> TokenKind {
        if self.peek(1) == Some(b'.') && self.peek(2) == Some(b'.') {
            self.take(3, TokenKind::DotDotDotToken)
        } else if self.peek(1).is_some_and(is_digit) {
            self.scan_number()
        } else {
            self.take(1, TokenKind::DotToken)
        }
    }

    fn scan_question(&mut self) -> TokenKind {
        match (self.peek(1), self.peek(2)) {
            (Some(b'?'), Some(b'=')) => self.take(3, TokenKind::QuestionQuestionEqualsToken),
            (Some(b'?'), _) => self.take(2, TokenKind::QuestionQuestionToken),
            (Some(b'.'), next) if !next.is_some_and(is_digit) => self.take(2, TokenKind::QuestionDotToken),
            _ => self.take(1, TokenKind::QuestionToken),
        }
    }

    fn scan_less_than(&mut self) -> TokenKind {
        match (self.peek(1), self.peek(2)) {
            (Some(b'<'), Some(b'=')) => self.take(3, TokenKind::LessThanLessThanEqualsToken),
            (Some(b'<'), _) => self.take(2, TokenKind::LessThanLessThanToken),
            (Some(b'='), _) => self.take(2, TokenKind::LessThanEqualsToken),
            _ => self.take(1, TokenKind::LessThanToken),
        }
    }

    fn scan_greater_than(&mut self) -> TokenKind {
        match (self.peek(1), self.peek(2), self.peek(3)) {
            (Some(b'>'), Some(b'>'), Some(b'=')) => self.take(4, TokenKind::GreaterThanGreaterThanGreaterThanEqualsToken),
            (Some(b'>'), Some(b'>'), _) => self.take(3, TokenKind::GreaterThanGreaterThanGreaterThanToken),
            (Some(b'>'), Some(b'='), _) => self.take(3, TokenKind::GreaterThanGreaterThanEqualsToken),
            (Some(b'>'), _, _) => self.take(2, TokenKind::GreaterThanGreaterThanToken),
            (Some(b'='), _, _) => self.take(2, TokenKind::GreaterThanEqualsToken),
            _ => self.take(1, TokenKind::GreaterThanToken),
        }
    }

    fn scan_equals(&mut self) -> TokenKind {
        match (self.peek(1), self.peek(2)) {
            (Some(b'>'), _) => self.take(2, TokenKind::EqualsGreaterThanToken),
            (Some(b'='), Some(b'=')) => self.take(3, TokenKind::EqualsEqualsEqualsToken),
            (Some(b'='), _) => self.take(2, TokenKind::EqualsEqualsToken),
            _ => self.take(1, TokenKind::EqualsToken),
        }
    }

    fn scan_exclamation(&mut self) -> TokenKind {
        match (self.peek(1), self.peek(2)) {
            (Some(b'='), Some(b'=')) => self.take(3, TokenKind::ExclamationEqualsEqualsToken),
            (Some(b'='), _) => self.take(2, TokenKind::ExclamationEqualsToken),
            _ => self.take(1, TokenKind::ExclamationToken),
        }
    }

    fn scan_asterisk(&mut self) -> TokenKind {
        match (self.peek(1), self.peek(2)) {
            (Some(b'*'), Some(b'=')) => self.take(3, TokenKind::AsteriskAsteriskEqualsToken),
            (Some(b'*'), _) => self.take(2, TokenKind::AsteriskAsteriskToken),
            (Some(b'='), _) => self.take(2, TokenKind::AsteriskEqualsToken),
            _ => self.take(1, TokenKind::AsteriskToken),
        }
    }

    /// `+`, `++`, `+=` and the `-` equivalents.
    fn scan_doubled_or_assign(&mut self, ch: u8, plain: TokenKind, doubled: TokenKind, assign: TokenKind) -> TokenKind {
        match self.peek(1) {
            Some(b'=') => self.take(2, assign),
            Some(c) if c == ch => self.take(2, doubled),
            _ => self.take(1, plain),
        }
    }

    fn scan_with_assign(&mut self, plain: TokenKind, assign: TokenKind) -> TokenKind {
        if self.peek(1) == Some(b'=') {
            self.take(2, assign)
        } else {
            self.take(1, plain)
        }
    }

    /// `&`, `&=`, `&&`, `&&=` and the `|` equivalents.
    fn scan_logical(&mut self, ch: u8, plain: TokenKind, assign: TokenKind, doubled: TokenKind, doubled_assign: TokenKind) -> TokenKind {
        match (self.peek(1), self.peek(2)) {
            (Some(c), Some(b'=')) if c == ch => self.take(3, doubled_assign),
            (Some(c), _) if c == ch => self.take(2, doubled),
            (Some(b'='), _) => self.take(2, assign),
            _ => self.take(1, plain),
        }
    }

    fn scan_slash(&mut self, start: usize) -> TokenKind {
        if self.regex_possible_before(start) {
            if let Some(kind) = self.scan_regular_expression() {
                return kind;
            }
        }
        self.scan_with_assign(TokenKind::SlashToken, TokenKind::SlashEqualsToken)
    }

    // ========================================================================
    // Regular expressions
    // ========================================================================

    /// Length of a backslash sequence at `pos`: the backslash plus one
    /// non-terminator code point.
    fn regex_backslash_len(&self, pos: usize) -> usize {
        match self.byte_at(pos + 1) {
            Some(next) if line_terminator_len(self.bytes, pos + 1) == 0 => 1 + utf8_len(next),
            _ => 0,
        }
    }

    /// Length of a `[...]` class at `pos`, or 0 if it does not close before a
    /// line terminator.
    fn regex_class_len(&self, pos: usize) -> usize {
        let mut p = pos + 1;
        while let Some(b) = self.byte_at(p) {
            match b {
                b']' => return p + 1 - pos,
                b'\\' => {
                    let len = self.regex_backslash_len(p);
                    if len == 0 {
                        return 0;
                    }
                    p += len;
                }
                _ if line_terminator_len(self.bytes, p) > 0 => return 0,
                _ => p += utf8_len(b),
            }
        }
        0
    }

    /// One body character (class, escape, or plain code point), or 0.
    fn regex_char_len(&self, pos: usize) -> usize {
        match self.byte_at(pos) {
            None | Some(b'/') => 0,
            Some(b'[') => self.regex_class_len(pos),
            Some(b'\\') => self.regex_backslash_len(pos),
            Some(_) if line_terminator_len(self.bytes, pos) > 0 => 0,
            Some(b) => utf8_len(b),
        }
    }

    /// Scan `/body/flags` with the cursor on the opening slash. Returns `None`
    /// without moving when the first body character does not match, leaving
    /// the `/` to be scanned as division.
    fn scan_regular_expression(&mut self) -> Option<TokenKind> {
        let mut p = self.pos + 1;
        let first = self.regex_char_len(p);
        if first == 0 {
            return None;
        }
        p += first;
        loop {
            match self.byte_at(p) {
                Some(b'/') => {
                    p += 1;
                    while let Some(b) = self.byte_at(p) {
                        if is_ascii_identifier_part(b) {
                            p += 1;
                        } else if b == b'\\' && unicode_escape_len(self.bytes, p) > 0 {
                            self.token_flags |= TokenFlags::UNICODE_ESCAPE;
                            p += unicode_escape_len(self.bytes, p);
                        } else {
                            break;
                        }
                    }
                    self.pos = p;
                    return Some(TokenKind::RegularExpressionLiteral);
                }
                _ => {
                    let len = self.regex_char_len(p);
                    if len == 0 {
                        self.pos = p;
                        self.token_flags |= TokenFlags::UNTERMINATED;
                        return Some(TokenKind::InvalidToken);
                    }
                    p += len;
                }
            }
        }
    }

    // ========================================================================
    // Identifiers and keywords
    // ========================================================================

    fn scan_identifier(&mut self, start: usize) -> TokenKind {
        while let Some(b) = self.byte_at(self.pos) {
            if is_ascii_identifier_part(b) {
                self.pos += 1;
            } else if b >= 0x80 {
                // Includes U+200C / U+200D.
                self.pos += utf8_len(b);
            } else if b == b'\\' {
                let len = unicode_escape_len(self.bytes, self.pos);
                if len == 0 {
                    break;
                }
                self.token_flags |= TokenFlags::UNICODE_ESCAPE;
                self.pos += len;
            } else {
                break;
            }
        }
        self.pos = self.pos.min(self.bytes.len());

        let text = &self.src[start..self.pos];
        if text == "console" {
            if let Some(kind) = self.scan_console_member() {
                return kind;
            }
        }
        TokenKind::from_keyword(text, self.strict).unwrap_or(TokenKind::Identifier)
    }

    /// `console.log` and friends lex as one print-family token when the dot
    /// and member name follow with nothing in between.
    fn scan_console_member(&mut self) -> Option<TokenKind> {
        if self.peek(0) != Some(b'.') {
            return None;
        }
        let name_start = self.pos + 1;
        let name_len = self.bytes[name_start..]
            .iter()
            .take_while(|b| b.is_ascii_alphabetic())
            .count();
        let name_end = name_start + name_len;
        if continues_identifier(self.bytes, name_end) {
            return None;
        }
        let kind = match &self.src[name_start..name_end] {
            "log" => TokenKind::ConsoleLog,
            "error" => TokenKind::ConsoleError,
            "warn" => TokenKind::ConsoleWarn,
            "info" => TokenKind::ConsoleInfo,
            "success" => TokenKind::ConsoleSuccess,
            _ => return None,
        };
        self.pos = name_end;
        Some(kind)
    }

    // ========================================================================
    // Numeric literals
    // ========================================================================

    /// Scan digits matching `pred`, allowing `_` separators.
    fn scan_digits(&mut self, pred: fn(u8) -> bool) {
        while let Some(b) = self.byte_at(self.pos) {
            if pred(b) {
                self.pos += 1;
            } else if b == b'_' {
                self.token_flags |= TokenFlags::CONTAINS_SEPARATOR;
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// A lone `0` integer, leaving whatever follows for the next token.
    fn lone_zero(&mut self, start: usize) -> TokenKind {
        self.pos = start + 1;
        self.token_flags.remove(TokenFlags::NUMERIC_LITERAL_FLAGS);
        self.token_int = Some(0);
        TokenKind::IntegerLiteral
    }

    /// `0x`, `0b` and `0o` forms. Cursor is on the prefix letter.
    fn scan_prefixed_integer(
        &mut self,
        start: usize,
        pred: fn(u8) -> bool,
        flag: TokenFlags,
        plain: TokenKind,
        big: TokenKind,
    ) -> TokenKind {
        self.pos += 1;
        if !self.peek(0).is_some_and(pred) {
            return self.lone_zero(start);
        }
        self.token_flags |= flag;
        self.scan_digits(pred);
        if self.peek(0) == Some(b'n') {
            self.pos += 1;
            big
        } else {
            plain
        }
    }

    fn scan_number(&mut self) -> TokenKind {
        let start = self.pos;
        let first = self.bytes[start];

        if first == b'0' {
            match self.peek(1) {
                Some(b'x' | b'X') => {
                    self.pos += 1;
                    return self.scan_prefixed_integer(start, is_hex_digit, TokenFlags::HEX_SPECIFIER, TokenKind::HexIntegerLiteral, TokenKind::BigHexIntegerLiteral);
                }
                Some(b'b' | b'B') => {
                    self.pos += 1;
                    return self.scan_prefixed_integer(start, is_binary_digit, TokenFlags::BINARY_SPECIFIER, TokenKind::BinaryIntegerLiteral, TokenKind::BigBinaryIntegerLiteral);
                }
                Some(b'o' | b'O') => {
                    self.pos += 1;
                    return self.scan_prefixed_integer(start, is_octal_digit, TokenFlags::OCTAL_SPECIFIER, TokenKind::OctalIntegerLiteral, TokenKind::BigOctalIntegerLiteral);
                }
                Some(d) if is_octal_digit(d) && !self.strict => {
                    self.pos += 1;
                    while self.peek(0).is_some_and(is_octal_digit) {
                        self.pos += 1;
                    }
                    self.token_flags |= TokenFlags::OCTAL;
                    if self.peek(0) == Some(b'n') {
                        self.pos += 1;
                        return TokenKind::BigOctalIntegerLiteral;
                    }
                    return TokenKind::LegacyOctalIntegerLiteral;
                }
                Some(d) if is_digit(d) => return self.lone_zero(start),
                _ => {}
            }
        }

        let has_int_part = is_digit(first);
        if has_int_part {
            self.scan_digits(is_digit);
        }

        let mut is_decimal = false;
        if self.peek(0) == Some(b'.') && self.peek(1).is_some_and(is_digit) {
            is_decimal = true;
            self.pos += 1;
            self.scan_digits(is_digit);
        }

        if matches!(self.peek(0), Some(b'e' | b'E')) {
            let sign = usize::from(matches!(self.peek(1), Some(b'+' | b'-')));
            if self.peek(1 + sign).is_some_and(is_digit) {
                self.pos += 1 + sign;
                self.scan_digits(is_digit);
                self.token_flags |= TokenFlags::SCIENTIFIC;
                is_decimal = true;
            }
        }

        if is_decimal {
            return TokenKind::DecimalLiteral;
        }
        if self.peek(0) == Some(b'n') {
            self.pos += 1;
            return TokenKind::BigDecimalIntegerLiteral;
        }

        self.token_int = self.bytes[start..self.pos]
            .iter()
            .filter(|b| **b != b'_')
            .try_fold(0i64, |acc, b| acc.checked_mul(10)?.checked_add(i64::from(*b - b'0')));
        TokenKind::IntegerLiteral
    }

    // ========================================================================
    // Strings and template atoms
    // ========================================================================

    /// Validate the escape at `pos` (pointing at a backslash). Returns the
    /// escape length, or `Err(end)` with the end of the malformed prefix.
    fn scan_escape(&self, pos: usize) -> Result<usize, usize> {
        let continuation = line_continuation_len(self.bytes, pos);
        if continuation > 0 {
            return Ok(continuation);
        }
        match self.byte_at(pos + 1) {
            None => Ok(1),
            Some(b'x') => match hex_escape_len(self.bytes, pos) {
                0 => Err(pos + 2),
                len => Ok(len),
            },
            Some(b'u') => match unicode_escape_len(self.bytes, pos) {
                0 => Err(pos + 2),
                len => Ok(len),
            },
            Some(b'0') if self.byte_at(pos + 2).is_some_and(is_digit) => Err(pos + 2),
            Some(b) => Ok(1 + utf8_len(b)),
        }
    }

    fn scan_string_literal(&mut self, quote: u8) -> TokenKind {
        self.pos += 1;
        loop {
            let Some(b) = self.byte_at(self.pos) else {
                self.token_flags |= TokenFlags::UNTERMINATED;
                return TokenKind::InvalidToken;
            };
            if b == quote {
                self.pos += 1;
                return TokenKind::StringLiteral;
            }
            if b == b'\\' {
                match self.scan_escape(self.pos) {
                    Ok(len) => self.pos += len,
                    Err(end) => {
                        self.pos = end;
                        self.token_flags |= TokenFlags::CONTAINS_INVALID_ESCAPE;
                        return TokenKind::InvalidToken;
                    }
                }
                continue;
            }
            if line_terminator_len(self.bytes, self.pos) > 0 {
                self.token_flags |= TokenFlags::UNTERMINATED;
                return TokenKind::InvalidToken;
            }
            self.pos += utf8_len(b);
        }
    }

    /// In template mode: an atom, a `${`, or the closing backtick.
    fn scan_template_atom(&mut self) -> TokenKind {
        let start = self.pos;
        while let Some(b) = self.byte_at(self.pos) {
            match b {
                b'\\' => match self.scan_escape(self.pos) {
                    Ok(len) => self.pos += len,
                    Err(end) => {
                        self.pos = end;
                        self.token_flags |= TokenFlags::CONTAINS_INVALID_ESCAPE;
                        return TokenKind::InvalidToken;
                    }
                },
                b'`' => {
                    if self.pos > start {
                        return TokenKind::TemplateStringAtom;
                    }
                    self.pos += 1;
                    self.in_template = false;
                    return TokenKind::BacktickToken;
                }
                b'$' if self.peek(1) == Some(b'{') => {
                    if self.pos > start {
                        return TokenKind::TemplateStringAtom;
                    }
                    self.pos += 2;
                    self.in_template = false;
                    return TokenKind::TemplateStringStartExpression;
                }
                _ => self.pos += utf8_len(b),
            }
        }
        self.pos = self.bytes.len();
        self.token_flags |= TokenFlags::UNTERMINATED;
        TokenKind::TemplateStringAtom
    }
}

/// Decode the body of a string literal or template atom: escapes are
/// resolved and line continuations dropped. Malformed escapes decode as the
/// escaped character itself.
pub fn cook_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.char_indices().peekable();
    while let Some((_, ch)) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let Some((idx, esc)) = chars.next() else {
            out.push('\\');
            break;
        };
        match esc {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            '\r' | '\n' | '\u{2028}' | '\u{2029}' => {
                while matches!(chars.peek(), Some((_, '\r' | '\n' | '\u{2028}' | '\u{2029}'))) {
                    chars.next();
                }
            }
            'x' => {
                let hex = raw.get(idx + 1..idx + 3).filter(|h| h.bytes().all(is_hex_digit));
                match hex.and_then(|h| u32::from_str_radix(h, 16).ok()).and_then(char::from_u32) {
                    Some(c) => {
                        out.push(c);
                        chars.nth(1);
                    }
                    None => out.push('x'),
                }
            }
            'u' => match decode_unicode_escape(raw, idx + 1) {
                Some((code, len)) => {
                    let mut consumed = len;
                    let decoded = if (0xD800..0xDC00).contains(&code) {
                        // High surrogate: pair with a following `\uDCxx`.
                        let next = idx + 1 + len;
                        match raw.get(next..next + 2) {
                            Some("\\u") => match decode_unicode_escape(raw, next + 2) {
                                Some((low, low_len)) if (0xDC00..0xE000).contains(&low) => {
                                    consumed += 2 + low_len;
                                    char::from_u32(0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00))
                                }
                                _ => None,
                            },
                            _ => None,
                        }
                    } else {
                        char::from_u32(code)
                    };
                    out.push(decoded.unwrap_or(char::REPLACEMENT_CHARACTER));
                    let end = idx + 1 + consumed;
                    while chars.peek().is_some_and(|(i, _)| *i < end) {
                        chars.next();
                    }
                }
                None => out.push('u'),
            },
            other => out.push(other),
        }
    }
    out
}

/// Decode `XXXX` or `{X...}` at `pos` (just after `\u`). Returns the code
/// point and the number of bytes consumed.
fn decode_unicode_escape(raw: &str, pos: usize) -> Option<(u32, usize)> {
    let bytes = raw.as_bytes();
    if bytes.get(pos) == Some(&b'{') {
        let digits = bytes[pos + 1..].iter().take_while(|b| is_hex_digit(**b)).count();
        if digits == 0 || bytes.get(pos + 1 + digits) != Some(&b'}') {
            return None;
        }
        let code = u32::from_str_radix(&raw[pos + 1..pos + 1 + digits], 16).ok()?;
        return Some((code, digits + 2));
    }
    let hex = raw.get(pos..pos + 4)?;
    if !hex.bytes().all(is_hex_digit) {
        return None;
    }
    Some((u32::from_str_radix(hex, 16).ok()?, 4))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(src);
        let mut out = Vec::new();
        loop {
            let token = lexer.next_token();
            if token.is_eof() {
                break;
            }
            out.push(token.kind);
        }
        out
    }

    #[test]
    fn test_eof_is_idempotent() {
        let mut lexer = Lexer::new("a");
        assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
        for _ in 0..3 {
            let token = lexer.next_token();
            assert!(token.is_eof());
            assert_eq!(token.pos, 1);
        }
    }

    #[test]
    fn test_state_restore_rescans() {
        let mut lexer = Lexer::new("a + b");
        lexer.next_token();
        let state = lexer.state();
        let plus = lexer.next_token();
        lexer.next_token();
        lexer.restore(state);
        assert_eq!(lexer.next_token(), plus);
    }

    #[test]
    fn test_reset_to_splits_shift() {
        let mut lexer = Lexer::new("a>>b");
        lexer.next_token();
        let shift = lexer.next_token();
        assert_eq!(shift.kind, TokenKind::GreaterThanGreaterThanToken);
        lexer.reset_to(shift.pos + 1);
        assert_eq!(lexer.next_token().kind, TokenKind::GreaterThanToken);
        assert_eq!(lexer.next_token().text, "b");
    }

    #[test]
    fn test_contains_line_terminator_between() {
        let lexer = Lexer::new("a \u{2028} b\nc");
        assert!(lexer.contains_line_terminator_between(0, 6));
        assert!(!lexer.contains_line_terminator_between(0, 2));
        assert!(lexer.contains_line_terminator_between(6, 20));
        assert!(!lexer.contains_line_terminator_between(5, 3));
    }

    #[test]
    fn test_rescan_regex() {
        let mut lexer = Lexer::new("return /a/g");
        lexer.next_token();
        let slash = lexer.next_token();
        assert_eq!(slash.kind, TokenKind::SlashToken);
        let regex = lexer.rescan_regex(slash.pos).unwrap();
        assert_eq!(regex.kind, TokenKind::RegularExpressionLiteral);
        assert_eq!(regex.text, "/a/g");
        assert!(lexer.next_token().is_eof());

        let mut division = Lexer::new("a / \n");
        assert!(division.rescan_regex(2).is_none());
        assert!(division.rescan_regex(0).is_none());
    }

    #[test]
    fn test_nested_block_comment() {
        assert_eq!(kinds("/* a /* b */ c */ x"), vec![TokenKind::Identifier]);
        assert!(kinds("/* /* */").is_empty());
    }

    #[test]
    fn test_console_requires_known_member() {
        assert_eq!(kinds("console.log"), vec![TokenKind::ConsoleLog]);
        assert_eq!(
            kinds("console.logger"),
            vec![TokenKind::Identifier, TokenKind::DotToken, TokenKind::Identifier]
        );
        assert_eq!(
            kinds("console .log"),
            vec![TokenKind::Identifier, TokenKind::DotToken, TokenKind::Identifier]
        );
    }

    #[test]
    fn test_cook_string() {
        assert_eq!(cook_string(r"a\nb"), "a\nb");
        assert_eq!(cook_string(r"\x41B\u{43}"), "ABC");
        assert_eq!(cook_string("a\\\r\nb"), "ab");
        assert_eq!(cook_string(r"\'\q"), "'q");
        assert_eq!(cook_string(r"\uD83D\uDE00"), "\u{1F600}");
        assert_eq!(cook_string(r"\xZZ"), "xZZ");
    }
}
