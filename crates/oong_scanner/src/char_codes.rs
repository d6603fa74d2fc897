//! Byte-class helpers used by the scanner.
//!
//! The scanner walks UTF-8 bytes. Non-ASCII code points are only ever
//! stepped over as a whole sequence, so every offset it produces lies on a
//! char boundary.

pub const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Length of the UTF-8 sequence introduced by `lead`. Stray continuation
/// bytes count as one.
#[inline]
pub fn utf8_len(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

/// `E2 80 A8` / `E2 80 A9`.
#[inline]
pub fn is_unicode_line_separator(bytes: &[u8], pos: usize) -> bool {
    bytes.get(pos) == Some(&0xE2)
        && bytes.get(pos + 1) == Some(&0x80)
        && matches!(bytes.get(pos + 2), Some(0xA8) | Some(0xA9))
}

/// Length of the line terminator at `pos`, or 0. CRLF counts as one.
#[inline]
pub fn line_terminator_len(bytes: &[u8], pos: usize) -> usize {
    match bytes.get(pos) {
        Some(b'\r') if bytes.get(pos + 1) == Some(&b'\n') => 2,
        Some(b'\r') | Some(b'\n') => 1,
        Some(0xE2) if is_unicode_line_separator(bytes, pos) => 3,
        _ => 0,
    }
}

/// Length of the horizontal whitespace at `pos`, or 0. NBSP is `C2 A0`.
#[inline]
pub fn white_space_len(bytes: &[u8], pos: usize) -> usize {
    match bytes.get(pos) {
        Some(b'\t') | Some(0x0B) | Some(0x0C) | Some(b' ') => 1,
        Some(0xC2) if bytes.get(pos + 1) == Some(&0xA0) => 2,
        _ => 0,
    }
}

/// `\` followed by one or more line terminators. `pos` points at the backslash.
pub fn line_continuation_len(bytes: &[u8], pos: usize) -> usize {
    if bytes.get(pos) != Some(&b'\\') {
        return 0;
    }
    let mut p = pos + 1;
    loop {
        let lt = line_terminator_len(bytes, p);
        if lt == 0 {
            break;
        }
        p += lt;
    }
    if p == pos + 1 {
        0
    } else {
        p - pos
    }
}

#[inline]
pub fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

#[inline]
pub fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

#[inline]
pub fn is_octal_digit(b: u8) -> bool {
    matches!(b, b'0'..=b'7')
}

#[inline]
pub fn is_binary_digit(b: u8) -> bool {
    matches!(b, b'0' | b'1')
}

#[inline]
pub fn is_ascii_identifier_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

#[inline]
pub fn is_ascii_identifier_part(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

/// Whether the byte at `pos` continues an identifier: ASCII identifier
/// characters, any non-ASCII sequence, or a valid `\u` escape.
#[inline]
pub fn continues_identifier(bytes: &[u8], pos: usize) -> bool {
    match bytes.get(pos) {
        Some(&b) if is_ascii_identifier_part(b) || b >= 0x80 => true,
        Some(b'\\') => unicode_escape_len(bytes, pos) > 0,
        _ => false,
    }
}

/// Length of a `\uXXXX` or `\u{X...}` escape at `pos` (pointing at the
/// backslash), or 0 when malformed.
pub fn unicode_escape_len(bytes: &[u8], pos: usize) -> usize {
    if bytes.get(pos) != Some(&b'\\') || bytes.get(pos + 1) != Some(&b'u') {
        return 0;
    }
    let q = pos + 2;
    if bytes.get(q) == Some(&b'{') {
        let digits = bytes[q + 1..].iter().take_while(|b| is_hex_digit(**b)).count();
        if digits > 0 && bytes.get(q + 1 + digits) == Some(&b'}') {
            return 2 + 1 + digits + 1;
        }
        return 0;
    }
    if bytes.len() >= q + 4 && bytes[q..q + 4].iter().all(|b| is_hex_digit(*b)) {
        return 6;
    }
    0
}

/// Length of a `\xHH` escape at `pos`, or 0.
pub fn hex_escape_len(bytes: &[u8], pos: usize) -> usize {
    if bytes.get(pos) == Some(&b'\\')
        && bytes.get(pos + 1) == Some(&b'x')
        && bytes.get(pos + 2).is_some_and(|b| is_hex_digit(*b))
        && bytes.get(pos + 3).is_some_and(|b| is_hex_digit(*b))
    {
        4
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_terminators() {
        assert_eq!(line_terminator_len(b"\r\nx", 0), 2);
        assert_eq!(line_terminator_len(b"\rx", 0), 1);
        assert_eq!(line_terminator_len("\u{2029}".as_bytes(), 0), 3);
        assert_eq!(line_terminator_len("\u{2026}".as_bytes(), 0), 0);
    }

    #[test]
    fn test_line_continuation() {
        assert_eq!(line_continuation_len(b"\\\r\n\nx", 0), 4);
        assert_eq!(line_continuation_len(b"\\n", 0), 0);
    }

    #[test]
    fn test_unicode_escapes() {
        assert_eq!(unicode_escape_len(b"\\u0041", 0), 6);
        assert_eq!(unicode_escape_len(b"\\u{1F600}", 0), 9);
        assert_eq!(unicode_escape_len(b"\\u{}", 0), 0);
        assert_eq!(unicode_escape_len(b"\\u00", 0), 0);
        assert_eq!(hex_escape_len(b"\\x4g", 0), 0);
        assert_eq!(hex_escape_len(b"\\x4F", 0), 4);
    }

    #[test]
    fn test_white_space() {
        assert_eq!(white_space_len("\u{a0}".as_bytes(), 0), 2);
        assert_eq!(white_space_len(b"\x0b", 0), 1);
        assert_eq!(white_space_len(b"\n", 0), 0);
    }
}
