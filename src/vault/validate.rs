//! Syntax rules for identifiers and secrets.
//!
//! Pure boolean checks — callers map a `false` to the right error kind.

/// Symbols a secret must draw at least one character from.
pub const SECRET_SYMBOLS: &[char] = &['!', '@', '#', '$', '%', '^', '&'];

/// Returns `true` iff `s` is a well-formed identifier: exactly 6-12
/// lowercase ASCII letters, nothing else.
pub fn valid_identifier(s: &str) -> bool {
    (6..=12).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_lowercase())
}

/// Returns `true` iff `s` is a well-formed secret: 6-15 characters, all
/// in the printable range `[0x20, 0x7E]`, with at least one letter, one
/// digit, and one symbol from `SECRET_SYMBOLS`.
///
/// Any character outside the printable range rejects the whole secret
/// immediately.
pub fn valid_secret(s: &str) -> bool {
    let len = s.chars().count();
    if !(6..=15).contains(&len) {
        return false;
    }

    let mut has_letter = false;
    let mut has_digit = false;
    let mut has_symbol = false;

    for c in s.chars() {
        if !matches!(c as u32, 0x20..=0x7E) {
            return false;
        }
        if c.is_ascii_alphabetic() {
            has_letter = true;
        } else if c.is_ascii_digit() {
            has_digit = true;
        } else if SECRET_SYMBOLS.contains(&c) {
            has_symbol = true;
        }
    }

    has_letter && has_digit && has_symbol
}
