//! Identifier grammar for controller and method names.
//!
//! A name is valid when it matches `[A-Za-z_\x7F-\xFF][A-Za-z0-9_\x7F-\xFF]*`.
//! Input is UTF-8, so any non-ASCII character counts as a high byte.

/// Whether `c` may start an identifier.
fn is_start_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c as u32 >= 0x7F
}

/// Whether `c` may continue an identifier.
fn is_continue_char(c: char) -> bool {
    is_start_char(c) || c.is_ascii_digit()
}

/// Validate a controller or method name against the identifier grammar.
///
/// # Examples
///
/// ```
/// use frontdesk_core::validation::is_valid_identifier;
///
/// assert!(is_valid_identifier("valid_Name9"));
/// assert!(!is_valid_identifier("1abc"));
/// ```
#[must_use]
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_start_char(first) => chars.all(is_continue_char),
        _ => false,
    }
}
