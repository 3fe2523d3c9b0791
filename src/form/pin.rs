//! Canonical PIN handling.
//!
//! The stored PIN is always the undashed digit string. Dashes exist only in
//! the string returned by [`format_pin`], which callers derive on every
//! render.

/// Number of digits a complete PIN carries.
pub const PIN_DIGITS: usize = 16;

/// Digits per display group.
pub const PIN_GROUP: usize = 4;

/// Longest displayed PIN: sixteen digits plus three separators.
pub const PIN_DISPLAY_MAX: usize = PIN_DIGITS + PIN_DIGITS / PIN_GROUP - 1;

pub const PIN_SEPARATOR: char = '-';

pub const PIN_MASK: char = '•';

pub const PIN_ADVISORY: &str = "PIN must be exactly 16 digits";

/// Strips every non-digit from `raw` and keeps at most [`PIN_DIGITS`] digits.
pub fn sanitize_pin(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(PIN_DIGITS)
        .collect()
}

/// Groups canonical digits in fours joined by `-`.
///
/// `format_pin("123456")` yields `"1234-56"`; an empty PIN formats to an
/// empty string.
pub fn format_pin(canonical: &str) -> String {
    let mut out = String::with_capacity(canonical.len() + canonical.len() / PIN_GROUP);
    for (idx, ch) in canonical.chars().enumerate() {
        if idx > 0 && idx % PIN_GROUP == 0 {
            out.push(PIN_SEPARATOR);
        }
        out.push(ch);
    }
    out
}

/// Hides digits of a formatted PIN while keeping its dash layout.
pub fn mask_pin(display: &str) -> String {
    display
        .chars()
        .map(|ch| if ch == PIN_SEPARATOR { ch } else { PIN_MASK })
        .collect()
}

/// The submit gate: a PIN is complete when it holds exactly sixteen digits.
pub fn is_complete(canonical: &str) -> bool {
    canonical.len() == PIN_DIGITS
}
