//! Phone number rules.
//!
//! Accepts the loose format people actually type: digits, whitespace,
//! `-.()`, any number of `+` signs, and an optional trailing extension
//! (`ext. 12`, `ext12`, `x12`).
//!
//! ```
//! use crm_core::phone;
//!
//! assert!(phone::check_syntax("+1 (555) 010-2000").is_ok());
//! assert!(phone::check_syntax("555.0100 x42").is_ok());
//!
//! assert!(phone::check_syntax("call me").is_err());
//! ```

/// Maximum length of a stored phone number, in characters.
pub const MAX_LENGTH: usize = 20;

/// Characters allowed in a phone number besides digits and whitespace.
const PUNCTUATION: &[char] = &['-', '.', '(', ')'];

/// Extension markers, longest first so `ext.` wins over `ext` and `x`.
const EXTENSION_MARKERS: &[&str] = &["ext.", "ext", "x"];

/// Syntax rules a phone number can break.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input contains no digits.
    #[error("phone number must contain at least one digit")]
    NoDigits,
    /// The input contains a character that is not allowed.
    #[error("phone number contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// Check the phone number syntax. Length is checked separately against
/// [`MAX_LENGTH`].
///
/// # Errors
///
/// Returns `NoDigits` if nothing but punctuation remains once `+` signs
/// and the extension are removed, or `InvalidCharacter` for the first
/// character outside digits, whitespace and `-.()`.
pub fn check_syntax(s: &str) -> Result<(), PhoneError> {
    let without_plus: String = s.chars().filter(|&c| c != '+').collect();
    let number = strip_extension(without_plus.trim_end());

    if !number.chars().any(|c| c.is_ascii_digit()) {
        return Err(PhoneError::NoDigits);
    }

    match number
        .chars()
        .find(|&c| !(c.is_ascii_digit() || c.is_whitespace() || PUNCTUATION.contains(&c)))
    {
        Some(c) => Err(PhoneError::InvalidCharacter(c)),
        None => Ok(()),
    }
}

/// Drop a trailing extension if everything after the marker is digits.
fn strip_extension(s: &str) -> &str {
    let lower = s.to_ascii_lowercase();
    for marker in EXTENSION_MARKERS {
        if let Some(pos) = lower.rfind(marker) {
            let extension = s.get(pos + marker.len()..).unwrap_or("").trim_start();
            if !extension.is_empty() && extension.chars().all(|c| c.is_ascii_digit()) {
                return s.get(..pos).unwrap_or(s);
            }
        }
    }
    s
}
