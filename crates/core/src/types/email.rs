//! Email address rules.
//!
//! ```
//! use crm_core::email;
//!
//! assert!(email::check_syntax("ann@x.com").is_ok());
//! assert!(email::check_syntax("user.name+tag@domain.co.uk").is_ok());
//!
//! assert!(email::check_syntax("not-an-email").is_err());
//! assert!(email::check_syntax("a@b@c").is_err());
//! ```

/// Maximum length of a stored email address, in characters.
pub const MAX_LENGTH: usize = 200;

/// Syntax rules an email address can break.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input string is empty or only whitespace.
    #[error("email cannot be empty")]
    Empty,
    /// The input contains whitespace or a control character.
    #[error("email cannot contain whitespace or control characters")]
    InvalidCharacter,
    /// The input does not contain an @ symbol.
    #[error("email must contain an @ symbol")]
    MissingAtSymbol,
    /// The input contains more than one @ symbol.
    #[error("email must contain exactly one @ symbol")]
    MultipleAtSymbols,
    /// The local part (before @) is empty.
    #[error("email local part cannot be empty")]
    EmptyLocalPart,
    /// The domain part (after @) is empty.
    #[error("email domain cannot be empty")]
    EmptyDomain,
}

/// Check the address syntax. Length is checked separately against
/// [`MAX_LENGTH`].
///
/// # Errors
///
/// Returns the first rule the input breaks:
/// - Blank input
/// - Whitespace or control characters anywhere
/// - Not exactly one @ symbol
/// - Empty local part or domain
pub fn check_syntax(s: &str) -> Result<(), EmailError> {
    if s.trim().is_empty() {
        return Err(EmailError::Empty);
    }

    if s.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(EmailError::InvalidCharacter);
    }

    let at_pos = s.find('@').ok_or(EmailError::MissingAtSymbol)?;

    if s.rfind('@') != Some(at_pos) {
        return Err(EmailError::MultipleAtSymbols);
    }

    if at_pos == 0 {
        return Err(EmailError::EmptyLocalPart);
    }

    if at_pos == s.len() - 1 {
        return Err(EmailError::EmptyDomain);
    }

    Ok(())
}
