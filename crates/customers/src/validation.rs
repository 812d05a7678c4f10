//! Field validation for customer input.
//!
//! Fields are checked in declaration order. A blank required field reports
//! only that it is required; otherwise every rule the field breaks is
//! reported. Optional fields are always length-checked; a blank phone number
//! skips the format check.

use core::fmt;

use crm_core::{email, phone};

use crate::models::CustomerDetails;

const NAME_MAX: usize = 100;
const ADDRESS_MAX: usize = 250;
const REGION_MAX: usize = 100;

/// A single broken field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Column name of the offending field.
    pub field: &'static str,
    /// Human-readable message.
    pub message: String,
}

/// Every rule a customer payload breaks, in field order.
///
/// Displays as the messages joined by `"; "`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any violation concerns `field`.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }

    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldViolation {
            field,
            message: message.into(),
        });
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            f.write_str(&violation.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate a customer payload against the column rules.
///
/// # Errors
///
/// Returns every violated rule if at least one field is invalid.
pub fn validate_customer(details: &CustomerDetails) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    check_required(&mut errors, "first_name", "First Name", &details.first_name, NAME_MAX);
    check_required(&mut errors, "last_name", "Last Name", &details.last_name, NAME_MAX);

    if check_required(&mut errors, "email", "Email", &details.email, email::MAX_LENGTH)
        && email::check_syntax(&details.email).is_err()
    {
        errors.push("email", "Invalid email format");
    }

    if let Some(number) = details.phone_number.as_deref() {
        check_length(&mut errors, "phone_number", "Phone Number", number, phone::MAX_LENGTH);
        if !number.trim().is_empty() && phone::check_syntax(number).is_err() {
            errors.push("phone_number", "Invalid phone number format");
        }
    }

    let optional = [
        ("address", "Address", details.address.as_deref(), ADDRESS_MAX),
        ("city", "City", details.city.as_deref(), REGION_MAX),
        ("state", "State", details.state.as_deref(), REGION_MAX),
        ("country", "Country", details.country.as_deref(), REGION_MAX),
    ];
    for (field, label, value, max) in optional {
        if let Some(value) = value {
            check_length(&mut errors, field, label, value, max);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Returns `true` when the value is present, so format checks can follow.
fn check_required(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    value: &str,
    max: usize,
) -> bool {
    if value.trim().is_empty() {
        errors.push(field, format!("{label} is required"));
        return false;
    }
    check_length(errors, field, label, value, max);
    true
}

fn check_length(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    value: &str,
    max: usize,
) {
    if value.chars().count() > max {
        errors.push(field, format!("{label} must be at most {max} characters"));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ann() -> CustomerDetails {
        CustomerDetails::new("Ann", "Lee", "ann@x.com")
    }

    fn messages(details: &CustomerDetails) -> Vec<String> {
        validate_customer(details)
            .unwrap_err()
            .violations()
            .iter()
            .map(|v| v.message.clone())
            .collect()
    }

    #[test]
    fn test_minimal_customer_is_valid() {
        assert!(validate_customer(&ann()).is_ok());
    }

    #[test]
    fn test_full_customer_is_valid() {
        let details = CustomerDetails {
            phone_number: Some("+1 (555) 010-2000".to_owned()),
            address: Some("1 Main St".to_owned()),
            city: Some("Springfield".to_owned()),
            state: Some("IL".to_owned()),
            country: Some("USA".to_owned()),
            ..ann()
        };
        assert!(validate_customer(&details).is_ok());
    }

    #[test]
    fn test_missing_first_name_and_bad_email_both_reported() {
        let details = CustomerDetails::new("", "Lee", "not-an-email");
        assert_eq!(
            messages(&details),
            vec!["First Name is required", "Invalid email format"]
        );
    }

    #[test]
    fn test_all_required_missing() {
        let details = CustomerDetails::new(" ", "", "");
        assert_eq!(
            messages(&details),
            vec![
                "First Name is required",
                "Last Name is required",
                "Email is required"
            ]
        );
    }

    #[test]
    fn test_name_length_bounds() {
        let ok = CustomerDetails {
            first_name: "a".repeat(100),
            ..ann()
        };
        assert!(validate_customer(&ok).is_ok());

        let too_long = CustomerDetails {
            first_name: "a".repeat(101),
            ..ann()
        };
        assert_eq!(
            messages(&too_long),
            vec!["First Name must be at most 100 characters"]
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let details = CustomerDetails {
            last_name: "é".repeat(100),
            ..ann()
        };
        assert!(validate_customer(&details).is_ok());
    }

    #[test]
    fn test_email_too_long_and_malformed_reports_both() {
        let details = CustomerDetails {
            email: "a".repeat(201),
            ..ann()
        };
        assert_eq!(
            messages(&details),
            vec!["Email must be at most 200 characters", "Invalid email format"]
        );
    }

    #[test]
    fn test_phone_rules() {
        let bad = CustomerDetails {
            phone_number: Some("call me".to_owned()),
            ..ann()
        };
        assert_eq!(messages(&bad), vec!["Invalid phone number format"]);

        let long = CustomerDetails {
            phone_number: Some("1".repeat(21)),
            ..ann()
        };
        assert_eq!(
            messages(&long),
            vec!["Phone Number must be at most 20 characters"]
        );
    }

    #[test]
    fn test_blank_optional_fields_pass_when_short() {
        let details = CustomerDetails {
            phone_number: Some(String::new()),
            city: Some("   ".to_owned()),
            ..ann()
        };
        assert!(validate_customer(&details).is_ok());
    }

    #[test]
    fn test_blank_optional_fields_still_length_checked() {
        let details = CustomerDetails {
            phone_number: Some(" ".repeat(25)),
            address: Some(" ".repeat(300)),
            ..ann()
        };
        assert_eq!(
            messages(&details),
            vec![
                "Phone Number must be at most 20 characters",
                "Address must be at most 250 characters"
            ]
        );
    }

    #[test]
    fn test_optional_length_bounds() {
        let details = CustomerDetails {
            address: Some("a".repeat(251)),
            city: Some("c".repeat(101)),
            state: Some("s".repeat(101)),
            country: Some("k".repeat(101)),
            ..ann()
        };
        let errors = validate_customer(&details).unwrap_err();
        assert!(errors.has_field("address"));
        assert!(errors.has_field("city"));
        assert!(errors.has_field("state"));
        assert!(errors.has_field("country"));
        assert_eq!(errors.violations().len(), 4);
    }

    #[test]
    fn test_display_joins_messages() {
        let errors = validate_customer(&CustomerDetails::new("", "", "ann@x.com")).unwrap_err();
        assert_eq!(
            errors.to_string(),
            "First Name is required; Last Name is required"
        );
    }
}
