//! Customer domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crm_core::AccountId;

/// The caller-editable fields of a customer account.
///
/// Used as-is for creation and embedded in [`Customer`] for stored records.
/// Values are unvalidated until they pass through the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CustomerDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl CustomerDetails {
    /// Details with only the required fields set.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            ..Self::default()
        }
    }
}

/// A stored customer account.
///
/// `account_id` and `date_created` are assigned by the store. When a
/// `Customer` is passed to an update, only `details` is written; the stored
/// `date_created` always wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Customer {
    /// Surrogate key, assigned on creation.
    pub account_id: AccountId,
    /// Editable fields.
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub details: CustomerDetails,
    /// When the account was created (UTC).
    pub date_created: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_serializes_flat() {
        let customer = Customer {
            account_id: AccountId::new(1),
            details: CustomerDetails::new("Ann", "Lee", "ann@x.com"),
            date_created: DateTime::parse_from_rfc3339("2026-10-18T12:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        };

        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(json["account_id"], 1);
        assert_eq!(json["first_name"], "Ann");
        assert_eq!(json["email"], "ann@x.com");
        assert!(json.get("details").is_none());
        assert!(json.get("phone_number").is_none());
    }

    #[test]
    fn test_details_deserialize_optional_fields_missing() {
        let details: CustomerDetails = serde_json::from_str(
            r#"{"first_name":"Ann","last_name":"Lee","email":"ann@x.com","city":"Oslo"}"#,
        )
        .unwrap();
        assert_eq!(details.city.as_deref(), Some("Oslo"));
        assert!(details.phone_number.is_none());
    }
}
