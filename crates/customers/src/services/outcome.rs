//! Uniform result of a mutating service call.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::ServiceError;

/// Either a success carrying a message and value, or a failure carrying the
/// reason.
///
/// Serializes as `{"success": bool, "message": string, "customer": ...}`;
/// `customer` is omitted on failure and for unit values.
#[derive(Debug)]
#[must_use]
pub enum Outcome<T> {
    Success { message: &'static str, value: T },
    Failure(ServiceError),
}

impl<T> Outcome<T> {
    pub(crate) const fn success(message: &'static str, value: T) -> Self {
        Self::Success { message, value }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Human-readable description of what happened.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Success { message, .. } => (*message).to_owned(),
            Self::Failure(error) => error.to_string(),
        }
    }

    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Success { value, .. } => Some(value),
            Self::Failure(_) => None,
        }
    }

    #[must_use]
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Success { value, .. } => Some(value),
            Self::Failure(_) => None,
        }
    }

    #[must_use]
    pub const fn error(&self) -> Option<&ServiceError> {
        match self {
            Self::Success { .. } => None,
            Self::Failure(error) => Some(error),
        }
    }

    /// Convert into a plain `Result`.
    ///
    /// # Errors
    ///
    /// Returns the failure reason if the operation did not succeed.
    pub fn into_result(self) -> Result<T, ServiceError> {
        match self {
            Self::Success { value, .. } => Ok(value),
            Self::Failure(error) => Err(error),
        }
    }
}

impl<T> From<ServiceError> for Outcome<T> {
    fn from(error: ServiceError) -> Self {
        Self::Failure(error)
    }
}

/// Values that may appear under the `customer` key.
pub trait OutcomeValue {
    /// Whether the value is worth serializing.
    fn is_present(&self) -> bool {
        true
    }
}

impl OutcomeValue for () {
    fn is_present(&self) -> bool {
        false
    }
}

impl OutcomeValue for crate::models::Customer {}

impl<T: Serialize + OutcomeValue> Serialize for Outcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.value().filter(|v| v.is_present());
        let len = if value.is_some() { 3 } else { 2 };

        let mut state = serializer.serialize_struct("Outcome", len)?;
        state.serialize_field("success", &self.is_success())?;
        state.serialize_field("message", &self.message())?;
        if let Some(value) = value {
            state.serialize_field("customer", value)?;
        } else {
            state.skip_field("customer")?;
        }
        state.end()
    }
}
