use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::id::EntityId;

/// Workshop customer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    /// Server-assigned creation timestamp; absent on records the client
    /// assembled itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Create/update payload; every update is a full-field replacement.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
}

impl CustomerRequest {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.first_name.trim().is_empty() {
            return Err(ModelError::required("firstName"));
        }
        if self.last_name.trim().is_empty() {
            return Err(ModelError::required("lastName"));
        }
        if self.phone_number.trim().is_empty() {
            return Err(ModelError::required("phoneNumber"));
        }
        if self.email.trim().is_empty() {
            return Err(ModelError::required("email"));
        }
        Ok(())
    }

    /// Echo the submitted fields as a full record under the given id, for
    /// endpoints that confirm without a body.
    pub fn into_customer(self, id: EntityId) -> Customer {
        Customer {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            phone_number: self.phone_number,
            email: self.email,
            created_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CustomerRequest {
        CustomerRequest {
            first_name: "Olena".into(),
            last_name: "Koval".into(),
            phone_number: "+380501234567".into(),
            email: "olena@example.com".into(),
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn blank_required_field_is_rejected() {
        let mut req = request();
        req.email = "   ".into();
        assert!(req.validate().is_err());
    }
}
