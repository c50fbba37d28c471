use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::id::EntityId;

/// A repair service from the workshop catalog. Identity is immutable; price
/// changes affect future order totals only, nothing is snapshotted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: EntityId,
    pub name: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

/// Create/update payload. The backend takes the display name under `title`
/// but returns it as `name`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub title: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

impl ServiceRequest {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.title.trim().is_empty() {
            return Err(ModelError::required("title"));
        }
        if self.price.is_sign_negative() {
            return Err(ModelError::Validation("price must be non-negative".into()));
        }
        Ok(())
    }

    /// Assemble the record the backend would return for this payload.
    pub fn into_service(self, id: EntityId) -> Service {
        Service {
            id,
            name: self.title,
            price: self.price,
            description: self.description,
            duration_minutes: self.duration_minutes,
        }
    }
}
