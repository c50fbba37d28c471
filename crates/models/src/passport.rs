use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates;
use crate::errors::ModelError;
use crate::id::EntityId;

/// Instrument passport. One instrument carries at most one passport by
/// intent; the backend does not enforce it and neither does the client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Passport {
    pub id: EntityId,
    pub instrument_id: EntityId,
    #[serde(with = "dates::midnight_utc")]
    pub issue_date: NaiveDate,
    #[serde(default)]
    pub details: String,
}

/// Create/update payload for a passport.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassportRequest {
    pub instrument_id: EntityId,
    #[serde(with = "dates::midnight_utc")]
    pub issue_date: NaiveDate,
    pub details: String,
}

impl PassportRequest {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.details.trim().is_empty() {
            return Err(ModelError::required("details"));
        }
        Ok(())
    }

    /// Echo the submitted fields as a full record under the given id.
    pub fn into_passport(self, id: EntityId) -> Passport {
        Passport {
            id,
            instrument_id: self.instrument_id,
            issue_date: self.issue_date,
            details: self.details.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_details_are_rejected() {
        let req = PassportRequest {
            instrument_id: EntityId::new(),
            issue_date: NaiveDate::from_ymd_opt(2024, 1, 15).expect("date"),
            details: "  ".into(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn issue_date_uses_midnight_utc() {
        let req = PassportRequest {
            instrument_id: EntityId::new(),
            issue_date: NaiveDate::from_ymd_opt(2024, 1, 15).expect("date"),
            details: "Maple neck, serial verified".into(),
        };
        let body = serde_json::to_value(&req).expect("serialize");
        assert_eq!(body["issueDate"], "2024-01-15T00:00:00Z");
    }
}
