use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates;
use crate::errors::ModelError;
use crate::id::EntityId;

/// Repair status of an instrument. Transitions travel through a dedicated
/// status call, separately from the descriptive fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstrumentStatus {
    #[default]
    Ready,
    InRepair,
    WaitingParts,
    Delivered,
}

impl InstrumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstrumentStatus::Ready => "Ready",
            InstrumentStatus::InRepair => "InRepair",
            InstrumentStatus::WaitingParts => "WaitingParts",
            InstrumentStatus::Delivered => "Delivered",
        }
    }
}

impl fmt::Display for InstrumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Instrument taken in for repair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub id: EntityId,
    pub model: String,
    pub serial_number: String,
    // the backend spells this field "recieveDate"
    #[serde(rename = "recieveDate", with = "dates::midnight_utc")]
    pub receive_date: NaiveDate,
    pub status: InstrumentStatus,
    #[serde(default)]
    pub customer_id: Option<EntityId>,
}

/// Create/update payload for an instrument.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentRequest {
    pub model: String,
    pub serial_number: String,
    #[serde(rename = "recieveDate", with = "dates::midnight_utc")]
    pub receive_date: NaiveDate,
    pub status: InstrumentStatus,
    pub customer_id: Option<EntityId>,
}

/// PUT body of the full-field update; the status travels separately through
/// the status call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentFields<'a> {
    pub model: &'a str,
    pub serial_number: &'a str,
    #[serde(rename = "recieveDate", with = "dates::midnight_utc")]
    pub receive_date: NaiveDate,
    pub customer_id: Option<EntityId>,
}

impl InstrumentRequest {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.model.trim().is_empty() {
            return Err(ModelError::required("model"));
        }
        if self.serial_number.trim().is_empty() {
            return Err(ModelError::required("serialNumber"));
        }
        Ok(())
    }

    /// The descriptive fields alone, without the status.
    pub fn descriptive_fields(&self) -> InstrumentFields<'_> {
        InstrumentFields {
            model: &self.model,
            serial_number: &self.serial_number,
            receive_date: self.receive_date,
            customer_id: self.customer_id,
        }
    }

    /// Echo the submitted fields as a full record under the given id.
    pub fn into_instrument(self, id: EntityId) -> Instrument {
        Instrument {
            id,
            model: self.model,
            serial_number: self.serial_number,
            receive_date: self.receive_date,
            status: self.status,
            customer_id: self.customer_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_as_pascal_case() {
        let json = serde_json::to_string(&InstrumentStatus::WaitingParts).expect("serialize");
        assert_eq!(json, "\"WaitingParts\"");
        let status: InstrumentStatus = serde_json::from_str("\"InRepair\"").expect("deserialize");
        assert_eq!(status, InstrumentStatus::InRepair);
    }

    #[test]
    fn descriptive_fields_omit_status() {
        let req = InstrumentRequest {
            model: "Stratocaster".into(),
            serial_number: "SN-001".into(),
            receive_date: NaiveDate::from_ymd_opt(2024, 3, 12).expect("date"),
            status: InstrumentStatus::InRepair,
            customer_id: None,
        };
        let body = serde_json::to_value(req.descriptive_fields()).expect("serialize");
        assert!(body.get("status").is_none());
        assert_eq!(body["recieveDate"], "2024-03-12T00:00:00Z");
    }

    #[test]
    fn blank_model_is_rejected() {
        let req = InstrumentRequest {
            model: "".into(),
            serial_number: "SN-001".into(),
            receive_date: NaiveDate::from_ymd_opt(2024, 3, 12).expect("date"),
            status: InstrumentStatus::Ready,
            customer_id: None,
        };
        assert!(req.validate().is_err());
    }
}
