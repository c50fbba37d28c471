//! Date handling for the backend wire format.
//!
//! The backend exchanges bare dates as ISO-8601 timestamps with a fixed
//! midnight-UTC time component: `2024-05-01` travels as
//! `"2024-05-01T00:00:00Z"` in both directions.

/// Serde adapter for `NaiveDate` fields using the midnight-UTC convention.
pub mod midnight_utc {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{}T00:00:00Z", date.format("%Y-%m-%d")))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let date_part = raw.split('T').next().unwrap_or(raw.as_str());
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct Holder {
        #[serde(with = "super::midnight_utc")]
        date: NaiveDate,
    }

    #[test]
    fn appends_midnight_utc_on_serialize() {
        let holder = Holder { date: NaiveDate::from_ymd_opt(2024, 5, 1).expect("date") };
        let json = serde_json::to_string(&holder).expect("serialize");
        assert_eq!(json, r#"{"date":"2024-05-01T00:00:00Z"}"#);
    }

    #[test]
    fn accepts_full_timestamp_on_deserialize() {
        let holder: Holder =
            serde_json::from_str(r#"{"date":"2024-05-01T13:45:00Z"}"#).expect("deserialize");
        assert_eq!(holder.date, NaiveDate::from_ymd_opt(2024, 5, 1).expect("date"));
    }

    #[test]
    fn accepts_bare_date_on_deserialize() {
        let holder: Holder = serde_json::from_str(r#"{"date":"2024-05-01"}"#).expect("deserialize");
        assert_eq!(holder.date, NaiveDate::from_ymd_opt(2024, 5, 1).expect("date"));
    }
}
