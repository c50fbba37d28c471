use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates;
use crate::id::EntityId;
use crate::service::Service;

/// Lifecycle status of a repair order. `New` is the canonical initial value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    New,
    InProgress,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "New",
            OrderStatus::InProgress => "InProgress",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repair order for one instrument, with zero or more attached services.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: EntityId,
    pub instrument_id: EntityId,
    #[serde(with = "dates::midnight_utc")]
    pub order_date: NaiveDate,
    pub status: OrderStatus,
    #[serde(default)]
    pub notes: String,
    /// Services currently attached server-side. The displayed total is never
    /// stored here; it is recomputed from the live catalog.
    #[serde(default)]
    pub services: Vec<Service>,
}

impl Order {
    /// Ids of the currently attached services.
    pub fn attached_service_ids(&self) -> BTreeSet<EntityId> {
        self.services.iter().map(|s| s.id).collect()
    }
}

/// Create/update payload for an order.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub instrument_id: EntityId,
    #[serde(with = "dates::midnight_utc")]
    pub order_date: NaiveDate,
    pub status: OrderStatus,
    pub notes: String,
}

impl OrderRequest {
    /// Trim the notes, substituting the `"-"` placeholder the backend expects
    /// for an empty value.
    pub fn normalized(mut self) -> Self {
        let trimmed = self.notes.trim();
        self.notes = if trimmed.is_empty() { "-".to_string() } else { trimmed.to_string() };
        self
    }

    /// Echo the submitted fields as a full record under the given id. The
    /// attached-service list is not part of the payload and comes back empty.
    pub fn into_order(self, id: EntityId) -> Order {
        Order {
            id,
            instrument_id: self.instrument_id,
            order_date: self.order_date,
            status: self.status,
            notes: self.notes,
            services: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(notes: &str) -> OrderRequest {
        OrderRequest {
            instrument_id: EntityId::new(),
            order_date: NaiveDate::from_ymd_opt(2024, 6, 3).expect("date"),
            status: OrderStatus::New,
            notes: notes.into(),
        }
    }

    #[test]
    fn blank_notes_become_placeholder() {
        assert_eq!(request("   ").normalized().notes, "-");
        assert_eq!(request("").normalized().notes, "-");
    }

    #[test]
    fn notes_are_trimmed() {
        assert_eq!(request("  fix bridge  ").normalized().notes, "fix bridge");
    }

    #[test]
    fn default_status_is_new() {
        assert_eq!(OrderStatus::default(), OrderStatus::New);
        let status: OrderStatus = serde_json::from_str("\"New\"").expect("deserialize");
        assert_eq!(status, OrderStatus::New);
    }

    #[test]
    fn attached_ids_form_a_set() {
        let svc = |id: EntityId| Service {
            id,
            name: "x".into(),
            price: rust_decimal::Decimal::ZERO,
            description: None,
            duration_minutes: None,
        };
        let a = EntityId::new();
        let b = EntityId::new();
        let order = Order {
            id: EntityId::new(),
            instrument_id: EntityId::new(),
            order_date: NaiveDate::from_ymd_opt(2024, 6, 3).expect("date"),
            status: OrderStatus::New,
            notes: "-".into(),
            services: vec![svc(a), svc(b), svc(a)],
        };
        let ids = order.attached_service_ids();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&a) && ids.contains(&b));
    }
}
