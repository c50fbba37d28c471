//! Entity identifiers.
//!
//! The backend is inconsistent about identifier shape: most responses carry
//! a bare UUID string, a few wrap it as `{"value": "<uuid>"}`. Both shapes
//! are accepted here, once, at deserialization; downstream code only ever
//! sees a flat [`EntityId`] and never unwraps defensively.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Opaque identifier of a backend entity, stable for its lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Mint a fresh random id, used when the backend returns no body.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for EntityId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for EntityId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::from_str(s).map(Self)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Flat(Uuid),
    Wrapped { value: Uuid },
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = match WireId::deserialize(deserializer)? {
            WireId::Flat(id) => id,
            WireId::Wrapped { value } => value,
        };
        Ok(Self(id))
    }
}
