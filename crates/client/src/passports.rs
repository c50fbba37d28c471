//! Instrument-passport endpoints.

use models::id::EntityId;
use models::passport::{Passport, PassportRequest};

use crate::errors::Result;
use crate::http::ApiClient;

impl ApiClient {
    /// List all instrument passports.
    pub async fn list_passports(&self) -> Result<Vec<Passport>> {
        self.get_json("/instrument-passports").await
    }

    /// Get a passport by id.
    pub async fn get_passport(&self, id: EntityId) -> Result<Passport> {
        self.get_json(&format!("/instrument-passports/{id}")).await
    }

    /// Create a passport. Falls back to a client-assembled record when the
    /// backend confirms without a body.
    pub async fn create_passport(&self, req: &PassportRequest) -> Result<Passport> {
        req.validate()?;
        let created = self.post_opt("/instrument-passports", req).await?;
        Ok(created.unwrap_or_else(|| req.clone().into_passport(EntityId::new())))
    }

    /// Replace every field of a passport.
    pub async fn update_passport(&self, id: EntityId, req: &PassportRequest) -> Result<Passport> {
        req.validate()?;
        let updated = self.put_opt(&format!("/instrument-passports/{id}"), req).await?;
        Ok(updated.unwrap_or_else(|| req.clone().into_passport(id)))
    }

    /// Delete a passport by id.
    pub async fn delete_passport(&self, id: EntityId) -> Result<()> {
        self.delete_unit(&format!("/instrument-passports/{id}")).await
    }
}
