//! Instrument endpoints.
//!
//! Updates are special-cased into two sequential calls because the backend
//! models status transitions separately from descriptive-field edits.

use models::id::EntityId;
use models::instrument::{Instrument, InstrumentRequest, InstrumentStatus};
use serde_json::json;

use crate::errors::Result;
use crate::http::ApiClient;

impl ApiClient {
    /// List all instruments.
    pub async fn list_instruments(&self) -> Result<Vec<Instrument>> {
        self.get_json("/instruments").await
    }

    /// Get an instrument by id.
    pub async fn get_instrument(&self, id: EntityId) -> Result<Instrument> {
        self.get_json(&format!("/instruments/{id}")).await
    }

    /// Create an instrument. Falls back to a client-assembled record when the
    /// backend confirms without a body.
    pub async fn create_instrument(&self, req: &InstrumentRequest) -> Result<Instrument> {
        req.validate()?;
        let created = self.post_opt("/instruments", req).await?;
        Ok(created.unwrap_or_else(|| req.clone().into_instrument(EntityId::new())))
    }

    /// Full-field update followed by the dedicated status call. Both must
    /// succeed; a status failure after a successful field update leaves the
    /// field changes persisted and reports the whole operation as failed.
    pub async fn update_instrument(&self, id: EntityId, req: &InstrumentRequest) -> Result<Instrument> {
        req.validate()?;
        self.put_unit(&format!("/instruments/{id}"), &req.descriptive_fields()).await?;
        self.update_instrument_status(id, req.status).await?;
        Ok(req.clone().into_instrument(id))
    }

    /// Status-only transition.
    pub async fn update_instrument_status(&self, id: EntityId, status: InstrumentStatus) -> Result<()> {
        self.patch_unit(&format!("/instruments/{id}/status"), &json!({ "status": status })).await
    }

    /// Delete an instrument by id.
    pub async fn delete_instrument(&self, id: EntityId) -> Result<()> {
        self.delete_unit(&format!("/instruments/{id}")).await
    }
}
