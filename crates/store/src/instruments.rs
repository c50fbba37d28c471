//! Instrument container.

use client::{ApiClient, ApiError};
use models::id::EntityId;
use models::instrument::{Instrument, InstrumentRequest, InstrumentStatus};
use tracing::warn;

use crate::state::EntityState;

/// Holds the instrument list and drives its CRUD and status operations.
#[derive(Clone, Debug)]
pub struct InstrumentStore {
    client: ApiClient,
    state: EntityState<Instrument>,
}

impl InstrumentStore {
    pub fn new(client: ApiClient) -> Self {
        Self { client, state: EntityState::default() }
    }

    pub fn state(&self) -> &EntityState<Instrument> {
        &self.state
    }

    pub async fn fetch_all(&mut self) -> Result<(), ApiError> {
        self.state.begin();
        match self.client.list_instruments().await {
            Ok(items) => {
                self.state.loaded(items);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "instrument fetch failed");
                self.state.failed(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn create(&mut self, req: &InstrumentRequest) -> Result<EntityId, ApiError> {
        self.state.begin();
        match self.client.create_instrument(req).await {
            Ok(created) => {
                let id = created.id;
                self.state.push(created);
                self.state.confirmed();
                Ok(id)
            }
            Err(e) => {
                self.state.failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Two-step update (fields, then status). A status failure after a
    /// successful field update surfaces as an error here while the field
    /// changes stay persisted server-side; re-submitting converges.
    pub async fn update(&mut self, id: EntityId, req: &InstrumentRequest) -> Result<(), ApiError> {
        self.state.begin();
        match self.client.update_instrument(id, req).await {
            Ok(updated) => {
                self.state.replace(updated);
                self.state.confirmed();
                Ok(())
            }
            Err(e) => {
                self.state.failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Status-only transition, mirrored into the list on confirmation.
    pub async fn update_status(&mut self, id: EntityId, status: InstrumentStatus) -> Result<(), ApiError> {
        self.state.begin();
        match self.client.update_instrument_status(id, status).await {
            Ok(()) => {
                self.state.modify(id, |i| i.status = status);
                self.state.confirmed();
                Ok(())
            }
            Err(e) => {
                self.state.failed(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn delete(&mut self, id: EntityId) -> Result<(), ApiError> {
        self.state.begin();
        match self.client.delete_instrument(id).await {
            Ok(()) => {
                self.state.remove(id);
                self.state.confirmed();
                Ok(())
            }
            Err(e) => {
                self.state.failed(e.to_string());
                Err(e)
            }
        }
    }
}
