//! Instrument-passport container.

use client::{ApiClient, ApiError};
use models::id::EntityId;
use models::passport::{Passport, PassportRequest};
use tracing::warn;

use crate::state::EntityState;

/// Holds the passport list and drives its CRUD operations.
#[derive(Clone, Debug)]
pub struct PassportStore {
    client: ApiClient,
    state: EntityState<Passport>,
}

impl PassportStore {
    pub fn new(client: ApiClient) -> Self {
        Self { client, state: EntityState::default() }
    }

    pub fn state(&self) -> &EntityState<Passport> {
        &self.state
    }

    pub async fn fetch_all(&mut self) -> Result<(), ApiError> {
        self.state.begin();
        match self.client.list_passports().await {
            Ok(items) => {
                self.state.loaded(items);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "passport fetch failed");
                self.state.failed(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn create(&mut self, req: &PassportRequest) -> Result<EntityId, ApiError> {
        self.state.begin();
        match self.client.create_passport(req).await {
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

    pub async fn update(&mut self, id: EntityId, req: &PassportRequest) -> Result<(), ApiError> {
        self.state.begin();
        match self.client.update_passport(id, req).await {
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

    pub async fn delete(&mut self, id: EntityId) -> Result<(), ApiError> {
        self.state.begin();
        match self.client.delete_passport(id).await {
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
