//! Service-catalog container.

use client::{ApiClient, ApiError};
use models::id::EntityId;
use models::service::{Service, ServiceRequest};
use tracing::warn;

use crate::state::EntityState;

/// Holds the service catalog and drives its CRUD operations.
#[derive(Clone, Debug)]
pub struct ServiceStore {
    client: ApiClient,
    state: EntityState<Service>,
}

impl ServiceStore {
    pub fn new(client: ApiClient) -> Self {
        Self { client, state: EntityState::default() }
    }

    pub fn state(&self) -> &EntityState<Service> {
        &self.state
    }

    /// The live catalog, as needed by the order-total computation.
    pub fn catalog(&self) -> &[Service] {
        self.state.items()
    }

    pub async fn fetch_all(&mut self) -> Result<(), ApiError> {
        self.state.begin();
        match self.client.list_services().await {
            Ok(items) => {
                self.state.loaded(items);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "service fetch failed");
                self.state.failed(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn create(&mut self, req: &ServiceRequest) -> Result<EntityId, ApiError> {
        self.state.begin();
        match self.client.create_service(req).await {
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

    /// Update a service. A price change affects future order totals only;
    /// nothing previously persisted is recomputed server-side.
    pub async fn update(&mut self, id: EntityId, req: &ServiceRequest) -> Result<(), ApiError> {
        self.state.begin();
        match self.client.update_service(id, req).await {
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
        match self.client.delete_service(id).await {
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
