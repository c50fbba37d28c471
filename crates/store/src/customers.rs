//! Customer container.

use client::{ApiClient, ApiError};
use models::customer::{Customer, CustomerRequest};
use models::id::EntityId;
use tracing::warn;

use crate::state::EntityState;

/// Holds the customer list and drives its CRUD operations.
#[derive(Clone, Debug)]
pub struct CustomerStore {
    client: ApiClient,
    state: EntityState<Customer>,
}

impl CustomerStore {
    pub fn new(client: ApiClient) -> Self {
        Self { client, state: EntityState::default() }
    }

    pub fn state(&self) -> &EntityState<Customer> {
        &self.state
    }

    /// Replace the list with the backend's. On failure the previous list is
    /// retained and the error recorded.
    pub async fn fetch_all(&mut self) -> Result<(), ApiError> {
        self.state.begin();
        match self.client.list_customers().await {
            Ok(items) => {
                self.state.loaded(items);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "customer fetch failed");
                self.state.failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Create a customer and append the server-confirmed record.
    pub async fn create(&mut self, req: &CustomerRequest) -> Result<EntityId, ApiError> {
        self.state.begin();
        match self.client.create_customer(req).await {
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

    /// Replace a customer's fields; the list item is swapped in place once
    /// the backend confirms.
    pub async fn update(&mut self, id: EntityId, req: &CustomerRequest) -> Result<(), ApiError> {
        self.state.begin();
        match self.client.update_customer(id, req).await {
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

    /// Delete a customer; removes exactly the matching item on confirmation.
    pub async fn delete(&mut self, id: EntityId) -> Result<(), ApiError> {
        self.state.begin();
        match self.client.delete_customer(id).await {
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
