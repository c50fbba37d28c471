//! Customer endpoints.

use models::customer::{Customer, CustomerRequest};
use models::id::EntityId;

use crate::errors::Result;
use crate::http::ApiClient;

impl ApiClient {
    /// List all customers.
    pub async fn list_customers(&self) -> Result<Vec<Customer>> {
        self.get_json("/customers").await
    }

    /// Get a customer by id.
    pub async fn get_customer(&self, id: EntityId) -> Result<Customer> {
        self.get_json(&format!("/customers/{id}")).await
    }

    /// Create a customer; returns the server-confirmed record with its
    /// assigned id.
    pub async fn create_customer(&self, req: &CustomerRequest) -> Result<Customer> {
        req.validate()?;
        self.post_json("/customers", req).await
    }

    /// Replace every field of a customer.
    pub async fn update_customer(&self, id: EntityId, req: &CustomerRequest) -> Result<Customer> {
        req.validate()?;
        let updated = self.put_opt(&format!("/customers/{id}"), req).await?;
        Ok(updated.unwrap_or_else(|| req.clone().into_customer(id)))
    }

    /// Delete a customer by id. Referencing instruments are not cascaded.
    pub async fn delete_customer(&self, id: EntityId) -> Result<()> {
        self.delete_unit(&format!("/customers/{id}")).await
    }
}
