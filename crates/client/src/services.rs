//! Service-catalog endpoints.

use models::id::EntityId;
use models::service::{Service, ServiceRequest};

use crate::errors::Result;
use crate::http::ApiClient;

impl ApiClient {
    /// List the full service catalog.
    pub async fn list_services(&self) -> Result<Vec<Service>> {
        self.get_json("/services").await
    }

    /// Create a service; the display name travels as `title` and comes back
    /// as `name`.
    pub async fn create_service(&self, req: &ServiceRequest) -> Result<Service> {
        req.validate()?;
        let created = self.post_opt("/services", req).await?;
        Ok(created.unwrap_or_else(|| req.clone().into_service(EntityId::new())))
    }

    /// Update a service. The backend confirms without a body, so the updated
    /// record is assembled from the submitted fields.
    pub async fn update_service(&self, id: EntityId, req: &ServiceRequest) -> Result<Service> {
        req.validate()?;
        self.put_unit(&format!("/services/{id}"), req).await?;
        Ok(req.clone().into_service(id))
    }

    /// Delete a service by id.
    pub async fn delete_service(&self, id: EntityId) -> Result<()> {
        self.delete_unit(&format!("/services/{id}")).await
    }
}
