//! Order endpoints, including the per-service attach/detach calls used by
//! the reconciliation flow. Each attach/detach is independent; nothing here
//! rolls back a call that already succeeded.

use models::id::EntityId;
use models::order::{Order, OrderRequest};
use serde_json::json;

use crate::errors::Result;
use crate::http::ApiClient;

impl ApiClient {
    /// List all orders with their attached services.
    pub async fn list_orders(&self) -> Result<Vec<Order>> {
        self.get_json("/orders").await
    }

    /// Get an order by id.
    pub async fn get_order(&self, id: EntityId) -> Result<Order> {
        self.get_json(&format!("/orders/{id}")).await
    }

    /// Create an order; returns the server-confirmed record whose id the
    /// attach calls need.
    pub async fn create_order(&self, req: &OrderRequest) -> Result<Order> {
        let body = req.clone().normalized();
        self.post_json("/orders", &body).await
    }

    /// Update an order. The backend expects the payload nested under a
    /// `request` key on this endpoint only.
    pub async fn update_order(&self, id: EntityId, req: &OrderRequest) -> Result<Order> {
        let body = req.clone().normalized();
        let updated = self
            .put_opt(&format!("/orders/{id}"), &json!({ "request": body }))
            .await?;
        Ok(updated.unwrap_or_else(|| body.into_order(id)))
    }

    /// Attach one service to an order.
    pub async fn attach_service(&self, order_id: EntityId, service_id: EntityId) -> Result<()> {
        self.post_unit(&format!("/orders/{order_id}/services"), &json!({ "serviceId": service_id }))
            .await
    }

    /// Detach one service from an order.
    pub async fn detach_service(&self, order_id: EntityId, service_id: EntityId) -> Result<()> {
        self.delete_unit(&format!("/orders/{order_id}/services/{service_id}")).await
    }

    /// Delete an order by id.
    pub async fn delete_order(&self, id: EntityId) -> Result<()> {
        self.delete_unit(&format!("/orders/{id}")).await
    }
}
