//! Order container and the service-attachment submission flow.

use std::collections::BTreeSet;

use client::{ApiClient, ApiError};
use futures::future::{join_all, BoxFuture};
use futures::FutureExt;
use models::id::EntityId;
use models::order::{Order, OrderRequest};
use models::service::Service;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::pricing;
use crate::state::EntityState;

/// An order form as submitted: the order fields plus the selected services.
#[derive(Clone, Debug)]
pub struct OrderDraft {
    pub request: OrderRequest,
    pub selection: BTreeSet<EntityId>,
}

/// Holds the order list and drives CRUD plus attachment reconciliation.
#[derive(Clone, Debug)]
pub struct OrderStore {
    client: ApiClient,
    state: EntityState<Order>,
}

impl OrderStore {
    pub fn new(client: ApiClient) -> Self {
        Self { client, state: EntityState::default() }
    }

    pub fn state(&self) -> &EntityState<Order> {
        &self.state
    }

    /// Total of an order's attached services against the live catalog.
    pub fn total(&self, order_id: EntityId, catalog: &[Service]) -> Decimal {
        self.state
            .get(order_id)
            .map(|order| pricing::order_total(&order.attached_service_ids(), catalog))
            .unwrap_or(Decimal::ZERO)
    }

    pub async fn fetch_all(&mut self) -> Result<(), ApiError> {
        self.state.begin();
        match self.client.list_orders().await {
            Ok(items) => {
                self.state.loaded(items);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "order fetch failed");
                self.state.failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Create a new order and attach every selected service, then refetch
    /// the list so it carries the server-confirmed attachment sets.
    pub async fn submit_new(&mut self, draft: &OrderDraft) -> Result<EntityId, ApiError> {
        self.state.begin();
        match self.submit_new_inner(draft).await {
            Ok((id, items)) => {
                self.state.loaded(items);
                Ok(id)
            }
            Err(e) => {
                warn!(error = %e, "order submit failed");
                self.state.failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Update an existing order and converge its attached services to the
    /// draft's selection via the minimal attach/detach plan.
    pub async fn submit_edit(&mut self, id: EntityId, draft: &OrderDraft) -> Result<(), ApiError> {
        let attached = self
            .state
            .get(id)
            .map(Order::attached_service_ids)
            .unwrap_or_default();
        self.state.begin();
        match self.submit_edit_inner(id, &attached, draft).await {
            Ok(items) => {
                self.state.loaded(items);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "order submit failed");
                self.state.failed(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn delete(&mut self, id: EntityId) -> Result<(), ApiError> {
        self.state.begin();
        match self.client.delete_order(id).await {
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

    async fn submit_new_inner(&self, draft: &OrderDraft) -> Result<(EntityId, Vec<Order>), ApiError> {
        let created = self.client.create_order(&draft.request).await?;
        let attaches: Vec<_> = draft
            .selection
            .iter()
            .map(|sid| self.client.attach_service(created.id, *sid))
            .collect();
        collect_batch(join_all(attaches).await)?;
        let items = self.client.list_orders().await?;
        Ok((created.id, items))
    }

    async fn submit_edit_inner(
        &self,
        id: EntityId,
        attached: &BTreeSet<EntityId>,
        draft: &OrderDraft,
    ) -> Result<Vec<Order>, ApiError> {
        self.client.update_order(id, &draft.request).await?;

        let plan = pricing::plan_reconciliation(attached, &draft.selection);
        debug!(order = %id, to_add = plan.to_add.len(), to_remove = plan.to_remove.len(), "reconciling attachments");
        // the calls act on disjoint ids; they are issued concurrently and a
        // failure does not roll back the ones that already succeeded
        let mut calls: Vec<BoxFuture<'_, Result<(), ApiError>>> = Vec::new();
        for sid in &plan.to_add {
            calls.push(self.client.attach_service(id, *sid).boxed());
        }
        for sid in &plan.to_remove {
            calls.push(self.client.detach_service(id, *sid).boxed());
        }
        collect_batch(join_all(calls).await)?;

        let items = self.client.list_orders().await?;
        Ok(items)
    }
}

/// All results of a batch, reduced to the first error if any call failed.
fn collect_batch(results: Vec<Result<(), ApiError>>) -> Result<(), ApiError> {
    results.into_iter().collect()
}
