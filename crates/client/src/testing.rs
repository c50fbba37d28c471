//! In-process mock of the workshop backend.
//!
//! Spun up on an ephemeral port by the e2e tests so the client and the
//! containers can be exercised over real HTTP. A couple of endpoints answer
//! with wrapped identifiers or `value` envelopes on purpose, matching the
//! real backend's inconsistencies, and failures can be injected per endpoint
//! for the partial-failure scenarios.

use std::collections::{BTreeSet, HashMap};
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, patch, post, put};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use uuid::Uuid;

use models::customer::{Customer, CustomerRequest};
use models::id::EntityId;
use models::instrument::{Instrument, InstrumentRequest, InstrumentStatus};
use models::order::{Order, OrderRequest};
use models::passport::{Passport, PassportRequest};
use models::service::{Service, ServiceRequest};

#[derive(Default)]
struct Inner {
    customers: HashMap<EntityId, Customer>,
    instruments: HashMap<EntityId, Instrument>,
    services: HashMap<EntityId, Service>,
    orders: HashMap<EntityId, Order>,
    passports: HashMap<EntityId, Passport>,
}

/// Shared state of the mock backend, with failure injection and call
/// counters for the reconciliation assertions.
#[derive(Clone, Default)]
pub struct MockState {
    inner: Arc<RwLock<Inner>>,
    pub fail_instrument_status: Arc<AtomicBool>,
    pub fail_attach: Arc<AtomicBool>,
    pub fail_customer_list: Arc<AtomicBool>,
    attach_calls: Arc<AtomicUsize>,
    detach_calls: Arc<AtomicUsize>,
}

impl MockState {
    pub fn attach_calls(&self) -> usize {
        self.attach_calls.load(Ordering::SeqCst)
    }

    pub fn detach_calls(&self) -> usize {
        self.detach_calls.load(Ordering::SeqCst)
    }

    pub fn reset_counters(&self) {
        self.attach_calls.store(0, Ordering::SeqCst);
        self.detach_calls.store(0, Ordering::SeqCst);
    }

    /// Server-side attached-service set of an order.
    pub async fn attached_services(&self, order_id: EntityId) -> BTreeSet<EntityId> {
        let inner = self.inner.read().await;
        inner
            .orders
            .get(&order_id)
            .map(|o| o.services.iter().map(|s| s.id).collect())
            .unwrap_or_default()
    }

    /// Server-side snapshot of an instrument.
    pub async fn instrument(&self, id: EntityId) -> Option<Instrument> {
        self.inner.read().await.instruments.get(&id).cloned()
    }
}

/// Bind the mock on an ephemeral localhost port and serve it in the
/// background; returns the base URL.
pub async fn spawn(state: MockState) -> anyhow::Result<String> {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router(state)).await {
            eprintln!("mock backend error: {e}");
        }
    });
    Ok(format!("http://{addr}"))
}

pub fn router(state: MockState) -> Router {
    Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route("/customers/:id", get(get_customer).put(update_customer).delete(delete_customer))
        .route("/instruments", get(list_instruments).post(create_instrument))
        .route("/instruments/:id", get(get_instrument).put(update_instrument).delete(delete_instrument))
        .route("/instruments/:id/status", patch(update_instrument_status))
        .route("/services", get(list_services).post(create_service))
        .route("/services/:id", put(update_service).delete(delete_service))
        .route("/orders", get(list_orders).post(create_order))
        .route("/orders/:id", get(get_order).put(update_order).delete(delete_order))
        .route("/orders/:id/services", post(attach_service))
        .route("/orders/:id/services/:service_id", delete(detach_service))
        .route("/instrument-passports", get(list_passports).post(create_passport))
        .route("/instrument-passports/:id", get(get_passport).put(update_passport).delete(delete_passport))
        .with_state(state)
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "not found").into_response()
}

// ---- customers ----

async fn list_customers(State(s): State<MockState>) -> Response {
    if s.fail_customer_list.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "listing unavailable").into_response();
    }
    let inner = s.inner.read().await;
    Json(inner.customers.values().cloned().collect::<Vec<Customer>>()).into_response()
}

async fn create_customer(State(s): State<MockState>, Json(req): Json<CustomerRequest>) -> Json<Value> {
    let id = EntityId::new();
    let mut customer = req.into_customer(id);
    customer.created_at = Some(Utc::now());
    s.inner.write().await.customers.insert(id, customer.clone());
    // the real backend wraps the id on this endpoint
    let mut body = serde_json::to_value(&customer).expect("serialize customer");
    body["id"] = json!({ "value": id });
    Json(body)
}

async fn get_customer(State(s): State<MockState>, Path(id): Path<Uuid>) -> Response {
    let inner = s.inner.read().await;
    match inner.customers.get(&EntityId::from(id)) {
        // enveloped response, as the real backend answers on single lookups
        Some(customer) => Json(json!({ "value": customer })).into_response(),
        None => not_found(),
    }
}

async fn update_customer(
    State(s): State<MockState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CustomerRequest>,
) -> Response {
    let id = EntityId::from(id);
    let mut inner = s.inner.write().await;
    match inner.customers.get_mut(&id) {
        Some(existing) => {
            let created_at = existing.created_at;
            *existing = req.into_customer(id);
            existing.created_at = created_at;
            Json(existing.clone()).into_response()
        }
        None => not_found(),
    }
}

async fn delete_customer(State(s): State<MockState>, Path(id): Path<Uuid>) -> Response {
    let mut inner = s.inner.write().await;
    match inner.customers.remove(&EntityId::from(id)) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}

// ---- instruments ----

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InstrumentFieldsBody {
    model: String,
    serial_number: String,
    #[serde(rename = "recieveDate", with = "models::dates::midnight_utc")]
    receive_date: chrono::NaiveDate,
    #[serde(default)]
    customer_id: Option<EntityId>,
}

#[derive(Deserialize)]
struct StatusBody {
    status: InstrumentStatus,
}

async fn list_instruments(State(s): State<MockState>) -> Json<Vec<Instrument>> {
    let inner = s.inner.read().await;
    Json(inner.instruments.values().cloned().collect())
}

async fn create_instrument(
    State(s): State<MockState>,
    Json(req): Json<InstrumentRequest>,
) -> Json<Instrument> {
    let id = EntityId::new();
    let instrument = req.into_instrument(id);
    s.inner.write().await.instruments.insert(id, instrument.clone());
    Json(instrument)
}

async fn get_instrument(State(s): State<MockState>, Path(id): Path<Uuid>) -> Response {
    let inner = s.inner.read().await;
    match inner.instruments.get(&EntityId::from(id)) {
        Some(instrument) => Json(instrument.clone()).into_response(),
        None => not_found(),
    }
}

async fn update_instrument(
    State(s): State<MockState>,
    Path(id): Path<Uuid>,
    Json(body): Json<InstrumentFieldsBody>,
) -> Response {
    let mut inner = s.inner.write().await;
    match inner.instruments.get_mut(&EntityId::from(id)) {
        Some(existing) => {
            // descriptive fields only; the status is untouched here
            existing.model = body.model;
            existing.serial_number = body.serial_number;
            existing.receive_date = body.receive_date;
            existing.customer_id = body.customer_id;
            StatusCode::NO_CONTENT.into_response()
        }
        None => not_found(),
    }
}

async fn update_instrument_status(
    State(s): State<MockState>,
    Path(id): Path<Uuid>,
    Json(body): Json<StatusBody>,
) -> Response {
    if s.fail_instrument_status.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "status update failed").into_response();
    }
    let mut inner = s.inner.write().await;
    match inner.instruments.get_mut(&EntityId::from(id)) {
        Some(existing) => {
            existing.status = body.status;
            StatusCode::NO_CONTENT.into_response()
        }
        None => not_found(),
    }
}

async fn delete_instrument(State(s): State<MockState>, Path(id): Path<Uuid>) -> Response {
    let mut inner = s.inner.write().await;
    match inner.instruments.remove(&EntityId::from(id)) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}

// ---- services ----

async fn list_services(State(s): State<MockState>) -> Json<Vec<Service>> {
    let inner = s.inner.read().await;
    Json(inner.services.values().cloned().collect())
}

async fn create_service(State(s): State<MockState>, Json(req): Json<ServiceRequest>) -> Json<Service> {
    let id = EntityId::new();
    let service = req.into_service(id);
    s.inner.write().await.services.insert(id, service.clone());
    Json(service)
}

async fn update_service(
    State(s): State<MockState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ServiceRequest>,
) -> Response {
    let id = EntityId::from(id);
    let mut inner = s.inner.write().await;
    match inner.services.get_mut(&id) {
        Some(existing) => {
            *existing = req.into_service(id);
            StatusCode::NO_CONTENT.into_response()
        }
        None => not_found(),
    }
}

async fn delete_service(State(s): State<MockState>, Path(id): Path<Uuid>) -> Response {
    let mut inner = s.inner.write().await;
    match inner.services.remove(&EntityId::from(id)) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}

// ---- orders ----

#[derive(Deserialize)]
struct OrderUpdateEnvelope {
    request: OrderRequest,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttachBody {
    service_id: EntityId,
}

async fn list_orders(State(s): State<MockState>) -> Json<Vec<Order>> {
    let inner = s.inner.read().await;
    Json(inner.orders.values().cloned().collect())
}

async fn create_order(State(s): State<MockState>, Json(req): Json<OrderRequest>) -> Json<Order> {
    let id = EntityId::new();
    let order = req.into_order(id);
    s.inner.write().await.orders.insert(id, order.clone());
    Json(order)
}

async fn get_order(State(s): State<MockState>, Path(id): Path<Uuid>) -> Response {
    let inner = s.inner.read().await;
    match inner.orders.get(&EntityId::from(id)) {
        Some(order) => Json(json!({ "value": order })).into_response(),
        None => not_found(),
    }
}

async fn update_order(
    State(s): State<MockState>,
    Path(id): Path<Uuid>,
    Json(body): Json<OrderUpdateEnvelope>,
) -> Response {
    let id = EntityId::from(id);
    let mut inner = s.inner.write().await;
    match inner.orders.get_mut(&id) {
        Some(existing) => {
            let services = existing.services.clone();
            *existing = body.request.into_order(id);
            existing.services = services;
            StatusCode::NO_CONTENT.into_response()
        }
        None => not_found(),
    }
}

async fn attach_service(
    State(s): State<MockState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AttachBody>,
) -> Response {
    s.attach_calls.fetch_add(1, Ordering::SeqCst);
    if s.fail_attach.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "attach failed").into_response();
    }
    let mut inner = s.inner.write().await;
    let Some(service) = inner.services.get(&body.service_id).cloned() else {
        return not_found();
    };
    match inner.orders.get_mut(&EntityId::from(id)) {
        Some(order) => {
            if !order.services.iter().any(|s| s.id == service.id) {
                order.services.push(service);
            }
            StatusCode::NO_CONTENT.into_response()
        }
        None => not_found(),
    }
}

async fn detach_service(
    State(s): State<MockState>,
    Path((id, service_id)): Path<(Uuid, Uuid)>,
) -> Response {
    s.detach_calls.fetch_add(1, Ordering::SeqCst);
    let service_id = EntityId::from(service_id);
    let mut inner = s.inner.write().await;
    match inner.orders.get_mut(&EntityId::from(id)) {
        Some(order) => {
            order.services.retain(|s| s.id != service_id);
            StatusCode::NO_CONTENT.into_response()
        }
        None => not_found(),
    }
}

async fn delete_order(State(s): State<MockState>, Path(id): Path<Uuid>) -> Response {
    let mut inner = s.inner.write().await;
    match inner.orders.remove(&EntityId::from(id)) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}

// ---- passports ----

async fn list_passports(State(s): State<MockState>) -> Json<Vec<Passport>> {
    let inner = s.inner.read().await;
    Json(inner.passports.values().cloned().collect())
}

async fn create_passport(State(s): State<MockState>, Json(req): Json<PassportRequest>) -> Json<Passport> {
    let id = EntityId::new();
    let passport = req.into_passport(id);
    s.inner.write().await.passports.insert(id, passport.clone());
    Json(passport)
}

async fn get_passport(State(s): State<MockState>, Path(id): Path<Uuid>) -> Response {
    let inner = s.inner.read().await;
    match inner.passports.get(&EntityId::from(id)) {
        Some(passport) => Json(passport.clone()).into_response(),
        None => not_found(),
    }
}

async fn update_passport(
    State(s): State<MockState>,
    Path(id): Path<Uuid>,
    Json(req): Json<PassportRequest>,
) -> Response {
    let id = EntityId::from(id);
    let mut inner = s.inner.write().await;
    match inner.passports.get_mut(&id) {
        Some(existing) => {
            *existing = req.into_passport(id);
            StatusCode::NO_CONTENT.into_response()
        }
        None => not_found(),
    }
}

async fn delete_passport(State(s): State<MockState>, Path(id): Path<Uuid>) -> Response {
    let mut inner = s.inner.write().await;
    match inner.passports.remove(&EntityId::from(id)) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}
