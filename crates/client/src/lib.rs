//! HTTP client for the workshop backend.
//! - One method per (entity, operation) pair, JSON in and out.
//! - Response envelopes and identifier shapes are normalized at this
//!   boundary; callers always receive bare values.
//! - Failures carry the HTTP status and raw body text.

pub mod errors;
pub mod testing;

mod customers;
mod http;
mod instruments;
mod orders;
mod passports;
mod services;

pub use errors::ApiError;
pub use http::ApiClient;
