//! Entity types and wire payloads for the workshop backend.
//! - One module per entity, plus shared identifier and date handling.
//! - Identifier shapes are normalized once, at deserialization.
//! - Request payloads carry their own field validation.

pub mod customer;
pub mod dates;
pub mod errors;
pub mod id;
pub mod instrument;
pub mod order;
pub mod passport;
pub mod service;
