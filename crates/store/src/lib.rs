//! Per-entity state containers and the order aggregation logic.
//! - Each container holds its in-memory item list behind an
//!   idle/loading/loaded/error state machine.
//! - List mutations land only after server confirmation; there are no
//!   optimistic updates and no automatic retries.
//! - `pricing` holds the pure order-total and reconciliation-diff functions.

pub mod customers;
pub mod instruments;
pub mod orders;
pub mod passports;
pub mod pricing;
pub mod services;
pub mod state;
