//! glasstock library crate.
//!
//! The primary interface is the `glasstock` binary. This lib.rs exposes the
//! reconciliation engine, the record model, and the session state so that
//! integration tests (and other front ends) can drive them directly without
//! going through the CLI.
//!
//! Storage backends live in the `glasstock-sheet` crate.

pub mod config;
pub mod error;
pub mod format;
pub mod grid;
pub mod model;
pub mod reconcile;
pub mod search;
pub mod session;
pub mod telemetry;

pub use error::InventoryError;
pub use reconcile::Reconciler;
