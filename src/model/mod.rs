//! Inventory data model: records, tables, identity, and normalization.

pub mod codec;
pub mod identity;
pub mod normalize;
pub mod types;

pub use types::{Field, Record, RecordId, Table};
