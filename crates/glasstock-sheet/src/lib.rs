//! Worksheet storage layer for glasstock.
//!
//! This crate defines the [`SheetStore`] trait, the single interface through
//! which the reconciliation engine reads and writes the inventory. A store
//! holds named worksheets, each a 2-D text table whose first row is a header.
//! Reads and writes always move a whole worksheet; there are no partial or
//! delta writes.
//!
//! # Crate layout
//!
//! - [`store`]: the [`SheetStore`] trait definition.
//! - [`sheet`]: the [`Sheet`] value type exchanged through the trait.
//! - [`error`]: the [`SheetError`] enum returned by all trait methods.
//! - [`memory`], [`csv_dir`], [`cached`]: concrete backends.

pub mod cached;
pub mod csv_dir;
pub mod error;
pub mod memory;
pub mod sheet;
pub mod store;

// Re-export the main trait and commonly used types at the crate root for
// ergonomic imports: `use glasstock_sheet::{SheetStore, Sheet, SheetError};`
pub use cached::CachedStore;
pub use csv_dir::CsvDirStore;
pub use error::SheetError;
pub use memory::MemoryStore;
pub use sheet::Sheet;
pub use store::SheetStore;
