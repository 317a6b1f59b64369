//! The reconciliation engine.
//!
//! [`Reconciler`] owns a worksheet store and the name of the inventory
//! worksheet. It exposes the four inventory operations:
//!
//! - [`load`](Reconciler::load): read the worksheet, backfill ids and
//!   normalize. Never fails; an unreadable store yields an empty table.
//!   Backfilled ids are written back so later operations can match them.
//! - [`import`](Reconciler::import) / [`merge_import`]: append an external
//!   batch, every row as a new record.
//! - [`reconcile_edit`](Reconciler::reconcile_edit): write back an edited
//!   table only when it differs from the original.
//! - [`delete`](Reconciler::delete): remove selected ids from a fresh load.
//!
//! Every persisting operation issues exactly one full-table write. Import and
//! delete reload through [`load_strict`](Reconciler::load_strict), so a read
//! failure aborts them before anything is written. Read and write failures
//! surface as [`InventoryError::StorageUnavailable`].

mod delete;
pub mod diff;
mod import;
mod load;

use glasstock_sheet::SheetStore;
use tracing::{info, instrument};

use crate::error::InventoryError;
use crate::model::codec;
use crate::model::Table;

pub use diff::{SaveOutcome, TableDiff, diff_tables};
pub use import::{ImportReport, merge_import};
pub use load::{Loaded, prepare_loaded};

/// Default worksheet holding the inventory.
pub const DEFAULT_WORKSHEET: &str = "Blad1";

/// The inventory engine.
#[derive(Debug)]
pub struct Reconciler<S> {
    store: S,
    worksheet: String,
}

impl<S: SheetStore> Reconciler<S> {
    /// Create an engine over `store`, using `worksheet` for the inventory.
    pub fn new(store: S, worksheet: impl Into<String>) -> Self {
        Self {
            store,
            worksheet: worksheet.into(),
        }
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The inventory worksheet name.
    pub fn worksheet(&self) -> &str {
        &self.worksheet
    }

    /// Persist `table` as the whole worksheet.
    ///
    /// # Errors
    /// Returns [`InventoryError::StorageUnavailable`] if the write fails; the
    /// previously stored worksheet is then unchanged.
    #[instrument(skip(self, table), fields(worksheet = %self.worksheet, rows = table.len()))]
    pub fn save(&self, table: &Table) -> Result<(), InventoryError> {
        let sheet = codec::encode(table);
        self.store
            .write(&self.worksheet, &sheet)
            .map_err(|source| InventoryError::StorageUnavailable {
                worksheet: self.worksheet.clone(),
                source,
            })?;
        info!(rows = table.len(), "worksheet saved");
        Ok(())
    }
}
