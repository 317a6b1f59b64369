//! Delete selected records.

use std::collections::BTreeSet;

use glasstock_sheet::SheetStore;
use tracing::{info, instrument, warn};

use super::{Loaded, Reconciler};
use crate::error::InventoryError;
use crate::model::{RecordId, Table};

impl<S: SheetStore> Reconciler<S> {
    /// Remove every record whose id is in `ids` and persist the result.
    ///
    /// The table is reloaded from the store first, past any cache, so a
    /// filtered or stale in-memory view can never cause rows outside the
    /// selection to be lost. Ids that match nothing are ignored. The result
    /// is written back even when nothing matched, in a single full-table
    /// write: either the new state is stored or the old one is left
    /// untouched.
    ///
    /// # Errors
    /// Returns [`InventoryError::StorageUnavailable`] if the reload or the
    /// write fails, and [`InventoryError::UnstableIds`] if stored rows lack
    /// ids (the selection could not have come from them). The store is
    /// unchanged in both cases.
    #[instrument(skip_all, fields(worksheet = %self.worksheet, selected = ids.len()))]
    pub fn delete(&self, ids: &BTreeSet<RecordId>) -> Result<Table, InventoryError> {
        let Loaded {
            mut table,
            backfilled,
        } = self.load_strict()?;
        if backfilled > 0 {
            warn!(backfilled, "stored rows lack ids; refusing to delete");
            return Err(InventoryError::UnstableIds {
                worksheet: self.worksheet.clone(),
                missing: backfilled,
            });
        }
        let before = table.len();
        table.retain(|record| !ids.contains(&record.id));
        let removed = before - table.len();

        self.save(&table)?;
        info!(removed, remaining = table.len(), "records deleted");
        Ok(table)
    }
}
