//! Import-merge: append an externally sourced batch to the inventory.
//!
//! Merging is strictly additive. Every uploaded row becomes a new record
//! with a fresh id, even when its content matches an existing record or the
//! upload carried its own id column. Nothing is de-duplicated.

use glasstock_sheet::{Sheet, SheetStore};
use tracing::{info, instrument};

use super::Reconciler;
use crate::error::InventoryError;
use crate::model::codec;
use crate::model::identity::assign_fresh_ids;
use crate::model::normalize::normalize_record;
use crate::model::Table;

/// Merge `uploaded` into `current`.
///
/// The result is `current`'s records, unchanged and in order, followed by
/// every uploaded row normalized the same way load normalizes. Headers of
/// the upload are matched case-insensitively; unknown columns are dropped
/// and missing fields are empty. A position column, once any record has
/// one, is filled in for the others when the table is encoded.
#[must_use]
pub fn merge_import(current: &Table, uploaded: &Sheet) -> Table {
    let mut incoming = codec::decode(uploaded).table.into_records();
    assign_fresh_ids(&mut incoming);
    for record in &mut incoming {
        normalize_record(record);
    }

    let mut merged = current.clone();
    merged.extend(incoming);
    merged
}

/// Summary of a completed import.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImportReport {
    /// Rows appended from the upload.
    pub imported: usize,
    /// Records in the inventory after the import.
    pub total: usize,
}

impl<S: SheetStore> Reconciler<S> {
    /// Reload the inventory from storage, merge `uploaded` into it, and
    /// write the result.
    ///
    /// # Errors
    /// Returns [`InventoryError::StorageUnavailable`] if the reload or the
    /// write fails; the stored inventory is then unchanged.
    #[instrument(skip_all, fields(worksheet = %self.worksheet, rows = uploaded.len()))]
    pub fn import(&self, uploaded: &Sheet) -> Result<(Table, ImportReport), InventoryError> {
        let current = self.load_strict()?.table;
        let merged = merge_import(&current, uploaded);
        let report = ImportReport {
            imported: merged.len() - current.len(),
            total: merged.len(),
        };
        self.save(&merged)?;
        info!(imported = report.imported, total = report.total, "import merged");
        Ok((merged, report))
    }
}
