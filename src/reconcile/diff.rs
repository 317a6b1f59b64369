//! Change detection and save.
//!
//! Two tables are compared by id, never by position: the grid may hand back
//! rows sorted or filtered differently from how they were loaded.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use glasstock_sheet::SheetStore;
use tracing::{debug, instrument};

use super::Reconciler;
use crate::error::InventoryError;
use crate::model::identity::ensure_ids;
use crate::model::normalize::normalize_record;
use crate::model::{Record, RecordId, Table};

/// Id-keyed difference between two tables.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableDiff {
    /// Ids present in both tables whose content differs.
    pub changed: BTreeSet<RecordId>,
    /// Ids present only in the edited table.
    pub added: BTreeSet<RecordId>,
    /// Ids present only in the original table.
    pub removed: BTreeSet<RecordId>,
}

impl TableDiff {
    /// `true` when the tables hold the same records, ignoring order.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.added.is_empty() && self.removed.is_empty()
    }
}

impl fmt::Display for TableDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} changed, {} added, {} removed",
            self.changed.len(),
            self.added.len(),
            self.removed.len()
        )
    }
}

fn by_id(table: &Table) -> BTreeMap<&RecordId, &Record> {
    table.iter().map(|r| (&r.id, r)).collect()
}

/// Compare `original` and `edited` record by record, keyed by id.
///
/// Ids must be unique within each table; when they are not, later
/// duplicates shadow earlier ones.
#[must_use]
pub fn diff_tables(original: &Table, edited: &Table) -> TableDiff {
    let before = by_id(original);
    let after = by_id(edited);

    let mut diff = TableDiff::default();
    for (id, record) in &after {
        match before.get(id) {
            Some(old) if old.same_content(record) => {}
            Some(_) => {
                diff.changed.insert((*id).clone());
            }
            None => {
                diff.added.insert((*id).clone());
            }
        }
    }
    diff.removed = before
        .keys()
        .filter(|id| !after.contains_key(*id))
        .map(|id| (*id).clone())
        .collect();
    diff
}

/// Result of [`Reconciler::reconcile_edit`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The edited table equals the original; nothing was written.
    Unchanged,
    /// The edited table was written back.
    Saved(TableDiff),
}

impl<S: SheetStore> Reconciler<S> {
    /// Persist `edited` if it differs from `original`.
    ///
    /// `original` must be the full table as last loaded, not a filtered
    /// view. Before comparing, `edited` is brought into canonical form: rows
    /// added in the grid (blank id) get fresh ids and numeric fields are
    /// normalized, so the store only ever holds canonical values and an edit
    /// that normalizes back to the stored value is not a change.
    ///
    /// Issues zero writes when nothing changed and exactly one full-table
    /// write otherwise.
    ///
    /// # Errors
    /// Returns [`InventoryError::StorageUnavailable`] if the write fails.
    #[instrument(skip_all, fields(worksheet = %self.worksheet))]
    pub fn reconcile_edit(
        &self,
        original: &Table,
        edited: &Table,
    ) -> Result<SaveOutcome, InventoryError> {
        let mut candidate = edited.clone();
        ensure_ids(&mut candidate);
        for record in candidate.records_mut() {
            normalize_record(record);
        }

        let diff = diff_tables(original, &candidate);
        if diff.is_empty() {
            debug!("no changes detected; skipping write");
            return Ok(SaveOutcome::Unchanged);
        }

        debug!(%diff, "changes detected");
        self.save(&candidate)?;
        Ok(SaveOutcome::Saved(diff))
    }
}
