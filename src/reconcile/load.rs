//! Load: worksheet → display-ready table.

use glasstock_sheet::SheetStore;
use tracing::{debug, info, instrument, warn};

use super::Reconciler;
use crate::error::InventoryError;
use crate::model::codec::{self, Decoded};
use crate::model::identity::ensure_ids;
use crate::model::normalize::normalize_record;
use crate::model::Table;

/// A loaded table plus what load had to fix up.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Loaded {
    /// The display-ready table.
    pub table: Table,
    /// Number of rows that received a new id (missing or duplicate).
    pub backfilled: usize,
}

/// Bring a decoded sheet into canonical form: ids backfilled and unique,
/// every field present and normalized.
#[must_use]
pub fn prepare_loaded(decoded: Decoded) -> Loaded {
    let Decoded {
        mut table,
        had_id_column,
        ..
    } = decoded;

    let assigned = ensure_ids(&mut table);
    if !had_id_column && !table.is_empty() {
        debug!(assigned, "worksheet has no id column; backfilled every row");
    }

    let normalized = table
        .records_mut()
        .iter_mut()
        .map(normalize_record)
        .filter(|changed| *changed)
        .count();
    if normalized > 0 {
        debug!(normalized, "normalized rows on load");
    }
    Loaded {
        table,
        backfilled: assigned,
    }
}

impl<S: SheetStore> Reconciler<S> {
    /// Load the full inventory.
    ///
    /// Never fails: a missing, empty, or unreadable worksheet yields an empty
    /// table so the grid stays usable on a cold or misconfigured store.
    ///
    /// Rows that had to be given an id are written back so the ids the grid
    /// shows still match storage on the next load. That write is best effort;
    /// when it fails the table is still returned and a later
    /// [`delete`](Self::delete) refuses to guess.
    pub fn load(&self) -> Table {
        let Loaded { table, backfilled } = self.load_detailed();
        if backfilled > 0
            && let Err(e) = self.save(&table)
        {
            warn!(backfilled, error = %e, "could not store backfilled ids");
        }
        table
    }

    /// Read and prepare the worksheet without writing anything, also
    /// reporting how many ids were backfilled.
    #[instrument(skip(self), fields(worksheet = %self.worksheet))]
    pub fn load_detailed(&self) -> Loaded {
        let sheet = match self.store.read(&self.worksheet) {
            Ok(Some(sheet)) => sheet,
            Ok(None) => {
                debug!("worksheet absent or empty");
                return Loaded::default();
            }
            Err(e) => {
                warn!(error = %e, "worksheet read failed; continuing with an empty table");
                return Loaded::default();
            }
        };
        prepare_loaded(codec::decode(&sheet))
    }

    /// Reload the worksheet for an operation that writes the result back.
    ///
    /// Reads past any cache, and a read failure is an error rather than an
    /// empty table: persisting on top of a table that failed to load would
    /// overwrite the inventory.
    ///
    /// # Errors
    /// Returns [`InventoryError::StorageUnavailable`] if the store cannot be
    /// read.
    #[instrument(skip(self), fields(worksheet = %self.worksheet))]
    pub fn load_strict(&self) -> Result<Loaded, InventoryError> {
        match self.store.read_fresh(&self.worksheet) {
            Ok(Some(sheet)) => Ok(prepare_loaded(codec::decode(&sheet))),
            Ok(None) => Ok(Loaded::default()),
            Err(source) => {
                warn!(error = %source, "worksheet read failed; aborting");
                Err(InventoryError::StorageUnavailable {
                    worksheet: self.worksheet.clone(),
                    source,
                })
            }
        }
    }

    /// Load, and if any row had to be given an id, write the table back so
    /// those ids survive the next load.
    ///
    /// Same as [`load`](Self::load) except that a failed write-back is an
    /// error.
    ///
    /// # Errors
    /// Returns [`InventoryError::StorageUnavailable`] if the write-back fails.
    pub fn load_and_persist_ids(&self) -> Result<Table, InventoryError> {
        let Loaded { table, backfilled } = self.load_detailed();
        if backfilled > 0 {
            info!(backfilled, "persisting backfilled record ids");
            self.save(&table)?;
        }
        Ok(table)
    }
}
