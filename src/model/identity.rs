//! Record identity assignment.
//!
//! Ids are opaque 128-bit random tokens rendered as 32 lowercase hex
//! characters. Once a record has a non-blank id it keeps it for life; these
//! functions only ever fill in what is missing or colliding.

use std::collections::HashSet;

use tracing::debug;

use super::types::{Record, RecordId, Table};

/// Generate a fresh random record id.
#[must_use]
pub fn new_id() -> RecordId {
    RecordId::new(format!("{:032x}", rand::random::<u128>()))
}

/// Give every record a table-unique, non-blank id.
///
/// Records with a blank id get a fresh one (load-time backfill for storage
/// that predates identity tracking, or rows added in the grid). When two
/// records share an id, the first keeps it and later ones get fresh ids.
/// Existing unique ids are never changed.
///
/// Returns the number of ids assigned.
pub fn ensure_ids(table: &mut Table) -> usize {
    let mut seen: HashSet<RecordId> = HashSet::with_capacity(table.len());
    let mut assigned = 0;

    for record in table.records_mut() {
        if record.id.is_blank() || seen.contains(&record.id) {
            if !record.id.is_blank() {
                debug!(id = %record.id, "duplicate record id replaced");
            }
            record.id = fresh_unique(&seen);
            assigned += 1;
        }
        seen.insert(record.id.clone());
    }

    if assigned > 0 {
        debug!(assigned, "assigned record ids");
    }
    assigned
}

/// Give every record a fresh id, discarding whatever it carried.
///
/// Used for imported batches: imported rows are always new records, even if
/// the source file has an id column or the content matches an existing row.
pub fn assign_fresh_ids(records: &mut [Record]) {
    for record in records {
        record.id = new_id();
    }
}

fn fresh_unique(taken: &HashSet<RecordId>) -> RecordId {
    loop {
        let id = new_id();
        if !taken.contains(&id) {
            return id;
        }
    }
}
