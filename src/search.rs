//! Search and view handling.
//!
//! The grid may show a filtered subset of the inventory. Filtering is for
//! display only: edits made against a view are merged back into the full
//! table by id before they reach change detection, so rows hidden by the
//! filter are never lost.

use std::collections::HashMap;

use crate::error::InventoryError;
use crate::model::{Record, RecordId, Table};

/// Rows whose visible fields contain `query`, case-insensitively.
///
/// An empty or whitespace-only query matches every row. The id and the
/// `Position` column are not searched.
#[must_use]
pub fn filter<'a>(table: &'a Table, query: &str) -> Vec<&'a Record> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return table.iter().collect();
    }
    table
        .iter()
        .filter(|record| {
            record
                .fields()
                .any(|(_, value)| value.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Merge rows edited in a filtered view back into the full table.
///
/// Each view row replaces the full-table row with the same id, in place.
/// View rows with a blank or unknown id were added in the grid and are
/// appended. Rows missing from the view are kept: a view cannot delete.
#[must_use]
pub fn apply_view_edits(full: &Table, view_edits: &[Record]) -> Table {
    let mut merged = full.clone();
    let index: HashMap<RecordId, usize> = merged
        .iter()
        .enumerate()
        .map(|(i, record)| (record.id.clone(), i))
        .collect();

    for edited in view_edits {
        match index.get(&edited.id) {
            Some(&i) if !edited.id.is_blank() => merged.records_mut()[i] = edited.clone(),
            _ => merged.push(edited.clone()),
        }
    }
    merged
}

/// Resolve an id or id prefix to exactly one record.
///
/// An exact id match wins even when it is also a prefix of other ids.
///
/// # Errors
/// Returns [`InventoryError::UnknownRecord`] when nothing matches and
/// [`InventoryError::AmbiguousRecord`] when several records do.
pub fn find_by_prefix<'a>(table: &'a Table, prefix: &str) -> Result<&'a Record, InventoryError> {
    let prefix = prefix.trim();
    if prefix.is_empty() {
        return Err(InventoryError::UnknownRecord {
            prefix: prefix.to_owned(),
        });
    }
    if let Some(exact) = table.iter().find(|r| r.id.as_str() == prefix) {
        return Ok(exact);
    }

    let matches: Vec<&Record> = table
        .iter()
        .filter(|r| r.id.as_str().starts_with(prefix))
        .collect();
    match matches.as_slice() {
        [] => Err(InventoryError::UnknownRecord {
            prefix: prefix.to_owned(),
        }),
        [one] => Ok(one),
        many => Err(InventoryError::AmbiguousRecord {
            prefix: prefix.to_owned(),
            matches: many.iter().map(|r| r.id.clone()).collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Field;

    fn table() -> Table {
        vec![
            Record::new("aa11")
                .with(Field::Location, "Rek 1")
                .with(Field::Description, "Float 4mm"),
            Record::new("aa22")
                .with(Field::Location, "Rek 2")
                .with(Field::Description, "HR++ dubbel"),
            Record::new("bb33")
                .with(Field::Location, "Rek 3")
                .with(Field::Order, "PO-FLOAT"),
        ]
        .into()
    }

    fn ids(records: &[&Record]) -> Vec<String> {
        records.iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn empty_query_returns_everything() {
        let t = table();
        assert_eq!(filter(&t, "").len(), 3);
        assert_eq!(filter(&t, "   ").len(), 3);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let t = table();
        assert_eq!(ids(&filter(&t, "float")), ["aa11", "bb33"]);
        assert_eq!(ids(&filter(&t, "HR++")), ["aa22"]);
        assert!(filter(&t, "nothing").is_empty());
    }

    #[test]
    fn ids_are_not_searched() {
        let t = table();
        assert!(filter(&t, "bb33").is_empty());
    }

    #[test]
    fn view_edits_merge_by_id() {
        let full = table();
        let view = filter(&full, "rek 2");
        let mut edited: Vec<Record> = view.into_iter().cloned().collect();
        edited[0].set(Field::Quantity, "9");

        let merged = apply_view_edits(&full, &edited);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.records()[1].get(Field::Quantity), "9");
        assert_eq!(merged.records()[0], full.records()[0]);
        assert_eq!(merged.records()[2], full.records()[2]);
    }

    #[test]
    fn view_rows_without_known_id_are_appended() {
        let full = table();
        let added = [
            Record::new("").with(Field::Location, "Rek 9"),
            Record::new("zz99").with(Field::Location, "Rek 8"),
        ];
        let merged = apply_view_edits(&full, &added);
        assert_eq!(merged.len(), 5);
        assert_eq!(merged.records()[3].get(Field::Location), "Rek 9");
    }

    #[test]
    fn prefix_resolves_unique_record() {
        let t = table();
        assert_eq!(find_by_prefix(&t, "bb").unwrap().id.as_str(), "bb33");
        assert_eq!(find_by_prefix(&t, "aa22").unwrap().id.as_str(), "aa22");
    }

    #[test]
    fn ambiguous_prefix_lists_matches() {
        let t = table();
        let Err(InventoryError::AmbiguousRecord { matches, .. }) = find_by_prefix(&t, "aa") else {
            panic!("expected an ambiguous prefix");
        };
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn unknown_or_blank_prefix_is_an_error() {
        let t = table();
        assert!(matches!(
            find_by_prefix(&t, "cc"),
            Err(InventoryError::UnknownRecord { .. })
        ));
        assert!(matches!(
            find_by_prefix(&t, " "),
            Err(InventoryError::UnknownRecord { .. })
        ));
    }
}
