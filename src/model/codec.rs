//! Conversion between [`Table`] and the raw [`Sheet`] form.
//!
//! This is the only place where records become rows of text and back.
//! Decoding is lenient: headers are matched case-insensitively (ignoring
//! spaces, `_` and `-`), the shop's Dutch column names are accepted as
//! aliases, unknown columns are dropped, and missing fields become empty.
//! Decoding does not assign ids or normalize values; the reconciler does that.

use glasstock_sheet::Sheet;
use tracing::debug;

use super::normalize::normalize_text;
use super::types::{Field, Record, RecordId, Table};

/// Header of the identity column.
pub const ID_COLUMN: &str = "id";

/// Header of the optional position alias column.
pub const POSITION_COLUMN: &str = "Position";

/// What a worksheet column maps onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    /// The identity column.
    Id,
    /// A declared field.
    Field(Field),
    /// The `Position` alias column.
    Position,
}

/// Reduce a header to its comparison key: trimmed, lowercased, without
/// spaces, underscores, or hyphens.
fn header_key(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Map a raw header onto a [`Column`], or `None` if it is not recognized.
#[must_use]
pub fn match_header(raw: &str) -> Option<Column> {
    let column = match header_key(raw).as_str() {
        "id" => Column::Id,
        "location" | "locatie" => Column::Field(Field::Location),
        "quantity" | "aantal" => Column::Field(Field::Quantity),
        "width" | "breedte" => Column::Field(Field::Width),
        "height" | "hoogte" => Column::Field(Field::Height),
        "description" | "omschrijving" => Column::Field(Field::Description),
        "cavitygap" | "spouw" => Column::Field(Field::CavityGap),
        "order" | "bestelling" => Column::Field(Field::Order),
        "position" | "positie" => Column::Position,
        _ => return None,
    };
    Some(column)
}

/// Resolve the column layout of a sheet: for each header cell, the column it
/// feeds, if any. When two headers map onto the same target, the leftmost
/// one wins.
fn layout(header: &[String]) -> Vec<Option<Column>> {
    let mut taken: Vec<Column> = Vec::new();
    header
        .iter()
        .map(|raw| {
            let column = match_header(raw)?;
            if taken.contains(&column) {
                debug!(header = raw.as_str(), "duplicate column ignored");
                return None;
            }
            taken.push(column);
            Some(column)
        })
        .collect()
}

/// Result of decoding a sheet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Decoded {
    /// Records in sheet order. Ids are blank when the sheet had no id column
    /// or the cell was empty.
    pub table: Table,
    /// Whether the sheet carried an identity column at all.
    pub had_id_column: bool,
    /// Headers that matched nothing and were dropped.
    pub dropped_columns: Vec<String>,
}

/// Decode a sheet into records.
#[must_use]
pub fn decode(sheet: &Sheet) -> Decoded {
    let columns = layout(&sheet.header);
    let had_id_column = columns.contains(&Some(Column::Id));
    let has_position = columns.contains(&Some(Column::Position));
    let dropped_columns: Vec<String> = sheet
        .header
        .iter()
        .zip(&columns)
        .filter(|(h, c)| c.is_none() && !h.trim().is_empty())
        .map(|(h, _)| h.clone())
        .collect();
    if !dropped_columns.is_empty() {
        debug!(?dropped_columns, "unrecognized columns dropped");
    }

    let table = sheet
        .rows
        .iter()
        .map(|row| {
            let mut record = Record::default();
            if has_position {
                record.position = Some(String::new());
            }
            for (cell, column) in row.iter().zip(&columns) {
                match column {
                    Some(Column::Id) => record.id = RecordId::new(cell.as_str()),
                    Some(Column::Field(field)) => record.set(*field, cell.as_str()),
                    Some(Column::Position) => {
                        record.position = Some(normalize_text(Some(cell.as_str())));
                    }
                    None => {}
                }
            }
            record
        })
        .collect();

    Decoded {
        table,
        had_id_column,
        dropped_columns,
    }
}

/// Header written for `table`: id, every declared field, then `Position`
/// when any record carries one.
#[must_use]
pub fn header_for(table: &Table) -> Vec<String> {
    let mut header = Vec::with_capacity(Field::COUNT + 2);
    header.push(ID_COLUMN.to_owned());
    header.extend(Field::ALL.iter().map(|f| f.name().to_owned()));
    if table.has_position() {
        header.push(POSITION_COLUMN.to_owned());
    }
    header
}

/// Encode a table as a sheet, identity column first.
#[must_use]
pub fn encode(table: &Table) -> Sheet {
    let with_position = table.has_position();
    let rows = table
        .iter()
        .map(|record| {
            let mut row = Vec::with_capacity(Field::COUNT + 2);
            row.push(record.id.as_str().to_owned());
            row.extend(record.fields().map(|(_, v)| v.to_owned()));
            if with_position {
                row.push(record.position.clone().unwrap_or_default());
            }
            row
        })
        .collect();
    Sheet::new(header_for(table), rows)
}
