//! Plain-text grid rendering.
//!
//! Renders records as an aligned table of the visible fields. The full id is
//! hidden; each row instead starts with a short handle (the first
//! [`HANDLE_LEN`] characters of the id) which the CLI accepts as an id prefix.
//!
//! Cell edits come back as `Field=value` text and are parsed by
//! [`parse_edit`].

use std::fmt::Write as _;

use crate::error::InventoryError;
use crate::model::codec::{Column, match_header};
use crate::model::{Field, Record};

/// Length of the row handle shown in the first column.
pub const HANDLE_LEN: usize = 8;

const HANDLE_HEADER: &str = "#";
const GAP: &str = "  ";

/// The short handle for `record`.
#[must_use]
pub fn short_id(record: &Record) -> &str {
    let id = record.id.as_str();
    id.char_indices()
        .nth(HANDLE_LEN)
        .map_or(id, |(end, _)| &id[..end])
}

/// Render `records` as an aligned text grid with a header line.
///
/// Returns `"(no records)\n"` for an empty slice.
#[must_use]
pub fn render(records: &[&Record]) -> String {
    if records.is_empty() {
        return "(no records)\n".to_owned();
    }

    let mut widths = [0usize; Field::COUNT + 1];
    widths[0] = HANDLE_HEADER.len();
    for (i, field) in Field::ALL.iter().enumerate() {
        widths[i + 1] = field.name().chars().count();
    }
    for record in records {
        widths[0] = widths[0].max(short_id(record).chars().count());
        for (i, (_, value)) in record.fields().enumerate() {
            widths[i + 1] = widths[i + 1].max(value.chars().count());
        }
    }

    let mut out = String::new();
    let header = std::iter::once(HANDLE_HEADER).chain(Field::ALL.iter().map(|f| f.name()));
    push_line(&mut out, header, &widths);
    for record in records {
        let cells = std::iter::once(short_id(record)).chain(record.fields().map(|(_, v)| v));
        push_line(&mut out, cells, &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.zip(widths).enumerate() {
        if i > 0 {
            line.push_str(GAP);
        }
        let _ = write!(line, "{cell:<width$}");
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

// ---------------------------------------------------------------------------
// Edits
// ---------------------------------------------------------------------------

/// One cell edit captured from the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellEdit {
    /// Set a declared field.
    Field(Field, String),
    /// Set the `Position` column.
    Position(String),
}

impl CellEdit {
    /// Apply the edit to `record`. Values are stored as typed; the engine
    /// normalizes them before saving.
    pub fn apply(&self, record: &mut Record) {
        match self {
            Self::Field(field, value) => record.set(*field, value.clone()),
            Self::Position(value) => record.position = Some(value.clone()),
        }
    }
}

/// Parse `Field=value`. The field name is matched like a worksheet header,
/// so `quantity=4`, `Aantal=4` and `Quantity = 4` all work. The value may
/// be empty and may itself contain `=`.
///
/// # Errors
/// Returns [`InventoryError::InvalidEdit`] when there is no `=`, the field
/// is unknown, or the edit targets the id.
pub fn parse_edit(input: &str) -> Result<CellEdit, InventoryError> {
    let invalid = |reason: &str| InventoryError::InvalidEdit {
        input: input.to_owned(),
        reason: reason.to_owned(),
    };
    let Some((name, value)) = input.split_once('=') else {
        return Err(invalid("expected Field=value"));
    };
    let value = value.trim().to_owned();
    match match_header(name) {
        Some(Column::Field(field)) => Ok(CellEdit::Field(field, value)),
        Some(Column::Position) => Ok(CellEdit::Position(value)),
        Some(Column::Id) => Err(invalid("record ids cannot be changed")),
        None => Err(invalid(&format!(
            "unknown field '{}'; known fields: {}",
            name.trim(),
            Field::ALL.map(Field::name).join(", ")
        ))),
    }
}
