//! Core inventory types.
//!
//! Foundation types used throughout glasstock: the declared [`Field`] set,
//! record identifiers, [`Record`], and [`Table`].

use std::collections::BTreeSet;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// One declared inventory attribute.
///
/// The order of [`Field::ALL`] is the display and storage order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    /// Rack or shelf where the pane is stored.
    Location,
    /// Number of panes.
    Quantity,
    /// Width in millimetres.
    Width,
    /// Height in millimetres.
    Height,
    /// Free text: glass type, coating, remarks.
    Description,
    /// Cavity (spacer) gap of insulated units, in millimetres.
    CavityGap,
    /// Order or job reference the pane belongs to.
    Order,
}

impl Field {
    /// Every declared field, in display order.
    pub const ALL: [Self; 7] = [
        Self::Location,
        Self::Quantity,
        Self::Width,
        Self::Height,
        Self::Description,
        Self::CavityGap,
        Self::Order,
    ];

    /// Number of declared fields.
    pub const COUNT: usize = Self::ALL.len();

    /// Canonical header name, as written to storage.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Location => "Location",
            Self::Quantity => "Quantity",
            Self::Width => "Width",
            Self::Height => "Height",
            Self::Description => "Description",
            Self::CavityGap => "CavityGap",
            Self::Order => "Order",
        }
    }

    /// Fields whose values are canonicalized to integer strings.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Quantity | Self::CavityGap)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// RecordId
// ---------------------------------------------------------------------------

/// Opaque, immutable record identifier.
///
/// Ids read from storage are kept verbatim. A blank id marks a row that has
/// not been given an identity yet (legacy storage, or a row added in the
/// grid); [`ensure_ids`](crate::model::identity::ensure_ids) fills those in.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap an id string. Surrounding whitespace is dropped.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        let s = s.into();
        let trimmed = s.trim();
        if trimmed.len() == s.len() {
            Self(s)
        } else {
            Self(trimmed.to_owned())
        }
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` when no identity has been assigned.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One inventory line item.
///
/// Every declared [`Field`] is always present; an absent value is the empty
/// string. `position` carries the optional `Position` alias column, which is
/// preserved through load, import, and save but is not part of the visible
/// schema.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    /// Stable identity.
    pub id: RecordId,
    fields: [String; Field::COUNT],
    /// Value of the `Position` column, when the source had one.
    pub position: Option<String>,
}

impl Record {
    /// A record with the given id and every field empty.
    #[must_use]
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Builder-style setter.
    #[must_use]
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Value of `field`.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        &self.fields[field.index()]
    }

    /// Replace the value of `field`.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.fields[field.index()] = value.into();
    }

    /// Iterate `(field, value)` pairs in display order.
    pub fn fields(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL.into_iter().map(|f| (f, self.get(f)))
    }

    /// `true` when the visible content (every field and the position) equals
    /// `other`'s, regardless of id.
    #[must_use]
    pub fn same_content(&self, other: &Self) -> bool {
        self.fields == other.fields && self.position == other.position
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 1 + Field::COUNT + usize::from(self.position.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("id", &self.id)?;
        for (field, value) in self.fields() {
            map.serialize_entry(field.name(), value)?;
        }
        if let Some(position) = &self.position {
            map.serialize_entry("Position", position)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// An ordered snapshot of the whole inventory.
///
/// Order only matters for display. Identity, not position, defines a record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    /// An empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` when the table holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in table order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Mutable access to the records. Callers must not break id uniqueness.
    pub fn records_mut(&mut self) -> &mut [Record] {
        &mut self.records
    }

    /// Iterate records in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Find a record by id.
    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|r| &r.id == id)
    }

    /// Find a record by id, mutably.
    pub fn get_mut(&mut self, id: &RecordId) -> Option<&mut Record> {
        self.records.iter_mut().find(|r| &r.id == id)
    }

    /// Append a record.
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Append every record from `other`, keeping their order.
    pub fn extend(&mut self, other: impl IntoIterator<Item = Record>) {
        self.records.extend(other);
    }

    /// Keep only the records for which `keep` returns `true`.
    pub fn retain(&mut self, keep: impl FnMut(&Record) -> bool) {
        self.records.retain(keep);
    }

    /// The set of ids present in the table.
    #[must_use]
    pub fn ids(&self) -> BTreeSet<RecordId> {
        self.records.iter().map(|r| r.id.clone()).collect()
    }

    /// `true` if any record carries a `Position` value.
    #[must_use]
    pub fn has_position(&self) -> bool {
        self.records.iter().any(|r| r.position.is_some())
    }

    /// Consume the table, returning its records.
    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl From<Vec<Record>> for Table {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl FromIterator<Record> for Table {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Table {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
