//! The raw worksheet value exchanged with a store.

/// A 2-D text table: one header row plus data rows.
///
/// Rows are not required to have the same width as the header. Readers treat
/// missing trailing cells as empty and ignore cells beyond the header.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sheet {
    /// Column names, in storage order.
    pub header: Vec<String>,
    /// Data rows, in storage order.
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Create a sheet from a header and rows.
    #[must_use]
    pub const fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    /// Build a sheet from string slices. Mostly useful in tests and fixtures.
    #[must_use]
    pub fn from_strs(header: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            header: header.iter().map(|s| (*s).to_owned()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|s| (*s).to_owned()).collect())
                .collect(),
        }
    }

    /// `true` when the sheet has neither a header nor any rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.rows.is_empty()
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Position of the column named `name`, compared exactly.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// Cell at `(row, col)`; `None` when the row is shorter than `col`.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }
}
