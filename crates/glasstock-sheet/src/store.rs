//! The [`SheetStore`] trait: the storage boundary of glasstock.
//!
//! The engine never sees files, HTTP, or spreadsheet APIs. It reads a whole
//! worksheet, works on it in memory, and writes the whole worksheet back.

use crate::error::SheetError;
use crate::sheet::Sheet;

/// Whole-worksheet storage.
///
/// Implementations may be backed by a directory of CSV files, an in-memory
/// map, a remote spreadsheet service, or a caching wrapper around any of
/// those.
///
/// # Object safety
///
/// The trait is object-safe; callers may use `&dyn SheetStore`.
///
/// # Key Invariants
///
/// - **Full overwrite**: [`write`](Self::write) replaces the entire worksheet.
///   Rows absent from the written sheet are gone afterwards.
/// - **All-or-nothing**: a failed write leaves the previously stored
///   worksheet untouched.
/// - **Read-your-writes**: after a successful write, the next read of the
///   same worksheet returns the written sheet.
pub trait SheetStore {
    /// Read a whole worksheet.
    ///
    /// Returns `Ok(None)` when the worksheet does not exist or holds nothing.
    ///
    /// # Errors
    /// Returns [`SheetError`] when the backend cannot be read.
    fn read(&self, worksheet: &str) -> Result<Option<Sheet>, SheetError>;

    /// Read a whole worksheet from its source of truth, skipping any cache.
    ///
    /// Callers that write the result back use this so they never build on a
    /// stale copy. Stores without a cache read normally.
    ///
    /// # Errors
    /// Returns [`SheetError`] when the backend cannot be read.
    fn read_fresh(&self, worksheet: &str) -> Result<Option<Sheet>, SheetError> {
        self.read(worksheet)
    }

    /// Replace a whole worksheet.
    ///
    /// # Errors
    /// Returns [`SheetError`] when the write did not take effect.
    fn write(&self, worksheet: &str, sheet: &Sheet) -> Result<(), SheetError>;
}

impl<S: SheetStore + ?Sized> SheetStore for &S {
    fn read(&self, worksheet: &str) -> Result<Option<Sheet>, SheetError> {
        (**self).read(worksheet)
    }

    fn read_fresh(&self, worksheet: &str) -> Result<Option<Sheet>, SheetError> {
        (**self).read_fresh(worksheet)
    }

    fn write(&self, worksheet: &str, sheet: &Sheet) -> Result<(), SheetError> {
        (**self).write(worksheet, sheet)
    }
}

impl<S: SheetStore + ?Sized> SheetStore for Box<S> {
    fn read(&self, worksheet: &str) -> Result<Option<Sheet>, SheetError> {
        (**self).read(worksheet)
    }

    fn read_fresh(&self, worksheet: &str) -> Result<Option<Sheet>, SheetError> {
        (**self).read_fresh(worksheet)
    }

    fn write(&self, worksheet: &str, sheet: &Sheet) -> Result<(), SheetError> {
        (**self).write(worksheet, sheet)
    }
}
