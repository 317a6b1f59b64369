//! In-process worksheet store.
//!
//! Holds worksheets in a map. Used as the `memory` backend and as the test
//! double for the engine: it counts reads and writes and can be told to fail
//! either one.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::SheetError;
use crate::sheet::Sheet;
use crate::store::SheetStore;

/// A [`SheetStore`] backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sheets: Mutex<HashMap<String, Sheet>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding one worksheet.
    #[must_use]
    pub fn with_sheet(worksheet: &str, sheet: Sheet) -> Self {
        let store = Self::new();
        store.lock().insert(worksheet.to_owned(), sheet);
        store
    }

    /// Number of `read` calls so far (including failed ones).
    #[must_use]
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of successful `write` calls so far.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make subsequent reads fail with [`SheetError::Unavailable`].
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent writes fail with [`SheetError::Unavailable`].
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of a worksheet without counting it as a read.
    #[must_use]
    pub fn peek(&self, worksheet: &str) -> Option<Sheet> {
        self.lock().get(worksheet).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Sheet>> {
        self.sheets.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SheetStore for MemoryStore {
    fn read(&self, worksheet: &str) -> Result<Option<Sheet>, SheetError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(SheetError::Unavailable {
                worksheet: worksheet.to_owned(),
                message: "read failure injected".to_owned(),
            });
        }
        Ok(self
            .lock()
            .get(worksheet)
            .filter(|sheet| !sheet.is_empty())
            .cloned())
    }

    fn write(&self, worksheet: &str, sheet: &Sheet) -> Result<(), SheetError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(SheetError::Unavailable {
                worksheet: worksheet.to_owned(),
                message: "write failure injected".to_owned(),
            });
        }
        self.lock().insert(worksheet.to_owned(), sheet.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
