//! Read-through cache in front of another store.
//!
//! Remote spreadsheet services are slow, so successful reads are kept per
//! worksheet. A write to a worksheet always drops its cached entry, so the
//! next read goes back to the inner store and reflects the write.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::trace;

use crate::error::SheetError;
use crate::sheet::Sheet;
use crate::store::SheetStore;

#[derive(Debug)]
struct Entry {
    fetched_at: Instant,
    sheet: Option<Sheet>,
}

/// A caching [`SheetStore`] wrapper.
#[derive(Debug)]
pub struct CachedStore<S> {
    inner: S,
    ttl: Option<Duration>,
    entries: Mutex<HashMap<String, Entry>>,
}

impl<S: SheetStore> CachedStore<S> {
    /// Wrap `inner`. With `ttl = None` entries stay valid until the next
    /// write to the same worksheet.
    pub fn new(inner: S, ttl: Option<Duration>) -> Self {
        Self {
            inner,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// The wrapped store.
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// Drop the cached entry for `worksheet`.
    pub fn invalidate(&self, worksheet: &str) {
        self.lock().remove(worksheet);
    }

    /// Drop every cached entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_fresh(&self, entry: &Entry) -> bool {
        self.ttl
            .is_none_or(|ttl| entry.fetched_at.elapsed() < ttl)
    }
}

impl<S: SheetStore> SheetStore for CachedStore<S> {
    fn read(&self, worksheet: &str) -> Result<Option<Sheet>, SheetError> {
        if let Some(entry) = self.lock().get(worksheet)
            && self.is_fresh(entry)
        {
            trace!(worksheet, "cache hit");
            return Ok(entry.sheet.clone());
        }

        let sheet = self.inner.read(worksheet)?;
        self.lock().insert(
            worksheet.to_owned(),
            Entry {
                fetched_at: Instant::now(),
                sheet: sheet.clone(),
            },
        );
        Ok(sheet)
    }

    fn read_fresh(&self, worksheet: &str) -> Result<Option<Sheet>, SheetError> {
        self.invalidate(worksheet);
        self.read(worksheet)
    }

    fn write(&self, worksheet: &str, sheet: &Sheet) -> Result<(), SheetError> {
        let result = self.inner.write(worksheet, sheet);
        // A failed write may still have reached the backend; refetch either way.
        self.invalidate(worksheet);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    fn one_row(id: &str) -> Sheet {
        Sheet::from_strs(&["id"], &[&[id]])
    }

    #[test]
    fn second_read_is_served_from_cache() {
        let cached = CachedStore::new(MemoryStore::with_sheet("Blad1", one_row("a")), None);
        cached.read("Blad1").unwrap();
        cached.read("Blad1").unwrap();
        assert_eq!(cached.inner().reads(), 1);
    }

    #[test]
    fn write_invalidates_cache() {
        let cached = CachedStore::new(MemoryStore::with_sheet("Blad1", one_row("a")), None);
        assert_eq!(cached.read("Blad1").unwrap(), Some(one_row("a")));
        cached.write("Blad1", &one_row("b")).unwrap();
        assert_eq!(cached.read("Blad1").unwrap(), Some(one_row("b")));
        assert_eq!(cached.inner().reads(), 2);
    }

    #[test]
    fn read_fresh_bypasses_cached_entry() {
        let cached = CachedStore::new(MemoryStore::with_sheet("Blad1", one_row("a")), None);
        cached.read("Blad1").unwrap();
        // Another writer changes the backend behind the cache.
        cached.inner().write("Blad1", &one_row("b")).unwrap();
        assert_eq!(cached.read("Blad1").unwrap(), Some(one_row("a")));

        assert_eq!(cached.read_fresh("Blad1").unwrap(), Some(one_row("b")));
        assert_eq!(cached.read("Blad1").unwrap(), Some(one_row("b")));
        assert_eq!(cached.inner().reads(), 2);
    }

    #[test]
    fn failed_write_still_invalidates() {
        let cached = CachedStore::new(MemoryStore::with_sheet("Blad1", one_row("a")), None);
        cached.read("Blad1").unwrap();
        cached.inner().set_fail_writes(true);
        assert!(cached.write("Blad1", &one_row("b")).is_err());
        assert_eq!(cached.read("Blad1").unwrap(), Some(one_row("a")));
        assert_eq!(cached.inner().reads(), 2);
    }

    #[test]
    fn zero_ttl_always_refetches() {
        let cached = CachedStore::new(
            MemoryStore::with_sheet("Blad1", one_row("a")),
            Some(Duration::ZERO),
        );
        cached.read("Blad1").unwrap();
        cached.read("Blad1").unwrap();
        assert_eq!(cached.inner().reads(), 2);
    }

    #[test]
    fn read_errors_are_not_cached() {
        let cached = CachedStore::new(MemoryStore::with_sheet("Blad1", one_row("a")), None);
        cached.inner().set_fail_reads(true);
        assert!(cached.read("Blad1").is_err());
        cached.inner().set_fail_reads(false);
        assert_eq!(cached.read("Blad1").unwrap(), Some(one_row("a")));
    }

    #[test]
    fn worksheets_are_cached_independently() {
        let cached = CachedStore::new(MemoryStore::with_sheet("Blad1", one_row("a")), None);
        cached.read("Blad1").unwrap();
        cached.write("Blad2", &one_row("z")).unwrap();
        cached.read("Blad1").unwrap();
        assert_eq!(cached.inner().reads(), 1);
    }
}
