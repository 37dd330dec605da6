//! In-memory ledger backend over a BTreeMap

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::error::{StoreError, StoreResult};
use crate::ledger::{Cursor, Ledger, LedgerEntry, LedgerIterator};

/// In-memory implementation of [`Ledger`] using a BTreeMap.
///
/// Useful for tests and for one-shot invocations where durability is not
/// required. Range scans iterate over a snapshot taken when the scan starts,
/// so later writes are not observed by an open cursor.
pub struct MemoryLedger {
    data: RwLock<BTreeMap<String, Vec<u8>>>,
    open_cursors: Arc<AtomicUsize>,
}

impl MemoryLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self {
            data: RwLock::new(BTreeMap::new()),
            open_cursors: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of cursors handed out and not yet released.
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.load(Ordering::SeqCst)
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> StoreResult<usize> {
        let data = self
            .data
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(data.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger for MemoryLedger {
    #[tracing::instrument(level = "trace", skip_all)]
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let data = self
            .data
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(data.get(key).cloned())
    }

    #[tracing::instrument(level = "trace", skip_all)]
    fn put(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        data.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    #[tracing::instrument(level = "trace", skip_all)]
    fn range_scan(&self, low: &str, high: &str) -> StoreResult<Cursor<'_>> {
        if low >= high {
            return Ok(Cursor::empty());
        }

        let data = self
            .data
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;

        let entries: Vec<LedgerEntry> = data
            .range::<str, _>((Bound::Included(low), Bound::Excluded(high)))
            .map(|(k, v)| LedgerEntry::new(k.clone(), v.clone()))
            .collect();

        self.open_cursors.fetch_add(1, Ordering::SeqCst);
        Ok(Cursor::new(Box::new(MemoryIterator {
            entries: entries.into_iter(),
            open_cursors: self.open_cursors.clone(),
        })))
    }
}

struct MemoryIterator {
    entries: std::vec::IntoIter<LedgerEntry>,
    open_cursors: Arc<AtomicUsize>,
}

impl LedgerIterator for MemoryIterator {
    fn next_entry(&mut self) -> StoreResult<Option<LedgerEntry>> {
        Ok(self.entries.next())
    }

    fn release(&mut self) {
        self.open_cursors.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(cursor: Cursor<'_>) -> Vec<String> {
        cursor.map(|entry| entry.unwrap().key).collect()
    }

    #[test]
    fn test_get_absent_is_none() {
        let ledger = MemoryLedger::new();
        assert_eq!(ledger.get("missing").unwrap(), None);
    }

    #[test]
    fn test_put_replaces() {
        let ledger = MemoryLedger::new();
        ledger.put("k", b"one").unwrap();
        ledger.put("k", b"two").unwrap();
        assert_eq!(ledger.get("k").unwrap(), Some(b"two".to_vec()));
        assert_eq!(ledger.len().unwrap(), 1);
    }

    #[test]
    fn test_range_is_lexicographic_and_half_open() {
        let ledger = MemoryLedger::new();
        for key in ["P2", "P10", "P1", "P999", "Q0"] {
            ledger.put(key, b"{}").unwrap();
        }

        let scanned = keys(ledger.range_scan("P0", "P999").unwrap());
        assert_eq!(scanned, vec!["P1", "P10", "P2"]);
        assert_eq!(ledger.open_cursors(), 0);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let ledger = MemoryLedger::new();
        ledger.put("b", b"{}").unwrap();
        assert!(keys(ledger.range_scan("c", "a").unwrap()).is_empty());
        assert!(keys(ledger.range_scan("b", "b").unwrap()).is_empty());
    }

    #[test]
    fn test_cursor_accounting() {
        let ledger = MemoryLedger::new();
        ledger.put("a", b"1").unwrap();
        ledger.put("b", b"2").unwrap();

        let mut cursor = ledger.range_scan("a", "z").unwrap();
        assert_eq!(ledger.open_cursors(), 1);
        assert!(cursor.next().is_some());
        drop(cursor);
        assert_eq!(ledger.open_cursors(), 0);
    }

    #[test]
    fn test_cursor_reads_snapshot() {
        let ledger = MemoryLedger::new();
        ledger.put("a", b"1").unwrap();

        let cursor = ledger.range_scan("a", "z").unwrap();
        ledger.put("b", b"2").unwrap();
        assert_eq!(keys(cursor), vec!["a"]);
    }

    #[test]
    fn test_poisoned_lock_is_an_error() {
        let ledger = Arc::new(MemoryLedger::new());
        ledger.put("a", b"1").unwrap();

        let poisoner = ledger.clone();
        let joined = std::thread::spawn(move || {
            let _guard = poisoner.data.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();
        assert!(joined.is_err());

        assert!(matches!(ledger.len(), Err(StoreError::LockPoisoned(_))));
        assert!(matches!(ledger.is_empty(), Err(StoreError::LockPoisoned(_))));
        assert!(matches!(ledger.get("a"), Err(StoreError::LockPoisoned(_))));
    }
}
