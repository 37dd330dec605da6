//! Ledger contract - the ordered key-value view the contract layer runs against
//!
//! A [`Ledger`] exposes point reads, point writes and half-open range scans.
//! Range scans hand back a [`Cursor`], which owns the backend's iteration
//! handle and releases it exactly once, whichever way the caller leaves.

use crate::error::StoreResult;

/// A single key/value pair delivered by a range scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub key: String,
    pub value: Vec<u8>,
}

impl LedgerEntry {
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Backend side of a range scan.
///
/// Implementations yield entries in ascending byte-lexicographic key order.
/// `release` frees whatever the backend holds open for the scan; it is called
/// at most once, by the owning [`Cursor`].
pub trait LedgerIterator {
    /// Advance to the next entry, `Ok(None)` once the range is exhausted
    fn next_entry(&mut self) -> StoreResult<Option<LedgerEntry>>;

    /// Free the underlying iteration resource
    fn release(&mut self);
}

/// Forward-only, single-pass cursor over a key range.
///
/// The backend handle is released when the range is exhausted, when a scan
/// error is yielded, on [`Cursor::close`], or on drop, whichever happens first.
pub struct Cursor<'a> {
    inner: Option<Box<dyn LedgerIterator + 'a>>,
}

impl<'a> Cursor<'a> {
    /// Wrap a backend iterator
    pub fn new(inner: Box<dyn LedgerIterator + 'a>) -> Self {
        Self { inner: Some(inner) }
    }

    /// A cursor over an empty range; holds nothing
    pub fn empty() -> Self {
        Self { inner: None }
    }

    /// Whether the backend handle has already been released
    pub fn is_released(&self) -> bool {
        self.inner.is_none()
    }

    /// Release the backend handle now instead of at drop
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(mut inner) = self.inner.take() {
            inner.release();
        }
    }
}

impl Iterator for Cursor<'_> {
    type Item = StoreResult<LedgerEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        let inner = self.inner.as_mut()?;
        match inner.next_entry() {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => {
                self.release();
                None
            }
            Err(err) => {
                self.release();
                Some(Err(err))
            }
        }
    }
}

impl Drop for Cursor<'_> {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("released", &self.is_released())
            .finish()
    }
}

/// Ordered key-value ledger.
///
/// Keys are opaque strings compared byte-wise. Writing an existing key
/// replaces its value outright. Isolation between concurrent writers is the
/// backend's business.
pub trait Ledger: Send + Sync {
    /// Read the value stored under `key`, `None` if it was never written
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value
    fn put(&self, key: &str, value: &[u8]) -> StoreResult<()>;

    /// Scan keys in `[low, high)`. An inverted or empty range yields an empty cursor.
    fn range_scan(&self, low: &str, high: &str) -> StoreResult<Cursor<'_>>;
}

impl<L: Ledger + ?Sized> Ledger for Box<L> {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        (**self).put(key, value)
    }

    fn range_scan(&self, low: &str, high: &str) -> StoreResult<Cursor<'_>> {
        (**self).range_scan(low, high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Scripted {
        entries: Vec<StoreResult<LedgerEntry>>,
        releases: Rc<Cell<usize>>,
    }

    impl LedgerIterator for Scripted {
        fn next_entry(&mut self) -> StoreResult<Option<LedgerEntry>> {
            if self.entries.is_empty() {
                return Ok(None);
            }
            self.entries.remove(0).map(Some)
        }

        fn release(&mut self) {
            self.releases.set(self.releases.get() + 1);
        }
    }

    fn scripted(entries: Vec<StoreResult<LedgerEntry>>) -> (Cursor<'static>, Rc<Cell<usize>>) {
        let releases = Rc::new(Cell::new(0));
        let cursor = Cursor::new(Box::new(Scripted {
            entries,
            releases: releases.clone(),
        }));
        (cursor, releases)
    }

    #[test]
    fn test_release_on_exhaustion() {
        let (mut cursor, releases) = scripted(vec![Ok(LedgerEntry::new("a", "1"))]);
        assert!(cursor.next().is_some());
        assert_eq!(releases.get(), 0);
        assert!(cursor.next().is_none());
        assert_eq!(releases.get(), 1);
        assert!(cursor.is_released());

        drop(cursor);
        assert_eq!(releases.get(), 1);
    }

    #[test]
    fn test_release_on_error() {
        let (mut cursor, releases) = scripted(vec![
            Err(StoreError::Scan("boom".into())),
            Ok(LedgerEntry::new("a", "1")),
        ]);
        assert!(matches!(cursor.next(), Some(Err(_))));
        assert_eq!(releases.get(), 1);
        // nothing is delivered after a failure
        assert!(cursor.next().is_none());
    }

    #[test]
    fn test_release_on_early_drop() {
        let (mut cursor, releases) = scripted(vec![
            Ok(LedgerEntry::new("a", "1")),
            Ok(LedgerEntry::new("b", "2")),
        ]);
        assert!(cursor.next().is_some());
        drop(cursor);
        assert_eq!(releases.get(), 1);
    }

    #[test]
    fn test_close_releases_once() {
        let (cursor, releases) = scripted(vec![Ok(LedgerEntry::new("a", "1"))]);
        cursor.close();
        assert_eq!(releases.get(), 1);
    }
}
