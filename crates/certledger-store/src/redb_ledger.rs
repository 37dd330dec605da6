//! Durable ledger backed by [redb](https://docs.rs/redb).
//!
//! All values live in a single `records` table keyed by `&str` with raw
//! `&[u8]` values, so the byte ordering of keys is redb's native ordering.
//! Every put runs in its own write transaction and is committed before the
//! call returns.

use std::path::Path;

use redb::backends::InMemoryBackend;
use redb::{Database, ReadOnlyTable, ReadTransaction, TableDefinition, TableError};

use crate::error::{StoreError, StoreResult};
use crate::ledger::{Cursor, Ledger, LedgerEntry, LedgerIterator};

/// Records keyed by their ledger key.
const RECORDS: TableDefinition<&str, &[u8]> = TableDefinition::new("records");

type RecordsTable = ReadOnlyTable<&'static str, &'static [u8]>;

/// [`Ledger`] over an embedded redb database
pub struct RedbLedger {
    db: Database,
}

impl RedbLedger {
    /// Open the database file at `path`, creating it if needed
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "opening redb ledger");
        let db = Database::create(path)?;
        Ok(Self { db })
    }

    /// A redb database that lives only in memory
    pub fn in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(InMemoryBackend::new())?;
        Ok(Self { db })
    }

    /// Open the records table for reading, `None` if nothing was ever written
    fn read_table(&self) -> StoreResult<Option<(ReadTransaction, RecordsTable)>> {
        let txn = self.db.begin_read()?;
        match txn.open_table(RECORDS) {
            Ok(table) => Ok(Some((txn, table))),
            Err(TableError::TableDoesNotExist(_)) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

impl Ledger for RedbLedger {
    #[tracing::instrument(level = "trace", skip_all)]
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let Some((_txn, table)) = self.read_table()? else {
            return Ok(None);
        };
        let value = table.get(key)?.map(|guard| guard.value().to_vec());
        Ok(value)
    }

    #[tracing::instrument(level = "trace", skip_all)]
    fn put(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(RECORDS)?;
            table.insert(key, value)?;
        }
        txn.commit()?;
        Ok(())
    }

    #[tracing::instrument(level = "trace", skip_all)]
    fn range_scan(&self, low: &str, high: &str) -> StoreResult<Cursor<'_>> {
        if low >= high {
            return Ok(Cursor::empty());
        }
        let Some((txn, table)) = self.read_table()? else {
            return Ok(Cursor::empty());
        };
        let range = table.range(low..high)?;

        Ok(Cursor::new(Box::new(RedbIterator {
            scan: Some(OpenScan {
                range,
                _table: table,
                _txn: txn,
            }),
        })))
    }
}

/// Resources held for the lifetime of one scan. Fields drop in declaration
/// order, so the range goes before the table and the read transaction.
struct OpenScan {
    range: redb::Range<'static, &'static str, &'static [u8]>,
    _table: RecordsTable,
    _txn: ReadTransaction,
}

struct RedbIterator {
    scan: Option<OpenScan>,
}

impl LedgerIterator for RedbIterator {
    fn next_entry(&mut self) -> StoreResult<Option<LedgerEntry>> {
        let Some(scan) = self.scan.as_mut() else {
            return Ok(None);
        };
        match scan.range.next() {
            None => Ok(None),
            Some(Ok((key, value))) => {
                let entry = LedgerEntry::new(key.value(), value.value());
                Ok(Some(entry))
            }
            Some(Err(err)) => Err(StoreError::Scan(err.to_string())),
        }
    }

    fn release(&mut self) {
        self.scan = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_before_first_write() {
        let ledger = RedbLedger::in_memory().unwrap();
        assert_eq!(ledger.get("PERSON0").unwrap(), None);
        assert_eq!(ledger.range_scan("PERSON0", "PERSON999").unwrap().count(), 0);
    }

    #[test]
    fn test_put_get_replace() {
        let ledger = RedbLedger::in_memory().unwrap();
        ledger.put("k", b"{\"a\":1}").unwrap();
        ledger.put("k", b"{\"a\":2}").unwrap();
        assert_eq!(ledger.get("k").unwrap(), Some(b"{\"a\":2}".to_vec()));
    }

    #[test]
    fn test_range_order() {
        let ledger = RedbLedger::in_memory().unwrap();
        for key in ["PERSON2", "PERSON10", "PERSON1", "PERSON999"] {
            ledger.put(key, b"{}").unwrap();
        }
        let keys: Vec<String> = ledger
            .range_scan("PERSON0", "PERSON999")
            .unwrap()
            .map(|entry| entry.unwrap().key)
            .collect();
        assert_eq!(keys, vec!["PERSON1", "PERSON10", "PERSON2"]);
    }

    #[test]
    fn test_write_after_scan_released() {
        let ledger = RedbLedger::in_memory().unwrap();
        ledger.put("a", b"1").unwrap();

        let mut cursor = ledger.range_scan("a", "z").unwrap();
        assert!(cursor.next().is_some());
        cursor.close();

        ledger.put("b", b"2").unwrap();
        assert_eq!(ledger.range_scan("a", "z").unwrap().count(), 2);
    }
}
