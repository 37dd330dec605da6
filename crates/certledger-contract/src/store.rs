//! Record store - typed access to credential records on a ledger

use certledger_store::{Cursor, Ledger};

use crate::error::ContractResult;
use crate::record::Record;

/// Thin wrapper over a [`Ledger`] that speaks in records
#[derive(Clone, Copy)]
pub struct RecordStore<'l> {
    ledger: &'l dyn Ledger,
}

impl<'l> RecordStore<'l> {
    pub fn new(ledger: &'l dyn Ledger) -> Self {
        Self { ledger }
    }

    /// Raw bytes stored under `key`; `None` when the key was never written
    pub fn get(&self, key: &str) -> ContractResult<Option<Vec<u8>>> {
        Ok(self.ledger.get(key)?)
    }

    pub fn put(&self, key: &str, bytes: &[u8]) -> ContractResult<()> {
        Ok(self.ledger.put(key, bytes)?)
    }

    /// Serialize and store a full record, replacing whatever was there
    pub fn put_record(&self, key: &str, record: &Record) -> ContractResult<()> {
        let bytes = record.to_json()?;
        self.put(key, &bytes)
    }

    /// Cursor over `[low, high)` in ascending key order
    pub fn range_scan(&self, low: &str, high: &str) -> ContractResult<Cursor<'l>> {
        Ok(self.ledger.range_scan(low, high)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use certledger_store::MemoryLedger;

    #[test]
    fn test_put_record_round_trip() {
        let ledger = MemoryLedger::new();
        let store = RecordStore::new(&ledger);
        let record = Record::new("500684626", "Year0", "Degree0", "Institution0");

        store.put_record("PERSON0", &record).unwrap();
        let bytes = store.get("PERSON0").unwrap().unwrap();
        assert_eq!(serde_json::from_slice::<Record>(&bytes).unwrap(), record);
    }

    #[test]
    fn test_absent_key() {
        let ledger = MemoryLedger::new();
        assert_eq!(RecordStore::new(&ledger).get("nope").unwrap(), None);
    }
}
