//! Field Mutation - read-modify-write of a single record field

use tracing::{debug, warn};

use crate::error::ContractResult;
use crate::record::{FieldSelector, Record};
use crate::store::RecordStore;

/// Applies single-field changes to stored records.
///
/// The whole record is re-read, one field replaced, and the whole record
/// written back. Isolation from concurrent writers to the same key is left
/// to the ledger.
pub struct FieldMutator {}

impl FieldMutator {
    pub fn new() -> Self {
        Self {}
    }

    /// Set `field` of the record under `key` to `value` and persist it.
    ///
    /// A key that was never written, or holds something that is not a record,
    /// is treated as a blank record. The new record is returned.
    pub fn mutate<F: FieldSelector>(
        &self,
        store: &RecordStore<'_>,
        key: &str,
        field: &F,
        value: impl Into<String>,
    ) -> ContractResult<Record> {
        let current = store.get(key)?;
        let (mut record, blank) = Record::decode_lenient(current.as_deref());
        if blank {
            // Can mask a lost or corrupted record.
            warn!(
                key,
                field = field.name(),
                present = current.is_some(),
                "no readable record, mutating a blank one"
            );
        }

        let previous = field.get(&record);
        debug!(key, field = field.name(), previous, "replacing field");
        field.set(&mut record, value.into());
        store.put_record(key, &record)?;
        Ok(record)
    }
}

impl Default for FieldMutator {
    fn default() -> Self {
        Self::new()
    }
}
