//! Seed data loader and key conventions for the credential ledger

use tracing::debug;

use crate::error::ContractResult;
use crate::record::Record;
use crate::store::RecordStore;

/// Prefix of every seeded key
pub const KEY_PREFIX: &str = "PERSON";

/// Number of seeded records
pub const SEED_COUNT: usize = 10;

/// Inclusive low bound of the range read by `queryAll`
pub const SCAN_LOW: &str = "PERSON0";

/// Exclusive high bound of the range read by `queryAll`.
///
/// Keys are compared as strings, so this only covers indices whose decimal
/// form sorts below "999"; `PERSON10` sorts before `PERSON2`.
pub const SCAN_HIGH: &str = "PERSON999";

const SEED_DATA: [(&str, &str, &str, &str); SEED_COUNT] = [
    ("500684626", "Year0", "Degree0", "Institution0"),
    ("500684627", "Year1", "Degree1", "Institution1"),
    ("500684628", "Year2", "Degree2", "Institution2"),
    ("500684629", "Year3", "Degree3", "Institution3"),
    ("500684610", "Year4", "Degree4", "Institution4"),
    ("500684611", "Year5", "Degree5", "Institution5"),
    ("500684612", "Year6", "Degree6", "Institution6"),
    ("500684613", "Year7", "Degree7", "Institution7"),
    ("500684614", "Year8", "Degree8", "Institution8"),
    ("500684615", "Year9", "Degree9", "Institution9"),
];

/// Ledger key for the seed record at `index`, e.g. `PERSON7`
pub fn seed_key(index: usize) -> String {
    format!("{}{}", KEY_PREFIX, index)
}

/// The fixed seed records, in key index order
pub fn seed_records() -> Vec<Record> {
    SEED_DATA
        .iter()
        .map(|&(subject, period, level, institution)| {
            Record::new(subject, period, level, institution)
        })
        .collect()
}

/// Write every seed record, overwriting whatever is stored under the seed keys
pub fn load(store: &RecordStore<'_>) -> ContractResult<()> {
    for (index, record) in seed_records().iter().enumerate() {
        let key = seed_key(index);
        store.put_record(&key, record)?;
        debug!(key = %key, subject = %record.subject_id, "seeded record");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use certledger_store::MemoryLedger;

    #[test]
    fn test_seed_keys() {
        assert_eq!(seed_key(0), "PERSON0");
        assert_eq!(seed_key(9), "PERSON9");
        for index in 0..SEED_COUNT {
            let key = seed_key(index);
            assert!(key.as_str() >= SCAN_LOW && key.as_str() < SCAN_HIGH);
        }
    }

    #[test]
    fn test_load_is_repeatable() {
        let ledger = MemoryLedger::new();
        let store = RecordStore::new(&ledger);

        load(&store).unwrap();
        let first = store.get("PERSON4").unwrap();
        load(&store).unwrap();

        assert_eq!(ledger.len().unwrap(), SEED_COUNT);
        assert_eq!(store.get("PERSON4").unwrap(), first);
    }

    #[test]
    fn test_seed_values() {
        let records = seed_records();
        assert_eq!(records.len(), SEED_COUNT);
        let expected = Record::new("500684610", "Year4", "Degree4", "Institution4");
        assert_eq!(records[4], expected);
    }
}
