//! Configuration for choosing a ledger backend.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::StoreResult;
use crate::ledger::Ledger;
use crate::memory::MemoryLedger;
use crate::redb_ledger::RedbLedger;

/// Backend selection for [`open_ledger`].
///
/// Deserializes from JSON such as `{"type": "redb", "path": "ledger.redb"}`
/// or `{"type": "in_memory"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerConfig {
    /// Volatile ledger, discarded when the process exits
    #[default]
    InMemory,

    /// Durable ledger stored in a redb file
    Redb { path: PathBuf },
}

/// Creates a ledger from configuration.
pub fn open_ledger(config: &LedgerConfig) -> StoreResult<Box<dyn Ledger>> {
    match config {
        LedgerConfig::InMemory => Ok(Box::new(MemoryLedger::new())),
        LedgerConfig::Redb { path } => Ok(Box::new(RedbLedger::open(path)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_in_memory() {
        assert_eq!(LedgerConfig::default(), LedgerConfig::InMemory);
    }

    #[test]
    fn test_deserialize_redb() {
        let config: LedgerConfig =
            serde_json::from_str(r#"{"type": "redb", "path": "/tmp/ledger.redb"}"#).unwrap();
        assert_eq!(
            config,
            LedgerConfig::Redb {
                path: PathBuf::from("/tmp/ledger.redb")
            }
        );
    }

    #[test]
    fn test_deserialize_in_memory() {
        let config: LedgerConfig = serde_json::from_str(r#"{"type": "in_memory"}"#).unwrap();
        assert_eq!(config, LedgerConfig::InMemory);
    }

    #[test]
    fn test_open_in_memory() {
        let ledger = open_ledger(&LedgerConfig::InMemory).unwrap();
        ledger.put("k", b"v").unwrap();
        assert_eq!(ledger.get("k").unwrap(), Some(b"v".to_vec()));
    }
}
