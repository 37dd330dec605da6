//! certledger-store: Ordered Key-Value Ledger
//!
//! This crate defines the ledger collaborator the credential contract runs
//! against, plus two backends:
//! - `MemoryLedger`: BTreeMap-backed, for tests and one-shot invocations
//! - `RedbLedger`: durable, on an embedded redb database
//!
//! Keys are strings ordered byte-lexicographically. Range scans are half-open
//! and return a [`Cursor`] that releases its backend handle on every exit path.

mod config;
mod error;
mod ledger;
mod memory;
mod redb_ledger;

pub use config::{open_ledger, LedgerConfig};
pub use error::{StoreError, StoreResult};
pub use ledger::{Cursor, Ledger, LedgerEntry, LedgerIterator};
pub use memory::MemoryLedger;
pub use redb_ledger::RedbLedger;
