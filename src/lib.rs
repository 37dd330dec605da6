//! certledger: credential records on an ordered key-value ledger
//!
//! Re-exports the workspace crates for convenience:
//! - [`store`]: the ledger contract and its memory/redb backends
//! - [`contract`]: the operation dispatcher and record logic

pub use certledger_contract as contract;
pub use certledger_store as store;
