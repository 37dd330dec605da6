//! certledger-contract: Credential Record Operations
//!
//! This crate provides the operation layer that sits on top of a
//! [`certledger_store::Ledger`]:
//! - `Dispatcher`: maps an operation name and argument list to a handler,
//!   enforcing each operation's arity first
//! - `RecordStore`: typed get/put/range-scan over the ledger
//! - `FieldMutator`: read-modify-write of a single record field
//! - `aggregate`: streams a range cursor into one JSON array payload
//! - `seed`: fixed bootstrap records and key conventions
//!
//! # Operations
//!
//! | name             | arguments                                         |
//! |------------------|---------------------------------------------------|
//! | `queryOne`       | key                                               |
//! | `initSeedData`   |                                                   |
//! | `createOne`      | key, subjectId, period, level, institution        |
//! | `queryAll`       |                                                   |
//! | `setInstitution` | key, value                                        |
//! | `setPeriod`      | key, value                                        |
//! | `setLevel`       | key, value                                        |
//! | `setSubject`     | key, value                                        |

mod aggregate;
mod dispatch;
mod error;
mod mutation;
mod record;
mod response;
pub mod seed;
mod store;

pub use aggregate::aggregate;
pub use dispatch::{Dispatcher, Operation};
pub use error::{ContractError, ContractResult};
pub use mutation::FieldMutator;
pub use record::{Field, FieldSelector, Record};
pub use response::Response;
pub use store::RecordStore;
