//! Operation Dispatcher - route named invocations to their handlers
//!
//! Every operation has a fixed arity. Arity is checked before any handler
//! runs, so a rejected call never touches the ledger.

use certledger_store::Ledger;
use tracing::debug;

use crate::aggregate::aggregate;
use crate::error::{ContractError, ContractResult};
use crate::mutation::FieldMutator;
use crate::record::{Field, Record};
use crate::response::Response;
use crate::seed::{self, SCAN_HIGH, SCAN_LOW};
use crate::store::RecordStore;

/// An operation exposed to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `queryOne(key)`
    QueryOne,
    /// `initSeedData()`
    InitSeedData,
    /// `createOne(key, subjectId, period, credentialLevel, issuingInstitution)`
    CreateOne,
    /// `queryAll()`
    QueryAll,
    /// `setSubject` / `setPeriod` / `setLevel` / `setInstitution` `(key, value)`
    SetField(Field),
}

impl Operation {
    pub const ALL: [Operation; 8] = [
        Operation::QueryOne,
        Operation::InitSeedData,
        Operation::CreateOne,
        Operation::QueryAll,
        Operation::SetField(Field::IssuingInstitution),
        Operation::SetField(Field::Period),
        Operation::SetField(Field::CredentialLevel),
        Operation::SetField(Field::SubjectId),
    ];

    /// Look up an operation by its exact name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Operation::QueryOne => "queryOne",
            Operation::InitSeedData => "initSeedData",
            Operation::CreateOne => "createOne",
            Operation::QueryAll => "queryAll",
            Operation::SetField(Field::SubjectId) => "setSubject",
            Operation::SetField(Field::Period) => "setPeriod",
            Operation::SetField(Field::CredentialLevel) => "setLevel",
            Operation::SetField(Field::IssuingInstitution) => "setInstitution",
        }
    }

    /// Exact number of arguments the operation takes
    pub fn arity(self) -> usize {
        match self {
            Operation::QueryOne => 1,
            Operation::InitSeedData | Operation::QueryAll => 0,
            Operation::CreateOne => 5,
            Operation::SetField(_) => 2,
        }
    }

    fn check_arity<S>(self, args: &[S]) -> ContractResult<()> {
        if args.len() == self.arity() {
            Ok(())
        } else {
            Err(ContractError::InvalidArgumentCount {
                operation: self.name(),
                expected: self.arity(),
                actual: args.len(),
            })
        }
    }
}

/// Stateless router from `(operation, arguments)` to a handler.
///
/// Each invocation runs to completion against the ledger it is given and
/// produces exactly one [`Response`].
pub struct Dispatcher {
    mutator: FieldMutator,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            mutator: FieldMutator::new(),
        }
    }

    /// Instantiate hook, called once when the contract is deployed.
    /// Nothing is written; seeding is an explicit operation.
    pub fn init(&self) -> Response {
        Response::success(Vec::new())
    }

    /// Operations this dispatcher accepts
    pub fn operations(&self) -> &'static [Operation] {
        &Operation::ALL
    }

    /// Invoke `operation` with `args`, folding any error into a failure response
    pub fn invoke<S: AsRef<str>>(
        &self,
        ledger: &dyn Ledger,
        operation: &str,
        args: &[S],
    ) -> Response {
        match self.execute(ledger, operation, args) {
            Ok(payload) => Response::success(payload),
            Err(err) => {
                debug!(operation, error = %err, "operation failed");
                Response::failure(err.to_string())
            }
        }
    }

    /// Invoke `operation` with `args`, returning the success payload
    pub fn execute<S: AsRef<str>>(
        &self,
        ledger: &dyn Ledger,
        operation: &str,
        args: &[S],
    ) -> ContractResult<Vec<u8>> {
        let op = Operation::from_name(operation)
            .ok_or_else(|| ContractError::UnknownOperation(operation.to_string()))?;
        op.check_arity(args)?;
        debug!(operation = op.name(), args = args.len(), "dispatching");

        let args: Vec<&str> = args.iter().map(|arg| arg.as_ref()).collect();
        let store = RecordStore::new(ledger);

        match op {
            Operation::QueryOne => self.query_one(&store, args[0]),
            Operation::InitSeedData => {
                seed::load(&store)?;
                Ok(Vec::new())
            }
            Operation::CreateOne => {
                let record = Record::new(args[1], args[2], args[3], args[4]);
                store.put_record(args[0], &record)?;
                Ok(Vec::new())
            }
            Operation::QueryAll => self.query_all(&store),
            Operation::SetField(field) => {
                self.mutator.mutate(&store, args[0], &field, args[1])?;
                Ok(Vec::new())
            }
        }
    }

    fn query_one(&self, store: &RecordStore<'_>, key: &str) -> ContractResult<Vec<u8>> {
        Ok(store.get(key)?.unwrap_or_default())
    }

    fn query_all(&self, store: &RecordStore<'_>) -> ContractResult<Vec<u8>> {
        let cursor = store.range_scan(SCAN_LOW, SCAN_HIGH)?;
        let payload = aggregate(cursor)?;
        debug!(bytes = payload.len(), "assembled queryAll payload");
        Ok(payload)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
