//! Person record facade
//!
//! [`PersonRegistry`] composes the record schema with a transaction-scoped
//! [`WorldState`] handle. It holds no data of its own; every call receives the
//! handle it should act on, performs a bounded sequence of reads and at most
//! one write, and returns.
//!
//! ## Operations
//!
//! | Operation | Reads | Writes |
//! |-----------|-------|--------|
//! | `create` | none | put at `idNo` (upsert) |
//! | `update` | `get_by_id` | put at `idNo` (full record) |
//! | `get_by_id` | get at `idNo` | none |
//! | `get_employed` | selector query | none |
//! | `get_people` | full range scan | none |
//! | `delete` | `get_by_id` | delete at `idNo` |
//!
//! `create` never checks for an existing record: a second create with the
//! same `idNo` replaces the first. Both listings fail with
//! `Error::EmptyResult` rather than returning an empty list.

use personledger_core::{person_key, Error, Person, PersonField, QueryResult, Result, Selector};
use personledger_state::{ScopedIterator, WorldState};
use tracing::{debug, info, info_span, Span};

use crate::options::RegistryOptions;

pub(crate) const CREATE: &str = "CreatePerson";
pub(crate) const UPDATE: &str = "UpdateDetails";
pub(crate) const GET_BY_ID: &str = "GetById";
pub(crate) const GET_EMPLOYED: &str = "GetEmployed";
pub(crate) const GET_PEOPLE: &str = "GetPeople";
pub(crate) const DELETE: &str = "DeletePerson";

/// Record-management entry points for Person records.
///
/// The log span is built once here and entered by every operation.
///
/// # Example
///
/// ```
/// use personledger_registry::{PersonRegistry, RegistryOptions};
/// use personledger_state::MemoryLedger;
///
/// let ledger = MemoryLedger::new();
/// let registry = PersonRegistry::new(RegistryOptions::default());
///
/// ledger
///     .transaction(|txn| registry.create(txn, "Alice", 30, "passport", 42, "1 Main St"))
///     .unwrap();
/// let alice = ledger.transaction(|txn| registry.get_by_id(txn, 42)).unwrap();
/// assert!(!alice.is_employed);
/// ```
#[derive(Debug, Clone)]
pub struct PersonRegistry {
    options: RegistryOptions,
    span: Span,
}

impl PersonRegistry {
    /// Create a registry with the given options.
    pub fn new(options: RegistryOptions) -> Self {
        let span = info_span!("person_registry", contract = %options.contract_name);
        Self { options, span }
    }

    /// Options this registry was built with.
    pub fn options(&self) -> &RegistryOptions {
        &self.options
    }

    /// Span every operation runs under.
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Store a new record with both flags `false`, replacing any record
    /// already stored under `id_no`.
    pub fn create(
        &self,
        state: &dyn WorldState,
        name: &str,
        age: i64,
        id_type: &str,
        id_no: i64,
        address: &str,
    ) -> Result<()> {
        let _entered = self.span.enter();
        debug!(id_no, "{}: start", CREATE);
        self.options.id_validation.check(CREATE, id_no)?;

        let person = Person::new(name, age, id_type, id_no, address);
        let key = person.key();
        let bytes = person.to_bytes().map_err(|e| e.in_operation(CREATE))?;
        state
            .put_state(&key, bytes)
            .map_err(|e| e.in_operation(CREATE))?;

        info!(key = %key, "{}: stored", CREATE);
        Ok(())
    }

    /// Replace the four mutable attributes of an existing record.
    ///
    /// Fails with `NotFound`, writing nothing, when `id_no` has no record.
    pub fn update(
        &self,
        state: &dyn WorldState,
        id_no: i64,
        age: i64,
        address: &str,
        is_employed: bool,
        is_married: bool,
    ) -> Result<()> {
        let _entered = self.span.enter();
        debug!(id_no, "{}: start", UPDATE);

        let mut person = self
            .get_by_id(state, id_no)
            .map_err(|e| e.in_operation(UPDATE))?;
        person.apply_details(age, address, is_employed, is_married);

        let key = person_key(id_no);
        let bytes = person.to_bytes().map_err(|e| e.in_operation(UPDATE))?;
        state
            .put_state(&key, bytes)
            .map_err(|e| e.in_operation(UPDATE))?;

        info!(key = %key, "{}: stored", UPDATE);
        Ok(())
    }

    /// Read the record stored under `id_no`.
    pub fn get_by_id(&self, state: &dyn WorldState, id_no: i64) -> Result<Person> {
        let _entered = self.span.enter();
        debug!(id_no, "{}: start", GET_BY_ID);
        self.options.id_validation.check(GET_BY_ID, id_no)?;

        let key = person_key(id_no);
        let bytes = state
            .get_state(&key)
            .map_err(|e| e.in_operation(GET_BY_ID))?
            .ok_or_else(|| {
                Error::NotFound(format!("{}: the person {} does not exist", GET_BY_ID, key))
            })?;
        let person = Person::from_bytes(&key, &bytes).map_err(|e| e.in_operation(GET_BY_ID))?;

        info!(key = %key, "{}: done", GET_BY_ID);
        Ok(person)
    }

    /// Records whose `isEmployed` equals `is_employed` and that are not
    /// married, in query order.
    ///
    /// The backend evaluates the `isEmployed` selector; the marital filter
    /// runs here.
    pub fn get_employed(&self, state: &dyn WorldState, is_employed: bool) -> Result<Vec<Person>> {
        let _entered = self.span.enter();
        let selector = Selector::field(PersonField::IsEmployed).eq(is_employed);
        debug!(query = %selector.to_query_string(), "{}: start", GET_EMPLOYED);

        let mut results = ScopedIterator::new(
            state
                .query_by_selector(&selector)
                .map_err(|e| e.in_operation(GET_EMPLOYED))?,
        );
        let mut people = Vec::new();
        for entry in results.by_ref() {
            let entry = entry.map_err(|e| e.in_operation(GET_EMPLOYED))?;
            let person = Person::from_bytes(&entry.key, &entry.value)
                .map_err(|e| e.in_operation(GET_EMPLOYED))?;
            if !person.is_married {
                people.push(person);
            }
        }
        results.close().map_err(|e| e.in_operation(GET_EMPLOYED))?;

        if people.is_empty() {
            return Err(Error::EmptyResult(format!(
                "{}: no unmarried person with isEmployed={}",
                GET_EMPLOYED, is_employed
            )));
        }
        info!(count = people.len(), "{}: done", GET_EMPLOYED);
        Ok(people)
    }

    /// Every stored record with its key, in scan order.
    pub fn get_people(&self, state: &dyn WorldState) -> Result<Vec<QueryResult>> {
        let _entered = self.span.enter();
        debug!("{}: start", GET_PEOPLE);

        let mut results = ScopedIterator::new(
            state
                .scan_range("", "")
                .map_err(|e| e.in_operation(GET_PEOPLE))?,
        );
        let mut people = Vec::new();
        for entry in results.by_ref() {
            let entry = entry.map_err(|e| e.in_operation(GET_PEOPLE))?;
            let record = Person::from_bytes(&entry.key, &entry.value)
                .map_err(|e| e.in_operation(GET_PEOPLE))?;
            people.push(QueryResult {
                key: entry.key,
                record,
            });
        }
        results.close().map_err(|e| e.in_operation(GET_PEOPLE))?;

        if people.is_empty() {
            return Err(Error::EmptyResult(format!(
                "{}: no records available",
                GET_PEOPLE
            )));
        }
        info!(count = people.len(), "{}: done", GET_PEOPLE);
        Ok(people)
    }

    /// Remove the record stored under `id_no`.
    ///
    /// Fails with `NotFound` when there is nothing to remove.
    pub fn delete(&self, state: &dyn WorldState, id_no: i64) -> Result<()> {
        let _entered = self.span.enter();
        debug!(id_no, "{}: start", DELETE);

        let person = self
            .get_by_id(state, id_no)
            .map_err(|e| e.in_operation(DELETE))?;
        let key = person.key();
        state.del_state(&key).map_err(|e| e.in_operation(DELETE))?;

        info!(key = %key, "{}: removed", DELETE);
        Ok(())
    }
}
