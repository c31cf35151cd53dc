//! Embedded host for the person registry.
//!
//! [`PersonLedger`] plays the part of the ledger runtime for in-process use:
//! it owns an in-memory world state and runs every entry point in its own
//! transaction, committing on success and discarding the writes on failure.

use personledger_core::{Person, QueryResult, Result};
use personledger_registry::{PersonRegistry, RegistryOptions};
use personledger_state::MemoryLedger;
use tracing::debug;

/// An in-memory ledger hosting a [`PersonRegistry`].
///
/// # Example
///
/// ```
/// use personledger::prelude::*;
///
/// let ledger = PersonLedger::new();
/// ledger.create("Alice", 30, "passport", 42, "1 Main St")?;
/// ledger.update(42, 31, "2 High St", true, false)?;
///
/// let alice = ledger.get_by_id(42)?;
/// assert_eq!(alice.age, 31);
/// assert_eq!(ledger.get_employed(true)?.len(), 1);
///
/// ledger.delete(42)?;
/// assert!(ledger.get_by_id(42).unwrap_err().is_not_found());
/// # Ok::<(), personledger::Error>(())
/// ```
#[derive(Clone)]
pub struct PersonLedger {
    state: MemoryLedger,
    registry: PersonRegistry,
}

impl PersonLedger {
    /// Empty ledger with default options.
    pub fn new() -> Self {
        Self::builder().open()
    }

    /// Create a builder for ledger configuration.
    pub fn builder() -> PersonLedgerBuilder {
        PersonLedgerBuilder::new()
    }

    /// The underlying world state.
    pub fn state(&self) -> &MemoryLedger {
        &self.state
    }

    /// The hosted registry.
    pub fn registry(&self) -> &PersonRegistry {
        &self.registry
    }

    /// Create (or replace) the record for `id_no`.
    pub fn create(
        &self,
        name: &str,
        age: i64,
        id_type: &str,
        id_no: i64,
        address: &str,
    ) -> Result<()> {
        self.state.transaction(|txn| {
            self.registry
                .create(txn, name, age, id_type, id_no, address)
        })
    }

    /// Replace the mutable attributes of an existing record.
    pub fn update(
        &self,
        id_no: i64,
        age: i64,
        address: &str,
        is_employed: bool,
        is_married: bool,
    ) -> Result<()> {
        self.state.transaction(|txn| {
            self.registry
                .update(txn, id_no, age, address, is_employed, is_married)
        })
    }

    /// Read one record.
    pub fn get_by_id(&self, id_no: i64) -> Result<Person> {
        self.state
            .transaction(|txn| self.registry.get_by_id(txn, id_no))
    }

    /// Unmarried records with the given employment flag.
    pub fn get_employed(&self, is_employed: bool) -> Result<Vec<Person>> {
        self.state
            .transaction(|txn| self.registry.get_employed(txn, is_employed))
    }

    /// Every record with its key.
    pub fn get_people(&self) -> Result<Vec<QueryResult>> {
        self.state.transaction(|txn| self.registry.get_people(txn))
    }

    /// Remove one record.
    pub fn delete(&self, id_no: i64) -> Result<()> {
        self.state.transaction(|txn| self.registry.delete(txn, id_no))
    }

    /// Run a call by function name, returning its JSON payload.
    ///
    /// ```
    /// use personledger::PersonLedger;
    ///
    /// let ledger = PersonLedger::new();
    /// ledger.invoke("CreatePerson", &["Bob", "40", "id_card", "7", "Elm St"])?;
    /// let payload = ledger.invoke("GetById", &["7"])?;
    /// assert!(String::from_utf8(payload).unwrap().contains("\"idNo\":7"));
    /// # Ok::<(), personledger::Error>(())
    /// ```
    pub fn invoke<S: AsRef<str>>(&self, function: &str, args: &[S]) -> Result<Vec<u8>> {
        debug!(function, args = args.len(), "invoke");
        self.state
            .transaction(|txn| self.registry.invoke(txn, function, args))
    }
}

impl Default for PersonLedger {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for ledger configuration.
///
/// # Example
///
/// ```
/// use personledger::prelude::*;
///
/// let ledger = PersonLedger::builder()
///     .contract_name("census")
///     .id_validation(IdValidation::NonNegative)
///     .open();
/// assert!(ledger.create("Neg", 1, "t", -1, "a").unwrap_err().is_invalid_input());
/// ```
pub struct PersonLedgerBuilder {
    options: RegistryOptions,
    state: Option<MemoryLedger>,
}

impl PersonLedgerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            options: RegistryOptions::default(),
            state: None,
        }
    }

    /// Replace all registry options.
    pub fn options(mut self, options: RegistryOptions) -> Self {
        self.options = options;
        self
    }

    /// Name recorded on the registry's log span.
    pub fn contract_name(mut self, name: impl Into<String>) -> Self {
        self.options = self.options.contract_name(name);
        self
    }

    /// Identifier policy for every operation that takes an `idNo`.
    pub fn id_validation(mut self, policy: personledger_registry::IdValidation) -> Self {
        self.options = self.options.id_validation(policy);
        self
    }

    /// Host an existing world state instead of an empty one.
    pub fn state(mut self, state: MemoryLedger) -> Self {
        self.state = Some(state);
        self
    }

    /// Build the ledger.
    pub fn open(self) -> PersonLedger {
        PersonLedger {
            state: self.state.unwrap_or_default(),
            registry: PersonRegistry::new(self.options),
        }
    }
}

impl Default for PersonLedgerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
