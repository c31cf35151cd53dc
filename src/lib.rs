//! # personledger
//!
//! Person record contract logic over a transactional key-value world state.
//!
//! Records are stored as JSON under the decimal string of their `idNo`. Six
//! entry points manage them: create, update, read by id, list by employment
//! status, list everything, and delete.
//!
//! ## Quick Start
//!
//! ```
//! use personledger::prelude::*;
//!
//! let ledger = PersonLedger::new();
//! ledger.create("Alice", 30, "passport", 1, "1 Main St")?;
//! ledger.create("Bob", 41, "id_card", 2, "9 Elm St")?;
//!
//! for entry in ledger.get_people()? {
//!     println!("{} => {}", entry.key, entry.record.name);
//! }
//! # Ok::<(), personledger::Error>(())
//! ```
//!
//! ## Layers
//!
//! - [`personledger_core`] - record schema, typed selectors, errors
//! - [`personledger_state`] - the [`WorldState`] interface and an in-memory ledger
//! - [`personledger_registry`] - the contract entry points and call dispatch
//!
//! [`PersonLedger`] ties them together for embedded use. Hosts that bring
//! their own world state call [`PersonRegistry`] directly with any
//! [`WorldState`] implementation.

#![warn(missing_docs)]

mod ledger;

pub mod prelude;

// Re-export main entry points
pub use ledger::{PersonLedger, PersonLedgerBuilder};

pub use personledger_core::{
    person_key, Error, Field, Operator, Person, PersonField, QueryResult, Result, Selector,
    SelectorValue,
};
pub use personledger_registry::{Command, IdValidation, Output, PersonRegistry, RegistryOptions};
pub use personledger_state::{
    KeyValue, MemoryLedger, MemoryTransaction, ScopedIterator, StateIterator, StoreOp, WorldState,
};

// Layer crates, for items not re-exported above
pub use personledger_core;
pub use personledger_registry;
pub use personledger_state;
