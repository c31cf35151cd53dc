//! World-state access for personledger
//!
//! This crate implements the boundary to the ledger runtime:
//! - [`WorldState`]: transaction-scoped point reads, writes, deletes and
//!   iterating queries
//! - [`StateIterator`] and [`ScopedIterator`]: iterators that must be closed,
//!   and a guard that closes them on every exit path
//! - [`MemoryLedger`]: an in-memory runtime with transactions, used by the
//!   embedded host and by tests

#![warn(missing_docs)]

pub mod memory;
pub mod scoped;
pub mod world_state;

pub use memory::{MemoryLedger, MemoryTransaction, StoreOp};
pub use scoped::ScopedIterator;
pub use world_state::{KeyValue, StateIterator, WorldState};
