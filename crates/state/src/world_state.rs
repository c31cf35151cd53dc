//! The world-state access interface.
//!
//! The ledger runtime hands every contract invocation a transaction-scoped
//! handle implementing [`WorldState`]. Commit, rollback, ordering and conflict
//! detection all belong to the runtime; the contract only issues point reads,
//! point writes, deletes and iterating queries through this trait.

use personledger_core::{Result, Selector};

/// A stored `(key, value)` pair returned by an iterating query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    /// Storage key
    pub key: String,
    /// Raw stored bytes
    pub value: Vec<u8>,
}

impl KeyValue {
    /// Create a pair.
    pub fn new(key: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Iterator handed out by [`WorldState::query_by_selector`] and
/// [`WorldState::scan_range`].
///
/// The backend may hold resources until [`close`](StateIterator::close) is
/// called, so every iterator must be closed on every exit path. Wrap it in a
/// [`ScopedIterator`](crate::ScopedIterator) to get that for free.
pub trait StateIterator {
    /// Whether another entry is available.
    fn has_next(&self) -> bool;

    /// Advance and return the next entry.
    fn next(&mut self) -> Result<KeyValue>;

    /// Release backend resources. Closing twice is a no-op.
    fn close(&mut self) -> Result<()>;
}

/// Transaction-scoped key-value interface supplied by the ledger runtime.
///
/// All methods take `&self`; a backend keeps whatever interior state it needs.
pub trait WorldState {
    /// Write `value` at `key`, replacing any existing value.
    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Read the value at `key`. `Ok(None)` means nothing is stored there.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Remove `key`. Removing an absent key is not an error.
    fn del_state(&self, key: &str) -> Result<()>;

    /// Iterate the records matching `selector`, in backend order.
    fn query_by_selector(&self, selector: &Selector) -> Result<Box<dyn StateIterator>>;

    /// Iterate keys in `[start, end)`. An empty bound is unbounded on that side.
    fn scan_range(&self, start: &str, end: &str) -> Result<Box<dyn StateIterator>>;
}
