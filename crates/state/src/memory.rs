//! In-memory ledger
//!
//! [`MemoryLedger`] stands in for the ledger runtime: it keeps the committed
//! world state in a `BTreeMap` and hands out [`MemoryTransaction`] handles that
//! implement [`WorldState`].
//!
//! ## Transactions
//!
//! A transaction buffers its writes (tombstones for deletes) and reads its own
//! writes. Nothing reaches the committed table until [`MemoryTransaction::commit`];
//! dropping or rolling back discards the buffer. [`MemoryLedger::transaction`]
//! commits when the closure returns `Ok` and discards on `Err`.
//!
//! ## Iteration order
//!
//! Scans and selector queries return entries in ascending byte order of the
//! key, with the write buffer merged over the committed table. Iterators are
//! materialized when opened.
//!
//! ## Test hooks
//!
//! - [`MemoryLedger::inject_fault`] makes the next call of a given kind fail
//!   with a storage error.
//! - [`MemoryLedger::open_iterators`] counts iterators not yet closed.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::ops::Bound;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use personledger_core::{Error, Result, Selector};
use tracing::debug;

use crate::world_state::{KeyValue, StateIterator, WorldState};

/// Backend call kinds, used to target injected faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    /// `put_state`
    Put,
    /// `get_state`
    Get,
    /// `del_state`
    Delete,
    /// `query_by_selector`
    Query,
    /// `scan_range`
    Scan,
    /// `StateIterator::next`
    Next,
}

#[derive(Default)]
struct Shared {
    committed: RwLock<BTreeMap<String, Vec<u8>>>,
    faults: Mutex<HashMap<StoreOp, String>>,
    open_iterators: AtomicUsize,
}

impl Shared {
    fn check_fault(&self, op: StoreOp) -> Result<()> {
        match self.faults.lock().remove(&op) {
            Some(message) => Err(Error::Storage(message)),
            None => Ok(()),
        }
    }
}

/// Committed world state plus the hooks tests need.
///
/// Cloning is cheap and yields a handle to the same ledger.
#[derive(Clone, Default)]
pub struct MemoryLedger {
    shared: Arc<Shared>,
}

impl MemoryLedger {
    /// Empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a transaction over the current committed state.
    pub fn begin(&self) -> MemoryTransaction {
        MemoryTransaction {
            shared: Arc::clone(&self.shared),
            writes: Mutex::new(BTreeMap::new()),
        }
    }

    /// Run `f` in a fresh transaction; commit on `Ok`, discard on `Err`.
    pub fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&MemoryTransaction) -> Result<T>,
    {
        let txn = self.begin();
        match f(&txn) {
            Ok(value) => {
                txn.commit();
                Ok(value)
            }
            Err(e) => {
                debug!("discarding {} pending writes: {}", txn.pending_writes(), e);
                txn.rollback();
                Err(e)
            }
        }
    }

    /// Committed value at `key`.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.shared.committed.read().get(key).cloned()
    }

    /// Committed keys in iteration order.
    pub fn keys(&self) -> Vec<String> {
        self.shared.committed.read().keys().cloned().collect()
    }

    /// Number of committed keys.
    pub fn len(&self) -> usize {
        self.shared.committed.read().len()
    }

    /// Whether nothing is committed.
    pub fn is_empty(&self) -> bool {
        self.shared.committed.read().is_empty()
    }

    /// Write straight into the committed table, bypassing transactions.
    pub fn insert_raw(&self, key: impl Into<String>, value: Vec<u8>) {
        self.shared.committed.write().insert(key.into(), value);
    }

    /// Fail the next `op` call with `Error::Storage(message)`.
    pub fn inject_fault(&self, op: StoreOp, message: impl Into<String>) {
        self.shared.faults.lock().insert(op, message.into());
    }

    /// Iterators opened but not yet closed.
    pub fn open_iterators(&self) -> usize {
        self.shared.open_iterators.load(Ordering::SeqCst)
    }
}

/// A transaction-scoped handle onto a [`MemoryLedger`].
pub struct MemoryTransaction {
    shared: Arc<Shared>,
    // None is a tombstone
    writes: Mutex<BTreeMap<String, Option<Vec<u8>>>>,
}

impl MemoryTransaction {
    /// Apply the buffered writes. Returns how many keys were touched.
    pub fn commit(self) -> usize {
        let writes = std::mem::take(&mut *self.writes.lock());
        let count = writes.len();
        let mut committed = self.shared.committed.write();
        for (key, value) in writes {
            match value {
                Some(bytes) => {
                    committed.insert(key, bytes);
                }
                None => {
                    committed.remove(&key);
                }
            }
        }
        debug!("committed {} writes", count);
        count
    }

    /// Discard the buffered writes.
    pub fn rollback(self) {}

    /// Buffered writes not yet committed.
    pub fn pending_writes(&self) -> usize {
        self.writes.lock().len()
    }

    fn merged_range(&self, start: &str, end: &str) -> Vec<KeyValue> {
        if !start.is_empty() && !end.is_empty() && start >= end {
            return Vec::new();
        }
        let lower = if start.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Included(start)
        };
        let upper = if end.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(end)
        };

        let mut merged: BTreeMap<String, Vec<u8>> = self
            .shared
            .committed
            .read()
            .range::<str, _>((lower, upper))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        for (key, value) in self.writes.lock().range::<str, _>((lower, upper)) {
            match value {
                Some(bytes) => {
                    merged.insert(key.clone(), bytes.clone());
                }
                None => {
                    merged.remove(key);
                }
            }
        }
        merged
            .into_iter()
            .map(|(key, value)| KeyValue::new(key, value))
            .collect()
    }

    fn open_iterator(&self, entries: Vec<KeyValue>) -> Box<dyn StateIterator> {
        self.shared.open_iterators.fetch_add(1, Ordering::SeqCst);
        Box::new(MemoryIterator {
            entries: entries.into(),
            shared: Arc::clone(&self.shared),
            closed: false,
        })
    }
}

impl WorldState for MemoryTransaction {
    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.shared.check_fault(StoreOp::Put)?;
        self.writes.lock().insert(key.to_string(), Some(value));
        Ok(())
    }

    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.shared.check_fault(StoreOp::Get)?;
        if let Some(buffered) = self.writes.lock().get(key) {
            return Ok(buffered.clone());
        }
        Ok(self.shared.committed.read().get(key).cloned())
    }

    fn del_state(&self, key: &str) -> Result<()> {
        self.shared.check_fault(StoreOp::Delete)?;
        self.writes.lock().insert(key.to_string(), None);
        Ok(())
    }

    fn query_by_selector(&self, selector: &Selector) -> Result<Box<dyn StateIterator>> {
        self.shared.check_fault(StoreOp::Query)?;
        let matches = self
            .merged_range("", "")
            .into_iter()
            .filter(|kv| match serde_json::from_slice::<serde_json::Value>(&kv.value) {
                Ok(doc) => selector.matches(&doc),
                Err(_) => {
                    debug!("skipping non-JSON value at key {}", kv.key);
                    false
                }
            })
            .collect();
        Ok(self.open_iterator(matches))
    }

    fn scan_range(&self, start: &str, end: &str) -> Result<Box<dyn StateIterator>> {
        self.shared.check_fault(StoreOp::Scan)?;
        let entries = self.merged_range(start, end);
        Ok(self.open_iterator(entries))
    }
}

struct MemoryIterator {
    entries: VecDeque<KeyValue>,
    shared: Arc<Shared>,
    closed: bool,
}

impl StateIterator for MemoryIterator {
    fn has_next(&self) -> bool {
        !self.closed && !self.entries.is_empty()
    }

    fn next(&mut self) -> Result<KeyValue> {
        if self.closed {
            return Err(Error::Storage("iterator already closed".into()));
        }
        self.shared.check_fault(StoreOp::Next)?;
        self.entries
            .pop_front()
            .ok_or_else(|| Error::Storage("iterator exhausted".into()))
    }

    fn close(&mut self) -> Result<()> {
        if !self.closed {
            self.closed = true;
            self.shared.open_iterators.fetch_sub(1, Ordering::SeqCst);
        }
        Ok(())
    }
}
