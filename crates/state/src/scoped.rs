//! Close-on-drop guard for state iterators.

use personledger_core::Result;
use tracing::warn;

use crate::world_state::{KeyValue, StateIterator};

/// Owns a [`StateIterator`] and closes it exactly once.
///
/// Dropping the guard closes the iterator, so early returns and `?` can't
/// leak it. A close failure on drop is logged; call [`close`](Self::close)
/// to observe it instead.
///
/// The guard is also a plain [`Iterator`] over `Result<KeyValue>`, so a
/// `for` loop drains and then closes it.
pub struct ScopedIterator {
    inner: Box<dyn StateIterator>,
    closed: bool,
}

impl ScopedIterator {
    /// Take ownership of `inner`.
    pub fn new(inner: Box<dyn StateIterator>) -> Self {
        Self {
            inner,
            closed: false,
        }
    }

    /// Close now and report the outcome.
    pub fn close(mut self) -> Result<()> {
        self.close_inner()
    }

    fn close_inner(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.inner.close()
    }
}

impl Iterator for ScopedIterator {
    type Item = Result<KeyValue>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.closed || !self.inner.has_next() {
            return None;
        }
        Some(self.inner.next())
    }
}

impl Drop for ScopedIterator {
    fn drop(&mut self) {
        if let Err(e) = self.close_inner() {
            warn!("failed to close state iterator: {}", e);
        }
    }
}
