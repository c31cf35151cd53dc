//! Convenient imports for personledger.
//!
//! ```
//! use personledger::prelude::*;
//!
//! let ledger = PersonLedger::new();
//! ledger.create("Alice", 30, "passport", 1, "1 Main St")?;
//! # Ok::<(), Error>(())
//! ```

// Main entry point
pub use crate::ledger::{PersonLedger, PersonLedgerBuilder};

// Error handling
pub use personledger_core::{Error, Result};

// Records and queries
pub use personledger_core::{Person, PersonField, QueryResult, Selector};

// Configuration
pub use personledger_registry::{IdValidation, RegistryOptions};

// Hosting
pub use personledger_registry::PersonRegistry;
pub use personledger_state::{MemoryLedger, WorldState};

// Re-export serde_json for convenience
pub use serde_json::json;
