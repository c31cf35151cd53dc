//! Person record facade for personledger
//!
//! - [`PersonRegistry`]: Create, Update, GetById, GetEmployed, GetPeople and
//!   Delete over a caller-supplied [`WorldState`](personledger_state::WorldState)
//! - [`RegistryOptions`]: contract name and identifier policy
//! - [`Command`] / [`Output`]: invocation by function name and string
//!   arguments, as the ledger runtime delivers calls

#![warn(missing_docs)]

pub mod command;
pub mod options;
pub mod registry;

pub use command::{Command, Output};
pub use options::{IdValidation, RegistryOptions};
pub use registry::PersonRegistry;
