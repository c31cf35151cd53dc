//! Core types for personledger
//!
//! This crate defines the vocabulary shared by every layer:
//! - [`Person`] and [`QueryResult`]: the persisted record and its listing form
//! - [`person_key`]: how a record's storage key is derived
//! - [`Selector`]: typed filter queries over persisted attributes
//! - [`Error`]: the canonical error type

pub mod error;
pub mod person;
pub mod selector;

pub use error::{Error, Result};
pub use person::{person_key, Person, PersonField, QueryResult};
pub use selector::{Condition, ConditionBuilder, Field, Operator, Selector, SelectorValue};
