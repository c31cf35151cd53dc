//! The Person record and its persisted form.
//!
//! A record is stored as a JSON object with exactly seven attributes
//! (`name`, `age`, `idType`, `idNo`, `address`, `isEmployed`, `isMarried`)
//! under the key returned by [`person_key`]. No version tag is persisted.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::selector::Field;

/// Storage key for a record: the base-10 form of its `idNo`.
pub fn person_key(id_no: i64) -> String {
    id_no.to_string()
}

/// A person record.
///
/// `name`, `id_type` and `id_no` are fixed at creation; the remaining four
/// fields may be replaced by an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Full name
    pub name: String,
    /// Age in years
    pub age: i64,
    /// Kind of identity document
    pub id_type: String,
    /// Identity number; the primary key
    pub id_no: i64,
    /// Postal address
    pub address: String,
    /// Employment flag
    pub is_employed: bool,
    /// Marital flag
    pub is_married: bool,
}

impl Person {
    /// Build a freshly created record. Both flags start out `false`.
    pub fn new(
        name: impl Into<String>,
        age: i64,
        id_type: impl Into<String>,
        id_no: i64,
        address: impl Into<String>,
    ) -> Self {
        Person {
            name: name.into(),
            age,
            id_type: id_type.into(),
            id_no,
            address: address.into(),
            is_employed: false,
            is_married: false,
        }
    }

    /// The key this record lives under.
    pub fn key(&self) -> String {
        person_key(self.id_no)
    }

    /// Replace the mutable attributes, leaving identity untouched.
    pub fn apply_details(
        &mut self,
        age: i64,
        address: impl Into<String>,
        is_employed: bool,
        is_married: bool,
    ) {
        self.age = age;
        self.address = address.into();
        self.is_employed = is_employed;
        self.is_married = is_married;
    }

    /// Encode for storage.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| {
            Error::Serialization(format!("unable to encode person {}: {}", self.id_no, e))
        })
    }

    /// Decode a stored value. `key` only feeds the error message.
    pub fn from_bytes(key: &str, bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| {
            Error::Serialization(format!("unable to decode person at key {}: {}", key, e))
        })
    }
}

/// One entry of the full listing: the storage key and the record under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Storage key
    #[serde(rename = "Key")]
    pub key: String,
    /// Decoded record
    #[serde(rename = "Record")]
    pub record: Person,
}

/// Person attributes addressable by a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonField {
    Name,
    Age,
    IdType,
    IdNo,
    Address,
    IsEmployed,
    IsMarried,
}

impl PersonField {
    /// All attributes, in persisted order.
    pub const ALL: [PersonField; 7] = [
        PersonField::Name,
        PersonField::Age,
        PersonField::IdType,
        PersonField::IdNo,
        PersonField::Address,
        PersonField::IsEmployed,
        PersonField::IsMarried,
    ];
}

impl Field for PersonField {
    fn name(&self) -> &'static str {
        match self {
            PersonField::Name => "name",
            PersonField::Age => "age",
            PersonField::IdType => "idType",
            PersonField::IdNo => "idNo",
            PersonField::Address => "address",
            PersonField::IsEmployed => "isEmployed",
            PersonField::IsMarried => "isMarried",
        }
    }
}
