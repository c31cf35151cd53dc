//! Registry configuration.
//!
//! Options are built in code with the builder methods or parsed from TOML:
//!
//! ```
//! use personledger_registry::{IdValidation, RegistryOptions};
//!
//! let opts = RegistryOptions::from_toml_str(
//!     r#"
//!     contract_name = "census"
//!     id_validation = "non_negative"
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(opts.id_validation, IdValidation::NonNegative);
//! ```

use personledger_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Which identifiers the registry accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdValidation {
    /// Every `i64` is a valid identifier.
    Unchecked,
    /// Negative identifiers are rejected with `Error::InvalidInput`.
    NonNegative,
}

impl Default for IdValidation {
    fn default() -> Self {
        IdValidation::Unchecked
    }
}

impl IdValidation {
    /// Check `id_no` on behalf of `operation`.
    pub fn check(&self, operation: &str, id_no: i64) -> Result<()> {
        match self {
            IdValidation::NonNegative if id_no < 0 => Err(Error::InvalidInput(format!(
                "{}: idNo must not be negative, got {}",
                operation, id_no
            ))),
            _ => Ok(()),
        }
    }
}

/// Options for a [`PersonRegistry`](crate::PersonRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryOptions {
    /// Name recorded on the registry's log span.
    pub contract_name: String,
    /// Identifier policy applied by every operation that takes an `idNo`.
    pub id_validation: IdValidation,
}

impl RegistryOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name recorded on the registry's log span.
    pub fn contract_name(mut self, name: impl Into<String>) -> Self {
        self.contract_name = name.into();
        self
    }

    /// Set the identifier policy.
    pub fn id_validation(mut self, policy: IdValidation) -> Self {
        self.id_validation = policy;
        self
    }

    /// Parse options from TOML. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::InvalidInput(format!("registry options: {}", e)))
    }
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            contract_name: "person".to_string(),
            id_validation: IdValidation::default(),
        }
    }
}
