//! Typed selector queries.
//!
//! A [`Selector`] is a conjunction of `(field, operator, value)` conditions.
//! Fields come from a type implementing [`Field`] (for records,
//! [`PersonField`](crate::PersonField)), so a selector can only name
//! attributes that exist. Backends either render the selector to its
//! CouchDB-style JSON form or evaluate it directly with [`Selector::matches`].
//!
//! # Example
//!
//! ```
//! use personledger_core::{PersonField, Selector};
//!
//! let selector = Selector::field(PersonField::IsEmployed).eq(true);
//! assert_eq!(
//!     selector.to_query_string(),
//!     r#"{"selector":{"isEmployed":{"$eq":true}}}"#
//! );
//! ```

use std::cmp::Ordering;

use serde_json::{Map, Value as JsonValue};

/// A named attribute of a stored document.
pub trait Field {
    /// Attribute name as persisted.
    fn name(&self) -> &'static str;
}

/// Comparison operator of a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equal
    Eq,
    /// Not equal
    Ne,
    /// Greater than
    Gt,
    /// Greater than or equal
    Gte,
    /// Less than
    Lt,
    /// Less than or equal
    Lte,
}

impl Operator {
    /// CouchDB operator keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "$eq",
            Operator::Ne => "$ne",
            Operator::Gt => "$gt",
            Operator::Gte => "$gte",
            Operator::Lt => "$lt",
            Operator::Lte => "$lte",
        }
    }

    fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            Operator::Eq => ordering == Ordering::Equal,
            Operator::Ne => ordering != Ordering::Equal,
            Operator::Gt => ordering == Ordering::Greater,
            Operator::Gte => ordering != Ordering::Less,
            Operator::Lt => ordering == Ordering::Less,
            Operator::Lte => ordering != Ordering::Greater,
        }
    }
}

/// Right-hand side of a condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorValue {
    /// Boolean literal
    Bool(bool),
    /// Integer literal
    Int(i64),
    /// Text literal
    Text(String),
}

impl SelectorValue {
    /// JSON form of the literal.
    pub fn to_json(&self) -> JsonValue {
        match self {
            SelectorValue::Bool(b) => JsonValue::Bool(*b),
            SelectorValue::Int(i) => JsonValue::from(*i),
            SelectorValue::Text(s) => JsonValue::String(s.clone()),
        }
    }

    /// Order a stored attribute against this literal.
    ///
    /// Returns `None` when the stored value has a different type.
    fn compare_stored(&self, stored: &JsonValue) -> Option<Ordering> {
        match (stored, self) {
            (JsonValue::Bool(a), SelectorValue::Bool(b)) => Some(a.cmp(b)),
            (JsonValue::Number(n), SelectorValue::Int(b)) => n.as_i64().map(|a| a.cmp(b)),
            (JsonValue::String(a), SelectorValue::Text(b)) => Some(a.as_str().cmp(b.as_str())),
            _ => None,
        }
    }
}

impl From<bool> for SelectorValue {
    fn from(b: bool) -> Self {
        SelectorValue::Bool(b)
    }
}

impl From<i64> for SelectorValue {
    fn from(i: i64) -> Self {
        SelectorValue::Int(i)
    }
}

impl From<i32> for SelectorValue {
    fn from(i: i32) -> Self {
        SelectorValue::Int(i64::from(i))
    }
}

impl From<&str> for SelectorValue {
    fn from(s: &str) -> Self {
        SelectorValue::Text(s.to_string())
    }
}

impl From<String> for SelectorValue {
    fn from(s: String) -> Self {
        SelectorValue::Text(s)
    }
}

/// A single `(field, operator, value)` test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    /// Attribute name
    pub field: &'static str,
    /// Comparison
    pub op: Operator,
    /// Literal compared against
    pub value: SelectorValue,
}

impl Condition {
    /// Evaluate against a decoded document. A missing attribute never matches.
    pub fn matches(&self, doc: &JsonValue) -> bool {
        doc.get(self.field)
            .and_then(|stored| self.value.compare_stored(stored))
            .map_or(false, |ordering| self.op.accepts(ordering))
    }
}

/// Conjunction of conditions. An empty selector matches every document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    conditions: Vec<Condition>,
}

impl Selector {
    /// Selector with no conditions.
    pub fn all() -> Self {
        Self::default()
    }

    /// Start a selector with a condition on `field`.
    pub fn field<F: Field>(field: F) -> ConditionBuilder {
        Self::default().and(field)
    }

    /// Add another condition on `field`.
    pub fn and<F: Field>(self, field: F) -> ConditionBuilder {
        ConditionBuilder {
            selector: self,
            field: field.name(),
        }
    }

    /// Conditions in the order they were added.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Whether `doc` satisfies every condition.
    pub fn matches(&self, doc: &JsonValue) -> bool {
        self.conditions.iter().all(|c| c.matches(doc))
    }

    /// CouchDB query document: `{"selector": {field: {op: value}}}`.
    pub fn to_json(&self) -> JsonValue {
        let mut fields = Map::new();
        for condition in &self.conditions {
            let entry = fields
                .entry(condition.field)
                .or_insert_with(|| JsonValue::Object(Map::new()));
            if let JsonValue::Object(ops) = entry {
                ops.insert(condition.op.as_str().to_string(), condition.value.to_json());
            }
        }
        let mut query = Map::new();
        query.insert("selector".to_string(), JsonValue::Object(fields));
        JsonValue::Object(query)
    }

    /// [`to_json`](Self::to_json) rendered as compact text.
    pub fn to_query_string(&self) -> String {
        self.to_json().to_string()
    }
}

/// Pending condition; finished by choosing an operator.
#[derive(Debug, Clone)]
#[must_use = "a condition is only added once an operator is chosen"]
pub struct ConditionBuilder {
    selector: Selector,
    field: &'static str,
}

impl ConditionBuilder {
    fn push(mut self, op: Operator, value: SelectorValue) -> Selector {
        self.selector.conditions.push(Condition {
            field: self.field,
            op,
            value,
        });
        self.selector
    }

    /// `field == value`
    pub fn eq(self, value: impl Into<SelectorValue>) -> Selector {
        self.push(Operator::Eq, value.into())
    }

    /// `field != value`
    pub fn ne(self, value: impl Into<SelectorValue>) -> Selector {
        self.push(Operator::Ne, value.into())
    }

    /// `field > value`
    pub fn gt(self, value: impl Into<SelectorValue>) -> Selector {
        self.push(Operator::Gt, value.into())
    }

    /// `field >= value`
    pub fn gte(self, value: impl Into<SelectorValue>) -> Selector {
        self.push(Operator::Gte, value.into())
    }

    /// `field < value`
    pub fn lt(self, value: impl Into<SelectorValue>) -> Selector {
        self.push(Operator::Lt, value.into())
    }

    /// `field <= value`
    pub fn lte(self, value: impl Into<SelectorValue>) -> Selector {
        self.push(Operator::Lte, value.into())
    }
}
