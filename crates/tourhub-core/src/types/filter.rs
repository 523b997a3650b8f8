//! Filter types for dynamic query building.
//!
//! The operator set is closed: a filter can only ever compare a field for
//! equality or order. Nothing in this module can express a store-specific
//! operator, so translating a [`Filter`] into a store query never forwards
//! client-controlled structure.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Filter comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    /// Exact equality.
    Eq,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
}

impl FilterOp {
    /// Parse a comparison token (`gt`, `gte`, `lt`, `lte`, `eq`).
    ///
    /// Returns `None` for anything outside the whitelist.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "eq" => Some(Self::Eq),
            "gt" => Some(Self::Gt),
            "gte" => Some(Self::Gte),
            "lt" => Some(Self::Lt),
            "lte" => Some(Self::Lte),
            _ => None,
        }
    }

    /// Return the token form of this operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
        }
    }

    /// Return the SQL comparison operator.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
        }
    }

    /// Evaluate this operator against an ordering of `actual` relative to
    /// the filter value.
    pub fn accepts(&self, ordering: std::cmp::Ordering) -> bool {
        use std::cmp::Ordering::*;
        match self {
            Self::Eq => ordering == Equal,
            Self::Gt => ordering == Greater,
            Self::Gte => ordering != Less,
            Self::Lt => ordering == Less,
            Self::Lte => ordering != Greater,
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The raw comparison value as supplied by the client.
///
/// Values stay textual until a store casts them to the type of the target
/// field, the same way a schema-aware store would.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterValue(String);

impl FilterValue {
    /// Wrap a raw value.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The value exactly as received.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interpret the value as a finite floating-point number.
    pub fn as_f64(&self) -> Option<f64> {
        self.0.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Interpret the value as an integer.
    pub fn as_i64(&self) -> Option<i64> {
        self.0.trim().parse::<i64>().ok()
    }

    /// Interpret the value as a boolean (`true` / `false`).
    pub fn as_bool(&self) -> Option<bool> {
        match self.0.trim() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for FilterValue {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// A single filter condition on a named field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FilterField {
    /// The field name to filter on.
    pub field: String,
    /// The comparison operator.
    pub op: FilterOp,
    /// The value to compare against.
    pub value: FilterValue,
}

impl FilterField {
    /// Create a new filter field.
    pub fn new(field: impl Into<String>, op: FilterOp, value: impl Into<FilterValue>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    /// Shorthand for an equality filter.
    pub fn eq(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOp::Eq, value)
    }
}

/// A conjunction of filter conditions. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    conditions: Vec<FilterField>,
}

impl Filter {
    /// Create an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from conditions, normalizing their order.
    pub fn from_conditions(mut conditions: Vec<FilterField>) -> Self {
        conditions.sort();
        conditions.dedup();
        Self { conditions }
    }

    /// Add a condition, keeping the canonical order.
    pub fn and(mut self, condition: FilterField) -> Self {
        self.conditions.push(condition);
        Self::from_conditions(self.conditions)
    }

    /// All conditions in canonical order.
    pub fn conditions(&self) -> &[FilterField] {
        &self.conditions
    }

    /// Returns `true` when the filter has no conditions.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}
