//! Field projection for list endpoints.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Internal revision field hidden from default projections.
pub const REVISION_FIELD: &str = "revision";
/// Identifier field that an inclusion projection always keeps.
pub const ID_FIELD: &str = "id";

/// Which fields of each document are returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "fields")]
pub enum Projection {
    /// Return only these fields (plus `id`).
    Include(BTreeSet<String>),
    /// Return every field except these.
    Exclude(BTreeSet<String>),
}

impl Projection {
    /// Whether `field` survives this projection.
    pub fn includes(&self, field: &str) -> bool {
        match self {
            Self::Include(fields) => field == ID_FIELD || fields.contains(field),
            Self::Exclude(fields) => !fields.contains(field),
        }
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::Exclude(BTreeSet::from([REVISION_FIELD.to_string()]))
    }
}
