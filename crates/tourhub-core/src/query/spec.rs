//! The structured query descriptor produced by the builder.

use serde::{Deserialize, Serialize};

use crate::types::{Filter, FilterField, PageRequest, Projection, SortField};

/// Filter, sort, projection, and pagination for one list request.
///
/// Built once per request from raw parameters and discarded afterwards.
/// Stores interpret it through the [`Collection`](crate::traits::Collection)
/// trait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySpec {
    /// Conjunction of predicates.
    pub filter: Filter,
    /// Ordered sort keys. Never empty.
    pub sort: Vec<SortField>,
    /// Returned fields.
    pub projection: Projection,
    /// Page window.
    pub page: PageRequest,
}

impl QuerySpec {
    /// Number of documents to skip.
    pub fn skip(&self) -> u64 {
        self.page.offset()
    }

    /// Maximum number of documents to return.
    pub fn limit(&self) -> u64 {
        self.page.limit()
    }

    /// Add a handler-level default predicate.
    ///
    /// Used for record visibility rules (hidden tours, deactivated users)
    /// that every read of a collection must apply.
    pub fn with_condition(mut self, condition: FilterField) -> Self {
        self.filter = self.filter.and(condition);
        self
    }
}
