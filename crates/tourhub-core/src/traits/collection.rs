//! Query execution over a document collection.

use async_trait::async_trait;
use serde_json::Value;

use crate::query::QuerySpec;
use crate::result::AppResult;

/// A store that can execute a [`QuerySpec`].
///
/// Documents come back as JSON objects keyed by API field names, already
/// reduced to the requested projection and in the requested order.
///
/// Implementations must reject a filter value that cannot be cast to the
/// type of its target field with a `Validation` error. Filters, sort keys,
/// and projected names that refer to no known field are ignored.
#[async_trait]
pub trait Collection: Send + Sync + 'static {
    /// Run the query and return one page of documents.
    async fn find(&self, spec: &QuerySpec) -> AppResult<Vec<Value>>;
}
