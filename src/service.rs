//! Seam between the retrieval client and the upstream index service.
//!
//! Responses come back as loosely typed JSON; the client extracts fields
//! defensively because the upstream shape is not under our control.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ServiceError;
use crate::types::QueryRequest;

/// A handle to one remote vector index.
///
/// Implementations must be safe to share across tasks; the client adds no
/// locking of its own.
#[async_trait]
pub trait IndexService: Send + Sync {
    /// Run a similarity query and return the raw response document.
    async fn query(&self, request: &QueryRequest) -> Result<Value, ServiceError>;

    /// Fetch the raw statistics document for the index.
    async fn describe_index_stats(&self) -> Result<Value, ServiceError>;
}
