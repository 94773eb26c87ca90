use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::error::ServiceError;

/// Metadata attached to a stored vector.
pub type Metadata = Map<String, Value>;

/// Metadata predicate document, forwarded to the service untouched.
pub type Filter = Map<String, Value>;

/// Query sent to the index service.
///
/// Optional fields are omitted from the wire format when unset; the service
/// treats an absent namespace differently from an empty one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub vector: Vec<f32>,
    pub top_k: usize,
    pub include_metadata: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
}

/// A single ranked match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: String,
    pub score: f64,
    /// Always present; empty when the stored vector has no metadata.
    #[serde(default)]
    pub metadata: Metadata,
}

impl MatchRecord {
    /// Build from one element of the service's `matches` array.
    pub fn from_raw(raw: &Value) -> Result<Self, ServiceError> {
        let id = raw
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| ServiceError::MalformedResponse("match without string 'id'".into()))?;
        let score = raw.get("score").and_then(Value::as_f64).ok_or_else(|| {
            ServiceError::MalformedResponse(format!("match '{id}' has no numeric 'score'"))
        })?;
        let metadata = raw
            .get("metadata")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        Ok(Self {
            id: id.to_string(),
            score,
            metadata,
        })
    }
}

/// Normalize a raw query response, preserving the service's order.
pub fn matches_from_response(raw: &Value) -> Result<Vec<MatchRecord>, ServiceError> {
    match raw.get("matches") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items.iter().map(MatchRecord::from_raw).collect(),
        Some(other) => Err(ServiceError::MalformedResponse(format!(
            "'matches' is not an array: {other}"
        ))),
    }
}

/// Per-namespace breakdown from the stats endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceStats {
    pub vector_count: u64,
}

/// Snapshot of index statistics. Never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub dimension: Option<u64>,
    pub total_vector_count: Option<u64>,
    #[serde(default)]
    pub namespaces: HashMap<String, NamespaceStats>,
}

impl IndexStats {
    /// Pick the three fields out of a `describe_index_stats` response.
    ///
    /// Accepts both the REST (`totalVectorCount`) and SDK
    /// (`total_vector_count`) spellings.
    pub fn from_raw(raw: &Value) -> Self {
        let namespaces: HashMap<String, NamespaceStats> = raw
            .get("namespaces")
            .and_then(Value::as_object)
            .map(|entries| {
                entries
                    .iter()
                    .map(|(name, ns)| {
                        let vector_count =
                            field_u64(ns, "vectorCount", "vector_count").unwrap_or(0);
                        (name.clone(), NamespaceStats { vector_count })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            dimension: raw.get("dimension").and_then(Value::as_u64),
            total_vector_count: field_u64(raw, "totalVectorCount", "total_vector_count"),
            namespaces,
        }
    }
}

fn field_u64(raw: &Value, camel: &str, snake: &str) -> Option<u64> {
    raw.get(camel)
        .or_else(|| raw.get(snake))
        .and_then(Value::as_u64)
}
