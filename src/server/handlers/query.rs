use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::server::AppState;
use crate::types::{Filter, MatchRecord};

use super::ApiError;

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub vector: Vec<f32>,
    /// Falls back to the configured default; capped at the configured maximum.
    #[serde(default)]
    pub top_k: Option<usize>,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub filter: Option<Filter>,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub matches: Vec<MatchRecord>,
}

#[instrument(skip(state, req), fields(dimensions = req.vector.len()))]
pub async fn query_index(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    let matches = state
        .client
        .query(
            &req.vector,
            req.top_k,
            req.namespace.as_deref(),
            req.filter.as_ref(),
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Json(QueryResponse { matches }))
}
