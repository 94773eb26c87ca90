use axum::extract::State;
use axum::Json;

use crate::server::AppState;
use crate::types::IndexStats;

use super::ApiError;

pub async fn index_stats(State(state): State<AppState>) -> Result<Json<IndexStats>, ApiError> {
    let stats = state
        .client
        .get_index_stats()
        .await
        .map_err(ApiError::from)?;
    Ok(Json(stats))
}
