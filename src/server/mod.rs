pub mod handlers;
pub mod routes;

use std::sync::Arc;

use crate::client::RetrievalClient;

/// Shared application state injected into all handlers via axum's State extractor.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<RetrievalClient>,
}
