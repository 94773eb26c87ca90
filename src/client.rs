//! The retrieval client: query construction, the top-k safety cap, and
//! result normalization.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, instrument, warn};

use crate::config::{Config, RetrievalConfig};
use crate::credentials::{require_api_key, CredentialProvider};
use crate::error::{ClientError, Result};
use crate::metrics;
use crate::pinecone::PineconeIndex;
use crate::service::IndexService;
use crate::types::{matches_from_response, Filter, IndexStats, MatchRecord, QueryRequest};

/// Stateless query façade over one remote index.
///
/// Cheap to share behind an `Arc`; every call is independent.
#[derive(Clone)]
pub struct RetrievalClient {
    index_name: String,
    limits: RetrievalConfig,
    service: Arc<dyn IndexService>,
}

impl std::fmt::Debug for RetrievalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetrievalClient")
            .field("index_name", &self.index_name)
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}

impl RetrievalClient {
    /// Wrap an existing service handle.
    pub fn new(
        index_name: impl Into<String>,
        limits: RetrievalConfig,
        service: Arc<dyn IndexService>,
    ) -> Result<Self> {
        limits.validate()?;
        Ok(Self {
            index_name: index_name.into(),
            limits,
            service,
        })
    }

    /// Build a Pinecone-backed client.
    ///
    /// `index_name` overrides `config.index.name`. Fails before any network
    /// I/O when the index name or the API key is missing.
    pub fn from_config(
        config: &Config,
        index_name: Option<&str>,
        credentials: &dyn CredentialProvider,
    ) -> Result<Self> {
        let mut config = config.clone();
        if let Some(name) = index_name {
            config.index.name = name.to_string();
        }
        config.validate()?;

        let api_key = require_api_key(credentials)?;
        let index = PineconeIndex::from_config(&config, &config.index.name, api_key)?;
        info!(index = %config.index.name, "initialized pinecone index handle");

        Self::new(config.index.name.clone(), config.retrieval, Arc::new(index))
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn limits(&self) -> RetrievalConfig {
        self.limits
    }

    /// Resolve the limit actually sent upstream.
    ///
    /// Missing or zero falls back to the default; anything above the maximum
    /// is capped, with a warning.
    pub fn effective_top_k(&self, requested: Option<usize>) -> usize {
        let top_k = match requested {
            Some(k) if k > 0 => k,
            _ => self.limits.default_top_k,
        };

        if top_k > self.limits.max_top_k {
            warn!(
                top_k,
                max_top_k = self.limits.max_top_k,
                "top_k exceeds max_top_k, capping"
            );
            metrics::TOP_K_CLAMPED_TOTAL.inc();
            return self.limits.max_top_k;
        }
        top_k
    }

    /// Assemble the upstream request. Empty namespace or filter values are
    /// left out entirely.
    pub fn build_request(
        &self,
        vector: &[f32],
        top_k: Option<usize>,
        namespace: Option<&str>,
        filter: Option<&Filter>,
    ) -> QueryRequest {
        QueryRequest {
            vector: vector.to_vec(),
            top_k: self.effective_top_k(top_k),
            include_metadata: true,
            namespace: namespace.filter(|ns| !ns.is_empty()).map(str::to_string),
            filter: filter.filter(|f| !f.is_empty()).cloned(),
        }
    }

    /// Similarity search against the index.
    ///
    /// Matches come back in the service's order. An empty list means nothing
    /// matched and is not an error.
    #[instrument(skip(self, vector, filter), fields(index = %self.index_name))]
    pub async fn query(
        &self,
        vector: &[f32],
        top_k: Option<usize>,
        namespace: Option<&str>,
        filter: Option<&Filter>,
    ) -> Result<Vec<MatchRecord>> {
        let request = self.build_request(vector, top_k, namespace, filter);
        let scope = metrics::scope_label(request.namespace.as_deref());

        info!(
            top_k = request.top_k,
            namespace = ?request.namespace,
            filtered = request.filter.is_some(),
            "querying index"
        );
        metrics::QUERIES_TOTAL.with_label_values(&[scope]).inc();

        let start = Instant::now();
        let raw = self.service.query(&request).await.map_err(|e| {
            metrics::UPSTREAM_ERRORS_TOTAL
                .with_label_values(&["query"])
                .inc();
            ClientError::from(e)
        })?;
        metrics::QUERY_DURATION
            .with_label_values(&[scope])
            .observe(start.elapsed().as_secs_f64());

        let matches = matches_from_response(&raw)?;
        info!(matches = matches.len(), "retrieved matches");
        Ok(matches)
    }

    /// Current index statistics, fetched fresh on every call.
    #[instrument(skip(self), fields(index = %self.index_name))]
    pub async fn get_index_stats(&self) -> Result<IndexStats> {
        metrics::STATS_REQUESTS_TOTAL.inc();
        let raw = self.service.describe_index_stats().await.map_err(|e| {
            metrics::UPSTREAM_ERRORS_TOTAL
                .with_label_values(&["describe_index_stats"])
                .inc();
            ClientError::from(e)
        })?;
        Ok(IndexStats::from_raw(&raw))
    }
}
