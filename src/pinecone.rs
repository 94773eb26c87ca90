//! Pinecone REST adapter.
//!
//! Maps the `IndexService` trait onto Pinecone's control and data plane
//! endpoints. The data-plane host is resolved once, on first use, unless it
//! was configured up front.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{debug, instrument};
use url::Url;

use crate::config::{Config, PineconeConfig};
use crate::error::{ClientError, Result, ServiceError};
use crate::service::IndexService;
use crate::types::QueryRequest;

const API_KEY_HEADER: &str = "Api-Key";
const API_VERSION_HEADER: &str = "X-Pinecone-API-Version";

pub struct PineconeIndex {
    index_name: String,
    controller_url: Url,
    api_key: SecretString,
    api_version: String,
    host: OnceCell<Url>,
    http: reqwest::Client,
}

impl std::fmt::Debug for PineconeIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PineconeIndex")
            .field("index_name", &self.index_name)
            .field("controller_url", &self.controller_url.as_str())
            .field("host", &self.host.get().map(Url::as_str))
            .finish_non_exhaustive()
    }
}

impl PineconeIndex {
    /// Build a handle without touching the network.
    pub fn new(
        index_name: &str,
        host: Option<&str>,
        settings: &PineconeConfig,
        api_key: SecretString,
    ) -> Result<Self> {
        let controller_url = parse_base_url(&settings.controller_url)?;
        let host = match host {
            Some(h) => OnceCell::new_with(Some(parse_base_url(h)?)),
            None => OnceCell::new(),
        };

        let http = reqwest::Client::builder()
            .timeout(settings.request_timeout())
            .pool_max_idle_per_host(16)
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            index_name: index_name.to_string(),
            controller_url,
            api_key,
            api_version: settings.api_version.clone(),
            host,
            http,
        })
    }

    pub fn from_config(config: &Config, index_name: &str, api_key: SecretString) -> Result<Self> {
        Self::new(
            index_name,
            config.index.host.as_deref(),
            &config.pinecone,
            api_key,
        )
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    async fn data_plane(&self) -> std::result::Result<&Url, ServiceError> {
        self.host.get_or_try_init(|| self.resolve_host()).await
    }

    /// Ask the control plane where the index lives.
    #[instrument(skip(self), fields(index = %self.index_name))]
    async fn resolve_host(&self) -> std::result::Result<Url, ServiceError> {
        let url = join(&self.controller_url, &format!("indexes/{}", self.index_name))?;
        let resp = self
            .http
            .get(url)
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .header(API_VERSION_HEADER, &self.api_version)
            .send()
            .await?;
        let body = read_json(resp).await?;

        let host = body.get("host").and_then(Value::as_str).ok_or_else(|| {
            ServiceError::MalformedResponse(format!(
                "describe index '{}' returned no host",
                self.index_name
            ))
        })?;
        debug!(host, "resolved index host");

        parse_base_url(host).map_err(|e| ServiceError::MalformedResponse(e.to_string()))
    }

    async fn post_data_plane<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> std::result::Result<Value, ServiceError> {
        let url = join(self.data_plane().await?, path)?;
        let resp = self
            .http
            .post(url)
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .header(API_VERSION_HEADER, &self.api_version)
            .json(body)
            .send()
            .await?;
        read_json(resp).await
    }
}

#[async_trait]
impl IndexService for PineconeIndex {
    #[instrument(skip(self, request), fields(index = %self.index_name, top_k = request.top_k))]
    async fn query(&self, request: &QueryRequest) -> std::result::Result<Value, ServiceError> {
        self.post_data_plane("query", request).await
    }

    #[instrument(skip(self), fields(index = %self.index_name))]
    async fn describe_index_stats(&self) -> std::result::Result<Value, ServiceError> {
        self.post_data_plane("describe_index_stats", &serde_json::json!({}))
            .await
    }
}

/// Accept bare hosts (as the control plane reports them) or full URLs.
fn parse_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim().trim_end_matches('/');
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    Url::parse(&format!("{with_scheme}/"))
        .map_err(|e| ClientError::Config(format!("invalid URL '{raw}': {e}")))
}

fn join(base: &Url, path: &str) -> std::result::Result<Url, ServiceError> {
    base.join(path)
        .map_err(|e| ServiceError::MalformedResponse(format!("cannot build URL for {path}: {e}")))
}

async fn read_json(resp: reqwest::Response) -> std::result::Result<Value, ServiceError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ServiceError::Status {
            status: status.as_u16(),
            body,
        });
    }
    let bytes = resp.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
