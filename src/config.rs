//! Layered configuration: defaults, then an optional TOML file, then
//! environment overrides.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

const DEFAULT_CONFIG_FILE: &str = "retrieval.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub index: IndexConfig,
    pub retrieval: RetrievalConfig,
    pub pinecone: PineconeConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// Which index to query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub name: String,
    /// Data-plane host. Resolved through the control plane when unset.
    pub host: Option<String>,
}

/// Result-count policy applied to every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub default_top_k: usize,
    pub max_top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_top_k: 5,
            max_top_k: 10,
        }
    }
}

impl RetrievalConfig {
    pub fn validate(&self) -> Result<()> {
        if self.default_top_k == 0 {
            return Err(ClientError::Config("default_top_k must be > 0".into()));
        }
        if self.max_top_k < self.default_top_k {
            return Err(ClientError::Config(format!(
                "max_top_k ({}) must be >= default_top_k ({})",
                self.max_top_k, self.default_top_k
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PineconeConfig {
    /// Environment variable holding the API key.
    pub api_key_env: String,
    pub controller_url: String,
    pub api_version: String,
    pub request_timeout_secs: u64,
}

impl Default for PineconeConfig {
    fn default() -> Self {
        Self {
            api_key_env: "PINECONE_API_KEY".to_string(),
            controller_url: "https://api.pinecone.io".to_string(),
            api_version: "2024-07".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl PineconeConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `"json"` or anything else for human-readable output.
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from an explicit file, `RETRIEVAL_CONFIG`, or
    /// `retrieval.toml` in the working directory, then apply env overrides.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let explicit = path
            .map(str::to_string)
            .or_else(|| std::env::var("RETRIEVAL_CONFIG").ok());

        let mut config = match explicit {
            Some(p) => Self::from_file(Path::new(&p))?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| ClientError::Config(format!("invalid config: {e}")))
    }

    /// Apply overrides from a key lookup. Takes a closure so tests need not
    /// touch the process environment.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("PINECONE_INDEX_NAME") {
            self.index.name = v;
        }
        if let Some(v) = lookup("PINECONE_INDEX_HOST") {
            self.index.host = Some(v);
        }
        if let Some(v) = lookup("PINECONE_CONTROLLER_URL") {
            self.pinecone.controller_url = v;
        }
        if let Some(v) = lookup("PINECONE_API_VERSION") {
            self.pinecone.api_version = v;
        }
        if let Some(v) = lookup("RETRIEVAL_DEFAULT_TOP_K") {
            self.retrieval.default_top_k = parse_env("RETRIEVAL_DEFAULT_TOP_K", &v)?;
        }
        if let Some(v) = lookup("RETRIEVAL_MAX_TOP_K") {
            self.retrieval.max_top_k = parse_env("RETRIEVAL_MAX_TOP_K", &v)?;
        }
        if let Some(v) = lookup("RETRIEVAL_HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("RETRIEVAL_PORT") {
            self.server.port = parse_env("RETRIEVAL_PORT", &v)?;
        }
        if let Some(v) = lookup("RETRIEVAL_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = lookup("RETRIEVAL_LOG_FORMAT") {
            self.logging.format = v;
        }
        Ok(())
    }

    /// Checks needed before a client can be built.
    pub fn validate(&self) -> Result<()> {
        if self.index.name.trim().is_empty() {
            return Err(ClientError::Config(
                "index name is required (set index.name or PINECONE_INDEX_NAME)".into(),
            ));
        }
        self.retrieval.validate()
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ClientError::Config(format!("{key} has invalid value '{value}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.retrieval.default_top_k, 5);
        assert_eq!(config.retrieval.max_top_k, 10);
        assert_eq!(config.pinecone.api_key_env, "PINECONE_API_KEY");
        assert!(config.index.host.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [index]
            name = "docs"

            [retrieval]
            max_top_k = 50
            "#,
        )
        .unwrap();
        assert_eq!(config.index.name, "docs");
        assert_eq!(config.retrieval.default_top_k, 5);
        assert_eq!(config.retrieval.max_top_k, 50);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[index]\nname = \"kb\"\nhost = \"kb-123.svc.pinecone.io\"").unwrap();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.index.name, "kb");
        assert_eq!(config.index.host.as_deref(), Some("kb-123.svc.pinecone.io"));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env(lookup_from(&[
                ("PINECONE_INDEX_NAME", "articles"),
                ("RETRIEVAL_DEFAULT_TOP_K", "3"),
                ("RETRIEVAL_MAX_TOP_K", "7"),
                ("RETRIEVAL_LOG_FORMAT", "json"),
            ]))
            .unwrap();
        assert_eq!(config.index.name, "articles");
        assert_eq!(config.retrieval.default_top_k, 3);
        assert_eq!(config.retrieval.max_top_k, 7);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_env_override_rejects_garbage() {
        let mut config = Config::default();
        let err = config
            .apply_env(lookup_from(&[("RETRIEVAL_MAX_TOP_K", "lots")]))
            .unwrap_err();
        assert!(err.to_string().contains("RETRIEVAL_MAX_TOP_K"));
    }

    #[test]
    fn test_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_err(), "empty index name must fail");

        config.index.name = "docs".into();
        assert!(config.validate().is_ok());

        config.retrieval = RetrievalConfig {
            default_top_k: 20,
            max_top_k: 10,
        };
        assert!(config.validate().is_err());

        config.retrieval = RetrievalConfig {
            default_top_k: 0,
            max_top_k: 10,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml("[retrieval]\nmax_top_k = \"ten\"").unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }
}
