//! API key sources.

use secrecy::{ExposeSecret, SecretString};

use crate::error::{ClientError, Result};

/// Supplies the API key used to authenticate against the index service.
pub trait CredentialProvider: Send + Sync {
    /// Name reported when the key is missing.
    fn source(&self) -> &str;

    fn api_key(&self) -> Option<SecretString>;
}

/// Reads the key from an environment variable at construction time.
#[derive(Debug, Clone)]
pub struct EnvCredential {
    var: String,
}

impl EnvCredential {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialProvider for EnvCredential {
    fn source(&self) -> &str {
        &self.var
    }

    fn api_key(&self) -> Option<SecretString> {
        std::env::var(&self.var).ok().map(SecretString::from)
    }
}

/// A key supplied directly, e.g. from a secrets manager or a test.
pub struct StaticCredential {
    key: Option<SecretString>,
}

impl StaticCredential {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Some(SecretString::from(key.into())),
        }
    }

    /// A provider that never yields a key.
    pub fn absent() -> Self {
        Self { key: None }
    }
}

impl CredentialProvider for StaticCredential {
    fn source(&self) -> &str {
        "static credential"
    }

    fn api_key(&self) -> Option<SecretString> {
        self.key
            .as_ref()
            .map(|k| SecretString::from(k.expose_secret().to_string()))
    }
}

/// Fetch a non-blank key or fail with `MissingCredential`.
pub fn require_api_key(provider: &dyn CredentialProvider) -> Result<SecretString> {
    match provider.api_key() {
        Some(key) if !key.expose_secret().trim().is_empty() => Ok(key),
        _ => Err(ClientError::MissingCredential {
            var: provider.source().to_string(),
        }),
    }
}
