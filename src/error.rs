use thiserror::Error;

/// Failures talking to the upstream index service.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

#[derive(Error, Debug)]
pub enum ClientError {
    // Configuration errors
    #[error("missing credential: environment variable {var} is not set")]
    MissingCredential { var: String },

    #[error("config error: {0}")]
    Config(String),

    // Upstream errors
    #[error("retrieval error: {0}")]
    Retrieval(#[from] ServiceError),
}

/// Coarse error classification exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Construction-time problem; the client cannot be used.
    Configuration,
    /// A call to the index service failed.
    Retrieval,
}

pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::MissingCredential { .. } | ClientError::Config(_) => {
                ErrorKind::Configuration
            }
            ClientError::Retrieval(_) => ErrorKind::Retrieval,
        }
    }
}
