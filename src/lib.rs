//! Retrieval: a query client for managed Pinecone vector indexes.

pub mod cli;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod metrics;
pub mod pinecone;
pub mod server;
pub mod service;
pub mod types;

pub use client::RetrievalClient;
pub use error::{ClientError, ErrorKind, Result, ServiceError};
pub use types::{IndexStats, MatchRecord, NamespaceStats};
