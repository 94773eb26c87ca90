//! Command-line surface for the `retrieval` binary.

use clap::{Parser, Subcommand};

use crate::error::{ClientError, Result};
use crate::types::Filter;

#[derive(Debug, Parser)]
#[command(name = "retrieval", about = "Query a Pinecone index for similar vectors")]
pub struct Cli {
    /// Path to a TOML config file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Index to query, overriding the configured one.
    #[arg(long, global = true)]
    pub index: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the HTTP query API.
    Serve,

    /// Run one similarity query and print the matches as JSON.
    Query {
        /// Query embedding as a JSON array, e.g. `[0.1, 0.2]`.
        #[arg(long)]
        vector: String,

        #[arg(long)]
        top_k: Option<usize>,

        #[arg(long)]
        namespace: Option<String>,

        /// Metadata filter as a JSON object.
        #[arg(long)]
        filter: Option<String>,
    },

    /// Print index statistics as JSON.
    Stats,
}

pub fn parse_vector(raw: &str) -> Result<Vec<f32>> {
    serde_json::from_str(raw)
        .map_err(|e| ClientError::Config(format!("--vector must be a JSON array of numbers: {e}")))
}

pub fn parse_filter(raw: &str) -> Result<Filter> {
    serde_json::from_str(raw)
        .map_err(|e| ClientError::Config(format!("--filter must be a JSON object: {e}")))
}
