use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use retrieval::cli::{parse_filter, parse_vector, Cli, Command};
use retrieval::config::Config;
use retrieval::credentials::EnvCredential;
use retrieval::server::routes::build_router;
use retrieval::server::AppState;
use retrieval::RetrievalClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Load config first (needed for logging setup)
    let config = Config::load(cli.config.as_deref()).context("failed to load config")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    // Logs go to stderr so query/stats output on stdout stays clean JSON.
    match config.logging.format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    retrieval::metrics::init();

    let credentials = EnvCredential::new(&config.pinecone.api_key_env);
    let client = RetrievalClient::from_config(&config, cli.index.as_deref(), &credentials)
        .context("failed to initialize retrieval client")?;

    match cli.command {
        Command::Serve => serve(&config, client).await,
        Command::Query {
            vector,
            top_k,
            namespace,
            filter,
        } => {
            let vector = parse_vector(&vector)?;
            let filter = filter.as_deref().map(parse_filter).transpose()?;
            let matches = client
                .query(&vector, top_k, namespace.as_deref(), filter.as_ref())
                .await?;
            println!("{}", serde_json::to_string_pretty(&matches)?);
            Ok(())
        }
        Command::Stats => {
            let stats = client.get_index_stats().await?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
            Ok(())
        }
    }
}

async fn serve(config: &Config, client: RetrievalClient) -> anyhow::Result<()> {
    let state = AppState {
        client: Arc::new(client),
    };
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!(addr = %addr, "listening");

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
