use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vitrine_scraper::fetch;
use vitrine_scraper::server::{self, AppState};

/// Product-metadata scraping service for the vitrine dashboard.
#[derive(Debug, Parser)]
#[command(name = "vitrine-scraper", version)]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:8090")]
    listen: String,

    /// Upstream fetch timeout, in seconds.
    #[arg(long, default_value_t = 15)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let client = fetch::build_client(Duration::from_secs(args.timeout_secs))
        .context("building the HTTP client")?;
    let app = server::router(AppState { client });

    let listener = tokio::net::TcpListener::bind(&args.listen)
        .await
        .with_context(|| format!("binding {}", args.listen))?;
    info!(listen = %args.listen, "vitrine-scraper up");

    axum::serve(listener, app).await.context("serving HTTP")?;
    Ok(())
}
