//! CampusEvents Dev Server
//!
//! Run with: cargo run --bin campus-server
//!
//! Serves `campus-ui/dist` (build it with `trunk build` inside `campus-ui/`)
//! and forwards `/api/*` to the backend.
//!
//! # Configuration
//!
//! `--config <path>` or the default config locations, then:
//! - `CAMPUS_HOST`, `CAMPUS_PORT`: Bind address (default: 127.0.0.1:8084)
//! - `CAMPUS_STATIC_DIR`: Built UI directory (default: campus-ui/dist)
//! - `CAMPUS_BACKEND_URL`: REST backend (default: http://localhost:5000)
//! - `RUST_LOG`: Log filter (default: campus_events=info,tower_http=debug)

use anyhow::Context;
use campus_events::config::Config;
use campus_events::server::{serve, AppState};
use campus_events::telemetry::init_tracing;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "campus-server")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Serve the CampusEvents UI and proxy /api to the backend")]
struct Args {
    /// Config file (default: search the standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listening port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Config::load_default(),
    };
    if let Some(port) = args.port {
        config.server.port = port;
    }

    init_tracing(&config.logging);

    tracing::info!("Starting CampusEvents server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Static files: {}", config.server.static_dir);
    tracing::info!("Backend: {}", config.backend.url);

    if !PathBuf::from(&config.server.static_dir).join("index.html").exists() {
        tracing::warn!(
            "No index.html in {}; run `trunk build` in campus-ui first",
            config.server.static_dir
        );
    }

    let state = AppState::new(config)?;
    serve(state).await?;

    tracing::info!("CampusEvents server stopped");
    Ok(())
}
