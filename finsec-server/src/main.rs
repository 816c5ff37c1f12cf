// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  FinSec demo API — data logging and sample response service
//
//  HTTP surface:  axum on tokio (insert / read / realtime echo)
//  Data log:      flat append-only text file
//  Config:        standalone YAML + FINSEC_* env overrides
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use clap::Parser;
use finsec_api::server::{self, AppState};
use finsec_core::config::ServiceConfig;
use finsec_core::sample::SampleCatalog;
use finsec_store::DataLogWriter;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "finsec",
    version,
    about = "FinSec demo API — data logging and sample response service"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "finsec.yaml")]
    config: PathBuf,

    /// Listen address override (e.g. 0.0.0.0:8000)
    #[arg(long)]
    addr: Option<String>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ── Tracing ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .with_target(false)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "FinSec demo API starting");

    // ── Config ──
    let mut config = if cli.config.exists() {
        info!(path = %cli.config.display(), "Loading config file");
        ServiceConfig::load(&cli.config)?
    } else {
        info!("No config file found, using defaults");
        ServiceConfig::default()
    };
    if let Some(addr) = cli.addr {
        config.server.addr = addr;
    }

    // ── Bootstrap: the data log must exist before the first request ──
    let data_log = Arc::new(DataLogWriter::open(&config.data_log)?);

    // ── Shared state ──
    let samples = SampleCatalog::builtin();
    info!(samples = samples.len(), "Sample catalog registered");
    let state = Arc::new(AppState { data_log, samples });

    // ── Serve until SIGINT/SIGTERM ──
    let app = server::build_router(state, &config.static_files);
    server::start_api(&config.server, app).await?;

    info!("FinSec demo API stopped");
    Ok(())
}
