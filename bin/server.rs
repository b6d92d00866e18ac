// Ledger Reports - Web Server
// Loads the CSV once, then serves the report pages and JSON API

use anyhow::{Context, Result};
use ledger_reports::api::{router, AppState};
use ledger_reports::{build, Settings};
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ledger_reports=info,ledger_server=info,tower_http=info")),
        )
        .init();

    println!("🌐 Ledger Reports - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let mut settings = Settings::load().context("Failed to load settings")?;
    if let Some(path) = env::args().nth(1) {
        settings.csv_path = PathBuf::from(path);
    }

    let table = build(&settings.csv_path)
        .with_context(|| format!("Failed to load ledger from {}", settings.csv_path.display()))?;
    println!("✓ Loaded {} transactions from {}", table.len(), table.source_name());

    let app = router(AppState::new(table, settings.assumptions.clone()));

    let addr = settings.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!(address = %addr, "Server listening");
    println!("\n🚀 Server running on http://{}", addr);
    println!("   API: http://{}/api/dashboard", addr);
    println!("   UI:  http://{}", addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .context("Server stopped unexpectedly")?;

    Ok(())
}
