// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use ledger_reports::{build, build_all, LedgerTable, Settings};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ledger_reports=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    // ledger-reports report [CSV] | ledger-reports [ui] [CSV]
    let (mode, csv_arg) = match args.get(1).map(String::as_str) {
        Some("report") => ("report", args.get(2)),
        Some("ui") => ("ui", args.get(2)),
        Some(_) => ("ui", args.get(1)),
        None => ("ui", None),
    };

    let mut settings = Settings::load().context("Failed to load settings")?;
    if let Some(path) = csv_arg {
        settings.csv_path = PathBuf::from(path);
    }

    if mode == "report" {
        run_report(&settings)?;
    } else {
        run_ui_mode(&settings)?;
    }

    Ok(())
}

fn load_table(settings: &Settings) -> Result<LedgerTable> {
    build(&settings.csv_path)
        .with_context(|| format!("Failed to load ledger from {}", settings.csv_path.display()))
}

/// Print every report page as JSON on stdout
fn run_report(settings: &Settings) -> Result<()> {
    let table = load_table(settings)?;
    let reports = build_all(&table, &settings.assumptions);

    let json = serde_json::to_string_pretty(&reports).context("Failed to serialize reports")?;
    println!("{}", json);

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(settings: &Settings) -> Result<()> {
    println!("🖥️  Loading Ledger Reports UI...\n");

    println!("📊 Loading transactions from {}...", settings.csv_path.display());
    let table = load_table(settings)?;
    println!("✓ Loaded {} transactions ({} dropped)\n", table.len(), table.dropped_rows());

    let reports = build_all(&table, &settings.assumptions);
    println!("Starting UI... (Press 'q' to quit)\n");

    let mut app = ui::App::new(table, reports);
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_settings: &Settings) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or print reports: ledger-reports report [CSV]");
    eprintln!("   Or use web UI: cargo run --bin ledger-server --features server");
    std::process::exit(1);
}
