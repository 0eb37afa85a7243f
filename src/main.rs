use anyhow::{Context, Result};
use clap::Parser;
use rusqlite::Connection;
use std::net::SocketAddr;
use std::path::Path;
use tracing::{error, info};

use swift_codes::api::{self, AppState};
use swift_codes::config::{Cli, Mode};
use swift_codes::{importer, logging, open_database, VERSION};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging()?;
    let cli = Cli::parse();

    info!("SWIFT code service v{}", VERSION);

    let mut conn = open_database(&cli.database)
        .with_context(|| format!("Failed to open database {}", cli.database.display()))?;
    info!("Database opened: {}", cli.database.display());

    match cli.mode() {
        Mode::Serve => {}
        Mode::ImportThenServe(path) => {
            // Best effort: a failed startup import must not stop the server
            if let Err(e) = run_import(&mut conn, &path) {
                error!("Import failed, serving existing data: {:#}", e);
            }
        }
        Mode::ImportOnly(path) => {
            return run_import(&mut conn, &path);
        }
    }

    serve(conn, cli.bind).await
}

fn run_import(conn: &mut Connection, path: &Path) -> Result<()> {
    let report = importer::import_file(conn, path)
        .with_context(|| format!("Failed to import {}", path.display()))?;

    info!(
        "Imported {} records ({} new countries, {} new banks)",
        report.records_processed, report.countries_created, report.banks_created
    );

    Ok(())
}

async fn serve(conn: Connection, addr: SocketAddr) -> Result<()> {
    let app = api::router(AppState::new(conn));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Server running on http://{}", addr);
    info!("API: http://{}/v1/swift-codes", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
