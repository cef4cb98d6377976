//! Air Quality Health Report (AQHR)
//!
//! An MCP server for viewing and exporting air quality health reports.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use aqhr::build_info;
use aqhr::config::Config;
use aqhr::db;
use aqhr::mcp::AqhrService;
use aqhr::store::HttpReportStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries the MCP transport
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("aqhr=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let config = Config::from_env();
    eprintln!("Database path: {}", config.database_path.display());
    eprintln!("Report store: {}", config.report_store_url);
    eprintln!("Export directory: {}", config.export_dir.display());

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    eprintln!("Initializing database...");
    let database = db::Database::new(&config.database_path)?;

    database.with_conn(|conn| {
        if db::migrations::needs_migration(conn)? {
            eprintln!("Applying database migrations...");
            db::migrations::run_migrations(conn)?;
        }
        let version = db::migrations::get_schema_version(conn)?;
        eprintln!("Database schema version: {}", version);
        Ok(())
    })?;

    let store = HttpReportStore::new(&config.report_store_url, config.request_timeout)?;

    let service = AqhrService::new(config, database, Arc::new(store));

    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
