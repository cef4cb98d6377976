//! Utility to store the report store session token in the database
//!
//! Usage: set_session_token <token> [expires_at (RFC 3339)]

use chrono::Utc;

use aqhr::config::Config;
use aqhr::models::Session;
use aqhr::tools::session::parse_expiry;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let token = args
        .next()
        .filter(|t| !t.trim().is_empty())
        .ok_or("usage: set_session_token <token> [expires_at]")?;
    let expires_at = parse_expiry(args.next().as_deref())?;

    let config = Config::from_env();
    println!("Database path: {}", config.database_path.display());
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = aqhr::db::Database::new(&config.database_path)?;

    database.with_conn(|conn| {
        aqhr::db::migrations::run_migrations(conn)?;
        Ok(())
    })?;

    database.with_conn(|conn| {
        let session = Session::set(conn, token.trim(), expires_at)?;
        println!("Session token set:");
        match session.expires_at {
            Some(exp) => println!("  Expires: {}", exp.to_rfc3339()),
            None => println!("  Expires: never"),
        }
        println!("  Active: {}", session.is_active(Utc::now()));
        println!("  Updated: {}", session.updated_at);
        Ok(())
    })?;

    Ok(())
}
