//! Database module
//!
//! SQLite connection pool and migrations for the local session store.

pub mod connection;
pub mod migrations;

pub use connection::{Database, DbError, DbResult};
