//! Session model
//!
//! Bearer token for the report store, kept in a single-row table.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Serialize;

use crate::db::{DbError, DbResult};

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub token: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: String,
    pub updated_at: String,
}

struct SessionRow {
    token: String,
    expires_at: Option<String>,
    created_at: String,
    updated_at: String,
}

impl SessionRow {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            token: row.get("token")?,
            expires_at: row.get("expires_at")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

impl Session {
    pub fn get(conn: &Connection) -> DbResult<Option<Self>> {
        let row = conn
            .query_row("SELECT * FROM session WHERE id = 1", [], SessionRow::from_row)
            .optional()?;

        row.map(|r| {
            let expires_at = r
                .expires_at
                .as_deref()
                .map(|s| {
                    DateTime::parse_from_rfc3339(s)
                        .map(|dt| dt.with_timezone(&Utc))
                        .map_err(|e| DbError::InvalidValue(format!("session.expires_at {s:?}: {e}")))
                })
                .transpose()?;
            Ok(Self {
                token: r.token,
                expires_at,
                created_at: r.created_at,
                updated_at: r.updated_at,
            })
        })
        .transpose()
    }

    /// Store the token (upsert), replacing any previous session
    pub fn set(conn: &Connection, token: &str, expires_at: Option<DateTime<Utc>>) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO session (id, token, expires_at)
            VALUES (1, ?1, ?2)
            ON CONFLICT(id) DO UPDATE SET
                token = excluded.token,
                expires_at = excluded.expires_at,
                updated_at = datetime('now')
            "#,
            params![token, expires_at.map(|dt| dt.to_rfc3339())],
        )?;

        Self::get(conn)?.ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Returns whether a session was removed
    pub fn clear(conn: &Connection) -> DbResult<bool> {
        let removed = conn.execute("DELETE FROM session WHERE id = 1", [])?;
        Ok(removed > 0)
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.token.trim().is_empty() && self.expires_at.map_or(true, |exp| exp > now)
    }

    /// The stored token, if present and not expired at `now`
    pub fn active_token(conn: &Connection, now: DateTime<Utc>) -> DbResult<Option<String>> {
        Ok(Self::get(conn)?
            .filter(|s| s.is_active(now))
            .map(|s| s.token))
    }
}
