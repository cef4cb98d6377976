//! Session token tools

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::Database;
use crate::models::Session;

#[derive(Debug, Serialize)]
pub struct SetSessionResponse {
    pub success: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub active: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ClearSessionResponse {
    pub success: bool,
    pub cleared: bool,
    pub message: String,
}

/// Parse an optional RFC 3339 expiry; blank counts as absent
pub fn parse_expiry(raw: Option<&str>) -> Result<Option<DateTime<Utc>>, String> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|e| format!("Invalid expires_at {:?}: {}", s, e)),
    }
}

pub fn set_session_token(
    db: &Database,
    token: &str,
    expires_at: Option<&str>,
) -> Result<SetSessionResponse, String> {
    let token = token.trim();
    if token.is_empty() {
        return Err("Token must not be empty".to_string());
    }
    let expires_at = parse_expiry(expires_at)?;

    let session = db
        .with_conn(|conn| Session::set(conn, token, expires_at))
        .map_err(|e| format!("Failed to store session: {}", e))?;

    let active = session.is_active(Utc::now());
    tracing::debug!(active, expires_at = ?session.expires_at, "Session token stored");

    Ok(SetSessionResponse {
        success: true,
        expires_at: session.expires_at,
        active,
        message: if active {
            "Session token stored".to_string()
        } else {
            "Session token stored but already expired".to_string()
        },
    })
}

pub fn clear_session_token(db: &Database) -> Result<ClearSessionResponse, String> {
    let cleared = db
        .with_conn(Session::clear)
        .map_err(|e| format!("Failed to clear session: {}", e))?;

    Ok(ClearSessionResponse {
        success: true,
        cleared,
        message: if cleared {
            "Session token cleared".to_string()
        } else {
            "No session token was stored".to_string()
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn database() -> Database {
        let db = Database::in_memory().unwrap();
        db.with_conn(|conn| run_migrations(conn)).unwrap();
        db
    }

    #[test]
    fn test_parse_expiry() {
        assert_eq!(parse_expiry(None).unwrap(), None);
        assert_eq!(parse_expiry(Some("  ")).unwrap(), None);
        let dt = parse_expiry(Some("2030-01-01T00:00:00+02:00")).unwrap().unwrap();
        assert_eq!(dt.to_rfc3339(), "2029-12-31T22:00:00+00:00");
        assert!(parse_expiry(Some("tomorrow")).is_err());
    }

    #[test]
    fn test_set_and_clear() {
        let db = database();

        let set = set_session_token(&db, " abc ", Some("2999-01-01T00:00:00Z")).unwrap();
        assert!(set.success);
        assert!(set.active);
        let token = db
            .with_conn(|conn| Session::active_token(conn, Utc::now()))
            .unwrap();
        assert_eq!(token.as_deref(), Some("abc"));

        let cleared = clear_session_token(&db).unwrap();
        assert!(cleared.cleared);
        let again = clear_session_token(&db).unwrap();
        assert!(!again.cleared);
    }

    #[test]
    fn test_expired_token_is_stored_inactive() {
        let db = database();
        let set = set_session_token(&db, "abc", Some("2000-01-01T00:00:00Z")).unwrap();
        assert!(!set.active);
    }

    #[test]
    fn test_blank_token_rejected() {
        let db = database();
        assert!(set_session_token(&db, "   ", None).is_err());
    }
}
