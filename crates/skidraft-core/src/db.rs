// SQLite key-value store backing the durable roster slot.

use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

/// SQLite-backed string slots keyed by name.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) a SQLite database at `path` and ensure the slot table
    /// exists. Pass `":memory:"` for an ephemeral in-memory database (useful
    /// for tests).
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {path}"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )
        .context("failed to set database pragmas")?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS kv_store (
                key        TEXT PRIMARY KEY,
                value      TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            );
            ",
        )
        .context("failed to create database schema")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the database connection.
    ///
    /// Panics if the mutex is poisoned (another thread panicked while
    /// holding the lock). This should never happen in normal operation.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("database mutex poisoned")
    }

    /// Write `value` under `key`, overwriting any previous value.
    pub fn save_slot(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value      = excluded.value,
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
            params![key, value],
        )
        .context("failed to save slot")?;
        Ok(())
    }

    /// Read the value stored under `key`. Returns `None` if the key does not
    /// exist.
    pub fn load_slot(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .context("failed to query slot")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Database {
        Database::open(":memory:").expect("in-memory database should open")
    }

    #[test]
    fn open_creates_table() {
        let db = test_db();
        let conn = db.conn();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'kv_store'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn save_and_load_round_trip() {
        let db = test_db();
        db.save_slot("players", "[]").unwrap();
        assert_eq!(db.load_slot("players").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn load_missing_key_is_none() {
        let db = test_db();
        assert!(db.load_slot("nope").unwrap().is_none());
    }

    #[test]
    fn save_overwrites_previous_value() {
        let db = test_db();
        db.save_slot("players", "[1]").unwrap();
        db.save_slot("players", "[2]").unwrap();
        assert_eq!(db.load_slot("players").unwrap().as_deref(), Some("[2]"));
    }

    #[test]
    fn keys_are_independent() {
        let db = test_db();
        db.save_slot("a", "1").unwrap();
        db.save_slot("b", "2").unwrap();
        assert_eq!(db.load_slot("a").unwrap().as_deref(), Some("1"));
        assert_eq!(db.load_slot("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn file_database_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.db");
        let path = path.to_str().unwrap();
        {
            let db = Database::open(path).unwrap();
            db.save_slot("players", "[\"kept\"]").unwrap();
        }
        let db = Database::open(path).unwrap();
        assert_eq!(
            db.load_slot("players").unwrap().as_deref(),
            Some("[\"kept\"]")
        );
    }
}
