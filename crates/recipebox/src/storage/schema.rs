//! `SQLite` schema definitions for recipebox.
//!
//! This module contains the SQL statements for creating the key-value table
//! that backs the persistent store.

/// SQL statement to create the key-value table.
pub const CREATE_KV_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
";

/// SQL statement to read a value by key.
pub const SELECT_VALUE: &str = "SELECT value FROM kv WHERE key = ?1";

/// SQL statement to read the last write time of a key.
pub const SELECT_UPDATED_AT: &str = "SELECT updated_at FROM kv WHERE key = ?1";

/// SQL statement to insert or overwrite a value.
pub const UPSERT_VALUE: &str = r"
INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_KV_TABLE];
