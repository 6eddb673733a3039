//! SQL schema for the chuckle SQLite store.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// `AUTOINCREMENT` keeps ids strictly increasing and never reused, even after
/// the newest row is gone. `created_at` is filled in by SQLite at insert time
/// as an RFC 3339 UTC string with millisecond precision. WAL mode is a
/// property of the database file, so setting it here once is enough.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS jokes (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    joke_text   TEXT NOT NULL,
    created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);
";
