//! SQL schema for the recast SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- AUTOINCREMENT so ids are never handed out twice.
-- Rows are never deleted.
CREATE TABLE IF NOT EXISTS sentences (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    original    TEXT    NOT NULL CHECK (length(trim(original)) > 0),
    rewrite     TEXT,              -- NULL until saved; '' is a blank rewrite
    seen        INTEGER NOT NULL DEFAULT 0 CHECK (seen IN (0, 1)),
    created_at  TEXT    NOT NULL,  -- RFC 3339 UTC
    updated_at  TEXT,              -- RFC 3339 UTC; NULL if never touched
    CHECK (seen = 1 OR rewrite IS NULL)
);

CREATE INDEX IF NOT EXISTS sentences_seen_idx ON sentences(seen);

PRAGMA user_version = 1;
";
