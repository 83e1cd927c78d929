//! SQL schema for the Kin SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Sent invitations are never deleted; a resolved one stays as history.
CREATE TABLE IF NOT EXISTS invitations (
    invitation_id TEXT PRIMARY KEY,
    user_id       TEXT NOT NULL,
    contact_email TEXT NOT NULL,
    relation      TEXT NOT NULL,   -- canonical RelationKind name
    status        TEXT NOT NULL DEFAULT 'pending',  -- 'pending' | 'accepted' | 'rejected'
    created_at    TEXT NOT NULL    -- ISO 8601 UTC; store-assigned
);

-- Inbox rows are deleted the moment a request is accepted or rejected.
CREATE TABLE IF NOT EXISTS incoming_requests (
    request_id     TEXT PRIMARY KEY,  -- assigned by the external sender
    user_id        TEXT NOT NULL,
    proposer_name  TEXT NOT NULL,
    proposer_email TEXT NOT NULL,
    relation       TEXT NOT NULL,
    received_at    TEXT NOT NULL      -- ISO 8601 UTC; store-assigned
);

-- At most one entry per kind per user: first admitted wins, forever.
CREATE TABLE IF NOT EXISTS roster_entries (
    entry_id     TEXT NOT NULL,       -- carried over from the originating request
    user_id      TEXT NOT NULL,
    display_name TEXT NOT NULL,
    relation     TEXT NOT NULL,
    glyph        TEXT NOT NULL,
    PRIMARY KEY (user_id, relation)
);

CREATE INDEX IF NOT EXISTS invitations_user_idx ON invitations(user_id);
CREATE INDEX IF NOT EXISTS requests_user_idx    ON incoming_requests(user_id);

PRAGMA user_version = 1;
";
