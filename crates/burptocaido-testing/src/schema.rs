//! Minimal Caido-compatible schema.
//!
//! Only the tables and columns a migration touches, plus the foreign keys
//! that tie them together. Real projects carry many more columns, all of
//! which are nullable or defaulted.

/// Tables of `database.caido`.
pub const PRIMARY_SCHEMA: &str = r#"
CREATE TABLE responses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    status_code INTEGER NOT NULL,
    raw_id INTEGER NOT NULL,
    length INTEGER NOT NULL,
    alteration TEXT NOT NULL,
    edited INTEGER NOT NULL DEFAULT 0,
    roundtrip_time INTEGER NOT NULL,
    created_at INTEGER NOT NULL
);

CREATE TABLE requests_metadata (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    color TEXT,
    label TEXT
);

CREATE TABLE requests (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    host TEXT NOT NULL,
    method TEXT NOT NULL,
    path TEXT NOT NULL,
    length INTEGER NOT NULL,
    port INTEGER NOT NULL,
    is_tls INTEGER NOT NULL,
    raw_id INTEGER NOT NULL,
    query TEXT NOT NULL DEFAULT '',
    response_id INTEGER REFERENCES responses(id),
    source TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    metadata_id INTEGER NOT NULL REFERENCES requests_metadata(id)
);

CREATE TABLE intercept_entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    request_id INTEGER NOT NULL REFERENCES requests(id)
);
"#;

/// Tables of `database_raw.caido`.
pub const RAW_SCHEMA: &str = r#"
CREATE TABLE responses_raw (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    data BLOB NOT NULL,
    source TEXT NOT NULL,
    alteration TEXT NOT NULL
);

CREATE TABLE requests_raw (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    data BLOB NOT NULL,
    source TEXT NOT NULL,
    alteration TEXT NOT NULL
);
"#;
