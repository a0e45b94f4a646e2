//! Checks over what a migration left in a Caido project.
//!
//! Provides high-level assertions that make tests more readable:
//! - Row counts across both stores
//! - Requests loaded back through every cross-store reference

use anyhow::{Context, Result};

use crate::CaidoProject;

/// Tables a migrated item produces one row in.
pub const MIGRATED_TABLES: [&str; 6] = [
    "responses",
    "requests",
    "requests_metadata",
    "intercept_entries",
    "raw.responses_raw",
    "raw.requests_raw",
];

/// A request joined with its response, metadata, raw blobs and intercept
/// entries. Rows whose references do not resolve are not returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRequest {
    pub id: i64,
    pub host: String,
    pub method: String,
    pub path: String,
    pub length: i64,
    pub port: i64,
    pub is_tls: bool,
    pub query: String,
    pub source: String,
    pub created_at: i64,
    pub request_data: Vec<u8>,
    pub request_source: String,
    pub request_alteration: String,
    pub status_code: i64,
    pub response_length: i64,
    pub response_alteration: String,
    pub response_edited: bool,
    pub roundtrip_time: i64,
    pub response_created_at: i64,
    pub response_data: Vec<u8>,
    pub response_source: String,
    pub intercept_entries: i64,
}

/// Load every request that is fully linked across both stores, by id.
pub fn load_requests(project: &CaidoProject) -> Result<Vec<StoredRequest>> {
    let conn = project.connect()?;
    let mut stmt = conn.prepare(
        r#"
        SELECT r.id, r.host, r.method, r.path, r.length, r.port, r.is_tls, r.query, r.source,
               r.created_at, rq.data, rq.source, rq.alteration, rs.status_code, rs.length,
               rs.alteration, rs.edited, rs.roundtrip_time, rs.created_at, rsr.data, rsr.source,
               (SELECT COUNT(*) FROM intercept_entries ie WHERE ie.request_id = r.id)
        FROM requests r
        JOIN raw.requests_raw rq ON rq.id = r.raw_id
        JOIN responses rs ON rs.id = r.response_id
        JOIN raw.responses_raw rsr ON rsr.id = rs.raw_id
        JOIN requests_metadata m ON m.id = r.metadata_id
        ORDER BY r.id
        "#,
    )?;

    let requests = stmt
        .query_map([], |row| {
            Ok(StoredRequest {
                id: row.get(0)?,
                host: row.get(1)?,
                method: row.get(2)?,
                path: row.get(3)?,
                length: row.get(4)?,
                port: row.get(5)?,
                is_tls: row.get(6)?,
                query: row.get(7)?,
                source: row.get(8)?,
                created_at: row.get(9)?,
                request_data: row.get(10)?,
                request_source: row.get(11)?,
                request_alteration: row.get(12)?,
                status_code: row.get(13)?,
                response_length: row.get(14)?,
                response_alteration: row.get(15)?,
                response_edited: row.get(16)?,
                roundtrip_time: row.get(17)?,
                response_created_at: row.get(18)?,
                response_data: row.get(19)?,
                response_source: row.get(20)?,
                intercept_entries: row.get(21)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(requests)
}

/// Assert every migrated table holds exactly `expected` rows.
pub fn assert_row_counts(project: &CaidoProject, expected: i64) -> Result<()> {
    for table in MIGRATED_TABLES {
        let count = project
            .count(table)
            .with_context(|| format!("Failed to count {}", table))?;
        if count != expected {
            anyhow::bail!("Expected {} rows in {}, got {}", expected, table, count);
        }
    }
    Ok(())
}
