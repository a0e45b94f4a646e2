use burptocaido_types::{NewRow, RowId};
use rusqlite::{Connection, Params, params};

use crate::Result;

const INSERT_RESPONSE_RAW: &str = r#"
    INSERT INTO raw.responses_raw (data, source, alteration)
    VALUES (?1, ?2, ?3)
    RETURNING id
"#;

const INSERT_RESPONSE: &str = r#"
    INSERT INTO responses (status_code, raw_id, length, alteration, edited, roundtrip_time, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
    RETURNING id
"#;

const INSERT_REQUEST_RAW: &str = r#"
    INSERT INTO raw.requests_raw (data, source, alteration)
    VALUES (?1, ?2, ?3)
    RETURNING id
"#;

const INSERT_REQUEST_METADATA: &str = "INSERT INTO requests_metadata DEFAULT VALUES RETURNING id";

const INSERT_REQUEST: &str = r#"
    INSERT INTO requests (host, method, path, length, port, is_tls, raw_id, query, response_id,
                          source, created_at, metadata_id)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
    RETURNING id
"#;

const INSERT_INTERCEPT_ENTRY: &str = r#"
    INSERT INTO intercept_entries (request_id)
    VALUES (?1)
    RETURNING id
"#;

/// Insert one row and read its id from the `RETURNING` clause.
pub(crate) fn insert_row(conn: &Connection, row: &NewRow<'_>) -> Result<RowId> {
    match row {
        NewRow::RawResponse(blob) => returning_id(
            conn,
            INSERT_RESPONSE_RAW,
            params![blob.data, blob.source, blob.alteration],
        ),
        NewRow::Response(response) => returning_id(
            conn,
            INSERT_RESPONSE,
            params![
                response.status_code,
                response.raw_id.get(),
                response.length,
                response.alteration,
                response.edited,
                response.roundtrip_time,
                response.created_at
            ],
        ),
        NewRow::RawRequest(blob) => returning_id(
            conn,
            INSERT_REQUEST_RAW,
            params![blob.data, blob.source, blob.alteration],
        ),
        NewRow::RequestMetadata => returning_id(conn, INSERT_REQUEST_METADATA, []),
        NewRow::Request(request) => returning_id(
            conn,
            INSERT_REQUEST,
            params![
                request.host,
                request.method,
                request.path,
                request.length,
                request.port,
                request.is_tls,
                request.raw_id.get(),
                request.query,
                request.response_id.get(),
                request.source,
                request.created_at,
                request.metadata_id.get()
            ],
        ),
        NewRow::InterceptEntry { request_id } => {
            returning_id(conn, INSERT_INTERCEPT_ENTRY, params![request_id.get()])
        }
    }
}

fn returning_id<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<RowId> {
    let mut stmt = conn.prepare_cached(sql)?;
    let id: i64 = stmt.query_row(params, |row| row.get(0))?;
    Ok(RowId(id))
}
