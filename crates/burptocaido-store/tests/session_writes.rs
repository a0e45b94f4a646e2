use anyhow::Result;
use burptocaido_store::{Error, Session};
use burptocaido_testing::CaidoProject;
use burptocaido_testing::assertions::{assert_row_counts, load_requests};
use burptocaido_types::{
    ALTERATION_NONE, InsertReturningId, NewRequest, NewResponse, NewRow, RawBlob, SOURCE_INTERCEPT,
};

fn write_chain(unit: &impl InsertReturningId<Error = Error>, host: &str) -> Result<()> {
    let raw_response = unit.insert_returning_id(&NewRow::RawResponse(RawBlob::intercepted(
        b"HTTP/1.1 204 No Content\r\n\r\n",
    )))?;
    let response = unit.insert_returning_id(&NewRow::Response(NewResponse {
        status_code: 204,
        raw_id: raw_response,
        length: 0,
        alteration: ALTERATION_NONE,
        edited: false,
        roundtrip_time: 0,
        created_at: 1686738125000,
    }))?;
    let raw_request =
        unit.insert_returning_id(&NewRow::RawRequest(RawBlob::intercepted(b"GET / HTTP/1.1\r\n\r\n")))?;
    let metadata = unit.insert_returning_id(&NewRow::RequestMetadata)?;
    let request = unit.insert_returning_id(&NewRow::Request(NewRequest {
        host,
        method: "GET",
        path: "/",
        length: 18,
        port: 443,
        is_tls: true,
        raw_id: raw_request,
        query: "",
        response_id: response,
        source: SOURCE_INTERCEPT,
        created_at: 1686738125000,
        metadata_id: metadata,
    }))?;
    unit.insert_returning_id(&NewRow::InterceptEntry { request_id: request })?;
    Ok(())
}

#[test]
fn test_committed_chain_is_linked() -> Result<()> {
    let project = CaidoProject::new()?;
    let mut session = Session::open(project.path())?;

    let unit = session.begin()?;
    write_chain(&unit, "example.com")?;
    write_chain(&unit, "example.org")?;
    unit.commit()?;
    session.close()?;

    assert_row_counts(&project, 2)?;
    let requests = load_requests(&project)?;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].host, "example.com");
    assert_eq!(requests[0].response_data, b"HTTP/1.1 204 No Content\r\n\r\n");
    assert_eq!(requests[1].status_code, 204);
    assert!(requests.iter().all(|r| r.intercept_entries == 1));

    Ok(())
}

#[test]
fn test_rolled_back_unit_leaves_no_rows() -> Result<()> {
    let project = CaidoProject::new()?;
    let mut session = Session::open(project.path())?;

    let unit = session.begin()?;
    write_chain(&unit, "example.com")?;
    unit.rollback()?;

    assert_row_counts(&project, 0)?;
    Ok(())
}

#[test]
fn test_rejected_insert_surfaces_database_error() -> Result<()> {
    let project = CaidoProject::new()?;
    project.reject_host("blocked.example")?;
    let mut session = Session::open(project.path())?;

    let unit = session.begin()?;
    let err = write_chain(&unit, "blocked.example").unwrap_err();
    let err = err.downcast::<Error>()?;
    assert!(matches!(err, Error::Database(_)));
    assert!(err.to_string().contains("host rejected"));

    Ok(())
}

#[test]
fn test_schema_mismatch_hint() -> Result<()> {
    let project = CaidoProject::new()?;
    project.drop_table("intercept_entries")?;
    {
        let conn = project.connect()?;
        conn.execute_batch("CREATE TABLE intercept_entries (id INTEGER PRIMARY KEY AUTOINCREMENT)")?;
    }
    let mut session = Session::open(project.path())?;

    let unit = session.begin()?;
    let err = write_chain(&unit, "example.com").unwrap_err();
    assert!(err.to_string().contains("Caido schema mismatch"));

    Ok(())
}
