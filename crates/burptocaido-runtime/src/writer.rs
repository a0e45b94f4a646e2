//! Six-row write of a single item.
//!
//! Rows are inserted in dependency order so every reference points at an id
//! generated earlier in the same unit of work:
//!
//! ```text
//! raw.responses_raw -> responses -> raw.requests_raw -> requests_metadata
//!     -> requests -> intercept_entries
//! ```

use burptocaido_types::{
    ALTERATION_NONE, InsertReturningId, Item, NewRequest, NewResponse, NewRow, RawBlob, RowId,
    SOURCE_INTERCEPT,
};
use std::fmt;

/// An item whose payloads and timestamp are already decoded, so writing it
/// cannot fail on input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedItem {
    pub position: usize,
    pub item: Item,
    pub request: Vec<u8>,
    pub response: Vec<u8>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStep {
    RawResponse,
    Response,
    RawRequest,
    RequestMetadata,
    Request,
    InterceptEntry,
}

impl fmt::Display for WriteStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WriteStep::RawResponse => "raw response",
            WriteStep::Response => "response",
            WriteStep::RawRequest => "raw request",
            WriteStep::RequestMetadata => "request metadata",
            WriteStep::Request => "request",
            WriteStep::InterceptEntry => "intercept entry",
        };
        f.write_str(name)
    }
}

/// Identifiers generated for one written item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrittenItem {
    pub raw_response_id: RowId,
    pub response_id: RowId,
    pub raw_request_id: RowId,
    pub metadata_id: RowId,
    pub request_id: RowId,
    pub intercept_entry_id: RowId,
}

/// Failed insert, with the step it failed at.
#[derive(Debug)]
pub struct WriteError<E> {
    pub step: WriteStep,
    pub source: E,
}

impl<E: fmt::Display> fmt::Display for WriteError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to write {}: {}", self.step, self.source)
    }
}

impl<E: std::error::Error + 'static> std::error::Error for WriteError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

fn insert<S: InsertReturningId>(
    store: &S,
    step: WriteStep,
    row: NewRow<'_>,
) -> Result<RowId, WriteError<S::Error>> {
    store
        .insert_returning_id(&row)
        .map_err(|source| WriteError { step, source })
}

/// Write the six rows of one item. Stops at the first failed insert; undoing
/// the rows already written is up to the caller's unit of work.
pub fn write_item<S: InsertReturningId>(
    store: &S,
    prepared: &PreparedItem,
) -> Result<WrittenItem, WriteError<S::Error>> {
    let item = &prepared.item;

    let raw_response_id = insert(
        store,
        WriteStep::RawResponse,
        NewRow::RawResponse(RawBlob::intercepted(&prepared.response)),
    )?;

    let response_id = insert(
        store,
        WriteStep::Response,
        NewRow::Response(NewResponse {
            status_code: item.status,
            raw_id: raw_response_id,
            length: item.response_length,
            alteration: ALTERATION_NONE,
            edited: false,
            roundtrip_time: 0,
            created_at: prepared.created_at,
        }),
    )?;

    let raw_request_id = insert(
        store,
        WriteStep::RawRequest,
        NewRow::RawRequest(RawBlob::intercepted(&prepared.request)),
    )?;

    let metadata_id = insert(store, WriteStep::RequestMetadata, NewRow::RequestMetadata)?;

    let request_id = insert(
        store,
        WriteStep::Request,
        NewRow::Request(NewRequest {
            host: &item.host,
            method: &item.method,
            path: &item.path,
            length: prepared.request.len() as i64,
            port: item.port,
            is_tls: item.is_tls(),
            raw_id: raw_request_id,
            query: "",
            response_id,
            source: SOURCE_INTERCEPT,
            created_at: prepared.created_at,
            metadata_id,
        }),
    )?;

    let intercept_entry_id = insert(
        store,
        WriteStep::InterceptEntry,
        NewRow::InterceptEntry { request_id },
    )?;

    Ok(WrittenItem {
        raw_response_id,
        response_id,
        raw_request_id,
        metadata_id,
        request_id,
        intercept_entry_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Debug)]
    struct Rejected(&'static str);

    impl fmt::Display for Rejected {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "rejected insert into {}", self.0)
        }
    }

    impl std::error::Error for Rejected {}

    /// In-memory store handing out ids 10, 20, 30, ... in insert order.
    #[derive(Default)]
    struct FakeStore {
        reject: Option<&'static str>,
        inserted: RefCell<Vec<(&'static str, Vec<i64>)>>,
    }

    impl FakeStore {
        fn rejecting(table: &'static str) -> Self {
            Self {
                reject: Some(table),
                ..Self::default()
            }
        }

        fn tables(&self) -> Vec<&'static str> {
            self.inserted.borrow().iter().map(|(t, _)| *t).collect()
        }
    }

    fn references(row: &NewRow<'_>) -> Vec<i64> {
        match row {
            NewRow::Response(response) => vec![response.raw_id.get()],
            NewRow::Request(request) => vec![
                request.raw_id.get(),
                request.response_id.get(),
                request.metadata_id.get(),
            ],
            NewRow::InterceptEntry { request_id } => vec![request_id.get()],
            NewRow::RawResponse(_) | NewRow::RawRequest(_) | NewRow::RequestMetadata => vec![],
        }
    }

    impl InsertReturningId for FakeStore {
        type Error = Rejected;

        fn insert_returning_id(&self, row: &NewRow<'_>) -> Result<RowId, Rejected> {
            let table = row.table();
            if self.reject == Some(table) {
                return Err(Rejected(table));
            }
            let mut inserted = self.inserted.borrow_mut();
            inserted.push((table, references(row)));
            Ok(RowId(inserted.len() as i64 * 10))
        }
    }

    fn prepared() -> PreparedItem {
        PreparedItem {
            position: 1,
            item: Item {
                host: "example.com".to_string(),
                port: 443,
                protocol: "https".to_string(),
                method: "GET".to_string(),
                path: "/".to_string(),
                status: 200,
                response_length: 5,
                ..Item::default()
            },
            request: b"GET / HTTP/1.1\r\n\r\n".to_vec(),
            response: b"hello".to_vec(),
            created_at: 1686738125000,
        }
    }

    #[test]
    fn test_inserts_in_dependency_order() {
        let store = FakeStore::default();
        write_item(&store, &prepared()).unwrap();

        assert_eq!(
            store.tables(),
            vec![
                "raw.responses_raw",
                "responses",
                "raw.requests_raw",
                "requests_metadata",
                "requests",
                "intercept_entries",
            ]
        );
    }

    #[test]
    fn test_references_use_generated_ids() {
        let store = FakeStore::default();
        let written = write_item(&store, &prepared()).unwrap();

        assert_eq!(written.raw_response_id, RowId(10));
        assert_eq!(written.response_id, RowId(20));
        assert_eq!(written.raw_request_id, RowId(30));
        assert_eq!(written.metadata_id, RowId(40));
        assert_eq!(written.request_id, RowId(50));
        assert_eq!(written.intercept_entry_id, RowId(60));

        let inserted = store.inserted.borrow();
        assert_eq!(inserted[1].1, vec![10]);
        assert_eq!(inserted[4].1, vec![30, 20, 40]);
        assert_eq!(inserted[5].1, vec![50]);
    }

    #[test]
    fn test_failed_insert_stops_the_sequence() {
        let store = FakeStore::rejecting("requests");
        let err = write_item(&store, &prepared()).unwrap_err();

        assert_eq!(err.step, WriteStep::Request);
        assert_eq!(
            err.to_string(),
            "Failed to write request: rejected insert into requests"
        );
        assert_eq!(store.tables().len(), 4);
    }

    #[test]
    fn test_request_row_fields() {
        struct Capture(RefCell<Option<(i64, bool, u16, i64)>>);

        impl InsertReturningId for Capture {
            type Error = Rejected;

            fn insert_returning_id(&self, row: &NewRow<'_>) -> Result<RowId, Rejected> {
                if let NewRow::Request(request) = row {
                    *self.0.borrow_mut() = Some((
                        request.length,
                        request.is_tls,
                        request.port,
                        request.created_at,
                    ));
                    assert_eq!(request.query, "");
                    assert_eq!(request.source, "intercept");
                }
                Ok(RowId(1))
            }
        }

        let store = Capture(RefCell::new(None));
        let item = prepared();
        write_item(&store, &item).unwrap();

        assert_eq!(
            *store.0.borrow(),
            Some((item.request.len() as i64, true, 443, 1686738125000))
        );
    }
}
