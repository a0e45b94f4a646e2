use std::fmt;

/// Source tag written on every migrated row.
pub const SOURCE_INTERCEPT: &str = "intercept";

/// Alteration tag for payloads that were never edited.
pub const ALTERATION_NONE: &str = "none";

/// Identifier generated by the destination store for an inserted row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId(pub i64);

impl RowId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Binary payload kept in the raw store, apart from its metadata row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawBlob<'a> {
    pub data: &'a [u8],
    pub source: &'static str,
    pub alteration: &'static str,
}

impl<'a> RawBlob<'a> {
    pub fn intercepted(data: &'a [u8]) -> Self {
        Self {
            data,
            source: SOURCE_INTERCEPT,
            alteration: ALTERATION_NONE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewResponse {
    pub status_code: u16,
    pub raw_id: RowId,
    pub length: i64,
    pub alteration: &'static str,
    pub edited: bool,
    pub roundtrip_time: i64,
    pub created_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewRequest<'a> {
    pub host: &'a str,
    pub method: &'a str,
    pub path: &'a str,
    pub length: i64,
    pub port: u16,
    pub is_tls: bool,
    pub raw_id: RowId,
    pub query: &'a str,
    pub response_id: RowId,
    pub source: &'static str,
    pub created_at: i64,
    pub metadata_id: RowId,
}

/// One destination row, borrowed from the item being converted.
///
/// Variants are listed in the order a single item has to be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewRow<'a> {
    RawResponse(RawBlob<'a>),
    Response(NewResponse),
    RawRequest(RawBlob<'a>),
    RequestMetadata,
    Request(NewRequest<'a>),
    InterceptEntry { request_id: RowId },
}

impl NewRow<'_> {
    /// Qualified destination table, as addressed from the primary store.
    pub fn table(&self) -> &'static str {
        match self {
            NewRow::RawResponse(_) => "raw.responses_raw",
            NewRow::Response(_) => "responses",
            NewRow::RawRequest(_) => "raw.requests_raw",
            NewRow::RequestMetadata => "requests_metadata",
            NewRow::Request(_) => "requests",
            NewRow::InterceptEntry { .. } => "intercept_entries",
        }
    }
}

/// Capability to insert a row and get its generated identifier back in the
/// same operation.
///
/// Implementations must not look the identifier up afterwards by value; the
/// id has to come from the insert itself.
pub trait InsertReturningId {
    type Error: std::error::Error + Send + Sync + 'static;

    fn insert_returning_id(&self, row: &NewRow<'_>) -> Result<RowId, Self::Error>;
}

impl<T: InsertReturningId + ?Sized> InsertReturningId for &T {
    type Error = T::Error;

    fn insert_returning_id(&self, row: &NewRow<'_>) -> Result<RowId, Self::Error> {
        (**self).insert_returning_id(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intercepted_blob_tags() {
        let blob = RawBlob::intercepted(b"abc");
        assert_eq!(blob.source, "intercept");
        assert_eq!(blob.alteration, "none");
        assert_eq!(blob.data, b"abc");
    }

    #[test]
    fn test_raw_rows_target_attached_store() {
        let blob = RawBlob::intercepted(b"");
        assert_eq!(NewRow::RawResponse(blob).table(), "raw.responses_raw");
        assert_eq!(NewRow::RawRequest(blob).table(), "raw.requests_raw");
        assert_eq!(NewRow::RequestMetadata.table(), "requests_metadata");
        assert_eq!(
            NewRow::InterceptEntry {
                request_id: RowId(1)
            }
            .table(),
            "intercept_entries"
        );
    }
}
