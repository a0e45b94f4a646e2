pub mod item;
pub mod policy;
pub mod rows;

pub use item::{Body, BodyEncoding, Item};
pub use policy::{PayloadPolicy, TimestampPolicy, TransactionScope};
pub use rows::{
    ALTERATION_NONE, InsertReturningId, NewRequest, NewResponse, NewRow, RawBlob, RowId,
    SOURCE_INTERCEPT,
};
