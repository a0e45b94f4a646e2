pub mod payload;
pub mod reader;
pub mod timestamp;

pub use payload::{decode_body, decode_payload};
pub use reader::{ITEM_TAG, ItemReader};
pub use timestamp::parse_timestamp_millis;
