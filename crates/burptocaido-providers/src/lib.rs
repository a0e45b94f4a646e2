// Error types
pub mod error;

// Burp Suite history export
pub mod burp;

pub use burp::{ItemReader, decode_body, decode_payload, parse_timestamp_millis};
pub use error::{Error, Result};
