use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use burptocaido_types::{Body, BodyEncoding};

use crate::{Error, Result};

/// Decode standard (padded) base64 text into raw bytes.
///
/// Exports that wrap long bodies across lines are accepted; ASCII
/// whitespace is dropped before decoding.
pub fn decode_payload(text: &str) -> std::result::Result<Vec<u8>, base64::DecodeError> {
    if !text.bytes().any(|b| b.is_ascii_whitespace()) {
        return STANDARD.decode(text);
    }

    let compact: Vec<u8> = text
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    STANDARD.decode(compact)
}

/// Turn a `<request>`/`<response>` body into the bytes that get stored.
///
/// `field` names the element for error messages.
pub fn decode_body(body: &Body, field: &'static str) -> Result<Vec<u8>> {
    match body.encoding {
        BodyEncoding::Plain => Ok(body.text.as_bytes().to_vec()),
        BodyEncoding::Base64 => {
            decode_payload(&body.text).map_err(|source| Error::Payload { field, source })
        }
    }
}
