use std::fmt;

/// Result type for burptocaido-providers operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading a Burp export
#[derive(Debug)]
pub enum Error {
    /// IO operation failed
    Io(std::io::Error),

    /// XML is not well-formed
    Xml {
        offset: u64,
        source: quick_xml::Error,
    },

    /// An `<item>` element does not have the expected shape
    Decode { position: usize, message: String },

    /// A request/response body is not valid base64
    Payload {
        field: &'static str,
        source: base64::DecodeError,
    },

    /// Capture time does not match `<weekday> <month> <day> <time> <zone> <year>`
    Timestamp { value: String, reason: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Xml { offset, source } => {
                write!(f, "Malformed XML at byte {}: {}", offset, source)
            }
            Error::Decode { position, message } => {
                write!(f, "Cannot decode item #{}: {}", position, message)
            }
            Error::Payload { field, source } => {
                write!(f, "Invalid base64 in <{}>: {}", field, source)
            }
            Error::Timestamp { value, reason } => {
                write!(f, "Invalid timestamp '{}': {}", value, reason)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Xml { source, .. } => Some(source),
            Error::Payload { source, .. } => Some(source),
            Error::Decode { .. } | Error::Timestamp { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
