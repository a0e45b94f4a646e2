use crate::writer::WriteStep;
use std::fmt;

/// Result type for burptocaido-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during a conversion
#[derive(Debug)]
pub enum Error {
    /// Export file or project directory is unusable
    Input(String),

    /// Configuration error
    Config(String),

    /// Export could not be read into items
    Decode(burptocaido_providers::Error),

    /// Request/response body is not valid base64 (strict payload policy)
    Payload {
        position: usize,
        source: burptocaido_providers::Error,
    },

    /// Capture time could not be parsed (abort timestamp policy)
    Timestamp {
        position: usize,
        source: burptocaido_providers::Error,
    },

    /// Storage session could not be set up or a unit of work failed
    Storage(burptocaido_store::Error),

    /// An insert failed while writing an item
    Write {
        position: usize,
        host: String,
        path: String,
        step: WriteStep,
        source: burptocaido_store::Error,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Input(msg) => write!(f, "Input error: {}", msg),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Decode(err) => write!(f, "Decode error: {}", err),
            Error::Payload { position, source } => write!(f, "Item #{}: {}", position, source),
            Error::Timestamp { position, source } => write!(f, "Item #{}: {}", position, source),
            Error::Storage(err) => write!(f, "Storage error: {}", err),
            Error::Write {
                position,
                host,
                path,
                step,
                source,
            } => write!(
                f,
                "Failed to write {} of item #{} ({}{}): {}",
                step, position, host, path, source
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Decode(err) => Some(err),
            Error::Payload { source, .. } | Error::Timestamp { source, .. } => Some(source),
            Error::Storage(err) => Some(err),
            Error::Write { source, .. } => Some(source),
            Error::Input(_) | Error::Config(_) => None,
        }
    }
}

impl From<burptocaido_store::Error> for Error {
    fn from(err: burptocaido_store::Error) -> Self {
        match err {
            burptocaido_store::Error::MissingStore(path) => {
                Error::Input(format!("Caido database does not exist: {}", path.display()))
            }
            other => Error::Storage(other),
        }
    }
}

impl From<burptocaido_providers::Error> for Error {
    fn from(err: burptocaido_providers::Error) -> Self {
        Error::Decode(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}
