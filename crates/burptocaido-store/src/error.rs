use std::fmt;
use std::path::PathBuf;

/// Result type for burptocaido-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the storage layer
#[derive(Debug)]
pub enum Error {
    /// Database operation failed
    Database(rusqlite::Error),

    /// A Caido database file is not where the project layout says it is
    MissingStore(PathBuf),

    /// The raw database could not be attached to the primary connection
    Attach {
        path: PathBuf,
        source: rusqlite::Error,
    },

    /// The project is missing tables a migration writes to
    MissingTables(Vec<String>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Database(err) => {
                let msg = err.to_string();
                // Usually a project written by an unsupported Caido version
                if msg.contains("no such column")
                    || msg.contains("no such table")
                    || msg.contains("has no column named")
                {
                    write!(
                        f,
                        "Caido schema mismatch: {}. Check that the project was created by a supported Caido version.",
                        msg
                    )
                } else {
                    write!(f, "Database error: {}", err)
                }
            }
            Error::MissingStore(path) => {
                write!(f, "Caido database does not exist: {}", path.display())
            }
            Error::Attach { path, source } => {
                write!(f, "Failed to attach {}: {}", path.display(), source)
            }
            Error::MissingTables(tables) => {
                write!(f, "Caido project is missing tables: {}", tables.join(", "))
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Database(err) => Some(err),
            Error::Attach { source, .. } => Some(source),
            Error::MissingStore(_) | Error::MissingTables(_) => None,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(err)
    }
}
