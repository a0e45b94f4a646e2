// Caido project storage
// Primary store plus the raw blob store, attached under one connection

mod error;
mod insert;
pub mod layout;
mod session;

// Public API
pub use error::{Error, Result};
pub use layout::{PRIMARY_DB_FILE, RAW_ALIAS, RAW_DB_FILE, REQUIRED_TABLES};
pub use session::{Session, SessionOptions, Unit};
