pub mod config;
pub mod error;
pub mod ops;
pub mod writer;

pub use config::{Config, ConversionConfig, StoreConfig};
pub use error::{Error, Result};
pub use ops::{ConvertOptions, ConvertProgress, ConvertSummary, convert};
pub use writer::{PreparedItem, WriteError, WriteStep, WrittenItem, write_item};
