mod convert;

pub use convert::{ConvertOptions, ConvertProgress, ConvertSummary, convert};
