use serde::{Deserialize, Serialize};
use std::fmt;

/// What to do when a request/response body is not valid base64.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadPolicy {
    /// Abort the run with a payload error.
    #[default]
    Strict,
    /// Store an empty body and keep going.
    Lenient,
}

/// What to do when an item's timestamp cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampPolicy {
    /// Abort the whole run.
    #[default]
    Abort,
    /// Report the item and continue with the next one.
    Skip,
}

/// Transaction boundary used while writing items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionScope {
    /// One transaction per item; earlier items survive a later failure.
    #[default]
    Item,
    /// One transaction for the whole export; any failure rolls everything back.
    Run,
}

impl fmt::Display for PayloadPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadPolicy::Strict => write!(f, "strict"),
            PayloadPolicy::Lenient => write!(f, "lenient"),
        }
    }
}

impl fmt::Display for TimestampPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampPolicy::Abort => write!(f, "abort"),
            TimestampPolicy::Skip => write!(f, "skip"),
        }
    }
}

impl fmt::Display for TransactionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionScope::Item => write!(f, "item"),
            TransactionScope::Run => write!(f, "run"),
        }
    }
}
