use burptocaido_types::{PayloadPolicy, TimestampPolicy, TransactionScope};
use clap::ValueEnum;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    Plain,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum PayloadPolicyArg {
    Strict,
    Lenient,
}

impl From<PayloadPolicyArg> for PayloadPolicy {
    fn from(arg: PayloadPolicyArg) -> Self {
        match arg {
            PayloadPolicyArg::Strict => PayloadPolicy::Strict,
            PayloadPolicyArg::Lenient => PayloadPolicy::Lenient,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum TimestampPolicyArg {
    Abort,
    Skip,
}

impl From<TimestampPolicyArg> for TimestampPolicy {
    fn from(arg: TimestampPolicyArg) -> Self {
        match arg {
            TimestampPolicyArg::Abort => TimestampPolicy::Abort,
            TimestampPolicyArg::Skip => TimestampPolicy::Skip,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum TransactionScopeArg {
    Item,
    Run,
}

impl From<TransactionScopeArg> for TransactionScope {
    fn from(arg: TransactionScopeArg) -> Self {
        match arg {
            TransactionScopeArg::Item => TransactionScope::Item,
            TransactionScopeArg::Run => TransactionScope::Run,
        }
    }
}
