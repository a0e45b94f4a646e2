use crate::types::{
    LogLevel, OutputFormat, PayloadPolicyArg, TimestampPolicyArg, TransactionScopeArg,
};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "burptocaido")]
#[command(about = "Migrate a Burp Suite HTTP history export into a Caido project", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Burp Suite XML export ("Save items")
    #[arg(long, value_name = "XML")]
    pub burp: PathBuf,

    /// Caido project directory holding database.caido and database_raw.caido
    #[arg(long, value_name = "PROJECT_DIR")]
    pub caido: PathBuf,

    /// TOML config file
    #[arg(long, value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// How to handle request/response bodies that are not valid base64
    #[arg(long)]
    pub payload_policy: Option<PayloadPolicyArg>,

    /// How to handle items whose capture time cannot be parsed
    #[arg(long)]
    pub on_bad_timestamp: Option<TimestampPolicyArg>,

    /// Commit after every item, or once for the whole export
    #[arg(long)]
    pub transaction_scope: Option<TransactionScopeArg>,

    #[arg(long, default_value = "plain")]
    pub format: OutputFormat,

    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,
}
