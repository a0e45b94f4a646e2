use crate::args::Cli;
use crate::types::{LogLevel, OutputFormat};
use anyhow::Result;
use burptocaido_runtime::{Config, ConvertOptions, ConvertProgress, ConvertSummary, convert};
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub fn run(cli: Cli) -> Result<()> {
    setup_logging(cli.log_level);

    let config = load_config(cli.config.as_deref())?;
    let options = resolve_options(&cli, &config);
    tracing::debug!(?options, "Resolved conversion options");

    let format = cli.format;
    let summary = convert(&cli.burp, &cli.caido, &options, |progress| {
        report_progress(format, progress)
    })?;

    print_summary(format, &cli.caido, &summary)
}

/// Logs go to stderr so that stdout only carries the summary. `RUST_LOG`
/// takes precedence over `--log-level`.
fn setup_logging(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.to_string()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file does not exist: {}", path.display());
            }
            Ok(Config::load_from(path)?)
        }
        None => Ok(Config::default()),
    }
}

/// Flags win over the config file, which wins over the defaults.
pub(crate) fn resolve_options(cli: &Cli, config: &Config) -> ConvertOptions {
    let mut options = ConvertOptions::from_config(config);

    if let Some(policy) = cli.payload_policy {
        options.payload_policy = policy.into();
    }
    if let Some(policy) = cli.on_bad_timestamp {
        options.timestamp_policy = policy.into();
    }
    if let Some(scope) = cli.transaction_scope {
        options.transaction_scope = scope.into();
    }

    options
}

fn report_progress(format: OutputFormat, progress: ConvertProgress) {
    if format != OutputFormat::Plain {
        return;
    }

    match progress {
        ConvertProgress::ItemSkipped { position, reason } => {
            eprintln!("Skipped item #{}: {}", position, reason);
        }
        ConvertProgress::PayloadFallback {
            position, field, ..
        } => {
            eprintln!("Item #{}: stored empty <{}> payload", position, field);
        }
        _ => {}
    }
}

fn print_summary(format: OutputFormat, project_dir: &Path, summary: &ConvertSummary) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(summary)?);
        }
        OutputFormat::Plain => {
            println!(
                "Migrated {} items into {} (transaction scope: {})",
                summary.items_written,
                project_dir.display(),
                summary.scope
            );
            if summary.items_skipped > 0 {
                println!("Skipped {} items", summary.items_skipped);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use burptocaido_types::{PayloadPolicy, TimestampPolicy, TransactionScope};
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["burptocaido", "--burp", "h.xml", "--caido", "project"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn test_defaults_without_flags_or_config() {
        let options = resolve_options(&parse(&[]), &Config::default());
        assert_eq!(options, ConvertOptions::default());
    }

    #[test]
    fn test_config_values_apply() {
        let mut config = Config::default();
        config.conversion.payload_policy = PayloadPolicy::Lenient;
        config.store.enforce_foreign_keys = true;

        let options = resolve_options(&parse(&[]), &config);
        assert_eq!(options.payload_policy, PayloadPolicy::Lenient);
        assert!(options.session.enforce_foreign_keys);
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = Config::default();
        config.conversion.payload_policy = PayloadPolicy::Lenient;
        config.conversion.transaction_scope = TransactionScope::Run;

        let cli = parse(&[
            "--payload-policy",
            "strict",
            "--on-bad-timestamp",
            "skip",
        ]);
        let options = resolve_options(&cli, &config);

        assert_eq!(options.payload_policy, PayloadPolicy::Strict);
        assert_eq!(options.timestamp_policy, TimestampPolicy::Skip);
        assert_eq!(options.transaction_scope, TransactionScope::Run);
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let err = load_config(Some(Path::new("/nonexistent/burptocaido.toml"))).unwrap_err();
        assert!(err.to_string().contains("Config file does not exist"));
    }
}
