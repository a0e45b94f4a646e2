use burptocaido_providers::{ItemReader, decode_body, parse_timestamp_millis};
use burptocaido_store::{Session, SessionOptions};
use burptocaido_types::{Body, Item, PayloadPolicy, TimestampPolicy, TransactionScope};
use serde::Serialize;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::writer::{PreparedItem, WriteError, WrittenItem, write_item};
use crate::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    pub payload_policy: PayloadPolicy,
    pub timestamp_policy: TimestampPolicy,
    pub transaction_scope: TransactionScope,
    pub session: SessionOptions,
}

impl ConvertOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            payload_policy: config.conversion.payload_policy,
            timestamp_policy: config.conversion.timestamp_policy,
            transaction_scope: config.conversion.transaction_scope,
            session: config.session_options(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ConvertProgress {
    StoreOpened {
        primary: PathBuf,
        raw: PathBuf,
    },
    PayloadFallback {
        position: usize,
        field: &'static str,
        reason: String,
    },
    ItemSkipped {
        position: usize,
        reason: String,
    },
    ItemWritten {
        position: usize,
        written: WrittenItem,
    },
    Completed(ConvertSummary),
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConvertSummary {
    pub items_written: usize,
    pub items_skipped: usize,
    pub scope: TransactionScope,
}

/// Migrate every item of a Burp export into the Caido project at
/// `project_dir`.
///
/// Both the export and the project databases are checked before the first
/// item is parsed. With [`TransactionScope::Item`] each item commits on its
/// own, so a failure leaves the items before it in place; with
/// [`TransactionScope::Run`] nothing is kept unless every item succeeds.
pub fn convert<F>(
    input: &Path,
    project_dir: &Path,
    options: &ConvertOptions,
    mut on_progress: F,
) -> Result<ConvertSummary>
where
    F: FnMut(ConvertProgress),
{
    if !input.is_file() {
        return Err(Error::Input(format!(
            "Burp export does not exist: {}",
            input.display()
        )));
    }

    let mut session = Session::open_with(project_dir, &options.session)?;
    on_progress(ConvertProgress::StoreOpened {
        primary: session.primary_path().to_path_buf(),
        raw: session.raw_path().to_path_buf(),
    });

    let mut reader = ItemReader::open(input)
        .map_err(|err| Error::Input(format!("Cannot open {}: {}", input.display(), err)))?;

    let (items_written, items_skipped) = match options.transaction_scope {
        TransactionScope::Item => {
            convert_items(&mut reader, options, &mut on_progress, |prepared| {
                let unit = session.begin()?;
                let written = write_item(&unit, prepared).map_err(|err| write_error(prepared, err))?;
                unit.commit()?;
                Ok(written)
            })?
        }
        TransactionScope::Run => {
            let unit = session.begin()?;
            let counts = convert_items(&mut reader, options, &mut on_progress, |prepared| {
                write_item(&unit, prepared).map_err(|err| write_error(prepared, err))
            })?;
            unit.commit()?;
            counts
        }
    };

    session.close()?;

    let summary = ConvertSummary {
        items_written,
        items_skipped,
        scope: options.transaction_scope,
    };
    tracing::info!(
        items_written,
        items_skipped,
        scope = %options.transaction_scope,
        "Conversion completed"
    );
    on_progress(ConvertProgress::Completed(summary));

    Ok(summary)
}

/// Drive the reader to the end, handing every prepared item to `write`.
/// Returns the written and skipped counts.
fn convert_items<R, F, W>(
    reader: &mut ItemReader<R>,
    options: &ConvertOptions,
    on_progress: &mut F,
    mut write: W,
) -> Result<(usize, usize)>
where
    R: BufRead,
    F: FnMut(ConvertProgress),
    W: FnMut(&PreparedItem) -> Result<WrittenItem>,
{
    let mut written_count = 0;
    let mut skipped_count = 0;

    while let Some(next) = reader.next() {
        let item = next?;
        let position = reader.item_position();

        let Some(prepared) = prepare(item, position, options, on_progress)? else {
            skipped_count += 1;
            continue;
        };

        let written = write(&prepared)?;
        tracing::debug!(
            position,
            host = %prepared.item.host,
            path = %prepared.item.path,
            request_id = %written.request_id,
            "Wrote item"
        );
        on_progress(ConvertProgress::ItemWritten { position, written });
        written_count += 1;
    }

    Ok((written_count, skipped_count))
}

/// Decode everything that can fail on input, so a skipped item leaves no
/// rows behind. `None` means the item is skipped.
fn prepare<F>(
    item: Item,
    position: usize,
    options: &ConvertOptions,
    on_progress: &mut F,
) -> Result<Option<PreparedItem>>
where
    F: FnMut(ConvertProgress),
{
    let created_at = match parse_timestamp_millis(&item.time) {
        Ok(millis) => millis,
        Err(source) => match options.timestamp_policy {
            TimestampPolicy::Abort => return Err(Error::Timestamp { position, source }),
            TimestampPolicy::Skip => {
                tracing::warn!(position, error = %source, "Skipping item");
                on_progress(ConvertProgress::ItemSkipped {
                    position,
                    reason: source.to_string(),
                });
                return Ok(None);
            }
        },
    };

    let request = decode_payload_field(&item.request, "request", position, options, on_progress)?;
    let response =
        decode_payload_field(&item.response, "response", position, options, on_progress)?;

    Ok(Some(PreparedItem {
        position,
        item,
        request,
        response,
        created_at,
    }))
}

fn decode_payload_field<F>(
    body: &Body,
    field: &'static str,
    position: usize,
    options: &ConvertOptions,
    on_progress: &mut F,
) -> Result<Vec<u8>>
where
    F: FnMut(ConvertProgress),
{
    match decode_body(body, field) {
        Ok(bytes) => Ok(bytes),
        Err(source) => match options.payload_policy {
            PayloadPolicy::Strict => Err(Error::Payload { position, source }),
            PayloadPolicy::Lenient => {
                tracing::warn!(position, field, error = %source, "Storing empty payload");
                on_progress(ConvertProgress::PayloadFallback {
                    position,
                    field,
                    reason: source.to_string(),
                });
                Ok(Vec::new())
            }
        },
    }
}

fn write_error(prepared: &PreparedItem, err: WriteError<burptocaido_store::Error>) -> Error {
    Error::Write {
        position: prepared.position,
        host: prepared.item.host.clone(),
        path: prepared.item.path.clone(),
        step: err.step,
        source: err.source,
    }
}
