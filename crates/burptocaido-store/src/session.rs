use burptocaido_types::{InsertReturningId, NewRow, RowId};
use rusqlite::{Connection, OpenFlags, Transaction};
use std::path::{Path, PathBuf};

use crate::insert::insert_row;
use crate::layout::{PRIMARY_DB_FILE, RAW_ALIAS, RAW_DB_FILE, REQUIRED_TABLES};
use crate::{Error, Result};

/// Where to find the two databases inside a project directory, and how to
/// configure the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub primary_file: String,
    pub raw_file: String,
    pub enforce_foreign_keys: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            primary_file: PRIMARY_DB_FILE.to_string(),
            raw_file: RAW_DB_FILE.to_string(),
            enforce_foreign_keys: false,
        }
    }
}

/// Open connection to a Caido project: the primary store, with the raw store
/// attached as `raw`.
pub struct Session {
    conn: Connection,
    primary_path: PathBuf,
    raw_path: PathBuf,
}

impl Session {
    pub fn open(project_dir: &Path) -> Result<Self> {
        Self::open_with(project_dir, &SessionOptions::default())
    }

    /// Neither database is ever created here; both must already exist.
    pub fn open_with(project_dir: &Path, options: &SessionOptions) -> Result<Self> {
        let primary_path = project_dir.join(&options.primary_file);
        let raw_path = project_dir.join(&options.raw_file);

        if !primary_path.is_file() {
            return Err(Error::MissingStore(primary_path));
        }
        if !raw_path.is_file() {
            return Err(Error::MissingStore(raw_path));
        }

        let conn = Connection::open_with_flags(
            &primary_path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        tracing::info!(path = %primary_path.display(), "Opened primary store");

        let raw_name = raw_path.to_string_lossy().into_owned();
        conn.execute(&format!("ATTACH DATABASE ?1 AS {}", RAW_ALIAS), [&raw_name])
            .map_err(|source| Error::Attach {
                path: raw_path.clone(),
                source,
            })?;
        tracing::info!(path = %raw_path.display(), "Attached raw store");

        if options.enforce_foreign_keys {
            conn.pragma_update(None, "foreign_keys", true)?;
        }

        verify_tables(&conn)?;

        Ok(Self {
            conn,
            primary_path,
            raw_path,
        })
    }

    pub fn primary_path(&self) -> &Path {
        &self.primary_path
    }

    pub fn raw_path(&self) -> &Path {
        &self.raw_path
    }

    /// Start a unit of work. Dropping the unit without `commit` rolls it back.
    pub fn begin(&mut self) -> Result<Unit<'_>> {
        let tx = self.conn.transaction()?;
        Ok(Unit { tx })
    }

    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, err)| Error::Database(err))
    }
}

fn verify_tables(conn: &Connection) -> Result<()> {
    let mut missing = Vec::new();

    for (schema, table) in REQUIRED_TABLES {
        let sql = format!(
            "SELECT COUNT(*) FROM {}.sqlite_master WHERE type = 'table' AND name = ?1",
            schema
        );
        let count: i64 = conn.query_row(&sql, [table], |row| row.get(0))?;
        if count == 0 {
            missing.push(format!("{}.{}", schema, table));
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::MissingTables(missing))
    }
}

/// A transaction spanning both stores.
pub struct Unit<'conn> {
    tx: Transaction<'conn>,
}

impl Unit<'_> {
    pub fn commit(self) -> Result<()> {
        self.tx.commit()?;
        Ok(())
    }

    pub fn rollback(self) -> Result<()> {
        self.tx.rollback()?;
        Ok(())
    }
}

impl InsertReturningId for Unit<'_> {
    type Error = Error;

    fn insert_returning_id(&self, row: &NewRow<'_>) -> Result<RowId> {
        insert_row(&self.tx, row)
    }
}
