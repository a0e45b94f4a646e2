//! Throwaway Caido project directories.
//!
//! Provides utilities to:
//! - Create both Caido databases with a compatible schema
//! - Break a project on purpose (missing files, rejected rows)
//! - Inspect what a migration wrote

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::schema::{PRIMARY_SCHEMA, RAW_SCHEMA};

pub const PRIMARY_DB_FILE: &str = "database.caido";
pub const RAW_DB_FILE: &str = "database_raw.caido";

/// A Caido project directory living in a temp dir.
///
/// # Example
/// ```no_run
/// use burptocaido_testing::CaidoProject;
///
/// let project = CaidoProject::new().unwrap();
/// assert_eq!(project.count("requests").unwrap(), 0);
/// ```
pub struct CaidoProject {
    temp_dir: TempDir,
    dir: PathBuf,
}

impl CaidoProject {
    /// Project with both databases and the full schema.
    pub fn new() -> Result<Self> {
        let project = Self::empty()?;

        let primary = Connection::open(project.primary_path())?;
        primary.execute_batch(PRIMARY_SCHEMA)?;

        let raw = Connection::open(project.raw_path())?;
        raw.execute_batch(RAW_SCHEMA)?;

        Ok(project)
    }

    /// Project directory with no databases in it.
    pub fn empty() -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create temp dir")?;
        let dir = temp_dir.path().join("project");
        fs::create_dir_all(&dir).context("Failed to create project dir")?;

        Ok(Self { temp_dir, dir })
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    pub fn primary_path(&self) -> PathBuf {
        self.dir.join(PRIMARY_DB_FILE)
    }

    pub fn raw_path(&self) -> PathBuf {
        self.dir.join(RAW_DB_FILE)
    }

    /// Write a file next to (not inside) the project directory.
    pub fn write_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Connection to the primary store with the raw store attached as `raw`.
    pub fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(self.primary_path())?;
        let raw = self.raw_path().to_string_lossy().into_owned();
        conn.execute("ATTACH DATABASE ?1 AS raw", [&raw])?;
        Ok(conn)
    }

    /// Row count of a table, `raw.`-qualified for the raw store.
    pub fn count(&self, table: &str) -> Result<i64> {
        let conn = self.connect()?;
        let count = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
            row.get(0)
        })?;
        Ok(count)
    }

    /// Make every insert into `requests` for `host` fail.
    pub fn reject_host(&self, host: &str) -> Result<()> {
        let conn = Connection::open(self.primary_path())?;
        conn.execute_batch(&format!(
            r#"
            CREATE TRIGGER reject_host BEFORE INSERT ON requests
            WHEN NEW.host = '{}'
            BEGIN
                SELECT RAISE(ABORT, 'host rejected');
            END;
            "#,
            host.replace('\'', "''")
        ))?;
        Ok(())
    }

    /// Remove a table from the primary store.
    pub fn drop_table(&self, table: &str) -> Result<()> {
        let conn = Connection::open(self.primary_path())?;
        conn.execute_batch(&format!("DROP TABLE {}", table))?;
        Ok(())
    }
}
