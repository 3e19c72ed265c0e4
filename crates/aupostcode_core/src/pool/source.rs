//! Backing stores the postcode pool can load from.
//!
//! # Responsibility
//! - Report whether a store is reachable before any row is read.
//! - Read every row in `(locality, state, postcode)` order.
//! - Reject rows with a blank field before they reach the pool.
//!
//! # Invariants
//! - Availability failures surface as `LoadError::SourceUnavailable`.
//! - Sources never write to their store.

use super::{LoadError, LoadResult};
use crate::db::{open_db_read_only, table_exists, DEFAULT_BUSY_TIMEOUT, POSTCODE_TABLE};
use crate::import::{read_feed_file, validate_records};
use crate::model::postcode::PostcodeRecord;
use crate::repo::postcode_repo::list_postcodes;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Read-only store of postcode rows.
pub trait PostcodeSource: Send + Sync {
    /// Short human-readable label used in log events and errors.
    fn describe(&self) -> String;

    /// Fails with `SourceUnavailable` when the store is missing or unreachable.
    fn check_available(&self) -> LoadResult<()>;

    /// Reads all rows in deterministic load order.
    fn read_all(&self) -> LoadResult<Vec<PostcodeRecord>>;
}

impl<S: PostcodeSource + ?Sized> PostcodeSource for Arc<S> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn check_available(&self) -> LoadResult<()> {
        (**self).check_available()
    }

    fn read_all(&self) -> LoadResult<Vec<PostcodeRecord>> {
        (**self).read_all()
    }
}

/// Postcode rows stored in the `postcode` table of a SQLite file.
#[derive(Debug, Clone)]
pub struct SqlitePostcodeSource {
    path: PathBuf,
    busy_timeout: Duration,
}

impl SqlitePostcodeSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// Bounds how long each read waits on a locked database.
    pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> LoadResult<Connection> {
        if !self.path.is_file() {
            return Err(self.unavailable(format!(
                "database file `{}` does not exist",
                self.path.display()
            )));
        }

        let conn = open_db_read_only(&self.path, self.busy_timeout)
            .map_err(|err| self.unavailable(err.to_string()))?;

        let has_table = table_exists(&conn, POSTCODE_TABLE)
            .map_err(|err| self.unavailable(err.to_string()))?;
        if !has_table {
            return Err(self.unavailable(format!(
                "database table `{POSTCODE_TABLE}` does not yet exist"
            )));
        }

        Ok(conn)
    }

    fn unavailable(&self, reason: String) -> LoadError {
        LoadError::SourceUnavailable {
            source_name: self.describe(),
            reason,
        }
    }
}

impl PostcodeSource for SqlitePostcodeSource {
    fn describe(&self) -> String {
        format!("sqlite:{}", self.path.display())
    }

    fn check_available(&self) -> LoadResult<()> {
        self.connect().map(|_| ())
    }

    fn read_all(&self) -> LoadResult<Vec<PostcodeRecord>> {
        let conn = self.connect()?;
        let records = list_postcodes(&conn)?;
        validate_records(&records)?;
        Ok(records)
    }
}

/// Postcode rows read straight from a JSON feed file.
///
/// Feed order is arbitrary, so rows are stable-sorted into load order.
#[derive(Debug, Clone)]
pub struct JsonFilePostcodeSource {
    path: PathBuf,
}

impl JsonFilePostcodeSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PostcodeSource for JsonFilePostcodeSource {
    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }

    fn check_available(&self) -> LoadResult<()> {
        if self.path.is_file() {
            return Ok(());
        }
        Err(LoadError::SourceUnavailable {
            source_name: self.describe(),
            reason: format!("feed file `{}` does not exist", self.path.display()),
        })
    }

    fn read_all(&self) -> LoadResult<Vec<PostcodeRecord>> {
        self.check_available()?;
        let mut records = read_feed_file(&self.path)?;
        validate_records(&records)?;
        records.sort_by(|a, b| {
            (&a.locality, &a.state, &a.postcode).cmp(&(&b.locality, &b.state, &b.postcode))
        });
        Ok(records)
    }
}
