//! Postcode repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Read postcode rows in the deterministic `(locality, state, postcode)` order.
//! - Replace the full table contents for the feed importer.
//!
//! # Invariants
//! - Write paths call `PostcodeRecord::validate()` before SQL mutations.
//! - `replace_all` is atomic: either every row lands or none does.

use crate::db::DbError;
use crate::model::postcode::{PostcodeRecord, PostcodeValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const POSTCODE_SELECT_SQL: &str = "SELECT
    locality,
    state,
    postcode
FROM postcode
ORDER BY locality, state, postcode";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for postcode persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Record at `index` (zero-based, input order) failed validation.
    Validation {
        index: usize,
        error: PostcodeValidationError,
    },
    /// Stored data could not be converted into domain values.
    InvalidData(String),
    Db(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation { index, error } => write!(f, "record #{index}: {error}"),
            Self::InvalidData(message) => write!(f, "invalid postcode row data: {message}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation { error, .. } => Some(error),
            Self::InvalidData(_) => None,
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for postcode rows.
pub trait PostcodeRepository {
    /// Lists every row ordered by locality, then state, then postcode.
    fn list_ordered(&self) -> RepoResult<Vec<PostcodeRecord>>;
    /// Returns the number of stored rows.
    fn count(&self) -> RepoResult<usize>;
    /// Replaces the table contents with `records`, returning the inserted count.
    fn replace_all(&mut self, records: &[PostcodeRecord]) -> RepoResult<usize>;
}

/// SQLite-backed postcode repository.
pub struct SqlitePostcodeRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqlitePostcodeRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl PostcodeRepository for SqlitePostcodeRepository<'_> {
    fn list_ordered(&self) -> RepoResult<Vec<PostcodeRecord>> {
        list_postcodes(&*self.conn)
    }

    fn count(&self) -> RepoResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM postcode;", [], |row| row.get(0))?;
        row_count(count)
    }

    fn replace_all(&mut self, records: &[PostcodeRecord]) -> RepoResult<usize> {
        for (index, record) in records.iter().enumerate() {
            record
                .validate()
                .map_err(|error| RepoError::Validation { index, error })?;
        }

        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM postcode;", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO postcode (locality, state, postcode) VALUES (?1, ?2, ?3);",
            )?;
            for record in records {
                stmt.execute(params![
                    record.locality.as_str(),
                    record.state.as_str(),
                    record.postcode.as_str(),
                ])?;
            }
        }
        tx.commit()?;

        Ok(records.len())
    }
}

/// Reads every postcode row in load order from any connection.
///
/// Shared by the repository and the read-only dataset loader.
pub fn list_postcodes(conn: &Connection) -> RepoResult<Vec<PostcodeRecord>> {
    let mut stmt = conn.prepare(POSTCODE_SELECT_SQL)?;
    let mut rows = stmt.query([])?;
    let mut records = Vec::new();

    while let Some(row) = rows.next()? {
        records.push(parse_postcode_row(row)?);
    }

    Ok(records)
}

fn row_count(count: i64) -> RepoResult<usize> {
    usize::try_from(count)
        .map_err(|_| RepoError::InvalidData(format!("row count {count} is out of range")))
}

fn parse_postcode_row(row: &Row<'_>) -> RepoResult<PostcodeRecord> {
    Ok(PostcodeRecord {
        locality: row.get("locality")?,
        state: row.get("state")?,
        postcode: row.get("postcode")?,
    })
}

#[cfg(test)]
mod tests {
    use super::{row_count, RepoError};

    #[test]
    fn row_count_rejects_negative_sqlite_counts() {
        assert_eq!(row_count(7).unwrap(), 7);
        let err = row_count(-1).expect_err("negative count must fail");
        assert!(matches!(err, RepoError::InvalidData(ref message) if message.contains("-1")));
    }
}
