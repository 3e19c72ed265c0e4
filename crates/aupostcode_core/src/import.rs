//! JSON postcode feed parsing and import.
//!
//! # Responsibility
//! - Decode the Australian postcode JSON feed into `PostcodeRecord`s.
//! - Replace the `postcode` table contents from a feed file.
//!
//! # Invariants
//! - Extra feed keys (`id`, `lat`, `long`, ...) are ignored.
//! - Numeric postcodes are zero-padded to four digits (`800` -> `0800`).
//! - A failed import leaves previously stored rows untouched.

use crate::model::postcode::{PostcodeRecord, PostcodeValidationError};
use crate::repo::postcode_repo::{PostcodeRepository, RepoError, SqlitePostcodeRepository};
use log::{error, info};
use rusqlite::Connection;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Instant;

const POSTCODE_DIGITS: usize = 4;

pub type ImportResult<T> = Result<T, ImportError>;

/// Import-layer error for feed IO, decoding and persistence.
#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// Record at `index` (zero-based, feed order) has a blank field.
    Validation {
        index: usize,
        error: PostcodeValidationError,
    },
    Repo(RepoError),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read postcode feed: {err}"),
            Self::Parse(err) => write!(f, "invalid postcode feed: {err}"),
            Self::Validation { index, error } => {
                write!(f, "invalid postcode feed record #{index}: {error}")
            }
            Self::Repo(err) => write!(f, "failed to store postcodes: {err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Validation { error, .. } => Some(error),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<RepoError> for ImportError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

#[derive(Debug, Deserialize)]
struct FeedEntry {
    locality: String,
    state: String,
    postcode: FeedPostcode,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FeedPostcode {
    Text(String),
    Number(u64),
}

impl FeedPostcode {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => format!("{number:0width$}", width = POSTCODE_DIGITS),
        }
    }
}

impl From<FeedEntry> for PostcodeRecord {
    fn from(entry: FeedEntry) -> Self {
        PostcodeRecord {
            locality: entry.locality,
            state: entry.state,
            postcode: entry.postcode.into_text(),
        }
    }
}

/// Decodes a JSON feed array into records, preserving feed order.
pub fn parse_feed<R: Read>(reader: R) -> ImportResult<Vec<PostcodeRecord>> {
    let entries: Vec<FeedEntry> = serde_json::from_reader(reader)?;
    Ok(entries.into_iter().map(PostcodeRecord::from).collect())
}

/// Checks every record, reporting the first blank field with its position.
pub fn validate_records(records: &[PostcodeRecord]) -> ImportResult<()> {
    for (index, record) in records.iter().enumerate() {
        record
            .validate()
            .map_err(|error| ImportError::Validation { index, error })?;
    }
    Ok(())
}

/// Reads and decodes a JSON feed file.
pub fn read_feed_file(path: impl AsRef<Path>) -> ImportResult<Vec<PostcodeRecord>> {
    let file = File::open(path)?;
    parse_feed(BufReader::new(file))
}

/// Replaces stored postcodes with the contents of the feed at `path`.
///
/// Returns the number of inserted rows.
///
/// # Side effects
/// - Emits `postcode_import` logging events with counts and duration.
pub fn import_feed_file(conn: &mut Connection, path: impl AsRef<Path>) -> ImportResult<usize> {
    let started_at = Instant::now();
    info!("event=postcode_import module=import status=start");

    let result = read_feed_file(path).and_then(|records| {
        info!(
            "event=postcode_import module=import status=parsed read_count={}",
            records.len()
        );
        validate_records(&records)?;
        let mut repo = SqlitePostcodeRepository::new(conn);
        Ok(repo.replace_all(&records)?)
    });

    match &result {
        Ok(inserted) => info!(
            "event=postcode_import module=import status=ok inserted_count={} duration_ms={}",
            inserted,
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=postcode_import module=import status=error duration_ms={} error={}",
            started_at.elapsed().as_millis(),
            err
        ),
    }

    result
}
