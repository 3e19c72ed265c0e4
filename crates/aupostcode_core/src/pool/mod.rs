//! In-memory postcode dataset and its loader.
//!
//! # Responsibility
//! - Hold the full postcode list as one immutable, shared snapshot.
//! - Populate it from a [`PostcodeSource`] once, or again on forced reload.
//! - Answer raw partial-locality matches over the current snapshot.
//!
//! # Invariants
//! - A non-forced load on a populated pool is a no-op success.
//! - Readers only ever observe a complete snapshot; failed loads publish nothing.
//! - Loads are mutually exclusive; readers never wait on source IO.

pub mod source;

use crate::db::DbError;
use crate::import::ImportError;
use crate::model::postcode::PostcodeRecord;
use crate::repo::postcode_repo::RepoError;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Instant;

pub use source::{JsonFilePostcodeSource, PostcodeSource, SqlitePostcodeSource};

pub type LoadResult<T> = Result<T, LoadError>;

/// Loader error; each failure point keeps its own kind.
#[derive(Debug)]
pub enum LoadError {
    /// Backing store is missing or unreachable. Nothing was read.
    SourceUnavailable { source_name: String, reason: String },
    Db(DbError),
    Io(std::io::Error),
    /// Store was reachable but its rows could not be decoded.
    InvalidData(String),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SourceUnavailable {
                source_name,
                reason,
            } => write!(f, "postcode source `{source_name}` unavailable: {reason}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid postcode data: {message}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::SourceUnavailable { .. } => None,
            Self::Db(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for LoadError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for LoadError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Db(err) => Self::Db(err),
            other @ (RepoError::Validation { .. } | RepoError::InvalidData(_)) => {
                Self::InvalidData(other.to_string())
            }
        }
    }
}

impl From<ImportError> for LoadError {
    fn from(value: ImportError) -> Self {
        match value {
            ImportError::Io(err) => Self::Io(err),
            ImportError::Parse(err) => Self::InvalidData(err.to_string()),
            other @ ImportError::Validation { .. } => Self::InvalidData(other.to_string()),
            ImportError::Repo(err) => err.into(),
        }
    }
}

/// Successful load result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A fresh snapshot with `count` rows was published.
    Loaded { count: usize },
    /// Pool was already populated; nothing was read.
    AlreadyLoaded { count: usize },
}

impl LoadOutcome {
    /// Row count visible to readers after the call.
    pub fn count(&self) -> usize {
        match self {
            Self::Loaded { count } | Self::AlreadyLoaded { count } => *count,
        }
    }
}

/// Published rows plus their uppercased localities, index-aligned.
struct Snapshot {
    records: Arc<[PostcodeRecord]>,
    locality_keys: Box<[String]>,
}

impl Snapshot {
    fn new(records: Vec<PostcodeRecord>) -> Self {
        let locality_keys = records.iter().map(PostcodeRecord::locality_key).collect();
        Self {
            records: Arc::from(records),
            locality_keys,
        }
    }
}

/// Shared postcode dataset.
///
/// Constructed once by the application and handed out as `Arc<PostcodePool>`.
pub struct PostcodePool {
    source: Box<dyn PostcodeSource>,
    snapshot: RwLock<Arc<Snapshot>>,
    load_guard: Mutex<()>,
}

impl PostcodePool {
    /// Creates an empty pool bound to `source`. Nothing is read until [`load`](Self::load).
    pub fn new(source: impl PostcodeSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            snapshot: RwLock::new(Arc::new(Snapshot::new(Vec::new()))),
            load_guard: Mutex::new(()),
        }
    }

    /// Loads postcodes from the bound source.
    ///
    /// # Contract
    /// - Source availability is checked first; `SourceUnavailable` leaves the
    ///   current snapshot untouched even when `force_reload` is set.
    /// - `force_reload = false` on a populated pool returns `AlreadyLoaded`.
    /// - `force_reload = true` discards the current snapshot and publishes a new one.
    ///
    /// # Side effects
    /// - Emits one `postcode_load` event with the outcome and row count.
    pub fn load(&self, force_reload: bool) -> LoadResult<LoadOutcome> {
        let _guard = self
            .load_guard
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let started_at = Instant::now();
        let source_name = self.source.describe();

        if let Err(err) = self.source.check_available() {
            warn!(
                "event=postcode_load module=pool status=unavailable source={} error={}",
                source_name, err
            );
            return Err(err);
        }

        if !force_reload {
            let count = self.count();
            if count > 0 {
                info!(
                    "event=postcode_load module=pool status=skipped reason=already_loaded source={} count={}",
                    source_name, count
                );
                return Ok(LoadOutcome::AlreadyLoaded { count });
            }
        }

        let records = match self.source.read_all() {
            Ok(records) => records,
            Err(err) => {
                error!(
                    "event=postcode_load module=pool status=error source={} force_reload={} duration_ms={} error={}",
                    source_name,
                    force_reload,
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err);
            }
        };

        let count = records.len();
        self.publish(Snapshot::new(records));
        info!(
            "event=postcode_load module=pool status=ok source={} force_reload={} count={} duration_ms={}",
            source_name,
            force_reload,
            count,
            started_at.elapsed().as_millis()
        );

        Ok(LoadOutcome::Loaded { count })
    }

    /// Returns the current snapshot. Cheap: clones one `Arc`.
    pub fn snapshot(&self) -> Arc<[PostcodeRecord]> {
        Arc::clone(&self.current().records)
    }

    /// Total number of postcodes currently loaded.
    pub fn count(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Returns records whose locality contains `term`, ignoring case, in pool order.
    pub fn search(&self, term: &str) -> Vec<PostcodeRecord> {
        let needle = term.to_uppercase();
        let snapshot = self.current();
        snapshot
            .records
            .iter()
            .zip(snapshot.locality_keys.iter())
            .filter(|(_, key)| key.contains(needle.as_str()))
            .map(|(record, _)| record.clone())
            .collect()
    }

    fn current(&self) -> Arc<Snapshot> {
        self.snapshot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn publish(&self, snapshot: Snapshot) {
        let mut slot = self
            .snapshot
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Arc::new(snapshot);
    }
}

impl std::fmt::Debug for PostcodePool {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostcodePool")
            .field("source", &self.source.describe())
            .field("count", &self.count())
            .finish()
    }
}
