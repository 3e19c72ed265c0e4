//! Core domain logic for the Australian postcode lookup.
//! This crate owns the dataset loader, term validation and search semantics.

pub mod db;
pub mod envelope;
pub mod import;
pub mod logging;
pub mod model;
pub mod pool;
pub mod repo;
pub mod search;
pub mod service;

pub use envelope::{LocalityData, Status, StatusEnvelope};
pub use import::{import_feed_file, parse_feed, read_feed_file, ImportError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::postcode::{PostcodeRecord, PostcodeValidationError};
pub use pool::{
    JsonFilePostcodeSource, LoadError, LoadOutcome, LoadResult, PostcodePool, PostcodeSource,
    SqlitePostcodeSource,
};
pub use repo::postcode_repo::{
    PostcodeRepository, RepoError, RepoResult, SqlitePostcodeRepository,
};
pub use search::locality::{validate_locality_term, LocalityQueryError, MIN_LOCALITY_LENGTH};
pub use service::postcode_service::PostcodeService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
