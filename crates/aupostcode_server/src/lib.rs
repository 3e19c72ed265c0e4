//! HTTP surface for the Australian postcode lookup.

pub mod config;
pub mod routes;

use aupostcode_core::{JsonFilePostcodeSource, PostcodePool, SqlitePostcodeSource};
use config::{ServerConfig, SourceConfig};

/// Builds the single process-wide pool for the configured source. Nothing is loaded yet.
pub fn build_pool(config: &ServerConfig) -> PostcodePool {
    match &config.source {
        SourceConfig::Sqlite(path) => PostcodePool::new(
            SqlitePostcodeSource::new(path).with_busy_timeout(config.db_timeout),
        ),
        SourceConfig::JsonFile(path) => PostcodePool::new(JsonFilePostcodeSource::new(path)),
    }
}
