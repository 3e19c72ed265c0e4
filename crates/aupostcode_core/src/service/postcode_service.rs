//! Postcode search use-case service.
//!
//! # Responsibility
//! - Validate locality terms and run partial matches over the shared pool.
//! - Map every outcome to a [`StatusEnvelope`].
//!
//! # Invariants
//! - Never panics or returns an error; failures become 400/404 envelopes.
//! - Never performs IO; reads whatever snapshot the loader last published.
//! - Result order is pool order; records are rendered in uppercase.

use crate::envelope::{StatusEnvelope, CODE_BAD_REQUEST, CODE_NOT_FOUND};
use crate::model::postcode::PostcodeRecord;
use crate::pool::PostcodePool;
use crate::search::locality::{quote_term, validate_locality_term};
use log::debug;
use std::sync::Arc;

/// Locality search over a shared [`PostcodePool`].
#[derive(Debug, Clone)]
pub struct PostcodeService {
    pool: Arc<PostcodePool>,
}

impl PostcodeService {
    pub fn new(pool: Arc<PostcodePool>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Arc<PostcodePool> {
        &self.pool
    }

    /// Partial, case-insensitive search on locality.
    ///
    /// # Contract
    /// - Fewer than 3 characters -> 400 `Must have at least 3 characters: '<term>'`.
    /// - Characters outside `[A-Za-z ,'-]` -> 400 invalid-characters message.
    /// - No match -> 404 `No localities matched '<term>'`.
    /// - Otherwise 200 with `data.localities`.
    pub fn search_by_locality(&self, term: &str) -> StatusEnvelope {
        if let Err(err) = validate_locality_term(term) {
            debug!("event=locality_search module=service status=rejected code={CODE_BAD_REQUEST}");
            return StatusEnvelope::status(CODE_BAD_REQUEST, err.to_string());
        }

        let matches = self
            .pool
            .search(term)
            .iter()
            .map(PostcodeRecord::to_uppercase)
            .collect::<Vec<_>>();

        debug!(
            "event=locality_search module=service status=ok match_count={}",
            matches.len()
        );

        if matches.is_empty() {
            return StatusEnvelope::status(
                CODE_NOT_FOUND,
                format!("No localities matched {}", quote_term(term)),
            );
        }

        StatusEnvelope::localities(matches)
    }
}
