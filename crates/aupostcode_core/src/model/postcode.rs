//! Postcode domain model.
//!
//! # Responsibility
//! - Define the canonical `{locality, state, postcode}` record.
//! - Validate records before they reach persistence.
//!
//! # Invariants
//! - Records carry no identity beyond value equality; duplicates are allowed.
//! - Persisted records have non-blank locality, state and postcode.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One Australian postcode entry.
///
/// The storage `id` column is never surfaced here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostcodeRecord {
    /// Suburb or town name, the primary search key.
    pub locality: String,
    /// State or territory abbreviation, e.g. `VIC`.
    pub state: String,
    /// Four digit postcode kept as text so leading zeros survive (`0870`).
    pub postcode: String,
}

impl PostcodeRecord {
    pub fn new(
        locality: impl Into<String>,
        state: impl Into<String>,
        postcode: impl Into<String>,
    ) -> Self {
        Self {
            locality: locality.into(),
            state: state.into(),
            postcode: postcode.into(),
        }
    }

    /// Returns a copy with every field in uppercase, the stored casing
    /// convention of the postcode feed.
    pub fn to_uppercase(&self) -> Self {
        Self {
            locality: self.locality.to_uppercase(),
            state: self.state.to_uppercase(),
            postcode: self.postcode.to_uppercase(),
        }
    }

    /// Case-folded locality used for partial matching.
    pub fn locality_key(&self) -> String {
        self.locality.to_uppercase()
    }

    /// Validates the record before persistence.
    pub fn validate(&self) -> Result<(), PostcodeValidationError> {
        if self.locality.trim().is_empty() {
            return Err(PostcodeValidationError::BlankField("locality"));
        }
        if self.state.trim().is_empty() {
            return Err(PostcodeValidationError::BlankField("state"));
        }
        if self.postcode.trim().is_empty() {
            return Err(PostcodeValidationError::BlankField("postcode"));
        }
        Ok(())
    }
}

/// Validation failure for a single postcode record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostcodeValidationError {
    /// Named field is empty or whitespace only.
    BlankField(&'static str),
}

impl Display for PostcodeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "postcode record has blank `{field}`"),
        }
    }
}

impl Error for PostcodeValidationError {}
