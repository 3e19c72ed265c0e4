//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define data access contracts for the `postcode` table.
//! - Isolate SQLite query details from loader and importer orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `PostcodeRecord::validate()` before persistence.
//! - Reads always return rows in `(locality, state, postcode)` order.

pub mod postcode_repo;
