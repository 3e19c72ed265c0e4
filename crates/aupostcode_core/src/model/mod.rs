//! Postcode domain model.
//!
//! # Responsibility
//! - Define the record shape shared by storage, loader and search.

pub mod postcode;
