//! Locality search entry points.
//!
//! # Responsibility
//! - Validate user-supplied locality terms before any matching happens.

pub mod locality;
