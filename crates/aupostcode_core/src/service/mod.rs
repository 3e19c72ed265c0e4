//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate pool reads into use-case level APIs.
//! - Keep HTTP/CLI layers decoupled from storage and loader details.

pub mod postcode_service;
