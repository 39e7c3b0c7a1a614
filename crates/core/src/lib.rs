//! Atlas Core - country ingestion pipeline, filters and services.
//!
//! This crate holds the database-agnostic logic of atlas:
//! - normalization of raw country entries
//! - the currency join and GDP estimate
//! - the allow-listed filter query builder used by the read API
//! - the refresh orchestration and its shared "last refresh" state
//!
//! Persistence is reached through [`countries::CountryRepositoryTrait`],
//! implemented by the `storage-sqlite` crate.

pub mod constants;
pub mod countries;
pub mod errors;
pub mod filters;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
