//! SQLite storage implementation for atlas.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `atlas-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The single-writer actor that serializes every write transaction
//! - The country repository and its database model types
//!
//! This crate is the only place in the application where Diesel dependencies exist.

pub mod countries;
pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Re-export database utilities
pub use db::write_actor::spawn_writer;
pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool, WriteHandle};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from atlas-core for convenience
pub use atlas_core::errors::{DatabaseError, Error, Result};
