//! Shared helpers for integration suites that need PostgreSQL.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! the embedded cluster bootstrap and the skip policy live here instead of
//! being repeated per suite.

pub mod cluster_skip;
pub mod embedded_postgres;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::migrated_database;
