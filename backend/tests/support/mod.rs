//! Shared helpers for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`; suites
//! that need PostgreSQL pull these in with `mod support;`.

pub mod cluster_skip;
pub mod embedded_postgres;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{execute_sql, provision_template_database, shared_cluster};
