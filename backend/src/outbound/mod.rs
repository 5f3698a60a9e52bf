//! Outbound adapters implementing the domain's repository ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel ORM
//! - **memory**: a mutex-guarded store used when no database is configured
//!   and by the end-to-end tests
//!
//! Adapters translate between domain types and storage representations and
//! apply each mutation atomically. They contain no workflow rules.

pub mod memory;
pub mod persistence;
