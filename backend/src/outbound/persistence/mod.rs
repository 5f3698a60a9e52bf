//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types; every workflow rule lives in the domain services. Row structs
//! (`models.rs`) and table definitions (`schema.rs`) stay private to this
//! module. Multi-row mutations (answer creation, acceptance, deletions that
//! adjust counters) run inside one database transaction each.
//!
//! # Example
//!
//! ```no_run
//! use titto_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/titto")).await?;
//! let _users = DieselUserRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_answer_repository;
mod diesel_basic_error_mapping;
mod diesel_helpers;
mod diesel_matching_repository;
mod diesel_question_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_answer_repository::DieselAnswerRepository;
pub use diesel_matching_repository::DieselMatchingRepository;
pub use diesel_question_repository::DieselQuestionRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
