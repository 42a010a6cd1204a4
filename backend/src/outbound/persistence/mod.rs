//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Implementations of the volunteer repository ports backed by PostgreSQL
//! via `diesel-async` with `bb8` connection pooling.
//!
//! - Repository implementations only translate between Diesel models and
//!   domain types. No business logic resides here.
//! - Row structs (`models.rs`) and schema definitions (`schema.rs`) are
//!   internal and never exposed to the domain layer.
//! - All database errors are mapped to the ports' error types.
//!
//! # Example
//!
//! ```ignore
//! use volunteer_backend::outbound::persistence::{
//!     DbPool, DieselVolunteerPostRepository, PoolConfig,
//! };
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/volunteer")).await?;
//! let posts = DieselVolunteerPostRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_volunteer_post_repository;
mod diesel_volunteer_request_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_volunteer_post_repository::DieselVolunteerPostRepository;
pub use diesel_volunteer_request_repository::DieselVolunteerRequestRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
