//! # stay-db
//!
//! Database layer implementing the repository traits with PostgreSQL via
//! SQLx. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ model mappers
//! - Repository implementations
//!
//! The booking repository is where the check-then-act race is closed:
//! writes that introduce a stay window lock the listing row, re-check the
//! overlap predicate inside the same transaction, and the schema carries
//! a range-exclusion constraint as the final arbiter.

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{PgBookingRepository, PgListingRepository, PgReviewRepository};
