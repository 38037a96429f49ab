//! # stay-common
//!
//! Shared utilities: application configuration, the application-wide
//! error type, and telemetry setup.

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::{AppConfig, BookingPolicyConfig, DatabaseConfig, Environment};
pub use error::{AppError, ErrorResponse};
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig};
