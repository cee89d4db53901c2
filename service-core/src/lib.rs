//! service-core: Shared infrastructure for the companion backend.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
