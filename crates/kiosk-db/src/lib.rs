//! Kiosk Database: SurrealDB document store adapter and repository
//! implementations.
//!
//! This crate provides:
//! - Connection management ([`DbManager`], [`DbConfig`])
//! - Collection setup and migrations ([`run_migrations`])
//! - Error types ([`DbError`])
//! - Repository implementations for the `kiosk-core` traits
//!   ([`repository`])

mod connection;
mod error;
pub mod repository;
mod schema;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use repository::{
    DecodePolicy, SurrealAccountRepository, SurrealOrderRepository, SurrealProductRepository,
};
pub use schema::{ORDERS, PRODUCTS, USERS, latest_version, run_migrations};
