//! Vehicle Registry Database Layer
//!
//! This crate provides the data-access layer for the vehicle registry:
//! the `VehicleStore` query client seam, its SQLite implementation via sqlx,
//! and the `VehicleRepository` facade with named lookups and mutations.

pub mod error;
pub mod filter;
pub mod models;
pub mod repository;
pub mod store;
pub mod utils;
pub mod vehicles;

pub use error::DbError;
pub use filter::VehicleFilter;
pub use models::*;
pub use repository::Database;
pub use store::VehicleStore;
pub use vehicles::VehicleRepository;

/// Re-export sqlx types for convenience
pub use sqlx::SqlitePool;
