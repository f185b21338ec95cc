//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories are thin: they translate between Diesel row structs and
//! domain entities and map failures into the ports' typed errors. Row structs
//! (`models`) and table definitions (`schema`) stay private to this module.
//!
//! # Example
//!
//! ```ignore
//! use blog_backend::outbound::persistence::{DbPool, DieselPostRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/blog")).await?;
//! pool.check_connection().await?;
//! let posts = DieselPostRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_post_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_post_repository::DieselPostRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
