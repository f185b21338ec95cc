//! In-memory storage adapters.
//!
//! Both repositories share one [`MemoryDatabase`]; a single mutex serialises
//! access to its tables but no atomicity spans more than one call.

mod database;
mod memory_post_repository;
mod memory_user_repository;

pub use database::{MemoryDatabase, SEED_COUNT, StorePoisoned};
pub use memory_post_repository::MemoryPostRepository;
pub use memory_user_repository::MemoryUserRepository;
