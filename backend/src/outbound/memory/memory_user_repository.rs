//! In-memory `UserRepository` implementation.

use async_trait::async_trait;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{User, UserId};

use super::database::{MemoryDatabase, StorePoisoned};

impl From<StorePoisoned> for UserRepositoryError {
    fn from(value: StorePoisoned) -> Self {
        Self::query(value.to_string())
    }
}

/// User repository over a [`MemoryDatabase`].
#[derive(Debug, Clone)]
pub struct MemoryUserRepository {
    database: MemoryDatabase,
}

impl MemoryUserRepository {
    /// Repository over a shared database handle.
    pub fn new(database: MemoryDatabase) -> Self {
        Self { database }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn get_by_id(&self, user_id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        self.database
            .with_tables(|tables| Ok(tables.users.get(user_id).cloned()))
    }
}
