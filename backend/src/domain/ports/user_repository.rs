//! Driven port for reading users.

use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures raised by user repository adapters.
    pub enum UserRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "user repository connection failed: {message}",
        /// A query failed while executing.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Read access to stored users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier; `None` when no such user exists.
    async fn get_by_id(&self, user_id: &UserId) -> Result<Option<User>, UserRepositoryError>;
}
