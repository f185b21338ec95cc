//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{User, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::UserRow;
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel implementation of the user port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Repository drawing connections from `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UserRepositoryError {
    map_pool_error(error, UserRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    map_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let invalid = |err: crate::domain::FieldValidationError| {
        UserRepositoryError::query(format!("stored user is invalid: {err}"))
    };
    let user_id = UserId::new(row.user_id).map_err(invalid)?;
    let user = User::new(user_id, row.email).map_err(invalid)?;
    Ok(user.with_timestamps(row.created, row.updated))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn get_by_id(&self, user_id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::user_id.eq(user_id.get()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_user).transpose()
    }
}
