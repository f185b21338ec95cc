//! PostgreSQL-backed `PostRepository`.
//!
//! Updates are dirty-field-only: the `UPDATE` statement sets exactly the
//! columns recorded in the post's change ledger.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{PostRepository, PostRepositoryError};
use crate::domain::{FieldValidationError, Post, PostId, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewPostRow, PostChangeset, PostRow};
use super::pool::{DbPool, PoolError};
use super::schema::posts;

/// Diesel implementation of the post port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Repository drawing connections from `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> PostRepositoryError {
    map_pool_error(error, PostRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> PostRepositoryError {
    map_diesel_error(
        error,
        PostRepositoryError::query,
        PostRepositoryError::connection,
    )
}

fn invalid_row(error: FieldValidationError) -> PostRepositoryError {
    PostRepositoryError::query(format!("stored post is invalid: {error}"))
}

fn row_to_post(row: PostRow) -> Result<Post, PostRepositoryError> {
    let post_id = PostId::new(row.post_id).map_err(invalid_row)?;
    let author = UserId::new(row.user_id).map_err(invalid_row)?;
    let post = Post::new(row.title, author).map_err(invalid_row)?;
    Ok(post
        .with_id(post_id)
        .with_timestamps(row.created, row.updated))
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn create(&self, post: Post) -> Result<Post, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let new_row = NewPostRow::from_post(&post);
        let row: PostRow = diesel::insert_into(posts::table)
            .values(&new_row)
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;

        debug!(post_id = row.post_id, "post inserted");
        row_to_post(row)
    }

    async fn get_by_id(&self, post_id: PostId) -> Result<Option<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<PostRow> = posts::table
            .find(post_id.get())
            .select(PostRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_post).transpose()
    }

    async fn get_posts(&self) -> Result<Vec<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<PostRow> = posts::table
            .order(posts::post_id.asc())
            .select(PostRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(row_to_post).collect()
    }

    async fn update(&self, mut post: Post) -> Result<Post, PostRepositoryError> {
        if post.changes().is_empty() {
            return Ok(post);
        }
        let post_id = post
            .id()
            .ok_or_else(|| PostRepositoryError::query("cannot update a post without an id"))?;

        let changeset = PostChangeset::from_changes(&post);
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let affected = diesel::update(posts::table.find(post_id.get()))
            .set(&changeset)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        if affected == 0 {
            return Err(PostRepositoryError::missing(post_id));
        }
        debug!(post_id = %post_id, fields = ?post.modified_fields(), "post updated");
        post.commit_changes();
        Ok(post)
    }

    async fn delete(&self, post_id: PostId) -> Result<(), PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::delete(posts::table.find(post_id.get()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }
}
