//! In-memory `PostRepository` implementation.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{PostRepository, PostRepositoryError};
use crate::domain::{FieldValidationError, Post, PostId};

use super::database::{MemoryDatabase, PostRecord, StorePoisoned};

impl From<StorePoisoned> for PostRepositoryError {
    fn from(value: StorePoisoned) -> Self {
        Self::query(value.to_string())
    }
}

fn map_record_error(error: FieldValidationError) -> PostRepositoryError {
    PostRepositoryError::query(format!("stored post is invalid: {error}"))
}

/// Post repository over a [`MemoryDatabase`].
#[derive(Debug, Clone)]
pub struct MemoryPostRepository {
    database: MemoryDatabase,
}

impl MemoryPostRepository {
    /// Repository over a shared database handle.
    pub fn new(database: MemoryDatabase) -> Self {
        Self { database }
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn create(&self, post: Post) -> Result<Post, PostRepositoryError> {
        let record = PostRecord::from_post(&post);
        self.database.with_tables(|tables| -> Result<Post, PostRepositoryError> {
            let id = tables.allocate_post_id().map_err(map_record_error)?;
            let created = record.to_post(id).map_err(map_record_error)?;
            tables.posts.insert(id, record);
            debug!(post_id = %id, "post stored in memory");
            Ok(created)
        })
    }

    async fn get_by_id(&self, post_id: PostId) -> Result<Option<Post>, PostRepositoryError> {
        self.database.with_tables(|tables| {
            tables
                .posts
                .get(&post_id)
                .map(|record| record.to_post(post_id).map_err(map_record_error))
                .transpose()
        })
    }

    async fn get_posts(&self) -> Result<Vec<Post>, PostRepositoryError> {
        self.database.with_tables(|tables| {
            tables
                .posts
                .iter()
                .map(|(id, record)| record.to_post(*id).map_err(map_record_error))
                .collect()
        })
    }

    async fn update(&self, mut post: Post) -> Result<Post, PostRepositoryError> {
        if post.changes().is_empty() {
            return Ok(post);
        }
        let post_id = post
            .id()
            .ok_or_else(|| PostRepositoryError::query("cannot update a post without an id"))?;

        self.database.with_tables(|tables| -> Result<(), PostRepositoryError> {
            let record = tables
                .posts
                .get_mut(&post_id)
                .ok_or_else(|| PostRepositoryError::missing(post_id))?;
            record.apply_changes(&post);
            Ok(())
        })?;

        post.commit_changes();
        Ok(post)
    }

    async fn delete(&self, post_id: PostId) -> Result<(), PostRepositoryError> {
        self.database.with_tables(|tables| {
            tables.posts.remove(&post_id);
            Ok(())
        })
    }
}
