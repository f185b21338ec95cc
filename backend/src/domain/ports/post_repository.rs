//! Driven port for post storage.
//!
//! Adapters return posts with a [`crate::domain::PostAuthor::Stub`] author;
//! loading the author is the service's job.

use async_trait::async_trait;

use crate::domain::{Post, PostId};

use super::define_port_error;

define_port_error! {
    /// Failures raised by post repository adapters.
    pub enum PostRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "post repository connection failed: {message}",
        /// A query failed while executing.
        Query { message: String } => "post repository query failed: {message}",
        /// The row targeted by an update no longer exists.
        Missing { post_id: PostId } => "post {post_id} no longer exists",
    }
}

/// Storage contract for posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persist a new post and return it with its assigned identifier.
    async fn create(&self, post: Post) -> Result<Post, PostRepositoryError>;

    /// Fetch a post by identifier; `None` when no such post exists.
    async fn get_by_id(&self, post_id: PostId) -> Result<Option<Post>, PostRepositoryError>;

    /// Fetch every stored post.
    async fn get_posts(&self) -> Result<Vec<Post>, PostRepositoryError>;

    /// Write the post's modified fields and return it with a committed ledger.
    ///
    /// A post with no pending changes is returned as given without touching
    /// the store.
    async fn update(&self, post: Post) -> Result<Post, PostRepositoryError>;

    /// Remove a post. Deleting an absent post succeeds.
    async fn delete(&self, post_id: PostId) -> Result<(), PostRepositoryError>;
}
