//! Driving port for mutating posts.

use async_trait::async_trait;

use crate::domain::{Post, PostError, PostId, UserId};

/// Write-side post use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsCommand: Send + Sync {
    /// Create a post authored by `user_id`.
    async fn create_post(&self, user_id: UserId, title: String) -> Result<Post, PostError>;

    /// Retitle a post on behalf of `user_id`, who must be its author.
    async fn update_post(
        &self,
        post_id: PostId,
        title: String,
        user_id: UserId,
    ) -> Result<Post, PostError>;

    /// Remove a post if it exists.
    async fn delete_post(&self, post_id: PostId) -> Result<(), PostError>;
}
