//! Driving port for reading posts.
//!
//! Inbound adapters depend on this trait rather than on the service or any
//! store, so handlers can be exercised with a mock.

use async_trait::async_trait;

use crate::domain::{Post, PostError, PostId};

/// Read-side post use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsQuery: Send + Sync {
    /// Fetch one post with its author loaded.
    async fn get_post(&self, post_id: PostId) -> Result<Post, PostError>;

    /// Fetch every post, loading authors where they still exist.
    async fn list_posts(&self) -> Result<Vec<Post>, PostError>;
}
