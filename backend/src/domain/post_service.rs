//! Post use-cases.
//!
//! [`PostService`] implements the [`PostsQuery`] and [`PostsCommand`] driving
//! ports on top of the user and post repositories. It holds no state of its
//! own; every call is a sequence of repository round-trips.
//!
//! Author loading differs between reads: `get_post` fails with
//! [`PostError::UserNotFound`] when the author has vanished, while
//! `list_posts` keeps the post and marks its author as unresolved so one
//! orphaned row cannot break the whole listing.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::domain::ports::{
    PostRepository, PostRepositoryError, PostsCommand, PostsQuery, UserRepository,
    UserRepositoryError,
};
use crate::domain::{Post, PostError, PostId, User, UserId};

/// Post service implementing the driving ports.
#[derive(Clone)]
pub struct PostService<P, U> {
    posts: Arc<P>,
    users: Arc<U>,
}

impl<P, U> PostService<P, U> {
    /// Create a service over the given repositories.
    pub fn new(posts: Arc<P>, users: Arc<U>) -> Self {
        Self { posts, users }
    }
}

fn map_post_repository_error(err: PostRepositoryError) -> PostError {
    match err {
        PostRepositoryError::Missing { post_id } => PostError::PostNotFound { post_id },
        other => {
            error!(error = %other, "post repository failed");
            PostError::unexpected(other.to_string())
        }
    }
}

fn map_user_repository_error(err: UserRepositoryError) -> PostError {
    error!(error = %err, "user repository failed");
    PostError::unexpected(err.to_string())
}

fn attach_author(post: &mut Post, user: User) -> Result<(), PostError> {
    post.hydrate_author(user).map_err(|err| {
        error!(error = %err, post_id = ?post.id(), "author does not match post");
        PostError::unexpected(err.to_string())
    })
}

impl<P, U> PostService<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    async fn require_user(&self, user_id: UserId) -> Result<User, PostError> {
        self.users
            .get_by_id(&user_id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or(PostError::UserNotFound { user_id })
    }

    async fn require_post(&self, post_id: PostId) -> Result<Post, PostError> {
        self.posts
            .get_by_id(post_id)
            .await
            .map_err(map_post_repository_error)?
            .ok_or(PostError::PostNotFound { post_id })
    }
}

#[async_trait]
impl<P, U> PostsQuery for PostService<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    async fn get_post(&self, post_id: PostId) -> Result<Post, PostError> {
        let mut post = self.require_post(post_id).await?;
        let author = self.require_user(post.author_id()).await?;
        attach_author(&mut post, author)?;
        Ok(post)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, PostError> {
        let mut posts = self
            .posts
            .get_posts()
            .await
            .map_err(map_post_repository_error)?;

        for post in &mut posts {
            let author_id = post.author_id();
            let author = self
                .users
                .get_by_id(&author_id)
                .await
                .map_err(map_user_repository_error)?;
            match author {
                Some(user) => attach_author(post, user)?,
                None => {
                    warn!(
                        post_id = ?post.id(),
                        user_id = %author_id,
                        "post author not found; listing without author"
                    );
                    post.mark_author_unresolved();
                }
            }
        }

        Ok(posts)
    }
}

#[async_trait]
impl<P, U> PostsCommand for PostService<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    async fn create_post(&self, user_id: UserId, title: String) -> Result<Post, PostError> {
        let author = self.require_user(user_id).await?;
        let draft = Post::new(title, user_id)?;

        let mut post = self
            .posts
            .create(draft)
            .await
            .map_err(map_post_repository_error)?;
        attach_author(&mut post, author)?;

        info!(post_id = ?post.id(), user_id = %user_id, "post created");
        Ok(post)
    }

    async fn update_post(
        &self,
        post_id: PostId,
        title: String,
        user_id: UserId,
    ) -> Result<Post, PostError> {
        let mut post = self.require_post(post_id).await?;
        if post.author_id() != user_id {
            warn!(post_id = %post_id, user_id = %user_id, "update refused for non-author");
            return Err(PostError::Forbidden { post_id, user_id });
        }
        let author = self.require_user(user_id).await?;
        post.set_title(title)?;

        let modified = post.modified_fields();
        let mut post = self
            .posts
            .update(post)
            .await
            .map_err(map_post_repository_error)?;
        attach_author(&mut post, author)?;

        info!(post_id = %post_id, fields = ?modified, "post updated");
        Ok(post)
    }

    async fn delete_post(&self, post_id: PostId) -> Result<(), PostError> {
        self.posts
            .delete(post_id)
            .await
            .map_err(map_post_repository_error)?;
        info!(post_id = %post_id, "post deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "post_service_tests.rs"]
mod tests;
