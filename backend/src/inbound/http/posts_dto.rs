//! Request and response payloads for the post endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Post, User};

/// Body of `POST /posts` and `PATCH /posts/{post_id}`.
///
/// Both fields are required; they are optional here so a missing field is
/// reported as a validation error rather than a deserialisation failure.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct PostRequest {
    #[schema(example = "Hello, world")]
    pub title: Option<String>,
    #[schema(example = 1)]
    pub user_id: Option<i64>,
}

/// Author as shown inside a post.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct UserResponse {
    pub user_id: i64,
    pub email: Option<String>,
    pub created: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(value: &User) -> Self {
        Self {
            user_id: value.id().get(),
            email: value.email().map(str::to_owned),
            created: value.created(),
        }
    }
}

/// A post with its author.
///
/// `user` is `null` only in listings, for posts whose author no longer exists.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct PostResponse {
    pub post_id: Option<i64>,
    pub title: String,
    pub created: DateTime<Utc>,
    pub user: Option<UserResponse>,
}

impl From<&Post> for PostResponse {
    fn from(value: &Post) -> Self {
        Self {
            post_id: value.id().map(i64::from),
            title: value.title().to_owned(),
            created: value.created(),
            user: value.user().map(UserResponse::from),
        }
    }
}
