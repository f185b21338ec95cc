//! Failure kinds raised by the post use-cases.

use serde_json::json;
use thiserror::Error;

use super::error::Error;
use super::field_validation::FieldValidationError;
use super::post::PostId;
use super::user::UserId;

/// Typed failures of the post service.
///
/// Inbound adapters convert these into the [`Error`] envelope:
///
/// | variant             | code              |
/// |---------------------|-------------------|
/// | `UserNotFound`      | `not_found`       |
/// | `PostNotFound`      | `not_found`       |
/// | `InvalidFieldValue` | `invalid_request` |
/// | `Forbidden`         | `forbidden`       |
/// | `Unexpected`        | `internal_error`  |
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostError {
    /// No user has the given id.
    #[error("user {user_id} not found")]
    UserNotFound {
        /// The missing user.
        user_id: UserId,
    },
    /// No post has the given id.
    #[error("post {post_id} not found")]
    PostNotFound {
        /// The missing post.
        post_id: PostId,
    },
    /// A field value failed validation.
    #[error("invalid value {field_value:?} for field {field_name}")]
    InvalidFieldValue {
        /// Name of the rejected field.
        field_name: &'static str,
        /// The rejected value as received.
        field_value: String,
    },
    /// The caller is not the post's author.
    #[error("user {user_id} may not modify post {post_id}")]
    Forbidden {
        /// The post being modified.
        post_id: PostId,
        /// The caller.
        user_id: UserId,
    },
    /// Storage failure or broken invariant.
    #[error("unexpected failure: {message}")]
    Unexpected {
        /// Diagnostic detail; never sent to clients.
        message: String,
    },
}

impl PostError {
    /// Build a [`PostError::Unexpected`] from any message.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }
}

impl From<FieldValidationError> for PostError {
    fn from(value: FieldValidationError) -> Self {
        Self::InvalidFieldValue {
            field_name: value.field_name,
            field_value: value.field_value,
        }
    }
}

impl From<PostError> for Error {
    fn from(value: PostError) -> Self {
        let message = value.to_string();
        match value {
            PostError::UserNotFound { user_id } => {
                Self::not_found(message).with_details(json!({ "user_id": user_id.get() }))
            }
            PostError::PostNotFound { post_id } => {
                Self::not_found(message).with_details(json!({ "post_id": post_id.get() }))
            }
            PostError::InvalidFieldValue {
                field_name,
                field_value,
            } => Self::invalid_request(message).with_details(json!({
                "field": field_name,
                "value": field_value,
            })),
            PostError::Forbidden { post_id, user_id } => Self::forbidden(message).with_details(
                json!({ "post_id": post_id.get(), "user_id": user_id.get() }),
            ),
            PostError::Unexpected { .. } => Self::internal(message),
        }
    }
}
