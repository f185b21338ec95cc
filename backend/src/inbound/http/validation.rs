//! Request validation helpers shared by the HTTP handlers.

use serde_json::json;

use crate::domain::{Error, PostError, PostId, UserId};

/// Name of a request field, as the client spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const TITLE: FieldName = FieldName::new("title");
pub(crate) const USER_ID: FieldName = FieldName::new("user_id");

/// A required body field was absent or `null`.
pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": "missing_field",
    }))
}

/// Extract a required body field.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Validate a user identifier supplied in a request body.
pub(crate) fn parse_user_id(raw: i64) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|err| Error::from(PostError::from(err)))
}

/// Validate a post identifier taken from the path.
///
/// Non-positive identifiers can never name a stored post, so they are
/// reported as missing.
pub(crate) fn parse_post_id(raw: i64) -> Result<PostId, Error> {
    PostId::new(raw).map_err(|_| Error::not_found(format!("post {raw} not found")))
}
