//! Post entity with change-tracked fields and an explicit author reference.

use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::change_ledger::{ChangeLedger, TrackedValue};
use super::field_validation::{FieldValidationError, validate_positive_id, validate_title};
use super::user::{User, UserId};

/// Positive integer identifier of a post, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PostId(i64);

impl PostId {
    /// Validate and wrap a raw identifier.
    pub fn new(raw: i64) -> Result<Self, FieldValidationError> {
        validate_positive_id("post_id", raw).map(Self)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for PostId {
    type Error = FieldValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PostId> for i64 {
    fn from(value: PostId) -> Self {
        value.0
    }
}

/// The post's reference to its author.
///
/// Stores hand back [`PostAuthor::Stub`]; the service swaps it for
/// [`PostAuthor::Hydrated`] once the user has been loaded.
/// [`PostAuthor::Unresolved`] marks a lookup that found no user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostAuthor {
    /// Author known only by id.
    Stub(UserId),
    /// Author loaded from the user store.
    Hydrated(User),
    /// Author id whose user no longer exists.
    Unresolved(UserId),
}

impl PostAuthor {
    /// Identifier of the referenced user in every state.
    pub fn id(&self) -> UserId {
        match self {
            Self::Stub(id) | Self::Unresolved(id) => *id,
            Self::Hydrated(user) => user.id(),
        }
    }

    /// The loaded user, when hydrated.
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Hydrated(user) => Some(user),
            Self::Stub(_) | Self::Unresolved(_) => None,
        }
    }
}

impl From<UserId> for PostAuthor {
    fn from(value: UserId) -> Self {
        Self::Stub(value)
    }
}

impl From<User> for PostAuthor {
    fn from(value: User) -> Self {
        Self::Hydrated(value)
    }
}

/// Attempted to hydrate a post with a user other than its author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("user {found} is not the author {expected} of this post")]
pub struct AuthorMismatch {
    /// The post's author.
    pub expected: UserId,
    /// The user offered for hydration.
    pub found: UserId,
}

/// Tracked fields of a [`Post`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PostField {
    /// The post title.
    Title,
    /// Creation timestamp.
    Created,
    /// Last update timestamp.
    Updated,
}

impl fmt::Display for PostField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Title => "title",
            Self::Created => "created",
            Self::Updated => "updated",
        })
    }
}

/// Value of one tracked [`Post`] field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostValue {
    /// New or original title.
    Title(String),
    /// Creation timestamp.
    Created(DateTime<Utc>),
    /// Last update timestamp.
    Updated(DateTime<Utc>),
}

impl TrackedValue for PostValue {
    type Field = PostField;

    fn field(&self) -> PostField {
        match self {
            Self::Title(_) => PostField::Title,
            Self::Created(_) => PostField::Created,
            Self::Updated(_) => PostField::Updated,
        }
    }
}

/// A blog post.
///
/// ## Invariants
/// - `title` is non-empty and carries no surrounding whitespace.
/// - The ledger only records `title`, `created` and `updated`; the identifier
///   and author reference are never tracked.
///
/// Equality compares persisted state and the author reference; pending
/// changes are ignored.
///
/// # Examples
/// ```
/// use blog_backend::domain::{Post, PostField, UserId};
///
/// let author = UserId::new(1).expect("positive id");
/// let mut post = Post::new("  First  ", author).expect("valid title");
/// assert_eq!(post.title(), "First");
///
/// post.set_title("Second").expect("valid title");
/// assert_eq!(post.modified_fields(), vec![PostField::Title]);
///
/// assert!(post.set_title("   ").is_err());
/// assert_eq!(post.title(), "Second");
/// ```
#[derive(Debug, Clone)]
pub struct Post {
    id: Option<PostId>,
    title: String,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
    author: PostAuthor,
    changes: ChangeLedger<PostValue>,
}

impl Post {
    /// Construct an unsaved post stamped with the current time.
    ///
    /// # Errors
    /// Returns [`FieldValidationError`] when the title is blank.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<PostAuthor>,
    ) -> Result<Self, FieldValidationError> {
        let now = Utc::now();
        Ok(Self {
            id: None,
            title: validate_title(title.into())?,
            created: now,
            updated: now,
            author: author.into(),
            changes: ChangeLedger::default(),
        })
    }

    /// Set the store-assigned identifier.
    #[must_use]
    pub fn with_id(mut self, id: PostId) -> Self {
        self.id = Some(id);
        self
    }

    /// Replace both timestamps without recording a change.
    #[must_use]
    pub fn with_timestamps(mut self, created: DateTime<Utc>, updated: DateTime<Utc>) -> Self {
        self.created = created;
        self.updated = updated;
        self
    }

    /// Store-assigned identifier; `None` until created.
    pub fn id(&self) -> Option<PostId> {
        self.id
    }

    /// Current title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// When the post was created.
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// When the post was last updated.
    pub fn updated(&self) -> DateTime<Utc> {
        self.updated
    }

    /// Author reference in its current state.
    pub fn author(&self) -> &PostAuthor {
        &self.author
    }

    /// Identifier of the author.
    pub fn author_id(&self) -> UserId {
        self.author.id()
    }

    /// The hydrated author, if any.
    pub fn user(&self) -> Option<&User> {
        self.author.user()
    }

    /// Pending changes since construction or the last commit/rollback.
    pub fn changes(&self) -> &ChangeLedger<PostValue> {
        &self.changes
    }

    /// Fields with pending changes.
    pub fn modified_fields(&self) -> Vec<PostField> {
        self.changes.fields().collect()
    }

    /// Assign a new title after trimming it.
    ///
    /// # Errors
    /// Returns [`FieldValidationError`] and leaves the post untouched when the
    /// title is blank.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), FieldValidationError> {
        let title = validate_title(title.into())?;
        self.assign(PostValue::Title(title));
        Ok(())
    }

    /// Assign the creation timestamp.
    pub fn set_created(&mut self, created: DateTime<Utc>) {
        self.assign(PostValue::Created(created));
    }

    /// Assign the last update timestamp.
    pub fn set_updated(&mut self, updated: DateTime<Utc>) {
        self.assign(PostValue::Updated(updated));
    }

    /// Attach the loaded author.
    ///
    /// # Errors
    /// Returns [`AuthorMismatch`] when `user` is not the post's author; the
    /// reference is left as it was.
    pub fn hydrate_author(&mut self, user: User) -> Result<(), AuthorMismatch> {
        let expected = self.author.id();
        if user.id() != expected {
            return Err(AuthorMismatch {
                expected,
                found: user.id(),
            });
        }
        self.author = PostAuthor::Hydrated(user);
        Ok(())
    }

    /// Record that the author could not be found.
    pub fn mark_author_unresolved(&mut self) {
        self.author = PostAuthor::Unresolved(self.author.id());
    }

    /// Restore every modified field to its original value and clear the ledger.
    pub fn rollback(&mut self) {
        for original in self.changes.take_originals() {
            self.replace(original);
        }
    }

    /// Accept the current values as persisted and clear the ledger.
    pub fn commit_changes(&mut self) {
        self.changes.clear();
    }

    fn assign(&mut self, next: PostValue) {
        let previous = self.replace(next.clone());
        self.changes.record(previous, next);
    }

    fn replace(&mut self, value: PostValue) -> PostValue {
        match value {
            PostValue::Title(title) => PostValue::Title(std::mem::replace(&mut self.title, title)),
            PostValue::Created(created) => {
                PostValue::Created(std::mem::replace(&mut self.created, created))
            }
            PostValue::Updated(updated) => {
                PostValue::Updated(std::mem::replace(&mut self.updated, updated))
            }
        }
    }
}

impl PartialEq for Post {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.title == other.title
            && self.created == other.created
            && self.updated == other.updated
            && self.author == other.author
    }
}

impl Eq for Post {}
