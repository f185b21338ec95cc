//! User entity with change-tracked fields.

use std::fmt;

use chrono::{DateTime, Utc};

use super::change_ledger::{ChangeLedger, TrackedValue};
use super::field_validation::{FieldValidationError, validate_email, validate_positive_id};

/// Positive integer identifier of a user.
///
/// # Examples
/// ```
/// use blog_backend::domain::UserId;
///
/// let id = UserId::new(7).expect("positive id");
/// assert_eq!(id.get(), 7);
/// assert!(UserId::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(i64);

impl UserId {
    /// Validate and wrap a raw identifier.
    pub fn new(raw: i64) -> Result<Self, FieldValidationError> {
        validate_positive_id("user_id", raw).map(Self)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for UserId {
    type Error = FieldValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

/// Tracked fields of a [`User`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UserField {
    /// Contact address.
    Email,
    /// Registration timestamp.
    Created,
    /// Last update timestamp.
    Updated,
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Email => "email",
            Self::Created => "created",
            Self::Updated => "updated",
        })
    }
}

/// Value of one tracked [`User`] field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValue {
    /// Contact address, if any.
    Email(Option<String>),
    /// Registration timestamp.
    Created(DateTime<Utc>),
    /// Last update timestamp.
    Updated(DateTime<Utc>),
}

impl TrackedValue for UserValue {
    type Field = UserField;

    fn field(&self) -> UserField {
        match self {
            Self::Email(_) => UserField::Email,
            Self::Created(_) => UserField::Created,
            Self::Updated(_) => UserField::Updated,
        }
    }
}

/// A blog user.
///
/// The identifier is fixed at construction. Every other field is assigned
/// through a setter that validates the value and records the change in the
/// user's [`ChangeLedger`].
///
/// Equality compares persisted state only; pending changes are ignored.
///
/// # Examples
/// ```
/// use blog_backend::domain::{User, UserField, UserId};
///
/// let id = UserId::new(1).expect("positive id");
/// let mut user = User::new(id, Some("a@example.com".into())).expect("valid user");
/// user.set_email(Some("b@example.com".into())).expect("valid email");
/// assert_eq!(user.modified_fields(), vec![UserField::Email]);
///
/// user.rollback();
/// assert_eq!(user.email(), Some("a@example.com"));
/// ```
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    email: Option<String>,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
    changes: ChangeLedger<UserValue>,
}

impl User {
    /// Construct a user stamped with the current time.
    ///
    /// # Errors
    /// Returns [`FieldValidationError`] when `email` is present but malformed.
    pub fn new(id: UserId, email: Option<String>) -> Result<Self, FieldValidationError> {
        let now = Utc::now();
        Ok(Self {
            id,
            email: validate_email(email)?,
            created: now,
            updated: now,
            changes: ChangeLedger::default(),
        })
    }

    /// Replace both timestamps without recording a change.
    #[must_use]
    pub fn with_timestamps(mut self, created: DateTime<Utc>, updated: DateTime<Utc>) -> Self {
        self.created = created;
        self.updated = updated;
        self
    }

    /// User identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Contact address, if one is on file.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// When the user registered.
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// When the user was last updated.
    pub fn updated(&self) -> DateTime<Utc> {
        self.updated
    }

    /// Pending changes since construction or the last commit/rollback.
    pub fn changes(&self) -> &ChangeLedger<UserValue> {
        &self.changes
    }

    /// Fields with pending changes.
    pub fn modified_fields(&self) -> Vec<UserField> {
        self.changes.fields().collect()
    }

    /// Assign the email address.
    ///
    /// # Errors
    /// Returns [`FieldValidationError`] and leaves the user untouched when the
    /// address is malformed.
    pub fn set_email(&mut self, email: Option<String>) -> Result<(), FieldValidationError> {
        let email = validate_email(email)?;
        self.assign(UserValue::Email(email));
        Ok(())
    }

    /// Assign the registration timestamp.
    pub fn set_created(&mut self, created: DateTime<Utc>) {
        self.assign(UserValue::Created(created));
    }

    /// Assign the last update timestamp.
    pub fn set_updated(&mut self, updated: DateTime<Utc>) {
        self.assign(UserValue::Updated(updated));
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

    fn assign(&mut self, next: UserValue) {
        let previous = self.replace(next.clone());
        self.changes.record(previous, next);
    }

    fn replace(&mut self, value: UserValue) -> UserValue {
        match value {
            UserValue::Email(email) => UserValue::Email(std::mem::replace(&mut self.email, email)),
            UserValue::Created(created) => {
                UserValue::Created(std::mem::replace(&mut self.created, created))
            }
            UserValue::Updated(updated) => {
                UserValue::Updated(std::mem::replace(&mut self.updated, updated))
            }
        }
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.email == other.email
            && self.created == other.created
            && self.updated == other.updated
    }
}

impl Eq for User {}

#[cfg(test)]
mod tests;
