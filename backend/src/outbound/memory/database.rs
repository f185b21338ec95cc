//! Shared in-memory tables backing the memory repositories.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{FieldValidationError, Post, PostId, PostValue, User, UserId};

/// Number of users and posts in the fixture data set.
pub const SEED_COUNT: i64 = 5;

/// The table lock was poisoned by a panicking writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("in-memory store lock poisoned")]
pub struct StorePoisoned;

/// Stored form of a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct PostRecord {
    pub(super) title: String,
    pub(super) created: DateTime<Utc>,
    pub(super) updated: DateTime<Utc>,
    pub(super) user_id: UserId,
}

impl PostRecord {
    pub(super) fn from_post(post: &Post) -> Self {
        Self {
            title: post.title().to_owned(),
            created: post.created(),
            updated: post.updated(),
            user_id: post.author_id(),
        }
    }

    pub(super) fn to_post(&self, id: PostId) -> Result<Post, FieldValidationError> {
        Ok(Post::new(self.title.clone(), self.user_id)?
            .with_id(id)
            .with_timestamps(self.created, self.updated))
    }

    /// Copy the latest value of each modified field into the record.
    pub(super) fn apply_changes(&mut self, post: &Post) {
        for value in post.changes().current_values() {
            match value {
                PostValue::Title(title) => self.title.clone_from(title),
                PostValue::Created(created) => self.created = *created,
                PostValue::Updated(updated) => self.updated = *updated,
            }
        }
    }
}

#[derive(Debug, Default)]
pub(super) struct Tables {
    pub(super) users: BTreeMap<UserId, User>,
    pub(super) posts: BTreeMap<PostId, PostRecord>,
    last_post_id: i64,
}

impl Tables {
    /// Next unused post identifier. Identifiers are never reused.
    pub(super) fn allocate_post_id(&mut self) -> Result<PostId, FieldValidationError> {
        let next = self.last_post_id.saturating_add(1);
        let id = PostId::new(next)?;
        self.last_post_id = next;
        Ok(id)
    }
}

/// In-memory database shared by [`super::MemoryUserRepository`] and
/// [`super::MemoryPostRepository`].
///
/// Cloning is cheap and every clone sees the same tables.
///
/// # Examples
/// ```
/// use blog_backend::outbound::memory::MemoryDatabase;
///
/// let database = MemoryDatabase::seeded();
/// assert_eq!(database.post_count().expect("lock"), 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryDatabase {
    /// An empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// A database holding the fixture data set.
    ///
    /// Users `1..=5` have addresses `user_<n>@example.com`; post `n` is
    /// titled `Getting started <n>` and authored by user `n`.
    pub fn seeded() -> Self {
        let mut tables = Tables::default();
        let now = Utc::now();
        for raw in 1..=SEED_COUNT {
            let (Ok(user_id), Ok(post_id)) = (UserId::new(raw), PostId::new(raw)) else {
                continue;
            };
            if let Ok(user) = User::new(user_id, Some(format!("user_{raw}@example.com"))) {
                tables.users.insert(user_id, user.with_timestamps(now, now));
            }
            tables.posts.insert(
                post_id,
                PostRecord {
                    title: format!("Getting started {raw}"),
                    created: now,
                    updated: now,
                    user_id,
                },
            );
            tables.last_post_id = raw;
        }
        Self {
            tables: Arc::new(Mutex::new(tables)),
        }
    }

    /// Store or replace a user.
    ///
    /// # Errors
    /// Returns [`StorePoisoned`] when the table lock is poisoned.
    pub fn insert_user(&self, user: User) -> Result<(), StorePoisoned> {
        self.with_tables(|tables| {
            tables.users.insert(user.id(), user);
            Ok(())
        })
    }

    /// Remove a user, leaving their posts in place.
    ///
    /// # Errors
    /// Returns [`StorePoisoned`] when the table lock is poisoned.
    pub fn remove_user(&self, user_id: UserId) -> Result<(), StorePoisoned> {
        self.with_tables(|tables| {
            tables.users.remove(&user_id);
            Ok(())
        })
    }

    /// Number of stored posts.
    ///
    /// # Errors
    /// Returns [`StorePoisoned`] when the table lock is poisoned.
    pub fn post_count(&self) -> Result<usize, StorePoisoned> {
        self.with_tables(|tables| Ok(tables.posts.len()))
    }

    /// Run `f` with exclusive access to the tables.
    pub(super) fn with_tables<T, E>(
        &self,
        f: impl FnOnce(&mut Tables) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<StorePoisoned>,
    {
        let mut tables = self.tables.lock().map_err(|_| E::from(StorePoisoned))?;
        f(&mut tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn seeded_tables_pair_posts_with_authors() {
        let database = MemoryDatabase::seeded();
        database
            .with_tables(|tables| {
                assert_eq!(tables.users.len(), 5);
                for (id, record) in &tables.posts {
                    assert_eq!(record.user_id.get(), id.get());
                    assert_eq!(record.title, format!("Getting started {id}"));
                }
                Ok::<_, StorePoisoned>(())
            })
            .expect("lock");
    }

    #[rstest]
    fn identifiers_continue_after_seed_and_are_not_reused() {
        let database = MemoryDatabase::seeded();
        let ids = database
            .with_tables(|tables| {
                let first = tables.allocate_post_id().map_err(|_| StorePoisoned)?;
                tables.posts.remove(&first);
                let second = tables.allocate_post_id().map_err(|_| StorePoisoned)?;
                Ok::<_, StorePoisoned>((first.get(), second.get()))
            })
            .expect("lock");
        assert_eq!(ids, (6, 7));
    }

    #[rstest]
    fn apply_changes_copies_only_modified_fields() {
        let author = UserId::new(1).expect("positive id");
        let id = PostId::new(1).expect("positive id");
        let mut record = PostRecord {
            title: "Old".to_owned(),
            created: Utc::now(),
            updated: Utc::now(),
            user_id: author,
        };
        let snapshot = record.clone();
        let mut post = record.to_post(id).expect("valid record");
        post.set_title("New").expect("valid title");

        record.apply_changes(&post);

        assert_eq!(record.title, "New");
        assert_eq!(record.created, snapshot.created);
        assert_eq!(record.updated, snapshot.updated);
    }
}
