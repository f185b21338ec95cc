//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; repositories convert them
//! to and from domain entities.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{Post, PostValue};

use super::schema::{posts, users};

/// Row read from the `users` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub user_id: i64,
    pub email: Option<String>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Row read from the `posts` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PostRow {
    pub post_id: i64,
    pub title: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub user_id: i64,
}

/// Insertable post; the database assigns `post_id`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub(crate) struct NewPostRow<'a> {
    pub title: &'a str,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub user_id: i64,
}

impl<'a> NewPostRow<'a> {
    pub(crate) fn from_post(post: &'a Post) -> Self {
        Self {
            title: post.title(),
            created: post.created(),
            updated: post.updated(),
            user_id: post.author_id().get(),
        }
    }
}

/// Changeset holding only the post's modified columns.
///
/// `None` fields are skipped by Diesel, so the generated `UPDATE` touches
/// exactly the columns recorded in the ledger.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = posts)]
pub(crate) struct PostChangeset<'a> {
    pub title: Option<&'a str>,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

impl<'a> PostChangeset<'a> {
    pub(crate) fn from_changes(post: &'a Post) -> Self {
        let mut changeset = Self::default();
        for value in post.changes().current_values() {
            match value {
                PostValue::Title(title) => changeset.title = Some(title.as_str()),
                PostValue::Created(created) => changeset.created = Some(*created),
                PostValue::Updated(updated) => changeset.updated = Some(*updated),
            }
        }
        changeset
    }
}
