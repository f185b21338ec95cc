//! Tests for the post service.

use std::sync::Arc;

use super::*;
use crate::domain::PostAuthor;
use chrono::{DateTime, TimeZone, Utc};
use crate::domain::ports::{MockPostRepository, MockUserRepository};
use mockall::predicate::eq;
use rstest::rstest;

type Service = PostService<MockPostRepository, MockUserRepository>;

fn make_service(posts: MockPostRepository, users: MockUserRepository) -> Service {
    PostService::new(Arc::new(posts), Arc::new(users))
}

fn user_id(raw: i64) -> UserId {
    UserId::new(raw).expect("positive id")
}

fn post_id(raw: i64) -> PostId {
    PostId::new(raw).expect("positive id")
}

fn registered_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Users are stamped with a fixed time so two builds of the same id compare equal.
fn user(raw: i64) -> User {
    User::new(user_id(raw), Some(format!("user_{raw}@example.com")))
        .expect("valid user")
        .with_timestamps(registered_at(), registered_at())
}

fn stored_post(id: i64, author: i64, title: &str) -> Post {
    Post::new(title, user_id(author))
        .expect("valid post")
        .with_id(post_id(id))
}

fn users_returning(found: Vec<User>) -> MockUserRepository {
    let mut users = MockUserRepository::new();
    users
        .expect_get_by_id()
        .returning(move |id| Ok(found.iter().find(|user| user.id() == *id).cloned()));
    users
}

fn posts_returning(post: Post) -> MockPostRepository {
    let mut posts = MockPostRepository::new();
    let id = post.id().expect("stored post has id");
    posts
        .expect_get_by_id()
        .with(eq(id))
        .times(1)
        .return_once(move |_| Ok(Some(post)));
    posts
}

#[tokio::test]
async fn create_post_assigns_id_and_hydrates_author() {
    let mut posts = MockPostRepository::new();
    posts
        .expect_create()
        .withf(|post| post.id().is_none() && post.title() == "Hello")
        .times(1)
        .return_once(|post| Ok(post.with_id(post_id(6))));
    let service = make_service(posts, users_returning(vec![user(1)]));

    let post = service
        .create_post(user_id(1), "  Hello ".to_owned())
        .await
        .expect("post created");

    assert_eq!(post.id(), Some(post_id(6)));
    assert_eq!(post.title(), "Hello");
    assert_eq!(post.user(), Some(&user(1)));
}

#[tokio::test]
async fn create_post_rejects_unknown_author_before_storing() {
    let mut posts = MockPostRepository::new();
    posts.expect_create().never();
    let service = make_service(posts, users_returning(Vec::new()));

    let err = service
        .create_post(user_id(9), "Hello".to_owned())
        .await
        .expect_err("unknown author");

    assert_eq!(err, PostError::UserNotFound { user_id: user_id(9) });
}

#[rstest]
#[case("")]
#[case("   ")]
#[tokio::test]
async fn create_post_rejects_blank_title(#[case] title: &str) {
    let mut posts = MockPostRepository::new();
    posts.expect_create().never();
    let service = make_service(posts, users_returning(vec![user(1)]));

    let err = service
        .create_post(user_id(1), title.to_owned())
        .await
        .expect_err("blank title");

    assert_eq!(
        err,
        PostError::InvalidFieldValue {
            field_name: "title",
            field_value: title.to_owned(),
        }
    );
}

#[tokio::test]
async fn create_post_maps_storage_failures_to_unexpected() {
    let mut posts = MockPostRepository::new();
    posts
        .expect_create()
        .return_once(|_| Err(PostRepositoryError::connection("refused")));
    let service = make_service(posts, users_returning(vec![user(1)]));

    let err = service
        .create_post(user_id(1), "Hello".to_owned())
        .await
        .expect_err("storage down");

    assert!(matches!(err, PostError::Unexpected { .. }));
}

#[tokio::test]
async fn get_post_hydrates_author() {
    let service = make_service(
        posts_returning(stored_post(2, 3, "Two")),
        users_returning(vec![user(3)]),
    );

    let post = service.get_post(post_id(2)).await.expect("post found");

    assert_eq!(post.author(), &PostAuthor::Hydrated(user(3)));
}

#[tokio::test]
async fn get_post_reports_missing_post() {
    let mut posts = MockPostRepository::new();
    posts.expect_get_by_id().return_once(|_| Ok(None));
    let service = make_service(posts, users_returning(Vec::new()));

    let err = service.get_post(post_id(8)).await.expect_err("missing post");

    assert_eq!(err, PostError::PostNotFound { post_id: post_id(8) });
}

#[tokio::test]
async fn get_post_requires_author_to_exist() {
    let service = make_service(
        posts_returning(stored_post(2, 3, "Two")),
        users_returning(Vec::new()),
    );

    let err = service.get_post(post_id(2)).await.expect_err("orphaned post");

    assert_eq!(err, PostError::UserNotFound { user_id: user_id(3) });
}

#[tokio::test]
async fn list_posts_looks_up_each_author_and_tolerates_missing_ones() {
    let mut posts = MockPostRepository::new();
    posts.expect_get_posts().times(1).return_once(|| {
        Ok(vec![
            stored_post(1, 1, "One"),
            stored_post(2, 7, "Orphan"),
            stored_post(3, 1, "Three"),
        ])
    });
    let mut users = MockUserRepository::new();
    let known = user(1);
    users
        .expect_get_by_id()
        .times(3)
        .returning(move |id| Ok((*id == known.id()).then(|| known.clone())));
    let service = make_service(posts, users);

    let listed = service.list_posts().await.expect("posts listed");

    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0].user(), Some(&user(1)));
    assert_eq!(listed[1].author(), &PostAuthor::Unresolved(user_id(7)));
    assert_eq!(listed[2].user(), Some(&user(1)));
}

#[tokio::test]
async fn list_posts_propagates_user_store_failures() {
    let mut posts = MockPostRepository::new();
    posts
        .expect_get_posts()
        .return_once(|| Ok(vec![stored_post(1, 1, "One")]));
    let mut users = MockUserRepository::new();
    users
        .expect_get_by_id()
        .return_once(|_| Err(UserRepositoryError::query("boom")));
    let service = make_service(posts, users);

    let err = service.list_posts().await.expect_err("user store failed");

    assert!(matches!(err, PostError::Unexpected { .. }));
}

#[tokio::test]
async fn update_post_writes_only_title_change() {
    let mut posts = posts_returning(stored_post(4, 2, "Before"));
    posts
        .expect_update()
        .withf(|post| post.modified_fields() == vec![crate::domain::PostField::Title])
        .times(1)
        .return_once(|mut post| {
            post.commit_changes();
            Ok(post)
        });
    let service = make_service(posts, users_returning(vec![user(2)]));

    let post = service
        .update_post(post_id(4), "After".to_owned(), user_id(2))
        .await
        .expect("post updated");

    assert_eq!(post.title(), "After");
    assert!(post.changes().is_empty());
    assert_eq!(post.user(), Some(&user(2)));
}

#[tokio::test]
async fn update_post_with_same_title_still_calls_store_with_empty_ledger() {
    let mut posts = posts_returning(stored_post(4, 2, "Same"));
    posts
        .expect_update()
        .withf(|post| post.changes().is_empty())
        .times(1)
        .return_once(Ok);
    let service = make_service(posts, users_returning(vec![user(2)]));

    let post = service
        .update_post(post_id(4), "Same".to_owned(), user_id(2))
        .await
        .expect("no-op update");

    assert_eq!(post.title(), "Same");
}

#[tokio::test]
async fn update_post_forbids_other_users() {
    let mut posts = posts_returning(stored_post(4, 2, "Before"));
    posts.expect_update().never();
    let mut users = MockUserRepository::new();
    users.expect_get_by_id().never();
    let service = make_service(posts, users);

    let err = service
        .update_post(post_id(4), "After".to_owned(), user_id(3))
        .await
        .expect_err("not the author");

    assert_eq!(
        err,
        PostError::Forbidden {
            post_id: post_id(4),
            user_id: user_id(3),
        }
    );
}

#[tokio::test]
async fn update_post_reports_missing_post() {
    let mut posts = MockPostRepository::new();
    posts.expect_get_by_id().return_once(|_| Ok(None));
    let service = make_service(posts, users_returning(vec![user(2)]));

    let err = service
        .update_post(post_id(4), "After".to_owned(), user_id(2))
        .await
        .expect_err("missing post");

    assert_eq!(err, PostError::PostNotFound { post_id: post_id(4) });
}

#[tokio::test]
async fn update_post_reports_missing_author() {
    let mut posts = posts_returning(stored_post(4, 2, "Before"));
    posts.expect_update().never();
    let service = make_service(posts, users_returning(Vec::new()));

    let err = service
        .update_post(post_id(4), "After".to_owned(), user_id(2))
        .await
        .expect_err("author gone");

    assert_eq!(err, PostError::UserNotFound { user_id: user_id(2) });
}

#[tokio::test]
async fn update_post_rejects_blank_title_without_writing() {
    let mut posts = posts_returning(stored_post(4, 2, "Before"));
    posts.expect_update().never();
    let service = make_service(posts, users_returning(vec![user(2)]));

    let err = service
        .update_post(post_id(4), " ".to_owned(), user_id(2))
        .await
        .expect_err("blank title");

    assert!(matches!(
        err,
        PostError::InvalidFieldValue {
            field_name: "title",
            ..
        }
    ));
}

#[tokio::test]
async fn update_post_maps_vanished_row_to_not_found() {
    let mut posts = posts_returning(stored_post(4, 2, "Before"));
    posts
        .expect_update()
        .return_once(|_| Err(PostRepositoryError::missing(post_id(4))));
    let service = make_service(posts, users_returning(vec![user(2)]));

    let err = service
        .update_post(post_id(4), "After".to_owned(), user_id(2))
        .await
        .expect_err("row vanished");

    assert_eq!(err, PostError::PostNotFound { post_id: post_id(4) });
}

#[tokio::test]
async fn delete_post_delegates_without_checks() {
    let mut posts = MockPostRepository::new();
    posts.expect_get_by_id().never();
    posts
        .expect_delete()
        .with(eq(post_id(11)))
        .times(1)
        .return_once(|_| Ok(()));
    let mut users = MockUserRepository::new();
    users.expect_get_by_id().never();
    let service = make_service(posts, users);

    service
        .delete_post(post_id(11))
        .await
        .expect("delete succeeds");
}
