//! Storage contract shared by every repository adapter.
//!
//! Each check starts from a store holding users `1` and `2`
//! (`user_<n>@example.com`) and no posts; the calling suite prepares that
//! state before every check.

use blog_backend::domain::ports::{PostRepository, PostRepositoryError, UserRepository};
use blog_backend::domain::{Post, PostAuthor, PostField, PostId, UserId};
use chrono::{TimeZone, Utc};

pub fn user_id(raw: i64) -> UserId {
    UserId::new(raw).expect("positive user id")
}

fn draft(title: &str, author: i64) -> Post {
    Post::new(title, user_id(author)).expect("valid draft")
}

async fn create<P: PostRepository>(posts: &P, title: &str, author: i64) -> (Post, PostId) {
    let post = posts
        .create(draft(title, author))
        .await
        .expect("create succeeds");
    let id = post.id().expect("created post has an id");
    (post, id)
}

pub async fn create_assigns_distinct_ids<P: PostRepository>(posts: &P) {
    let (first, first_id) = create(posts, "First", 1).await;
    let (second, second_id) = create(posts, "Second", 2).await;

    assert_ne!(first_id, second_id);
    assert!(first.changes().is_empty());
    assert!(second.changes().is_empty());
    assert_eq!(second.title(), "Second");
}

pub async fn get_returns_stub_author<P: PostRepository>(posts: &P) {
    let (_, id) = create(posts, "Hello", 2).await;

    let stored = posts
        .get_by_id(id)
        .await
        .expect("get succeeds")
        .expect("post exists");

    assert_eq!(stored.title(), "Hello");
    assert_eq!(stored.author(), &PostAuthor::Stub(user_id(2)));
    assert!(stored.changes().is_empty());
}

pub async fn get_posts_returns_every_post<P: PostRepository>(posts: &P) {
    let (_, first_id) = create(posts, "First", 1).await;
    let (_, second_id) = create(posts, "Second", 1).await;

    let stored = posts.get_posts().await.expect("list succeeds");
    let mut ids: Vec<_> = stored.iter().filter_map(Post::id).collect();
    ids.sort();

    let mut expected = vec![first_id, second_id];
    expected.sort();
    assert_eq!(ids, expected);
}

pub async fn update_writes_only_modified_fields<P: PostRepository>(posts: &P) {
    let (_, id) = create(posts, "Original", 1).await;
    let mut stamp_writer = posts.get_by_id(id).await.expect("get").expect("exists");
    let mut title_writer = posts.get_by_id(id).await.expect("get").expect("exists");

    let stamp = Utc
        .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
        .single()
        .expect("valid timestamp");
    stamp_writer.set_updated(stamp);
    posts.update(stamp_writer).await.expect("stamp update");

    title_writer.set_title("Renamed").expect("valid title");
    assert_eq!(title_writer.modified_fields(), vec![PostField::Title]);
    let written = posts.update(title_writer).await.expect("title update");
    assert!(written.changes().is_empty());
    assert_eq!(written.title(), "Renamed");

    let stored = posts.get_by_id(id).await.expect("get").expect("exists");
    assert_eq!(stored.title(), "Renamed");
    assert_eq!(stored.updated(), stamp, "title write must not touch updated");
}

pub async fn update_without_changes_skips_the_store<P: PostRepository>(posts: &P) {
    let (post, id) = create(posts, "Untouched", 1).await;
    posts.delete(id).await.expect("delete succeeds");

    let returned = posts.update(post).await.expect("no-op update succeeds");

    assert_eq!(returned.title(), "Untouched");
    assert!(posts.get_by_id(id).await.expect("get").is_none());
}

pub async fn update_of_deleted_post_reports_missing<P: PostRepository>(posts: &P) {
    let (mut post, id) = create(posts, "Doomed", 1).await;
    posts.delete(id).await.expect("delete succeeds");
    post.set_title("Too late").expect("valid title");

    let err = posts.update(post).await.expect_err("row is gone");

    assert_eq!(err, PostRepositoryError::Missing { post_id: id });
}

pub async fn delete_is_idempotent<P: PostRepository>(posts: &P) {
    let (_, id) = create(posts, "Short lived", 2).await;

    posts.delete(id).await.expect("first delete");
    posts.delete(id).await.expect("second delete");

    assert!(posts.get_by_id(id).await.expect("get").is_none());
}

pub async fn unknown_ids_are_absent<P: PostRepository, U: UserRepository>(posts: &P, users: &U) {
    let post_id = PostId::new(9_999).expect("positive id");

    assert!(posts.get_by_id(post_id).await.expect("get post").is_none());
    assert!(
        users
            .get_by_id(&user_id(9_999))
            .await
            .expect("get user")
            .is_none()
    );
}

pub async fn user_lookup_returns_clean_entity<U: UserRepository>(users: &U) {
    let user = users
        .get_by_id(&user_id(1))
        .await
        .expect("get user")
        .expect("user exists");

    assert_eq!(user.id(), user_id(1));
    assert_eq!(user.email(), Some("user_1@example.com"));
    assert!(user.changes().is_empty());
}
