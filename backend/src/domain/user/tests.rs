//! Tests for the user entity.

use super::*;
use chrono::TimeZone;
use rstest::{fixture, rstest};

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[fixture]
fn user() -> User {
    User::new(UserId::new(1).expect("positive id"), Some("one@example.com".to_owned()))
        .expect("valid user")
        .with_timestamps(at(1), at(2))
}

#[rstest]
fn construction_starts_with_empty_ledger(user: User) {
    assert!(user.changes().is_empty());
    assert_eq!(user.created(), at(1));
    assert_eq!(user.updated(), at(2));
}

#[rstest]
fn construction_validates_email() {
    let id = UserId::new(3).expect("positive id");
    let err = User::new(id, Some("broken".to_owned())).expect_err("invalid email");
    assert_eq!(err.field_name, "email");
    assert_eq!(err.field_value, "broken");
}

#[rstest]
fn user_without_email_is_valid() {
    let user = User::new(UserId::new(2).expect("positive id"), None).expect("valid user");
    assert_eq!(user.email(), None);
}

#[rstest]
fn invalid_email_leaves_user_unchanged(mut user: User) {
    let err = user
        .set_email(Some("nope".to_owned()))
        .expect_err("invalid email");
    assert_eq!(err.field_name, "email");
    assert_eq!(user.email(), Some("one@example.com"));
    assert!(user.changes().is_empty());
}

#[rstest]
fn same_value_records_nothing(mut user: User) {
    user.set_email(Some("one@example.com".to_owned()))
        .expect("valid email");
    user.set_created(at(1));
    assert!(user.modified_fields().is_empty());
}

#[rstest]
fn changes_keep_first_original(mut user: User) {
    user.set_email(Some("two@example.com".to_owned()))
        .expect("valid email");
    user.set_email(None).expect("absent email");

    let change = user.changes().get(UserField::Email).expect("email tracked");
    assert_eq!(
        change.original(),
        &UserValue::Email(Some("one@example.com".to_owned()))
    );
    assert_eq!(change.current(), &UserValue::Email(None));
}

#[rstest]
fn rollback_restores_every_field(mut user: User) {
    let before = user.clone();
    user.set_email(Some("two@example.com".to_owned()))
        .expect("valid email");
    user.set_created(at(5));
    user.set_updated(at(6));
    assert_eq!(
        user.modified_fields(),
        vec![UserField::Email, UserField::Created, UserField::Updated]
    );

    user.rollback();

    assert_eq!(user, before);
    assert!(user.changes().is_empty());
}

#[rstest]
fn commit_keeps_current_values(mut user: User) {
    user.set_updated(at(9));
    user.commit_changes();

    assert!(user.changes().is_empty());
    assert_eq!(user.updated(), at(9));
}

#[rstest]
fn equality_ignores_pending_changes(user: User) {
    let mut touched = user.clone();
    touched.set_updated(at(3));
    touched.set_updated(at(2));
    assert!(!touched.changes().is_empty());
    assert_eq!(touched, user);
}
