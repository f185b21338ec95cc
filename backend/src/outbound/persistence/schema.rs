//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match the deployed tables. Schema migration is managed outside
//! this service; `tests/support/schema.sql` holds the DDL the integration
//! suite applies.

diesel::table! {
    /// Blog users.
    users (user_id) {
        user_id -> Int8,
        email -> Nullable<Varchar>,
        created -> Timestamptz,
        updated -> Timestamptz,
    }
}

diesel::table! {
    /// Blog posts. `post_id` is a `BIGSERIAL`.
    posts (post_id) {
        post_id -> Int8,
        title -> Varchar,
        created -> Timestamptz,
        updated -> Timestamptz,
        user_id -> Int8,
    }
}

diesel::joinable!(posts -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(posts, users);
