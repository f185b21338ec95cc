//! Shared helper utilities for backend integration tests.
//!
//! Integration tests compile as separate crates, so each suite pulls this
//! module in with `mod support;` and uses the parts it needs.

pub mod repository_contract;

/// Environment variable naming the PostgreSQL database used by the Diesel
/// suite. The suite truncates its tables, so point it at a scratch database.
pub const TEST_DATABASE_URL_VAR: &str = "BLOG_TEST_DATABASE_URL";

/// DDL applied before the Diesel suite runs.
pub const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Return the scratch database URL, or print a skip marker when unset.
pub fn test_database_url() -> Option<String> {
    match std::env::var(TEST_DATABASE_URL_VAR) {
        Ok(url) if !url.trim().is_empty() => Some(url),
        _ => {
            eprintln!("SKIP-TEST-DATABASE: {TEST_DATABASE_URL_VAR} is not set");
            None
        }
    }
}
