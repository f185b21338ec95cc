//! Inbound adapters that translate external requests into domain calls.
//!
//! HTTP handlers live under [`http`].

pub mod http;
