//! Domain entities, errors, ports and services.
//!
//! Purpose: hold the business rules of the blog independent of transport and
//! storage. Entities track their own field changes; the service talks to
//! storage only through the ports in [`ports`].
//!
//! Public surface:
//! - `User`, `Post`: change-tracked entities.
//! - `ChangeLedger`: per-entity record of modified fields.
//! - `PostError`: typed failures of the post use-cases.
//! - `Error` / `ErrorCode`: transport-agnostic error envelope.
//! - `PostService`: implementation of the driving ports.

pub mod change_ledger;
pub mod error;
pub mod field_validation;
pub mod ports;
pub mod post;
pub mod post_error;
pub mod post_service;
pub mod trace_id;
pub mod user;

pub use self::change_ledger::{ChangeLedger, FieldChange, TrackedValue};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::field_validation::FieldValidationError;
pub use self::post::{AuthorMismatch, Post, PostAuthor, PostField, PostId, PostValue};
pub use self::post_error::PostError;
pub use self::post_service::PostService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserField, UserId, UserValue};
