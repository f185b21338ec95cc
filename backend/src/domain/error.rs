//! Transport-agnostic error envelope.
//!
//! Inbound adapters turn this payload into HTTP responses. Constructors
//! capture the request's [`TraceId`] when one is in scope.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error as ThisError;

use super::trace_id::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The caller may not perform this action.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// An unexpected error occurred inside the service.
    InternalError,
}

impl ErrorCode {
    fn fallback_message(self) -> &'static str {
        match self {
            Self::InvalidRequest => "Invalid request",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "Not found",
            Self::InternalError => "Internal server error",
        }
    }
}

/// Validation failures raised by the fallible constructors.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ErrorValidationError {
    #[error("error message must not be empty")]
    EmptyMessage,
    #[error("trace identifier must not be empty")]
    EmptyTraceId,
}

/// Error payload returned to clients.
///
/// ## Invariants
/// - `message` is non-empty once trimmed.
/// - `trace_id`, when present, is non-empty.
///
/// # Examples
/// ```
/// use blog_backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("post 3 not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.message(), "post 3 not found");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ErrorDto", into = "ErrorDto")]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
    details: Option<Value>,
}

impl Error {
    /// Create an error, substituting a generic message for a blank one.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(error) => error,
            Err(_) => Self::from_parts(code, code.fallback_message().to_owned()),
        }
    }

    /// Create an error, rejecting a blank message.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self::from_parts(code, message))
    }

    fn from_parts(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Machine-readable code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Trace identifier of the failing request, if known.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Structured details, if any.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Attach a trace identifier, rejecting a blank one.
    pub fn try_with_trace_id(
        mut self,
        trace_id: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let trace_id = trace_id.into();
        if trace_id.trim().is_empty() {
            return Err(ErrorValidationError::EmptyTraceId);
        }
        self.trace_id = Some(trace_id);
        Ok(self)
    }

    /// Attach a trace identifier; blank values leave the error unchanged.
    #[must_use]
    pub fn with_trace_id(self, trace_id: impl Into<String>) -> Self {
        let fallback = self.clone();
        self.try_with_trace_id(trace_id).unwrap_or(fallback)
    }

    /// Malformed or invalid input.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// The caller may not perform the action.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// The addressed resource does not exist.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Unexpected server-side failure.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ErrorDto {
    code: ErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<Error> for ErrorDto {
    fn from(value: Error) -> Self {
        Self {
            code: value.code,
            message: value.message,
            trace_id: value.trace_id,
            details: value.details,
        }
    }
}

impl TryFrom<ErrorDto> for Error {
    type Error = ErrorValidationError;

    fn try_from(value: ErrorDto) -> Result<Self, Self::Error> {
        let ErrorDto {
            code,
            message,
            trace_id,
            details,
        } = value;
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        if trace_id.as_deref().is_some_and(|id| id.trim().is_empty()) {
            return Err(ErrorValidationError::EmptyTraceId);
        }
        Ok(Self {
            code,
            message,
            trace_id,
            details,
        })
    }
}
