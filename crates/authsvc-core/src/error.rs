//! Error types for the authsvc client.
//!
//! This module provides a unified error type with explicit variants for
//! remote request failures, token refresh failures, transport, decoding,
//! storage and input validation errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for authsvc operations.
///
/// Callers usually care about two cases: [`Error::Request`] when the service
/// answered with a non-2xx status, and [`Error::Refresh`] when an expired
/// access token could not be renewed and the user has to log in again.
#[derive(Debug, Error)]
pub enum Error {
    /// The service returned a non-success status.
    #[error("request failed: {0}")]
    Request(#[from] RequestError),

    /// Exchanging the refresh token for a new access token failed.
    #[error("token refresh failed: {0}")]
    Refresh(#[from] RefreshError),

    /// Network transport errors (connection, timeout, HTTP plumbing).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A successful response body did not match the expected shape.
    #[error("failed to decode response: {message}")]
    Decode { message: String },

    /// Token persistence failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Input validation errors (base URL, header values, request bodies).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns the HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Request(err) => Some(err.status),
            Error::Refresh(RefreshError::Rejected { status, .. }) => Some(*status),
            _ => None,
        }
    }

    /// True when the caller should send the user back to the login screen.
    pub fn requires_login(&self) -> bool {
        match self {
            Error::Refresh(_) => true,
            Error::Request(err) => err.is_unauthorized(),
            _ => false,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Body of an error response.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorPayload {
    /// The body parsed as JSON.
    Json(serde_json::Value),
    /// The body was empty or not JSON; the raw text is kept for diagnostics.
    Undecodable(String),
}

impl ErrorPayload {
    /// Build a payload from a raw response body.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str(body) {
            Ok(value) => ErrorPayload::Json(value),
            Err(_) => ErrorPayload::Undecodable(body.to_string()),
        }
    }

    /// Returns the JSON payload if the body was decodable.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ErrorPayload::Json(value) => Some(value),
            ErrorPayload::Undecodable(_) => None,
        }
    }

    /// Best-effort human readable message.
    ///
    /// The service reports errors as `{"detail": ..}`, `{"error": ..}` or
    /// `{"message": ..}`; field validation errors come back as a map of
    /// field name to a list of messages.
    pub fn message(&self) -> Option<String> {
        let value = self.as_json()?;
        for key in ["detail", "error", "message"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return Some(text.to_string());
            }
        }
        if value.is_object() {
            return Some(value.to_string());
        }
        None
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPayload::Json(value) => write!(f, "{}", value),
            ErrorPayload::Undecodable(_) => write!(f, "undecodable error body"),
        }
    }
}

/// A non-2xx response from the service.
#[derive(Debug, Clone)]
pub struct RequestError {
    /// HTTP status code.
    pub status: u16,
    /// Decoded error body.
    pub payload: ErrorPayload,
}

impl RequestError {
    /// Create a new request error.
    pub fn new(status: u16, payload: ErrorPayload) -> Self {
        Self { status, payload }
    }

    /// Check if this is an authentication error.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(message) = self.payload.message() {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for RequestError {}

/// Failures of the refresh-token exchange.
#[derive(Debug, Clone, Error)]
pub enum RefreshError {
    /// No refresh token is held.
    #[error("no refresh token available")]
    MissingRefreshToken,

    /// The service rejected the refresh token.
    #[error("refresh rejected with HTTP {status}")]
    Rejected { status: u16, payload: ErrorPayload },

    /// The refresh endpoint could not be reached.
    #[error("refresh endpoint unreachable: {0}")]
    Unreachable(TransportError),

    /// The refresh endpoint answered 2xx with an unexpected body.
    #[error("invalid refresh response: {0}")]
    InvalidResponse(String),

    /// The session was logged out or replaced while the refresh was in
    /// flight; the new access token was discarded.
    #[error("session changed while refreshing")]
    Superseded,
}

/// Token persistence errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying IO failure.
    #[error("IO error at {path}: {message}")]
    Io { path: String, message: String },

    /// The stored data could not be parsed.
    #[error("corrupt token store at {path}: {message}")]
    Corrupt { path: String, message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid service base URL.
    #[error("invalid service URL '{value}': {reason}")]
    ServiceUrl { value: String, reason: String },

    /// Header name or value that cannot be sent.
    #[error("invalid header '{name}': {reason}")]
    Header { name: String, reason: String },

    /// The request body could not be serialized.
    #[error("invalid request body: {message}")]
    Body { message: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_keeps_json_body() {
        let payload = ErrorPayload::from_body(r#"{"detail":"Token is invalid or expired"}"#);
        assert_eq!(payload.message().as_deref(), Some("Token is invalid or expired"));
        assert_eq!(
            payload.as_json(),
            Some(&json!({"detail": "Token is invalid or expired"}))
        );
    }

    #[test]
    fn payload_marks_non_json_body() {
        let payload = ErrorPayload::from_body("Internal Server Error");
        assert_eq!(
            payload,
            ErrorPayload::Undecodable("Internal Server Error".to_string())
        );
        assert!(payload.message().is_none());
    }

    #[test]
    fn field_errors_are_rendered_as_json() {
        let payload = ErrorPayload::from_body(r#"{"email":["This field is required."]}"#);
        let message = payload.message().unwrap();
        assert!(message.contains("This field is required."));
    }

    #[test]
    fn request_error_display_includes_status() {
        let err = RequestError::new(403, ErrorPayload::from_body(r#"{"error":"Forbidden"}"#));
        assert_eq!(err.to_string(), "HTTP 403: Forbidden");
    }

    #[test]
    fn refresh_errors_require_login() {
        let err = Error::from(RefreshError::MissingRefreshToken);
        assert!(err.requires_login());

        let err = Error::from(RequestError::new(404, ErrorPayload::Undecodable(String::new())));
        assert!(!err.requires_login());
        assert_eq!(err.status(), Some(404));
    }
}
