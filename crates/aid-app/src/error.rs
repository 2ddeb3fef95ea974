// Rust guideline compliant 2026-10-16

//! Error handling for mutual aid application services.

use aid_core::Error as CoreError;
use serde::Serialize;
use thiserror::Error;

/// Result type alias for application-level operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Stable error codes for response bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// No valid identity accompanied the request.
    Unauthenticated,
    /// The access policy denied the action.
    Forbidden,
    /// The request included invalid inputs.
    InvalidInput,
    /// The requested status change is not an edge of the state machine.
    InvalidTransition,
    /// A conditional write lost a race.
    Conflict,
    /// The requested record was not found.
    NotFound,
    /// Configuration could not be loaded.
    ConfigError,
    /// IO failure.
    IoError,
    /// JSON serialization or parsing failed.
    JsonError,
}

/// Application-level errors with stable mapping to error codes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input was provided by the caller.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error from core library operations.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// JSON error not represented by core errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Returns a stable error code for the error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::InvalidInput(_) => ErrorCode::InvalidInput,
            AppError::Json(_) => ErrorCode::JsonError,
            AppError::Core(core) => match core {
                CoreError::Unauthenticated => ErrorCode::Unauthenticated,
                CoreError::Forbidden(_) => ErrorCode::Forbidden,
                CoreError::InvalidInput(_) => ErrorCode::InvalidInput,
                CoreError::InvalidTransition { .. } => ErrorCode::InvalidTransition,
                CoreError::Conflict(_) => ErrorCode::Conflict,
                CoreError::NotFound(_) => ErrorCode::NotFound,
                CoreError::Config(_) => ErrorCode::ConfigError,
                CoreError::Io(_) => ErrorCode::IoError,
            },
        }
    }

    /// Returns the HTTP status a transport should answer with.
    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self.code() {
            ErrorCode::Unauthenticated => 401,
            ErrorCode::Forbidden => 403,
            ErrorCode::InvalidInput | ErrorCode::InvalidTransition => 400,
            ErrorCode::NotFound => 404,
            ErrorCode::Conflict => 409,
            ErrorCode::ConfigError | ErrorCode::IoError | ErrorCode::JsonError => 500,
        }
    }

    /// Returns structured details for errors that benefit from extra context.
    #[must_use]
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::Core(CoreError::Forbidden(reason)) => Some(serde_json::json!({
                "reason": reason,
            })),
            AppError::Core(CoreError::InvalidTransition { kind, from, to }) => {
                Some(serde_json::json!({
                    "resource": kind,
                    "from": from,
                    "to": to,
                }))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aid_core::{Reason, ResourceKind};

    #[test]
    fn test_http_status_mapping() {
        let cases = [
            (AppError::Core(CoreError::Unauthenticated), 401),
            (AppError::Core(CoreError::Forbidden(Reason::NotOwner)), 403),
            (AppError::InvalidInput("x".to_string()), 400),
            (AppError::Core(CoreError::InvalidInput("x".to_string())), 400),
            (
                AppError::Core(CoreError::InvalidTransition {
                    kind: ResourceKind::HelpPost,
                    from: "completed".to_string(),
                    to: "open".to_string(),
                }),
                400,
            ),
            (AppError::Core(CoreError::NotFound("x".to_string())), 404),
            (AppError::Core(CoreError::Conflict("x".to_string())), 409),
            (AppError::Core(CoreError::Config("x".to_string())), 500),
        ];
        for (error, status) in cases {
            assert_eq!(error.http_status(), status, "{error}");
        }
    }

    #[test]
    fn test_forbidden_details_carry_reason() {
        let error = AppError::Core(CoreError::Forbidden(Reason::AdminRequired));
        assert_eq!(
            error.details(),
            Some(serde_json::json!({ "reason": "admin_required" }))
        );
        assert_eq!(error.code(), ErrorCode::Forbidden);
    }
}
