use crate::accounts::SignUpError;
use crate::config::ConfigError;
use crate::listings::SubmitError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Json(serde_json::Error),
    Submission(SubmitError),
    SignUp(SignUpError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {err}"),
            AppError::Telemetry(err) => write!(f, "telemetry error: {err}"),
            AppError::Io(err) => write!(f, "io error: {err}"),
            AppError::Server(err) => write!(f, "server error: {err}"),
            AppError::Json(err) => write!(f, "invalid json: {err}"),
            AppError::Submission(err) => write!(f, "listing submission failed: {err}"),
            AppError::SignUp(err) => write!(f, "sign up rejected: {err}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Json(err) => Some(err),
            AppError::Submission(err) => Some(err),
            AppError::SignUp(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Json(_) => StatusCode::BAD_REQUEST,
            AppError::Submission(SubmitError::Validation(_)) | AppError::SignUp(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Submission(SubmitError::AlreadySubmitting | SubmitError::Discarded) => {
                StatusCode::CONFLICT
            }
            AppError::Submission(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<SubmitError> for AppError {
    fn from(value: SubmitError) -> Self {
        Self::Submission(value)
    }
}

impl From<SignUpError> for AppError {
    fn from(value: SignUpError) -> Self {
        Self::SignUp(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::PersistenceError;

    #[test]
    fn submission_errors_map_to_gateway_status() {
        let err = AppError::from(SubmitError::Persistence(PersistenceError::Unavailable(
            "backend down".to_string(),
        )));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn sign_up_errors_are_unprocessable() {
        let response = AppError::from(SignUpError::PasswordMismatch).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn busy_or_discarded_submissions_conflict() {
        for err in [SubmitError::AlreadySubmitting, SubmitError::Discarded] {
            let response = AppError::from(err).into_response();
            assert_eq!(response.status(), StatusCode::CONFLICT);
        }
    }
}
