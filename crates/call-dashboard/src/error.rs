use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::calls::{CallLogImportError, PlaybookError};
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
    Import(CallLogImportError),
    Playbook(PlaybookError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Import(CallLogImportError::Csv(_)) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Import(CallLogImportError::Io(_))
            | AppError::Playbook(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Import(err) => write!(f, "call log error: {}", err),
            AppError::Playbook(err) => write!(f, "playbook error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Playbook(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
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

impl From<CallLogImportError> for AppError {
    fn from(value: CallLogImportError) -> Self {
        Self::Import(value)
    }
}

impl From<PlaybookError> for AppError {
    fn from(value: PlaybookError) -> Self {
        Self::Playbook(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::calls::CallLogImporter;

    #[test]
    fn malformed_csv_maps_to_bad_request() {
        let bytes: &[u8] = &[b'D', b'a', b't', b'e', b'\n', 0xff, 0xfe, b'\n'];
        let err: AppError = CallLogImporter::from_reader(bytes)
            .expect_err("invalid utf-8")
            .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().starts_with("call log error: invalid call log CSV data"));
    }

    #[test]
    fn missing_source_maps_to_internal_error() {
        let err: AppError = CallLogImporter::from_path("./missing-call-log.csv")
            .expect_err("missing file")
            .into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
