use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::documents::{DocumentServiceError, DocumentStoreError};
use crate::workflows::evaluations::{EvaluationServiceError, RepositoryError};
use crate::workflows::hierarchy::{HierarchyError, StoreError};
use crate::workflows::lifecycle::{LifecycleServiceError, LifecycleStoreError};
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
    Hierarchy(HierarchyError),
    Evaluation(EvaluationServiceError),
    Lifecycle(LifecycleServiceError),
    Documents(DocumentServiceError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Hierarchy(HierarchyError::EmptyInput(_)) => StatusCode::NOT_FOUND,
            AppError::Hierarchy(HierarchyError::Store(StoreError::Unavailable(_))) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Evaluation(err) => match err {
                EvaluationServiceError::Forbidden => StatusCode::FORBIDDEN,
                EvaluationServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                EvaluationServiceError::NothingDeleted
                | EvaluationServiceError::Repository(RepositoryError::NotFound) => {
                    StatusCode::NOT_FOUND
                }
                EvaluationServiceError::Repository(RepositoryError::Conflict) => {
                    StatusCode::CONFLICT
                }
                EvaluationServiceError::Repository(RepositoryError::Unavailable(_)) => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
            },
            AppError::Lifecycle(err) => match err {
                LifecycleServiceError::Forbidden => StatusCode::FORBIDDEN,
                LifecycleServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                LifecycleServiceError::Store(LifecycleStoreError::UnknownEmployee(_)) => {
                    StatusCode::NOT_FOUND
                }
                LifecycleServiceError::Store(LifecycleStoreError::Unavailable(_)) => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
            },
            AppError::Documents(err) => match err {
                DocumentServiceError::Forbidden => StatusCode::FORBIDDEN,
                DocumentServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                DocumentServiceError::Store(DocumentStoreError::NotFound) => StatusCode::NOT_FOUND,
                DocumentServiceError::Store(DocumentStoreError::Conflict) => StatusCode::CONFLICT,
                DocumentServiceError::Store(DocumentStoreError::Unavailable(_)) => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
            },
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Hierarchy(err) => write!(f, "hierarchy error: {}", err),
            AppError::Evaluation(err) => write!(f, "evaluation error: {}", err),
            AppError::Lifecycle(err) => write!(f, "lifecycle error: {}", err),
            AppError::Documents(err) => write!(f, "document error: {}", err),
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
            AppError::Hierarchy(err) => Some(err),
            AppError::Evaluation(err) => Some(err),
            AppError::Lifecycle(err) => Some(err),
            AppError::Documents(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
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

impl From<HierarchyError> for AppError {
    fn from(value: HierarchyError) -> Self {
        Self::Hierarchy(value)
    }
}

impl From<EvaluationServiceError> for AppError {
    fn from(value: EvaluationServiceError) -> Self {
        Self::Evaluation(value)
    }
}

impl From<LifecycleServiceError> for AppError {
    fn from(value: LifecycleServiceError) -> Self {
        Self::Lifecycle(value)
    }
}

impl From<DocumentServiceError> for AppError {
    fn from(value: DocumentServiceError) -> Self {
        Self::Documents(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::hierarchy::EmptyInput;

    #[test]
    fn workflow_errors_keep_their_http_status() {
        let forbidden = AppError::from(EvaluationServiceError::Forbidden);
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

        let outage = AppError::from(HierarchyError::Store(StoreError::Unavailable(
            "timeout".to_string(),
        )));
        assert_eq!(outage.status(), StatusCode::SERVICE_UNAVAILABLE);

        let empty = AppError::from(HierarchyError::EmptyInput(EmptyInput));
        assert_eq!(empty.status(), StatusCode::NOT_FOUND);
        assert!(empty.to_string().contains("No employees found"));
    }

    #[test]
    fn io_errors_render_as_internal() {
        let err = AppError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
