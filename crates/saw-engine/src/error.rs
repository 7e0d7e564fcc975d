use crate::catalog::{CatalogError, CatalogServiceError};
use crate::config::ConfigError;
use crate::history::{CalculationServiceError, HistoryError};
use crate::report::ReportError;
use crate::saw::ValidationError;
use crate::telemetry::TelemetryError;
use crate::validation::InputError;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

/// Top-level error for the service and CLI entry points.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid calculation input: {0}")]
    Input(#[from] serde_json::Error),
    /// Body, path or query string the HTTP extractors could not decode.
    #[error("{0}")]
    Request(String),
    #[error(transparent)]
    Field(#[from] InputError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("report error: {0}")]
    Report(#[from] ReportError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Input(_)
            | AppError::Request(_)
            | AppError::Field(_)
            | AppError::Validation(_)
            | AppError::Catalog(CatalogError::CriterionInUse(_)) => StatusCode::BAD_REQUEST,
            AppError::History(HistoryError::NotFound(_))
            | AppError::Catalog(CatalogError::CriterionNotFound(_))
            | AppError::Catalog(CatalogError::AlternativeNotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::History(HistoryError::Unavailable(_))
            | AppError::Catalog(CatalogError::Unavailable(_))
            | AppError::Report(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CalculationServiceError> for AppError {
    fn from(value: CalculationServiceError) -> Self {
        match value {
            CalculationServiceError::Input(err) => Self::Field(err),
            CalculationServiceError::Validation(err) => Self::Validation(err),
            CalculationServiceError::History(err) => Self::History(err),
        }
    }
}

impl From<CatalogServiceError> for AppError {
    fn from(value: CatalogServiceError) -> Self {
        match value {
            CatalogServiceError::Input(err) => Self::Field(err),
            CatalogServiceError::Validation(err) => Self::Validation(err),
            CatalogServiceError::Catalog(err) => Self::Catalog(err),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Request(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::Request(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Request(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "saw request failed");
        } else {
            warn!(error = %self, "saw request rejected");
        }

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
