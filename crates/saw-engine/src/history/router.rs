use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use super::repository::{HistoryId, HistoryRepository};
use super::service::CalculationService;
use crate::error::AppError;
use crate::saw::CalculationRequest;

/// Router exposing SAW calculation and history endpoints.
pub fn saw_router<R>(service: Arc<CalculationService<R>>) -> Router
where
    R: HistoryRepository + 'static,
{
    Router::new()
        .route("/api/v1/saw/calculate", post(calculate_handler::<R>))
        .route("/api/v1/history", get(history_handler::<R>))
        .route(
            "/api/v1/history/:history_id",
            get(history_entry_handler::<R>).delete(delete_history_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn calculate_handler<R>(
    State(service): State<Arc<CalculationService<R>>>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response
where
    R: HistoryRepository + 'static,
{
    let outcome = payload
        .map_err(AppError::from)
        .and_then(|Json(request)| Ok(service.calculate(request)?));
    match outcome {
        Ok(recorded) => (StatusCode::OK, Json(recorded)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn history_handler<R>(State(service): State<Arc<CalculationService<R>>>) -> Response
where
    R: HistoryRepository + 'static,
{
    match service.history() {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn history_entry_handler<R>(
    State(service): State<Arc<CalculationService<R>>>,
    history_id: Result<Path<u64>, PathRejection>,
) -> Response
where
    R: HistoryRepository + 'static,
{
    let outcome = history_id
        .map_err(AppError::from)
        .and_then(|Path(id)| Ok(service.history_entry(HistoryId(id))?));
    match outcome {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn delete_history_handler<R>(
    State(service): State<Arc<CalculationService<R>>>,
    history_id: Result<Path<u64>, PathRejection>,
) -> Response
where
    R: HistoryRepository + 'static,
{
    let outcome = history_id
        .map_err(AppError::from)
        .and_then(|Path(id)| Ok(service.delete_history(HistoryId(id))?));
    match outcome {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}
