use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use super::repository::{
    AlternativeDraft, AlternativeRepository, CriterionDraft, CriterionRepository,
};
use super::service::{CatalogService, ValueEntry, ValueFilter};
use crate::error::AppError;
use crate::history::{CalculationService, HistoryRepository};
use crate::saw::{AlternativeId, Criterion, CriterionId};

type Catalog<C, A> = Arc<CatalogService<C, A>>;

/// Router exposing criterion and alternative management plus a calculation
/// over the stored definitions.
pub fn catalog_router<C, A, R>(
    catalog: Catalog<C, A>,
    calculations: Arc<CalculationService<R>>,
) -> Router
where
    C: CriterionRepository + 'static,
    A: AlternativeRepository + 'static,
    R: HistoryRepository + 'static,
{
    let management = Router::new()
        .route(
            "/api/v1/criteria",
            get(list_criteria_handler::<C, A>)
                .post(create_criterion_handler::<C, A>)
                .put(update_weights_handler::<C, A>),
        )
        .route(
            "/api/v1/criteria/:criterion_id",
            get(criterion_handler::<C, A>)
                .put(update_criterion_handler::<C, A>)
                .delete(delete_criterion_handler::<C, A>),
        )
        .route(
            "/api/v1/alternatives",
            get(list_alternatives_handler::<C, A>).post(create_alternative_handler::<C, A>),
        )
        .route(
            "/api/v1/alternatives/:alternative_id",
            get(alternative_handler::<C, A>).delete(delete_alternative_handler::<C, A>),
        )
        .route(
            "/api/v1/alternative-values",
            get(values_handler::<C, A>).post(assign_value_handler::<C, A>),
        )
        .route(
            "/api/v1/alternative-values/sync",
            post(sync_values_handler::<C, A>),
        )
        .with_state(catalog.clone());

    let stored = Router::new()
        .route(
            "/api/v1/saw/calculate/stored",
            post(calculate_stored_handler::<C, A, R>),
        )
        .with_state((catalog, calculations));

    management.merge(stored)
}

fn respond<T, E>(status: StatusCode, outcome: Result<T, E>) -> Response
where
    T: serde::Serialize,
    AppError: From<E>,
{
    match outcome {
        Ok(value) => (status, Json(value)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

async fn list_criteria_handler<C, A>(State(catalog): State<Catalog<C, A>>) -> Response
where
    C: CriterionRepository + 'static,
    A: AlternativeRepository + 'static,
{
    respond(StatusCode::OK, catalog.criteria())
}

async fn create_criterion_handler<C, A>(
    State(catalog): State<Catalog<C, A>>,
    payload: Result<Json<CriterionDraft>, JsonRejection>,
) -> Response
where
    C: CriterionRepository + 'static,
    A: AlternativeRepository + 'static,
{
    match payload {
        Ok(Json(draft)) => respond(StatusCode::CREATED, catalog.create_criterion(draft)),
        Err(rejection) => AppError::from(rejection).into_response(),
    }
}

async fn update_weights_handler<C, A>(
    State(catalog): State<Catalog<C, A>>,
    payload: Result<Json<Vec<Criterion>>, JsonRejection>,
) -> Response
where
    C: CriterionRepository + 'static,
    A: AlternativeRepository + 'static,
{
    match payload {
        Ok(Json(criteria)) => respond(StatusCode::OK, catalog.update_weights(criteria)),
        Err(rejection) => AppError::from(rejection).into_response(),
    }
}

async fn criterion_handler<C, A>(
    State(catalog): State<Catalog<C, A>>,
    criterion_id: Result<Path<i64>, PathRejection>,
) -> Response
where
    C: CriterionRepository + 'static,
    A: AlternativeRepository + 'static,
{
    match criterion_id {
        Ok(Path(id)) => respond(StatusCode::OK, catalog.criterion(CriterionId(id))),
        Err(rejection) => AppError::from(rejection).into_response(),
    }
}

async fn update_criterion_handler<C, A>(
    State(catalog): State<Catalog<C, A>>,
    criterion_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CriterionDraft>, JsonRejection>,
) -> Response
where
    C: CriterionRepository + 'static,
    A: AlternativeRepository + 'static,
{
    let outcome = criterion_id
        .map_err(AppError::from)
        .and_then(|Path(id)| Ok((id, payload.map_err(AppError::from)?)));
    match outcome {
        Ok((id, Json(draft))) => respond(
            StatusCode::OK,
            catalog.update_criterion(CriterionId(id), draft),
        ),
        Err(err) => err.into_response(),
    }
}

async fn delete_criterion_handler<C, A>(
    State(catalog): State<Catalog<C, A>>,
    criterion_id: Result<Path<i64>, PathRejection>,
) -> Response
where
    C: CriterionRepository + 'static,
    A: AlternativeRepository + 'static,
{
    let outcome = criterion_id
        .map_err(AppError::from)
        .and_then(|Path(id)| Ok(catalog.delete_criterion(CriterionId(id))?));
    match outcome {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

async fn list_alternatives_handler<C, A>(State(catalog): State<Catalog<C, A>>) -> Response
where
    C: CriterionRepository + 'static,
    A: AlternativeRepository + 'static,
{
    respond(StatusCode::OK, catalog.alternatives())
}

async fn create_alternative_handler<C, A>(
    State(catalog): State<Catalog<C, A>>,
    payload: Result<Json<AlternativeDraft>, JsonRejection>,
) -> Response
where
    C: CriterionRepository + 'static,
    A: AlternativeRepository + 'static,
{
    match payload {
        Ok(Json(draft)) => respond(StatusCode::CREATED, catalog.create_alternative(draft)),
        Err(rejection) => AppError::from(rejection).into_response(),
    }
}

async fn alternative_handler<C, A>(
    State(catalog): State<Catalog<C, A>>,
    alternative_id: Result<Path<i64>, PathRejection>,
) -> Response
where
    C: CriterionRepository + 'static,
    A: AlternativeRepository + 'static,
{
    match alternative_id {
        Ok(Path(id)) => respond(StatusCode::OK, catalog.alternative(AlternativeId(id))),
        Err(rejection) => AppError::from(rejection).into_response(),
    }
}

async fn delete_alternative_handler<C, A>(
    State(catalog): State<Catalog<C, A>>,
    alternative_id: Result<Path<i64>, PathRejection>,
) -> Response
where
    C: CriterionRepository + 'static,
    A: AlternativeRepository + 'static,
{
    let outcome = alternative_id
        .map_err(AppError::from)
        .and_then(|Path(id)| Ok(catalog.delete_alternative(AlternativeId(id))?));
    match outcome {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

async fn values_handler<C, A>(
    State(catalog): State<Catalog<C, A>>,
    filter: Result<Query<ValueFilter>, QueryRejection>,
) -> Response
where
    C: CriterionRepository + 'static,
    A: AlternativeRepository + 'static,
{
    match filter {
        Ok(Query(filter)) => respond(StatusCode::OK, catalog.values(filter)),
        Err(rejection) => AppError::from(rejection).into_response(),
    }
}

async fn assign_value_handler<C, A>(
    State(catalog): State<Catalog<C, A>>,
    payload: Result<Json<ValueEntry>, JsonRejection>,
) -> Response
where
    C: CriterionRepository + 'static,
    A: AlternativeRepository + 'static,
{
    match payload {
        Ok(Json(entry)) => respond(StatusCode::OK, catalog.assign_value(entry)),
        Err(rejection) => AppError::from(rejection).into_response(),
    }
}

async fn sync_values_handler<C, A>(State(catalog): State<Catalog<C, A>>) -> Response
where
    C: CriterionRepository + 'static,
    A: AlternativeRepository + 'static,
{
    respond(StatusCode::OK, catalog.sync_values())
}

async fn calculate_stored_handler<C, A, R>(
    State((catalog, calculations)): State<(Catalog<C, A>, Arc<CalculationService<R>>)>,
) -> Response
where
    C: CriterionRepository + 'static,
    A: AlternativeRepository + 'static,
    R: HistoryRepository + 'static,
{
    let outcome = catalog
        .calculation_request()
        .map_err(AppError::from)
        .and_then(|request| Ok(calculations.calculate(request)?));
    respond(StatusCode::OK, outcome)
}
