//! # Car REST Routes
//!
//! Axum router for `/cars`. Write routes (POST, PUT) are wrapped with the
//! validation middleware; their handlers only ever see accepted records.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    handler::Handler,
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::get,
    Extension, Json, Router,
};
use tracing::info;

use crate::validation::{validate_car, CarValidation, ValidatedCar};

use super::errors::{RestError, RestResult};
use super::store::{CarStore, StoredCar};

/// Shared state for the car routes
#[derive(Clone)]
pub struct CarState {
    pub store: Arc<dyn CarStore>,
    pub validation: CarValidation,
}

impl CarState {
    pub fn new(store: Arc<dyn CarStore>, validation: CarValidation) -> Self {
        Self { store, validation }
    }
}

/// Build the car router (mounted under `/cars`)
pub fn car_routes(state: CarState) -> Router {
    let validation = state.validation;

    Router::new()
        .route(
            "/",
            get(list_cars).post(create_car.layer(from_fn_with_state(validation, validate_car))),
        )
        .route(
            "/:id",
            get(get_car)
                .put(update_car.layer(from_fn_with_state(validation, validate_car)))
                .delete(delete_car),
        )
        .with_state(state)
}

fn parse_id(raw: &str) -> RestResult<u64> {
    raw.parse::<u64>()
        .map_err(|_| RestError::InvalidId(raw.to_string()))
}

/// List cars handler
async fn list_cars(State(state): State<CarState>) -> RestResult<Json<Vec<StoredCar>>> {
    Ok(Json(state.store.list()?))
}

/// Get single car handler
async fn get_car(
    State(state): State<CarState>,
    Path(id): Path<String>,
) -> RestResult<Json<StoredCar>> {
    let id = parse_id(&id)?;
    Ok(Json(state.store.get(id)?))
}

/// Create car handler
async fn create_car(
    State(state): State<CarState>,
    Extension(ValidatedCar(car)): Extension<ValidatedCar>,
) -> RestResult<(StatusCode, Json<StoredCar>)> {
    let stored = state.store.create(car)?;
    info!(id = stored.id, brand = %stored.car.brand, "car created");
    Ok((StatusCode::CREATED, Json(stored)))
}

/// Update car handler
async fn update_car(
    State(state): State<CarState>,
    Path(id): Path<String>,
    Extension(ValidatedCar(car)): Extension<ValidatedCar>,
) -> RestResult<Json<StoredCar>> {
    let id = parse_id(&id)?;
    let stored = state.store.update(id, car)?;
    info!(id, "car updated");
    Ok(Json(stored))
}

/// Delete car handler
async fn delete_car(
    State(state): State<CarState>,
    Path(id): Path<String>,
) -> RestResult<StatusCode> {
    let id = parse_id(&id)?;
    state.store.delete(id)?;
    info!(id, "car deleted");
    Ok(StatusCode::NO_CONTENT)
}
