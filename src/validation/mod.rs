//! Validator adapter
//!
//! Bridges the schema's issue list to each caller's error convention:
//!
//! - [`validate_request`] - core adapter, `Ok` continues, `Err` is the map
//! - [`validate_car`] - axum middleware answering 422 on rejection
//! - the car form (`crate::form`) stores the map as per-field helper text

mod adapter;
mod error_map;
mod middleware;

pub use adapter::{validate_request, CarValidation};
pub use error_map::ValidationErrorMap;
pub use middleware::{validate_car, ValidatedCar, MAX_BODY_BYTES};
