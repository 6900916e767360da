//! Server-side validation middleware
//!
//! Wraps the car write routes. On rejection the request is answered with
//! 422 and the error map as body, and the wrapped handler never runs. On
//! acceptance the body is forwarded untouched and the typed record is
//! attached as a [`ValidatedCar`] extension.

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use tracing::warn;

use crate::rest_api::RestError;
use crate::schema::CarRecord;

use super::adapter::CarValidation;

/// Largest accepted car payload
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Record accepted by [`validate_car`], available to the next handler
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedCar(pub CarRecord);

/// Validates the JSON body of a car write request
pub async fn validate_car(
    State(validation): State<CarValidation>,
    request: Request,
    next: Next,
) -> Response {
    let (parts, body) = request.into_parts();

    let bytes = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => return RestError::InvalidBody(e.to_string()).into_response(),
    };

    let candidate: Value = match serde_json::from_slice(&bytes) {
        Ok(value) => value,
        Err(e) => return RestError::InvalidBody(e.to_string()).into_response(),
    };

    match validation.check(&candidate) {
        Ok(record) => {
            let mut request = Request::from_parts(parts, Body::from(bytes));
            request.extensions_mut().insert(ValidatedCar(record));
            next.run(request).await
        }
        Err(errors) => {
            warn!(
                method = %parts.method,
                path = %parts.uri.path(),
                fields = ?errors.fields().collect::<Vec<_>>(),
                "car payload rejected"
            );
            RestError::Validation(errors).into_response()
        }
    }
}
